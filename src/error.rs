use std::path::PathBuf;
use thiserror::Error;

/// Reasons a list of image sets cannot be used as a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("the schedule contains no image sets")]
    Empty,

    #[error("image set {index} has an invalid activation time (must be finite and >= 0)")]
    InvalidTime { index: usize },

    #[error("image set {index} activates at or before the previous set")]
    OutOfOrder { index: usize },

    #[error("image set {index} has no images")]
    NoImages { index: usize },

    #[error("image {image} of set {set} has an empty path")]
    EmptyImagePath { set: usize, image: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid timestamp {0:?} (expected seconds or [hh:]mm:ss[.fff])")]
    Timestamp(String),

    #[error("invalid video duration {0} (must be finite and > 0)")]
    Duration(f64),

    #[error("invalid playback rate {0} (must be finite and > 0)")]
    Rate(f64),

    #[error("image set {index} activates at {time}s, after the end of the video ({duration}s)")]
    PastEnd { index: usize, time: f64, duration: f64 },

    #[error("poster image {index} has an empty path")]
    EmptyPosterPath { index: usize },

    #[error("unsupported image format: {0:?}")]
    UnsupportedImage(PathBuf),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
