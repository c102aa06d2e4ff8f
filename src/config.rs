//! TOML configuration of a synchronized strip.
//!
//! ```toml
//! fade_ms = 400
//! poster = ["poster.png"]
//!
//! [video]
//! duration = "2:30"
//! rate = 1.0
//! looping = false
//!
//! [[sets]]
//! time = 0
//! images = ["intro.png"]
//!
//! [[sets]]
//! time = "1:05.5"
//! dir = "chapter2"
//! ```
//!
//! Relative paths resolve against the directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{FADE_DURATION, TIME_UPDATE_INTERVAL};
use crate::error::ConfigError;
use crate::schedule::{ImageSet, Schedule};
use crate::sync::ImageSync;
use crate::texture_loader::{is_supported_image, load_sorted_image_paths};
use crate::video::SimulatedVideo;

/// A point in the video, written either as seconds or as `[hh:]mm:ss[.fff]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Seconds(f64),
    Text(String),
}

impl Timestamp {
    fn seconds(&self) -> Result<f64, ConfigError> {
        match self {
            Timestamp::Seconds(secs) => Ok(*secs),
            Timestamp::Text(text) => parse_timestamp(text),
        }
    }
}

/// Parses `"90"`, `"1:30"`, `"01:02:03.25"` into seconds.
pub fn parse_timestamp(text: &str) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::Timestamp(text.to_string());
    let text = text.trim();

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid());
    }

    let (last, leading) = parts.split_last().ok_or_else(invalid)?;
    let seconds: f64 = last.parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 || (!leading.is_empty() && seconds >= 60.0) {
        return Err(invalid());
    }

    let mut total = seconds;
    let mut unit = 60.0;
    for (position, part) in leading.iter().rev().enumerate() {
        let value: u32 = part.parse().map_err(|_| invalid())?;
        // Minutes are bounded only when hours are given
        if position == 0 && leading.len() == 2 && value >= 60 {
            return Err(invalid());
        }
        total += f64::from(value) * unit;
        unit *= 60.0;
    }
    Ok(total)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    fade_ms: Option<u64>,
    #[serde(default)]
    poster: Vec<PathBuf>,
    video: RawVideo,
    #[serde(default)]
    sets: Vec<RawSet>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVideo {
    duration: Timestamp,
    rate: Option<f64>,
    #[serde(default)]
    looping: bool,
    time_update_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSet {
    time: Timestamp,
    #[serde(default)]
    images: Vec<PathBuf>,
    dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoConfig {
    pub duration: f64,
    pub rate: f64,
    pub looping: bool,
    pub time_update_interval: f64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub fade_duration: f32,
    pub video: VideoConfig,
    pub poster: Vec<PathBuf>,
    pub schedule: Schedule,
}

impl Config {
    /// A paused player for the configured video.
    pub fn video(&self) -> Result<SimulatedVideo, ConfigError> {
        Ok(SimulatedVideo::new(self.video.duration)?
            .with_rate(self.video.rate)?
            .with_looping(self.video.looping)
            .with_time_update_interval(self.video.time_update_interval))
    }

    /// An attached sync for the configured schedule.
    pub fn image_sync(&self) -> ImageSync {
        let mut sync = ImageSync::new(self.schedule.clone(), self.fade_duration)
            .with_poster(self.poster.clone());
        sync.attach();
        sync
    }
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse(&content, base_dir)
}

/// Parses configuration text, resolving relative paths against `base_dir`.
pub fn parse(content: &str, base_dir: &Path) -> Result<Config, ConfigError> {
    let raw: RawConfig = toml::from_str(content)?;

    let duration = raw.video.duration.seconds()?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ConfigError::Duration(duration));
    }
    let rate = raw.video.rate.unwrap_or(1.0);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConfigError::Rate(rate));
    }

    if let Some(index) = raw.poster.iter().position(|p| p.as_os_str().is_empty()) {
        return Err(ConfigError::EmptyPosterPath { index });
    }
    let poster = resolve_images(&raw.poster, base_dir)?;

    let mut sets = Vec::with_capacity(raw.sets.len());
    for (index, set) in raw.sets.iter().enumerate() {
        let time = set.time.seconds()?;
        if time > duration {
            return Err(ConfigError::PastEnd { index, time, duration });
        }

        let mut images = resolve_images(&set.images, base_dir)?;
        if let Some(dir) = &set.dir {
            let dir = resolve(dir, base_dir);
            let found = load_sorted_image_paths(&dir).map_err(|source| ConfigError::Io {
                path: dir.clone(),
                source,
            })?;
            images.extend(found);
        }
        sets.push(ImageSet::new(time, images));
    }

    Ok(Config {
        fade_duration: raw.fade_ms.map_or(FADE_DURATION, |ms| ms as f32 / 1000.0),
        video: VideoConfig {
            duration,
            rate,
            looping: raw.video.looping,
            time_update_interval: raw
                .video
                .time_update_ms
                .map_or(TIME_UPDATE_INTERVAL, |ms| ms as f64 / 1000.0),
        },
        poster,
        schedule: Schedule::new(sets)?,
    })
}

fn resolve(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_relative() && !path.as_os_str().is_empty() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

fn resolve_images(paths: &[PathBuf], base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    paths
        .iter()
        .map(|path| {
            // Empty paths are reported with their position by the caller or the schedule
            if !path.as_os_str().is_empty() && !is_supported_image(path) {
                return Err(ConfigError::UnsupportedImage(path.clone()));
            }
            Ok(resolve(path, base_dir))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;

    #[test]
    fn timestamps_accept_seconds_and_clock_notation() {
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_timestamp("1:30").unwrap(), 90.0);
        assert_eq!(parse_timestamp("01:02:03.5").unwrap(), 3723.5);
        assert_eq!(parse_timestamp(" 75:00 ").unwrap(), 4500.0);
    }

    #[test]
    fn timestamps_reject_malformed_text() {
        for text in ["", "1::2", "1:2:3:4", "abc", "1:75", "1:60:00", "-3", "1:-2"] {
            assert!(parse_timestamp(text).is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn parse_resolves_paths_and_applies_defaults() {
        let config = parse(
            r#"
            poster = ["poster.png"]

            [video]
            duration = "1:00"

            [[sets]]
            time = 0
            images = ["a.png", "/abs/b.jpg"]

            [[sets]]
            time = "0:30"
            images = ["c.gif"]
            "#,
            Path::new("/media/show"),
        )
        .unwrap();

        assert_eq!(config.fade_duration, FADE_DURATION);
        assert_eq!(config.video.duration, 60.0);
        assert_eq!(config.video.rate, 1.0);
        assert_eq!(config.poster, vec![PathBuf::from("/media/show/poster.png")]);
        assert_eq!(config.schedule.len(), 2);
        let first = config.schedule.get(0).unwrap();
        assert_eq!(
            first.images,
            vec![PathBuf::from("/media/show/a.png"), PathBuf::from("/abs/b.jpg")]
        );
        assert_eq!(config.schedule.get(1).unwrap().time, 30.0);
    }

    #[test]
    fn parse_rejects_sets_past_the_end() {
        let result = parse(
            r#"
            [video]
            duration = 10

            [[sets]]
            time = 12
            images = ["a.png"]
            "#,
            Path::new("."),
        );
        assert!(matches!(result, Err(ConfigError::PastEnd { index: 0, .. })));
    }

    #[test]
    fn parse_rejects_unsupported_images() {
        let result = parse(
            r#"
            [video]
            duration = 10

            [[sets]]
            time = 0
            images = ["notes.txt"]
            "#,
            Path::new("."),
        );
        assert!(matches!(result, Err(ConfigError::UnsupportedImage(_))));
    }

    #[test]
    fn parse_rejects_empty_poster_paths() {
        let result = parse(
            r#"
            poster = ["poster.png", ""]

            [video]
            duration = 10

            [[sets]]
            time = 0
            images = ["a.png"]
            "#,
            Path::new("."),
        );
        assert!(matches!(result, Err(ConfigError::EmptyPosterPath { index: 1 })));
    }

    #[test]
    fn parse_reports_schedule_errors() {
        let result = parse(
            r#"
            [video]
            duration = 10

            [[sets]]
            time = 5
            images = ["a.png"]

            [[sets]]
            time = 1
            images = ["b.png"]
            "#,
            Path::new("."),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Schedule(ScheduleError::OutOfOrder { index: 1 }))
        ));

        let result = parse("[video]\nduration = 10\n", Path::new("."));
        assert!(matches!(result, Err(ConfigError::Schedule(ScheduleError::Empty))));
    }

    #[test]
    fn video_settings_flow_into_player() {
        let config = parse(
            r#"
            fade_ms = 0

            [video]
            duration = 20
            rate = 2.0
            looping = true
            time_update_ms = 100

            [[sets]]
            time = 0
            images = ["a.png"]
            "#,
            Path::new("."),
        )
        .unwrap();
        assert_eq!(config.fade_duration, 0.0);
        let video = config.video().unwrap();
        assert_eq!(video.rate(), 2.0);
        assert!(video.is_looping());
        assert!(config.image_sync().is_attached());
    }
}
