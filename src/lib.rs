//! Shows chaptered image sets in step with video playback.
//!
//! A [`schedule::Schedule`] maps activation times to image sets, an
//! [`sync::ImageSync`] follows a [`video::Playback`] source and fades between
//! sets as playback crosses their activation times, and the [`player`] draws the
//! result with raylib.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod fade;
pub mod ffmpeg;
pub mod player;
pub mod schedule;
pub mod state;
pub mod strip;
pub mod sync;
pub mod texture_loader;
pub mod video;

pub use error::{ConfigError, ScheduleError};
pub use schedule::{ImageSet, Schedule};
pub use sync::{ImageSync, SyncEvent};
pub use video::{Playback, SimulatedVideo, VideoEvent};
