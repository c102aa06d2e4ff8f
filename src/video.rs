//! Playback sources.
//!
//! The strip only needs to know where playback is and to hear about the moments
//! that position changes, so a video is anything implementing [`Playback`].
//! [`SimulatedVideo`] is a clock-driven player that emits the same event
//! sequence a browser video element does.

use log::debug;

use crate::constants::TIME_UPDATE_INTERVAL;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEvent {
    Play,
    Pause,
    /// Playback position moved during normal playback.
    TimeUpdate,
    /// A seek started.
    Seeking,
    /// A seek completed; the position is the new one.
    Seeked,
    /// Playback reached the end and stopped.
    Ended,
}

pub trait Playback {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    /// Drains the events emitted since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<VideoEvent>;
}

#[derive(Debug, Clone)]
pub struct SimulatedVideo {
    duration: f64,
    position: f64,
    rate: f64,
    paused: bool,
    looping: bool,
    time_update_interval: f64,
    since_time_update: f64,
    events: Vec<VideoEvent>,
}

impl SimulatedVideo {
    /// Creates a paused video positioned at 0.
    pub fn new(duration: f64) -> Result<Self, ConfigError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigError::Duration(duration));
        }
        Ok(Self {
            duration,
            position: 0.0,
            rate: 1.0,
            paused: true,
            looping: false,
            time_update_interval: TIME_UPDATE_INTERVAL,
            since_time_update: 0.0,
            events: Vec::new(),
        })
    }

    pub fn with_rate(mut self, rate: f64) -> Result<Self, ConfigError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Rate(rate));
        }
        self.rate = rate;
        Ok(self)
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Media time between two `TimeUpdate` events. Zero emits one per `advance`.
    pub fn with_time_update_interval(mut self, interval: f64) -> Self {
        self.time_update_interval = interval.max(0.0);
        self
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn has_ended(&self) -> bool {
        self.paused && self.position >= self.duration
    }

    pub fn play(&mut self) {
        if !self.paused {
            return;
        }
        if self.position >= self.duration {
            // Playing an ended video restarts it
            self.seek(0.0);
        }
        self.paused = false;
        self.events.push(VideoEvent::Play);
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.events.push(VideoEvent::Pause);
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Jumps to `time`, clamped to the video bounds.
    pub fn seek(&mut self, time: f64) {
        let target = if time.is_nan() { 0.0 } else { time.clamp(0.0, self.duration) };
        debug!("seek {:.3}s -> {:.3}s", self.position, target);
        self.events.push(VideoEvent::Seeking);
        self.position = target;
        self.since_time_update = 0.0;
        self.events.push(VideoEvent::Seeked);
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.position + delta);
    }

    /// Moves the clock forward by `dt` seconds of wall time.
    pub fn advance(&mut self, dt: f64) {
        if self.paused || !(dt > 0.0) {
            return;
        }

        let step = dt * self.rate;
        self.position += step;
        self.since_time_update += step;

        if self.position >= self.duration {
            if self.looping {
                self.events.push(VideoEvent::Seeking);
                self.position = self.position.rem_euclid(self.duration);
                self.since_time_update = 0.0;
                self.events.push(VideoEvent::Seeked);
            } else {
                self.position = self.duration;
                self.paused = true;
                self.since_time_update = 0.0;
                self.events.push(VideoEvent::TimeUpdate);
                self.events.push(VideoEvent::Pause);
                self.events.push(VideoEvent::Ended);
            }
            return;
        }

        if self.since_time_update >= self.time_update_interval {
            self.since_time_update = if self.time_update_interval > 0.0 {
                self.since_time_update % self.time_update_interval
            } else {
                0.0
            };
            self.events.push(VideoEvent::TimeUpdate);
        }
    }
}

impl Playback for SimulatedVideo {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn poll_events(&mut self) -> Vec<VideoEvent> {
        std::mem::take(&mut self.events)
    }
}
