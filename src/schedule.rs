//! Time-keyed image sets.
//!
//! A [`Schedule`] is an ordered list of [`ImageSet`]s. The set active at a given
//! playback time is the one with the latest activation time not exceeding it.

use std::path::PathBuf;

use crate::error::ScheduleError;

/// Images shown together from `time` until the next set activates.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSet {
    /// Activation time in seconds.
    pub time: f64,
    pub images: Vec<PathBuf>,
}

impl ImageSet {
    pub fn new(time: f64, images: Vec<PathBuf>) -> Self {
        Self { time, images }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    sets: Vec<ImageSet>,
}

impl Schedule {
    /// Validates `sets` and builds a schedule from them.
    ///
    /// Sets must already be sorted by strictly increasing activation time;
    /// nothing is reordered.
    pub fn new(sets: Vec<ImageSet>) -> Result<Self, ScheduleError> {
        if sets.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let mut previous: Option<f64> = None;
        for (index, set) in sets.iter().enumerate() {
            if !set.time.is_finite() || set.time < 0.0 {
                return Err(ScheduleError::InvalidTime { index });
            }
            if previous.is_some_and(|p| set.time <= p) {
                return Err(ScheduleError::OutOfOrder { index });
            }
            if set.images.is_empty() {
                return Err(ScheduleError::NoImages { index });
            }
            if let Some(image) = set.images.iter().position(|p| p.as_os_str().is_empty()) {
                return Err(ScheduleError::EmptyImagePath { set: index, image });
            }
            previous = Some(set.time);
        }

        Ok(Self { sets })
    }

    /// Index of the set active at `time`, if any.
    pub fn select(&self, time: f64) -> Option<usize> {
        if time.is_nan() {
            return None;
        }
        // Number of sets whose activation time has been reached
        let reached = self.sets.partition_point(|set| set.time <= time);
        reached.checked_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&ImageSet> {
        self.sets.get(index)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageSet> {
        self.sets.iter()
    }

    pub fn first_time(&self) -> f64 {
        self.sets[0].time
    }

    /// Activation time of the first set strictly after `time`.
    pub fn next_change_after(&self, time: f64) -> Option<f64> {
        let reached = self.sets.partition_point(|set| set.time <= time);
        self.sets.get(reached).map(|set| set.time)
    }

    /// Every image path referenced by the schedule, in order of first use.
    pub fn image_paths(&self) -> Vec<&PathBuf> {
        let mut paths: Vec<&PathBuf> = Vec::new();
        for path in self.sets.iter().flat_map(|set| set.images.iter()) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}
