//! Keeps the displayed image set in step with a playback source.

use std::path::PathBuf;

use log::{debug, info};

use crate::fade::Fade;
use crate::schedule::Schedule;
use crate::video::{Playback, VideoEvent};

/// Reported when a different set becomes the one on screen.
///
/// `None` stands for "before the first set", where the poster (if any) is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncEvent {
    pub from: Option<usize>,
    pub to: Option<usize>,
}

pub struct ImageSync {
    schedule: Schedule,
    poster: Vec<PathBuf>,
    fade: Fade<Option<usize>>,
    attached: bool,
    shown: Option<Option<usize>>,
}

impl ImageSync {
    pub fn new(schedule: Schedule, fade_duration: f32) -> Self {
        Self {
            schedule,
            poster: Vec::new(),
            fade: Fade::new(fade_duration),
            attached: false,
            shown: None,
        }
    }

    /// Images shown while playback is before the first set.
    pub fn with_poster(mut self, poster: Vec<PathBuf>) -> Self {
        self.poster = poster;
        self
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn poster(&self) -> &[PathBuf] {
        &self.poster
    }

    /// Starts reacting to playback events.
    ///
    /// The strip stays as it is until the next event; use [`ImageSync::attach_to`]
    /// to catch up with a source that moved while detached.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Starts reacting to playback events and reselects for `source`'s position.
    pub fn attach_to<P: Playback + ?Sized>(&mut self, source: &P) -> Option<SyncEvent> {
        self.attached = true;
        self.seek_to(source.current_time())
    }

    /// Stops reacting to playback events. A running fade still completes.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Reacts to one playback event, `time` being the position when it fired.
    pub fn handle_event(&mut self, event: VideoEvent, time: f64) -> Option<SyncEvent> {
        if !self.attached {
            debug!("detached, ignoring {:?}", event);
            return None;
        }
        match event {
            VideoEvent::TimeUpdate | VideoEvent::Seeked | VideoEvent::Play | VideoEvent::Ended => {
                self.seek_to(time)
            }
            VideoEvent::Seeking | VideoEvent::Pause => None,
        }
    }

    /// Drains `source`'s pending events. Returns the last switch that happened.
    pub fn sync_with<P: Playback + ?Sized>(&mut self, source: &mut P) -> Option<SyncEvent> {
        let time = source.current_time();
        let mut switched = None;
        for event in source.poll_events() {
            if let Some(e) = self.handle_event(event, time) {
                switched = Some(e);
            }
        }
        switched
    }

    /// Retargets the fade at the set active at `time`.
    fn seek_to(&mut self, time: f64) -> Option<SyncEvent> {
        let target = self.schedule.select(time);
        // A blank strip has nothing to fade out
        let blank = self.poster.is_empty() && self.fade.displayed() == Some(&None);
        let swapped = if blank && target.is_some() {
            self.fade.show(target)
        } else {
            self.fade.set_target(target)?
        };
        Some(self.record_switch(swapped))
    }

    /// Advances the running fade by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Option<SyncEvent> {
        let swapped = self.fade.update(dt)?;
        Some(self.record_switch(swapped))
    }

    fn record_switch(&mut self, to: Option<usize>) -> SyncEvent {
        let from = self.shown.flatten();
        self.shown = Some(to);
        match to {
            Some(index) => info!(
                "showing image set {} ({} image(s), from {:.2}s)",
                index,
                self.schedule.get(index).map_or(0, |set| set.images.len()),
                self.schedule.get(index).map_or(0.0, |set| set.time)
            ),
            None if self.poster.is_empty() => info!("before the first image set, strip left empty"),
            None => info!("before the first image set, showing poster"),
        }
        SyncEvent { from, to }
    }

    /// Index of the set on screen. `None` before any selection or while the
    /// poster is shown.
    pub fn displayed_set(&self) -> Option<usize> {
        self.fade.displayed().copied().flatten()
    }

    /// Index of the set the strip is heading towards.
    pub fn target_set(&self) -> Option<usize> {
        self.fade.target().copied().flatten()
    }

    pub fn displayed_images(&self) -> &[PathBuf] {
        match self.fade.displayed() {
            Some(Some(index)) => self
                .schedule
                .get(*index)
                .map_or(&[][..], |set| set.images.as_slice()),
            Some(None) => &self.poster,
            None => &[],
        }
    }

    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_fading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ImageSet;

    fn sync(fade: f32) -> ImageSync {
        let schedule = Schedule::new(vec![
            ImageSet::new(2.0, vec![PathBuf::from("a.png")]),
            ImageSet::new(5.0, vec![PathBuf::from("b.png"), PathBuf::from("c.png")]),
        ])
        .unwrap();
        let mut sync = ImageSync::new(schedule, fade).with_poster(vec![PathBuf::from("poster.png")]);
        sync.attach();
        sync
    }

    #[test]
    fn detached_sync_ignores_events() {
        let mut s = sync(0.0);
        s.detach();
        assert_eq!(s.handle_event(VideoEvent::TimeUpdate, 3.0), None);
        assert!(s.displayed_images().is_empty());
    }

    #[test]
    fn poster_is_shown_before_first_set() {
        let mut s = sync(0.0);
        let event = s.handle_event(VideoEvent::Play, 0.5);
        assert_eq!(event, Some(SyncEvent { from: None, to: None }));
        assert_eq!(s.displayed_images(), &[PathBuf::from("poster.png")]);
        assert_eq!(s.displayed_set(), None);
    }

    #[test]
    fn instant_switches_follow_time() {
        let mut s = sync(0.0);
        s.handle_event(VideoEvent::TimeUpdate, 2.5);
        assert_eq!(s.displayed_set(), Some(0));
        let event = s.handle_event(VideoEvent::TimeUpdate, 6.0);
        assert_eq!(event, Some(SyncEvent { from: Some(0), to: Some(1) }));
        assert_eq!(s.displayed_images().len(), 2);
    }

    #[test]
    fn seeking_and_pause_are_ignored() {
        let mut s = sync(0.0);
        s.handle_event(VideoEvent::TimeUpdate, 2.5);
        assert_eq!(s.handle_event(VideoEvent::Seeking, 6.0), None);
        assert_eq!(s.handle_event(VideoEvent::Pause, 6.0), None);
        assert_eq!(s.displayed_set(), Some(0));
    }

    #[test]
    fn fade_swaps_at_midpoint() {
        let mut s = sync(0.5);
        s.handle_event(VideoEvent::Seeked, 2.0);
        s.update(0.5);
        assert!(!s.is_fading());

        assert_eq!(s.handle_event(VideoEvent::TimeUpdate, 5.25), None);
        assert!(s.is_fading());
        assert_eq!(s.displayed_set(), Some(0));
        assert_eq!(s.target_set(), Some(1));

        let event = s.update(0.5);
        assert_eq!(event, Some(SyncEvent { from: Some(0), to: Some(1) }));
        assert_eq!(s.displayed_set(), Some(1));
        assert!(s.opacity() < 0.01);
    }

    #[test]
    fn first_set_after_blank_strip_fades_in_at_once() {
        let schedule = Schedule::new(vec![
            ImageSet::new(2.0, vec![PathBuf::from("a.png")]),
            ImageSet::new(5.0, vec![PathBuf::from("b.png")]),
        ])
        .unwrap();
        let mut s = ImageSync::new(schedule, 0.4);
        s.attach();

        s.handle_event(VideoEvent::Seeked, 0.0);
        s.update(1.0);
        assert!(s.displayed_images().is_empty());

        let event = s.handle_event(VideoEvent::TimeUpdate, 3.0);
        assert_eq!(event, Some(SyncEvent { from: None, to: Some(0) }));
        assert_eq!(s.displayed_set(), Some(0));
        assert_eq!(s.displayed_images(), &[PathBuf::from("a.png")]);
        assert!(s.is_fading());
        assert_eq!(s.opacity(), 0.0);

        // Leaving a real set still fades it out first
        s.update(1.0);
        assert_eq!(s.handle_event(VideoEvent::TimeUpdate, 5.5), None);
        assert_eq!(s.displayed_set(), Some(0));
    }

    #[test]
    fn poster_still_fades_out_before_first_set() {
        let mut s = sync(0.4);
        s.handle_event(VideoEvent::Seeked, 0.0);
        s.update(1.0);
        assert_eq!(s.handle_event(VideoEvent::TimeUpdate, 3.0), None);
        assert_eq!(s.displayed_images(), &[PathBuf::from("poster.png")]);
        assert_eq!(s.target_set(), Some(0));
    }

    #[test]
    fn ended_event_selects_last_set() {
        let mut s = sync(0.0);
        let event = s.handle_event(VideoEvent::Ended, 9.0);
        assert_eq!(event, Some(SyncEvent { from: None, to: Some(1) }));
    }

    #[test]
    fn attach_to_catches_up_with_paused_source() {
        use crate::video::SimulatedVideo;

        let mut s = sync(0.0);
        let mut video = SimulatedVideo::new(10.0).unwrap();
        video.seek(2.5);
        s.sync_with(&mut video);
        assert_eq!(s.displayed_set(), Some(0));

        s.detach();
        video.seek(6.0);
        s.sync_with(&mut video);
        assert_eq!(s.displayed_set(), Some(0));

        let event = s.attach_to(&video);
        assert!(s.is_attached());
        assert_eq!(event, Some(SyncEvent { from: Some(0), to: Some(1) }));
        assert_eq!(s.displayed_set(), Some(1));
    }

    #[test]
    fn repeated_updates_in_same_set_do_not_restart_fade() {
        let mut s = sync(0.5);
        s.handle_event(VideoEvent::TimeUpdate, 2.0);
        s.update(0.25);
        let opacity = s.opacity();
        s.handle_event(VideoEvent::TimeUpdate, 2.25);
        assert_eq!(s.opacity(), opacity);
    }
}
