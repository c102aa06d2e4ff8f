use log::debug;

use crate::state::FadePhase;

/// Timed fade between successive values.
///
/// Switching to a new value first fades the displayed one out, swaps it for the
/// newest requested value, then fades back in. Each half lasts `duration`.
#[derive(Debug, Clone)]
pub struct Fade<T> {
    displayed: Option<T>,
    pending: Option<T>,
    phase: FadePhase,
    elapsed: f32,
    duration: f32,
}

impl<T: Clone + PartialEq + std::fmt::Debug> Fade<T> {
    pub fn new(duration: f32) -> Self {
        Self {
            displayed: None,
            pending: None,
            phase: FadePhase::Idle,
            elapsed: 0.0,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// The value currently on screen, `None` until the first target is set.
    pub fn displayed(&self) -> Option<&T> {
        self.displayed.as_ref()
    }

    /// The value that will be on screen once the fade settles.
    pub fn target(&self) -> Option<&T> {
        self.pending.as_ref().or(self.displayed.as_ref())
    }

    /// True while the "fading" class would be applied.
    pub fn is_fading(&self) -> bool {
        self.phase != FadePhase::Idle
    }

    pub fn opacity(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        match self.phase {
            FadePhase::Idle => 1.0,
            FadePhase::FadingOut => 1.0 - t,
            FadePhase::FadingIn => t,
        }
    }

    /// Requests `value` be shown. Returns it if it was swapped in immediately.
    pub fn set_target(&mut self, value: T) -> Option<T> {
        if self.displayed.is_none() {
            // Nothing on screen yet, no need to fade anything out
            return Some(self.show(value));
        }

        let is_displayed = self.displayed.as_ref() == Some(&value);
        match self.phase {
            FadePhase::Idle => {
                if is_displayed {
                    return None;
                }
                if self.duration <= 0.0 {
                    self.displayed = Some(value.clone());
                    return Some(value);
                }
                debug!("fading out towards {:?}", value);
                self.phase = FadePhase::FadingOut;
                self.elapsed = 0.0;
                self.pending = Some(value);
            }
            FadePhase::FadingOut => {
                if is_displayed {
                    debug!("target back to {:?}, reversing fade", value);
                    self.phase = FadePhase::FadingIn;
                    self.elapsed = self.duration - self.elapsed;
                    self.pending = None;
                } else {
                    self.pending = Some(value);
                }
            }
            FadePhase::FadingIn => {
                if !is_displayed {
                    debug!("retargeting to {:?} while fading in", value);
                    self.phase = FadePhase::FadingOut;
                    self.elapsed = self.duration - self.elapsed;
                    self.pending = Some(value);
                }
            }
        }
        None
    }

    /// Swaps `value` in at once and fades it in, skipping the fade out.
    pub fn show(&mut self, value: T) -> T {
        self.displayed = Some(value.clone());
        self.pending = None;
        self.elapsed = 0.0;
        self.phase = if self.duration > 0.0 { FadePhase::FadingIn } else { FadePhase::Idle };
        value
    }

    /// Advances the fade by `dt` seconds. Returns the value swapped in, if any.
    pub fn update(&mut self, dt: f32) -> Option<T> {
        if !(dt > 0.0) {
            return None;
        }

        match self.phase {
            FadePhase::Idle => None,
            FadePhase::FadingOut => {
                self.elapsed += dt;
                if self.elapsed < self.duration {
                    return None;
                }
                let leftover = self.elapsed - self.duration;
                let swapped = self.pending.take();
                if let Some(value) = &swapped {
                    self.displayed = Some(value.clone());
                }
                if leftover >= self.duration {
                    self.phase = FadePhase::Idle;
                    self.elapsed = 0.0;
                } else {
                    self.phase = FadePhase::FadingIn;
                    self.elapsed = leftover;
                }
                swapped
            }
            FadePhase::FadingIn => {
                self.elapsed += dt;
                if self.elapsed >= self.duration {
                    self.phase = FadePhase::Idle;
                    self.elapsed = 0.0;
                }
                None
            }
        }
    }
}
