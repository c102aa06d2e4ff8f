#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FadePhase {
    Idle,      // Showing the displayed set at full opacity
    FadingOut, // Displayed set is disappearing, a new one is pending
    FadingIn,  // Newly swapped set is appearing
}
