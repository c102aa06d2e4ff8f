pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame when recording (seconds)

pub const FADE_DURATION: f32 = 0.4;           // Each half of a set switch (seconds)
pub const TIME_UPDATE_INTERVAL: f64 = 0.25;   // Media time between two TimeUpdate events (seconds)
pub const SEEK_STEP: f64 = 5.0;               // Arrow key seek distance (seconds)

pub const STRIP_MARGIN: f32 = 0.05;           // Outer margin, fraction of the render width
pub const STRIP_TOP: f32 = 0.08;              // Top of the strip, fraction of the render height
pub const STRIP_HEIGHT: f32 = 0.70;           // Strip height, fraction of the render height
pub const STRIP_GAP: f32 = 24.0;              // Space between two images (pixels)

pub const PROGRESS_BAR_Y: f32 = 0.88;         // Progress bar, fraction of the render height
pub const PROGRESS_BAR_HEIGHT: f32 = 12.0;    // Progress bar thickness (pixels)
