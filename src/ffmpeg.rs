use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result};
use log::{info, warn};
use raylib::prelude::*;

/// Pipes raw RGBA frames into an ffmpeg process encoding an h264 mp4.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl Ffmpeg {
    pub fn new(width: i32, height: i32, fps: u32, video_path: &Path) -> Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(video_path)
            .spawn()
            .context("failed to start ffmpeg process")?;
        let stdin = process.stdin.take().context("failed to open ffmpeg stdin")?;
        info!("recording to {}", video_path.display());
        Ok(Ffmpeg { process, stdin: Some(stdin) })
    }

    pub fn write(&mut self, image: &Image) -> Result<()> {
        let stdin = self.stdin.as_mut().context("ffmpeg stdin already closed")?;
        let row_len = image.width() as usize * 4; // 4 bytes per pixel (RGBA)
        let height = image.height() as usize;

        // SAFETY: a framebuffer image holds width * height RGBA8 pixels
        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, row_len * height) };

        // raylib hands render textures over bottom to top, ffmpeg wants top to bottom
        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row).context("failed to write frame to ffmpeg")?;
        }
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg finish the file
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!("recording finished"),
            Ok(status) => warn!("ffmpeg exited with {}", status),
            Err(e) => warn!("failed to wait for ffmpeg: {}", e),
        }
    }
}
