use anyhow::{Result, bail};
use log::{info, warn};
use raylib::prelude::*;

use crate::config::Config;
use crate::engine::Engine;
use crate::player::controls::{self, Command};
use crate::strip::{ImageStrip, draw_progress};
use crate::sync::ImageSync;
use crate::texture_loader::TextureCache;
use crate::video::SimulatedVideo;

/// Plays the simulated video and keeps the image strip in step with it.
pub struct SyncEngine {
    video: SimulatedVideo,
    sync: ImageSync,
    strip: ImageStrip,
    textures: TextureCache,
    autoplay: bool,
}

impl SyncEngine {
    pub fn new(config: &Config, autoplay: bool) -> Result<Self> {
        Ok(Self {
            video: config.video()?,
            sync: config.image_sync(),
            strip: ImageStrip::new(),
            textures: TextureCache::new(),
            autoplay,
        })
    }

    pub fn video(&self) -> &SimulatedVideo {
        &self.video
    }

    pub fn sync(&self) -> &ImageSync {
        &self.sync
    }

    /// The video reached its end and the last switch has settled.
    pub fn is_finished(&self) -> bool {
        self.video.has_ended() && !self.sync.is_fading()
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::ToggleSync => {
                if self.sync.is_attached() {
                    info!("strip detached from playback");
                    self.sync.detach();
                } else {
                    info!("strip attached to playback");
                    // Catch up with wherever playback went meanwhile
                    self.sync.attach_to(&self.video);
                }
            }
            command => controls::apply(&mut self.video, command),
        }
    }

    /// Moves playback and the strip forward by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.video.advance(f64::from(dt));
        self.sync.sync_with(&mut self.video);
        self.sync.update(dt);
    }
}

impl Engine for SyncEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()> {
        let schedule = self.sync.schedule();
        let paths = self.sync.poster().iter().chain(schedule.image_paths());
        let failed = self.textures.preload(rl, thread, paths);

        if self.textures.is_empty() {
            bail!("none of the configured images could be loaded");
        }
        if failed > 0 {
            warn!("{} image(s) could not be loaded and will show as placeholders", failed);
        }
        info!(
            "loaded {} image(s) for {} set(s)",
            self.textures.len(),
            schedule.len()
        );

        // Show what belongs at 0s before anything plays
        self.video.seek(0.0);
        if self.autoplay {
            self.video.play();
        }
        self.sync.sync_with(&mut self.video);
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        for command in controls::pressed_commands(rl) {
            self.handle_command(command);
        }

        self.step(dt);

        let video = &self.video;
        let sync = &self.sync;
        let strip = &self.strip;
        let textures = &self.textures;

        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);

            strip.draw(&mut d, sync, textures);
            draw_progress(&mut d, video, sync.schedule(), sync.target_set());

            if !sync.is_attached() {
                d.draw_text("strip detached (D to reattach)", 20, 20, 24, Color::ORANGE);
            }
        });

        !self.is_finished()
    }
}
