use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

use slideshow_sync::config;
use slideshow_sync::constants::*;
use slideshow_sync::engine::Engine;
use slideshow_sync::ffmpeg::Ffmpeg;
use slideshow_sync::player::SyncEngine;

/// Image strip that follows video playback.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file describing the video and its image sets
    config: PathBuf,

    /// Fade duration in milliseconds, overrides the config
    #[arg(long)]
    fade_ms: Option<u64>,

    /// Playback rate, overrides the config
    #[arg(long)]
    rate: Option<f64>,

    /// Restart the video when it ends
    #[arg(long = "loop")]
    looping: bool,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// Render at a fixed frame rate into this mp4 file (needs ffmpeg)
    #[arg(long, value_name = "MP4")]
    record: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialise logging: {}", e);
    }

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_from_path(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(ms) = args.fade_ms {
        config.fade_duration = ms as f32 / 1000.0;
    }
    if let Some(rate) = args.rate {
        config.video.rate = rate;
    }
    // Recording never loops, it would never end
    config.video.looping = (config.video.looping || args.looping) && args.record.is_none();

    info!(
        "{} image set(s) over {:.1}s of video",
        config.schedule.len(),
        config.video.duration
    );

    let mut engine = SyncEngine::new(&config, !args.paused || args.record.is_some())?;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Slideshow Sync")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    engine.initialize(&mut rl, &thread)?;

    let mut ffmpeg = match &args.record {
        Some(path) => Some(Ffmpeg::new(RENDER_WIDTH, RENDER_HEIGHT, FPS, path)?),
        None => None,
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {}", e))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Recording needs a steady clock, the window can stutter
        let dt = if ffmpeg.is_some() { FRAME_TIME } else { rl.get_frame_time() };

        let running = engine.render_frame(dt, &mut rl, &thread, &mut framebuffer);

        // Draw inverted copy of framebuffer to the screen for feedback
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some(recorder) = ffmpeg.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| anyhow::anyhow!("failed to read back framebuffer: {}", e))?;
            recorder.write(&image)?;
            if !running {
                break;
            }
        }
    }

    // Closes the pipe and waits for the encoder
    drop(ffmpeg);
    Ok(())
}
