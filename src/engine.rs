use anyhow::Result;
use raylib::prelude::*;

pub trait Engine {
    /// Loads everything the engine draws. Fails when there is nothing to show.
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()>;
    /// Advances by `dt` seconds and draws into `framebuffer`. Returns false once done.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool;
}
