use raylib::prelude::*;

use crate::constants::*;
use crate::schedule::Schedule;
use crate::sync::ImageSync;
use crate::texture_loader::TextureCache;
use crate::video::Playback;

/// Splits `area` into `count` equal columns separated by `gap` pixels.
pub fn strip_cells(count: usize, area: Rectangle, gap: f32) -> Vec<Rectangle> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = gap * (count - 1) as f32;
    let width = ((area.width - gaps) / count as f32).max(0.0);
    (0..count)
        .map(|i| Rectangle::new(area.x + i as f32 * (width + gap), area.y, width, area.height))
        .collect()
}

/// Largest rectangle with the texture's aspect ratio centered in `cell`.
/// Images are never scaled up.
pub fn fit_in(tex_width: f32, tex_height: f32, cell: Rectangle) -> Rectangle {
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return Rectangle::new(cell.x + cell.width * 0.5, cell.y + cell.height * 0.5, 0.0, 0.0);
    }
    let scale = (cell.width / tex_width).min(cell.height / tex_height).min(1.0);
    let width = tex_width * scale;
    let height = tex_height * scale;
    Rectangle::new(
        cell.x + (cell.width - width) * 0.5,
        cell.y + (cell.height - height) * 0.5,
        width,
        height,
    )
}

/// `m:ss`, or `h:mm:ss` past an hour.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0).floor() as u64 } else { 0 };
    let (hours, minutes, secs) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * opacity.clamp(0.0, 1.0)) as u8)
}

pub struct ImageStrip {
    area: Rectangle,
}

impl ImageStrip {
    pub fn new() -> Self {
        let margin = RENDER_WIDTH as f32 * STRIP_MARGIN;
        Self {
            area: Rectangle::new(
                margin,
                RENDER_HEIGHT as f32 * STRIP_TOP,
                RENDER_WIDTH as f32 - margin * 2.0,
                RENDER_HEIGHT as f32 * STRIP_HEIGHT,
            ),
        }
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    /// Draws the images on screen at the sync's current opacity.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, sync: &ImageSync, textures: &TextureCache) {
        let images = sync.displayed_images();
        let tint = with_opacity(Color::WHITE, sync.opacity());

        for (path, cell) in images.iter().zip(strip_cells(images.len(), self.area, STRIP_GAP)) {
            match textures.get(path) {
                Some(texture) => {
                    let tex_width = texture.width() as f32;
                    let tex_height = texture.height() as f32;
                    d.draw_texture_pro(
                        texture,
                        Rectangle::new(0.0, 0.0, tex_width, tex_height),
                        fit_in(tex_width, tex_height, cell),
                        Vector2::new(0.0, 0.0),
                        0.0,
                        tint,
                    );
                }
                None => {
                    // Image failed to load, keep its slot visible
                    d.draw_rectangle_lines_ex(cell, 2.0, with_opacity(Color::DARKGRAY, sync.opacity()));
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    d.draw_text(
                        &name,
                        (cell.x + 12.0) as i32,
                        (cell.y + 12.0) as i32,
                        20,
                        with_opacity(Color::GRAY, sync.opacity()),
                    );
                }
            }
        }
    }
}

impl Default for ImageStrip {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress bar with one marker per image set and the active span highlighted.
pub fn draw_progress<D: RaylibDraw, P: Playback + ?Sized>(
    d: &mut D,
    video: &P,
    schedule: &Schedule,
    target_set: Option<usize>,
) {
    let margin = RENDER_WIDTH as f32 * STRIP_MARGIN;
    let bar = Rectangle::new(
        margin,
        RENDER_HEIGHT as f32 * PROGRESS_BAR_Y,
        RENDER_WIDTH as f32 - margin * 2.0,
        PROGRESS_BAR_HEIGHT,
    );
    let duration = video.duration();
    let x_at = |time: f64| bar.x + bar.width * (time / duration).clamp(0.0, 1.0) as f32;

    d.draw_rectangle_rec(bar, Color::new(60, 60, 60, 255));

    if let Some(set) = target_set.and_then(|i| schedule.get(i)) {
        let end = schedule.next_change_after(set.time).unwrap_or(duration);
        let start_x = x_at(set.time);
        d.draw_rectangle_rec(
            Rectangle::new(start_x, bar.y, x_at(end) - start_x, bar.height),
            Color::new(90, 90, 140, 255),
        );
    }

    let played = x_at(video.current_time());
    d.draw_rectangle_rec(
        Rectangle::new(bar.x, bar.y + bar.height * 0.25, played - bar.x, bar.height * 0.5),
        Color::SKYBLUE,
    );

    for set in schedule.iter() {
        let x = x_at(set.time) as i32;
        d.draw_rectangle(x - 1, (bar.y - 6.0) as i32, 3, (bar.height + 12.0) as i32, Color::WHITE);
    }

    d.draw_circle(played as i32, (bar.y + bar.height * 0.5) as i32, 9.0, Color::WHITE);

    let label = format!(
        "{} / {}{}",
        format_clock(video.current_time()),
        format_clock(duration),
        if video.is_paused() { "  (paused)" } else { "" }
    );
    d.draw_text(&label, bar.x as i32, (bar.y + bar.height + 16.0) as i32, 28, Color::LIGHTGRAY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_share_width_and_respect_gaps() {
        let cells = strip_cells(3, Rectangle::new(10.0, 20.0, 320.0, 100.0), 10.0);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].width, 100.0);
        assert_eq!(cells[1].x, 120.0);
        assert_eq!(cells[2].x, 230.0);
        assert!(cells.iter().all(|c| c.y == 20.0 && c.height == 100.0));
        assert!(strip_cells(0, Rectangle::new(0.0, 0.0, 10.0, 10.0), 2.0).is_empty());
    }

    #[test]
    fn fit_keeps_aspect_and_centers() {
        let cell = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        let wide = fit_in(400.0, 100.0, cell);
        assert_eq!((wide.width, wide.height), (200.0, 50.0));
        assert_eq!((wide.x, wide.y), (0.0, 25.0));

        let small = fit_in(50.0, 50.0, cell);
        assert_eq!((small.width, small.height), (50.0, 50.0));
        assert_eq!((small.x, small.y), (75.0, 25.0));
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(3725.0), "1:02:05");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }
}
