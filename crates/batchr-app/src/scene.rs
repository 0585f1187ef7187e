//! Procedural sprite scene used to exercise the batcher.

use batchr_common::Color;
use batchr_renderer::{BatchRenderer, BatchStats, Camera, RenderBackend, Texture};
use glam::{Vec2, Vec3};

/// Edge length of generated checker textures, in pixels.
pub const CHECKER_SIZE: u32 = 16;

/// Every fifth sprite is an untextured rectangle.
const RECT_EVERY: u32 = 5;

/// An 8×8-cell checkerboard whose two colors depend on `index`.
pub fn checker_texture(index: u32, size: u32) -> image::RgbaImage {
    let hue = (index as f32 * 0.618_034).fract();
    let light = hue_to_color(hue, 1.0).to_rgba8();
    let dark = hue_to_color(hue, 0.35).to_rgba8();
    let cell = (size / 8).max(1);

    image::RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba(light)
        } else {
            image::Rgba(dark)
        }
    })
}

fn hue_to_color(hue: f32, value: f32) -> Color {
    let h = hue * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Color::rgb(r * value, g * value, b * value)
}

/// Row-major grid of sprite cells covering the camera's view at zoom 1.
#[derive(Debug, Clone, Copy)]
pub struct SpriteGrid {
    columns: u32,
    cell: Vec2,
    origin: Vec2,
}

impl SpriteGrid {
    /// Lay out `count` cells over `[-aspect, aspect] × [-1, 1]`.
    pub fn new(count: u32, aspect: f32) -> Self {
        let count = count.max(1);
        let columns = ((count as f32 * aspect).sqrt().ceil() as u32).clamp(1, count);
        let rows = count.div_ceil(columns);
        let cell = Vec2::new(2.0 * aspect / columns as f32, 2.0 / rows as f32);
        let origin = Vec2::new(-aspect, -1.0) + cell * 0.5;
        Self {
            columns,
            cell,
            origin,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Centre of cell `index`.
    pub fn position(&self, index: u32) -> Vec3 {
        let col = index % self.columns;
        let row = index / self.columns;
        (self.origin + self.cell * Vec2::new(col as f32, row as f32)).extend(0.0)
    }

    pub fn sprite_size(&self) -> Vec2 {
        self.cell * 0.8
    }
}

/// Submit one frame of `quads` sprites and return its batch stats.
pub fn render_frame<B, C>(
    renderer: &mut BatchRenderer<B>,
    camera: &C,
    grid: &SpriteGrid,
    textures: &[Texture],
    quads: u32,
    frame: u32,
) -> BatchStats
where
    B: RenderBackend,
    C: Camera + ?Sized,
{
    let size = grid.sprite_size();
    let spin = frame as f32 * 0.1;

    renderer.begin(camera);
    for i in 0..quads {
        let position = grid.position(i);
        match textures {
            [] => renderer.draw_rect(position, size, hue_to_color(i as f32 / quads as f32, 1.0)),
            _ if i % RECT_EVERY == 0 => {
                renderer.draw_rect(position, size, Color::rgba(1.0, 1.0, 1.0, 0.5))
            }
            _ => {
                let texture = &textures[i as usize % textures.len()];
                renderer.draw_sprite(position, size, spin + i as f32 * 0.01, texture);
            }
        }
    }
    renderer.end();

    renderer.stats()
}
