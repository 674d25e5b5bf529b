//! Software raster surface
//!
//! A plain RGBA pixel buffer with the two primitives the game needs: glowing
//! disks and a status line. The buffer layout matches what a browser
//! `ImageData` expects, so presenters can hand it over as bytes.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::DrawTarget;
use crate::error::{GameError, Result};

/// Nominal glyph cell used to size the status background bar
pub const GLYPH_WIDTH: u32 = 8;
pub const GLYPH_HEIGHT: u32 = 16;
/// Padding around the status text inside its bar
const TEXT_PADDING: u32 = 4;
/// Disks smaller than this cover no pixel centre worth drawing
const MIN_DISK_RADIUS: f32 = 0.5;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TEXT_BACKGROUND: Rgba = Rgba::new(32, 32, 48, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The text most recently drawn onto the canvas
///
/// Glyphs are rasterized by the presenting platform; the canvas only paints
/// the background bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub background: bool,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    overlay: Option<OverlayText>,
}

impl Canvas {
    /// Allocate a black canvas; a zero-sized surface is unusable
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSurfaceSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
            overlay: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Row-major RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn overlay(&self) -> Option<&OverlayText> {
        self.overlay.as_ref()
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = color;
            }
        }
    }
}

impl DrawTarget for Canvas {
    fn clear(&mut self) {
        self.pixels.fill(Rgba::BLACK);
        self.overlay = None;
    }

    /// Additive glow: full colour at the centre fading to nothing at `radius`
    fn draw_disk(&mut self, center: Vec2, hue: f32, saturation: f32, radius: f32) {
        if !(radius >= MIN_DISK_RADIUS) || !center.is_finite() {
            return;
        }

        let cx = center.x.round();
        let cy = center.y.round();
        let (w, h) = (self.width as f32, self.height as f32);
        let x0 = (cx - radius).floor().clamp(0.0, w) as u32;
        let x1 = (cx + radius).ceil().clamp(0.0, w) as u32;
        let y0 = (cy - radius).floor().clamp(0.0, h) as u32;
        let y1 = (cy + radius).ceil().clamp(0.0, h) as u32;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let [r, g, b] = hsv_to_rgb(hue, saturation, 1.0);
        let radius_sq = radius * radius;
        let inv_radius = radius.recip();

        for y in y0..y1 {
            let dy = y as f32 - cy;
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                let dx = x as f32 - cx;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= radius_sq {
                    continue;
                }
                let t = 1.0 - dist_sq.sqrt() * inv_radius;
                let glow = t * t * 255.0;
                let px = &mut self.pixels[row + x as usize];
                px.r = px.r.saturating_add((r * glow) as u8);
                px.g = px.g.saturating_add((g * glow) as u8);
                px.b = px.b.saturating_add((b * glow) as u8);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, with_background: bool) {
        if with_background && !text.is_empty() {
            let chars = text.chars().count() as u32;
            let left = (x.max(0) as u32).saturating_sub(TEXT_PADDING);
            let top = (y.max(0) as u32).saturating_sub(TEXT_PADDING);
            let right = (x.max(0) as u32)
                .saturating_add(chars.saturating_mul(GLYPH_WIDTH))
                .saturating_add(TEXT_PADDING);
            let bottom = (y.max(0) as u32)
                .saturating_add(GLYPH_HEIGHT)
                .saturating_add(TEXT_PADDING);
            self.fill_rect(left, top, right, bottom, Rgba::TEXT_BACKGROUND);
        }
        self.overlay = Some(OverlayText {
            text: text.to_string(),
            x,
            y,
            background: with_background,
        });
    }
}

/// HSV in [0,1] to linear RGB in [0,1]; hue wraps
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
