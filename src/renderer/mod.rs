//! Rendering module
//!
//! Projects the simulation onto a 2D surface and issues draw calls in
//! back-to-front order. Drawing goes through `DrawTarget` so the same frame
//! can land on the software canvas or a test recorder.

pub mod canvas;
pub mod frame;
pub mod projection;

use glam::Vec2;

pub use canvas::{Canvas, OverlayText, Rgba};
pub use frame::render_frame;
pub use projection::{Sprite, depth_scale, depth_sorted_sprites, project, reticle};

/// Drawing primitives the frame renderer relies on
pub trait DrawTarget {
    /// Wipe the surface to black
    fn clear(&mut self);

    /// Filled glowing disk of colour HSV(`hue`, `saturation`, 1)
    fn draw_disk(&mut self, center: Vec2, hue: f32, saturation: f32, radius: f32);

    /// One line of status text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, text: &str, x: i32, y: i32, with_background: bool);
}
