//! Platform abstraction layer
//!
//! The game needs three things from its host: a drawable surface size, a
//! stream of input events, and a way to show a finished canvas.
//! - `headless`: scripted input, logs the overlay (native demo and tests)
//! - `web`: 2D canvas in the browser (wasm32 only)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessPlatform;

use crate::error::Result;
use crate::renderer::Canvas;
use crate::sim::InputEvent;

pub trait Platform {
    /// Current drawable size in pixels
    fn surface_size(&self) -> (u32, u32);

    /// Next pending input event, `None` once this frame's queue is drained
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Show a finished frame
    fn present(&mut self, canvas: &Canvas) -> Result<()>;
}
