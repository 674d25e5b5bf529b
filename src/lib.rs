//! hal9000 - bounce plasma off hal's comets until hal goes quiet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (roster, shot flight, session input)
//! - `renderer`: Perspective projection, depth sort and software raster
//! - `platform`: Surface/input abstraction (headless, browser)
//! - `app`: The per-frame pipeline tying them together
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use app::{App, FpsCounter};
pub use error::GameError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Bodies in the roster: one player shot plus the comets
    pub const ROSTER_SLOTS: usize = 128;
    pub const COMET_COUNT: usize = ROSTER_SLOTS - 1;
    /// Roster slot reserved for the player shot
    pub const SHOT_SLOT: usize = 0;

    /// Nominal frame pacing (just over 60 Hz)
    pub const FRAME_PERIOD_MS: u64 = 16;
    /// FPS is averaged and reported over this window
    pub const FPS_REPORT_WINDOW_MS: u64 = 16_000;

    /// Surface size requested at startup
    pub const DEFAULT_WIDTH: u32 = 1024;
    pub const DEFAULT_HEIGHT: u32 = 768;
}

/// Player-facing instructions printed at startup
pub const INSTRUCTIONS: &str = "\
hal9000 has gone haywire and is firing plasma at you. The plasma is harmless, \
but hal does not know that. You cannot shoot hal directly: fire your own plasma \
at hal's and let it bounce toward him. Bring hal down as fast as you can; the \
lowest time wins.

Move the mouse to aim, click to fire (click again to call a shot off).
Press S to see your time taken and hal's current health.
Press R to reset the game.";
