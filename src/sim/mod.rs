//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as a frame delta and a millisecond clock reading
//! - Seeded RNG only
//! - Stable iteration order (by roster slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{first_comet_within, shot_hits_hal};
pub use session::{
    AIM_GATE_STATUS, Control, FIRE_STATUS, FireOutcome, InputEvent, KeyCode, MouseButton, fire,
    handle_event, report_status,
};
pub use state::{
    Body, Comet, GamePhase, GameState, Hal, PlayerShot, RESET_STATUS, Roster, ScreenMetrics,
    random_unit_vector,
};
pub use tick::{BOUNCE_STATUS, MISS_STATUS, SimEvent, frame_dt, tick};
