//! Session controller: turns platform input into state changes
//!
//! Input is drained before the frame simulates. Fire and status queries are
//! ignored once hal is down; reset, resize and cursor tracking always apply.

use glam::{Vec2, Vec3};

use super::state::GameState;

pub const FIRE_STATUS: &str = "Nice shot.";
pub const AIM_GATE_STATUS: &str =
    "You cant shoot directly at hal, you need to bounce off one of his projectiles.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Events delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyCode),
    MouseMove { x: f32, y: f32 },
    MouseDown(MouseButton),
    /// The surface now measures `width` x `height`
    Resize { width: u32, height: u32 },
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// What a fire command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    /// A shot was already in flight and has been called off
    Cancelled,
    /// Aim too close to hal; the status line explains why
    TooCloseToCenter,
    /// Hal is down
    Ignored,
}

/// Apply one input event
pub fn handle_event(state: &mut GameState, event: InputEvent, now_ms: u64) -> Control {
    match event {
        InputEvent::Quit => {
            log::info!("Quit requested");
            return Control::Quit;
        }
        InputEvent::KeyDown(KeyCode::Char('r' | 'R')) => state.reset(now_ms),
        InputEvent::KeyDown(KeyCode::Char('s' | 'S')) => report_status(state, now_ms),
        InputEvent::KeyDown(_) => {}
        InputEvent::MouseMove { x, y } => state.cursor = Some(Vec2::new(x, y)),
        InputEvent::MouseDown(MouseButton::Left) => {
            fire(state);
        }
        InputEvent::MouseDown(_) => {}
        InputEvent::Resize { width, height } => state.set_screen_size(width, height),
    }
    Control::Continue
}

/// Launch the parked shot toward hal's plane, or call off a live one
pub fn fire(state: &mut GameState) -> FireOutcome {
    if state.is_halted() {
        return FireOutcome::Ignored;
    }

    let shot = &mut state.roster.shot;
    if shot.live {
        shot.live = false;
        state.aim_distance = 0.0;
        log::debug!("Shot cancelled");
        return FireOutcome::Cancelled;
    }

    if state.aim_distance <= state.tuning.aim_gate {
        state.status = AIM_GATE_STATUS.to_string();
        return FireOutcome::TooCloseToCenter;
    }

    let center = state.metrics.center();
    shot.dir = Vec3::new(
        shot.pos.x - center.x,
        shot.pos.y - center.y,
        state.tuning.fire_z_bias,
    )
    .normalize_or_zero();
    shot.live = true;
    state.status = FIRE_STATUS.to_string();
    log::debug!("Shot fired from ({:.0}, {:.0})", shot.pos.x, shot.pos.y);
    FireOutcome::Fired
}

/// Put elapsed time and hal's health on the status line
pub fn report_status(state: &mut GameState, now_ms: u64) {
    if state.is_halted() {
        return;
    }
    state.status = format!(
        "Hal Health: {} - Time Taken: {:.2} minutes.",
        state.hal.health,
        state.elapsed_minutes(now_ms)
    );
}
