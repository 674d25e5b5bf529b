//! Demo player for attract mode and the headless runner
//!
//! Sweeps the cursor around hal on a fixed orbit (always outside the aim gate)
//! and fires whenever the shot is parked. Hits come from lucky bounces, the
//! same way they do for a human.

use glam::Vec2;

use super::session::{InputEvent, MouseButton};
use super::state::GameState;

/// Orbit radius as a fraction of the shorter screen half-extent
const ORBIT_FRACTION: f32 = 0.6;
/// Radians the cursor advances per planned frame
const SWEEP_PER_FRAME: f32 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    angle: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next frame; nothing once hal is down
    pub fn plan(&mut self, state: &GameState) -> Vec<InputEvent> {
        if state.is_halted() {
            return Vec::new();
        }

        self.angle = (self.angle + SWEEP_PER_FRAME) % std::f32::consts::TAU;
        let metrics = &state.metrics;
        let radius = metrics.half_width.min(metrics.half_height) * ORBIT_FRACTION;
        let cursor = metrics.center() + Vec2::from_angle(self.angle) * radius;

        let mut events = vec![InputEvent::MouseMove {
            x: cursor.x,
            y: cursor.y,
        }];
        if !state.roster.shot.live {
            events.push(InputEvent::MouseDown(MouseButton::Left));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_plan_aims_inside_play_area() {
        let state = GameState::new(1, 1024, 768, Tuning::default(), 0);
        let mut pilot = Autopilot::new();

        for _ in 0..200 {
            let events = pilot.plan(&state);
            let InputEvent::MouseMove { x, y } = events[0] else {
                panic!("expected a cursor move first");
            };
            let cursor = Vec2::new(x, y);
            assert!(state.metrics.in_play_area(cursor, state.tuning.window_indent));
            assert!(state.metrics.normalized_distance(cursor) > state.tuning.aim_gate);
            assert_eq!(events[1], InputEvent::MouseDown(MouseButton::Left));
        }
    }

    #[test]
    fn test_holds_fire_while_shot_is_live() {
        let mut state = GameState::new(1, 1024, 768, Tuning::default(), 0);
        state.roster.shot.live = true;
        let events = Autopilot::new().plan(&state);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_idle_when_halted() {
        let mut state = GameState::new(1, 1024, 768, Tuning::default(), 0);
        state.phase = GamePhase::Halted;
        assert!(Autopilot::new().plan(&state).is_empty());
    }
}
