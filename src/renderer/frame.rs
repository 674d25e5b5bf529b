//! Per-frame draw call sequence

use super::DrawTarget;
use super::projection::{depth_sorted_sprites, reticle};
use crate::sim::GameState;

/// Hal's orb colour
pub const HAL_HUE: f32 = 0.0;
pub const HAL_SATURATION: f32 = 1.0;
/// Top-left corner of the status line
pub const STATUS_POS: (i32, i32) = (10, 10);

/// Draw one frame: hal, then (unless halted) the sorted bodies and the
/// reticle, then the status overlay on top
pub fn render_frame<T: DrawTarget>(state: &GameState, target: &mut T) {
    target.clear();

    // Hal sits behind everything and is never projected
    target.draw_disk(
        state.hal.pos.truncate(),
        HAL_HUE,
        HAL_SATURATION,
        state.tuning.hal_radius,
    );

    if !state.is_halted() {
        for sprite in depth_sorted_sprites(state) {
            target.draw_disk(sprite.screen, sprite.hue, sprite.saturation, sprite.radius);
        }
        if let Some(sprite) = reticle(state) {
            target.draw_disk(sprite.screen, sprite.hue, sprite.saturation, sprite.radius);
        }
    }

    target.draw_text(&state.status, STATUS_POS.0, STATUS_POS.1, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Canvas;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec3};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Disk { center: Vec2, hue: f32, radius: f32 },
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl DrawTarget for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn draw_disk(&mut self, center: Vec2, hue: f32, _saturation: f32, radius: f32) {
            self.calls.push(Call::Disk {
                center,
                hue,
                radius,
            });
        }

        fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _with_background: bool) {
            self.calls.push(Call::Text(text.to_string()));
        }
    }

    fn fresh() -> GameState {
        GameState::new(9, 1024, 768, Tuning::default(), 0)
    }

    #[test]
    fn test_call_order() {
        let state = fresh();
        let mut recorder = Recorder::default();
        render_frame(&state, &mut recorder);

        let calls = &recorder.calls;
        assert_eq!(calls[0], Call::Clear);
        assert_eq!(
            calls[1],
            Call::Disk {
                center: Vec2::new(512.0, 384.0),
                hue: HAL_HUE,
                radius: 320.0,
            }
        );
        assert_eq!(calls.last(), Some(&Call::Text(state.status.clone())));
        // clear + hal + every comet + status
        assert_eq!(calls.len(), 3 + crate::consts::COMET_COUNT);
    }

    #[test]
    fn test_nearer_bodies_draw_later() {
        let mut state = fresh();
        state.roster.comets[0].pos = Vec3::new(100.0, 100.0, 5.0);
        state.roster.comets[1].pos = Vec3::new(100.0, 100.0, 80.0);
        state.roster.shot.pos = Vec3::new(200.0, 200.0, 40.0);
        state.roster.shot.live = true;

        let mut recorder = Recorder::default();
        render_frame(&state, &mut recorder);

        let radii: Vec<f32> = recorder
            .calls
            .iter()
            .skip(2)
            .filter_map(|call| match call {
                Call::Disk { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        // Radius grows as depth shrinks, so back-to-front means non-decreasing radius
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        assert!(recorder.calls.iter().any(|c| matches!(c, Call::Disk { hue, .. } if *hue == 0.1)));
    }

    #[test]
    fn test_halted_draws_only_hal_and_status() {
        let mut state = fresh();
        state.phase = GamePhase::Halted;
        state.cursor = Some(Vec2::new(700.0, 300.0));

        let mut recorder = Recorder::default();
        render_frame(&state, &mut recorder);

        assert_eq!(recorder.calls.len(), 3);
        assert!(matches!(recorder.calls[2], Call::Text(_)));
    }

    #[test]
    fn test_renders_onto_canvas() {
        let state = fresh();
        let mut canvas = Canvas::new(1024, 768).unwrap();
        render_frame(&state, &mut canvas);

        let center = canvas.pixel(512, 384).unwrap();
        assert_eq!(center.r, 255);
        assert_eq!(canvas.overlay().map(|o| o.text.as_str()), Some(state.status.as_str()));
    }
}
