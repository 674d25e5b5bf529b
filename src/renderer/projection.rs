//! Perspective projection and back-to-front ordering
//!
//! World x/y are screen pixels and z is depth (bigger is farther). A pinhole
//! divide around the screen centre maps them to the surface; a linear depth
//! cue sets the drawn radius.

use glam::{Vec2, Vec3};

use crate::sim::{GameState, ScreenMetrics};
use crate::tuning::Tuning;

/// Colour of the player shot in flight
pub const SHOT_HUE: f32 = 0.1;
pub const SHOT_SATURATION: f32 = 1.0;
/// Base radius of the targeting reticle; grows with aim distance
const RETICLE_RADIUS: f32 = 100.0;

/// Something to draw as a disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub screen: Vec2,
    /// World depth, only used for ordering
    pub depth: f32,
    pub radius: f32,
    pub hue: f32,
    pub saturation: f32,
}

/// Pinhole projection of `pos` onto the screen
///
/// Well defined for every `z > -eye_distance`, which the simulation
/// guarantees through the near clip.
#[inline]
pub fn project(pos: Vec3, metrics: &ScreenMetrics, eye_distance: f32) -> Vec2 {
    let center = metrics.center();
    let k = eye_distance / (pos.z + eye_distance);
    Vec2::new(
        k * (pos.x - center.x) + center.x,
        k * (pos.y - center.y) + center.y,
    )
}

/// Drawn radius for depth `z`; nearer is larger, never negative
#[inline]
pub fn depth_scale(z: f32, tuning: &Tuning) -> f32 {
    ((tuning.scale_origin - z) * tuning.scale_per_depth).max(0.0)
}

/// Farthest first; ties keep no particular order
pub fn sort_back_to_front(sprites: &mut [Sprite]) {
    sprites.sort_unstable_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Every comet plus the live shot, projected and sorted for drawing
pub fn depth_sorted_sprites(state: &GameState) -> Vec<Sprite> {
    let tuning = &state.tuning;
    let eye = tuning.eye_distance;

    let mut sprites: Vec<Sprite> = state
        .roster
        .comets
        .iter()
        .map(|comet| Sprite {
            screen: project(comet.pos, &state.metrics, eye),
            depth: comet.pos.z,
            radius: depth_scale(comet.pos.z, tuning),
            hue: comet.hue,
            saturation: comet.saturation,
        })
        .collect();

    let shot = state.roster.shot();
    if shot.live {
        sprites.push(Sprite {
            screen: project(shot.pos, &state.metrics, eye),
            depth: shot.pos.z,
            radius: depth_scale(shot.pos.z, tuning),
            hue: SHOT_HUE,
            saturation: SHOT_SATURATION,
        });
    }

    sort_back_to_front(&mut sprites);
    sprites
}

/// Targeting reticle for a parked shot, when the cursor is in the play area
pub fn reticle(state: &GameState) -> Option<Sprite> {
    let shot = state.roster.shot();
    if shot.live {
        return None;
    }
    let cursor = state.cursor?;
    if !state.metrics.in_play_area(cursor, state.tuning.window_indent) {
        return None;
    }

    let aim = state.aim_distance;
    Some(Sprite {
        screen: project(shot.pos, &state.metrics, state.tuning.eye_distance),
        depth: shot.pos.z,
        radius: RETICLE_RADIUS + RETICLE_RADIUS * aim,
        hue: SHOT_HUE,
        saturation: aim,
    })
}
