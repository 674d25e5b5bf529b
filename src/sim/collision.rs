//! Proximity tests between the player shot, the comets and hal
//!
//! All checks are plain 3D distance against a radius; scans are linear and
//! report the lowest matching index.

use glam::Vec3;

use super::state::Comet;

/// Index of the first comet strictly closer than `radius` to `point`
pub fn first_comet_within(comets: &[Comet], point: Vec3, radius: f32) -> Option<usize> {
    comets.iter().position(|c| c.pos.distance(point) < radius)
}

/// Whether a resolved shot at `shot` landed on hal
#[inline]
pub fn shot_hits_hal(shot: Vec3, hal: Vec3, hit_radius: f32) -> bool {
    shot.distance(hal) < hit_radius
}
