//! Per-frame simulation step
//!
//! `tick` runs its phases in a fixed order, and callers may rely on it:
//!
//! 1. Comet drift: every comet past the near clip is re-emitted from hal,
//!    every other comet advances along its velocity.
//! 2. Shot flight (live shot only): advance, then the resolution check, then
//!    the bounce check. Both checks run on every live tick, so a shot can
//!    resolve and bounce in the same frame without either undoing the other.
//! 3. Parking: an idle shot follows the cursor while it is inside the play area.

use rand::Rng;

use super::collision::{first_comet_within, shot_hits_hal};
use super::state::{GamePhase, GameState, random_unit_vector};
use crate::tuning::Tuning;

pub const BOUNCE_STATUS: &str = "You got a bounce.";
pub const MISS_STATUS: &str = "You missed.";

/// Something the player should hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The shot deflected off the comet at this index
    Bounce { comet: usize },
    /// Hal took a hit and has `health` left
    Hit { health: u8 },
    /// Hal's last point of health is gone
    Killed,
    Missed,
}

/// Scale wall-clock frame time into simulation time
pub fn frame_dt(elapsed_ms: u64, tuning: &Tuning) -> f32 {
    (elapsed_ms as f32 * tuning.dt_per_ms).min(tuning.max_dt)
}

/// Advance the world by `dt`; a halted game does not move
pub fn tick(state: &mut GameState, dt: f32, now_ms: u64) -> Vec<SimEvent> {
    let mut events = Vec::new();
    if state.is_halted() {
        return events;
    }

    drift_comets(state, dt);

    if state.roster.shot.live {
        fly_shot(state, dt, now_ms, &mut events);
    }

    park_shot(state);

    events
}

fn drift_comets(state: &mut GameState, dt: f32) {
    let step = state.tuning.comet_speed * dt;
    let near_clip = state.tuning.near_clip;

    for index in 0..state.roster.comets.len() {
        if state.roster.comets[index].pos.z < near_clip {
            state.respawn_comet(index);
        } else {
            let comet = &mut state.roster.comets[index];
            comet.pos += comet.vel * step;
        }
    }
}

fn fly_shot(state: &mut GameState, dt: f32, now_ms: u64, events: &mut Vec<SimEvent>) {
    let shot = &mut state.roster.shot;
    shot.pos += shot.dir * (state.tuning.shot_speed * dt);

    if shot.pos.z > state.tuning.resolve_depth {
        events.push(resolve_shot(state, now_ms));
    }

    let shot_pos = state.roster.shot.pos;
    if let Some(index) =
        first_comet_within(&state.roster.comets, shot_pos, state.tuning.bounce_radius)
    {
        state.respawn_comet(index);

        let rng = state.rng_mut();
        let mut dir = random_unit_vector(rng);
        dir.z = rng.random::<f32>();
        state.roster.shot.dir = dir;

        // A kill in the same frame keeps its message
        if !state.is_halted() {
            state.status = BOUNCE_STATUS.to_string();
        }
        log::debug!("Shot bounced off comet {}", index);
        events.push(SimEvent::Bounce { comet: index });
    }
}

/// The shot passed hal's plane: score it and make it inert
fn resolve_shot(state: &mut GameState, now_ms: u64) -> SimEvent {
    state.roster.shot.live = false;
    state.aim_distance = 0.0;

    if !shot_hits_hal(state.roster.shot.pos, state.hal.pos, state.tuning.hit_radius) {
        state.status = MISS_STATUS.to_string();
        log::debug!("Shot missed");
        return SimEvent::Missed;
    }

    state.hal.health = state.hal.health.saturating_sub(1);
    if state.hal.health == 0 {
        let minutes = state.elapsed_minutes(now_ms);
        state.status = format!(
            "You killed hal in: {:.2} minutes. Press R to start a new game.",
            minutes
        );
        state.phase = GamePhase::Halted;
        log::info!("Hal destroyed after {:.2} minutes", minutes);
        SimEvent::Killed
    } else {
        state.status = format!("You hit. Hal integrity: {}.", state.hal.health);
        log::debug!("Hit, hal health {}", state.hal.health);
        SimEvent::Hit {
            health: state.hal.health,
        }
    }
}

/// Keep an idle shot under the cursor and refresh the aim distance
fn park_shot(state: &mut GameState) {
    if state.roster.shot.live || state.is_halted() {
        return;
    }
    let Some(cursor) = state.cursor else {
        return;
    };
    if !state.metrics.in_play_area(cursor, state.tuning.window_indent) {
        return;
    }

    state.aim_distance = state.metrics.normalized_distance(cursor);
    state.roster.shot.pos = cursor.extend(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn fresh() -> GameState {
        GameState::new(12345, 1024, 768, Tuning::default(), 0)
    }

    /// Put a live shot just short of hal's plane, `offset` away from hal in y
    fn arm_near_hal(state: &mut GameState, offset: f32) {
        let hal = state.hal.pos;
        state.roster.shot.pos = Vec3::new(hal.x, hal.y + offset, 99.0);
        state.roster.shot.dir = Vec3::Z;
        state.roster.shot.live = true;
    }

    #[test]
    fn test_frame_dt() {
        let tuning = Tuning::default();
        assert!((frame_dt(16, &tuning) - 16.0 / 60.0).abs() < 1e-6);
        assert_eq!(frame_dt(1_000, &tuning), 1.0);
        assert_eq!(frame_dt(0, &tuning), 0.0);
    }

    #[test]
    fn test_comets_drift_toward_viewer() {
        let mut state = fresh();
        let before = state.roster.comets[3];
        tick(&mut state, 1.0, 16);
        let after = state.roster.comets[3];
        assert_eq!(after.pos, before.pos + before.vel * 0.3);
        assert!(after.pos.z <= before.pos.z);
    }

    #[test]
    fn test_comet_past_near_clip_is_recycled() {
        let mut state = fresh();
        state.roster.comets[10].pos = Vec3::new(5.0, 5.0, -5.0);
        state.roster.comets[10].hue = 0.25;
        state.roster.comets[10].saturation = 0.75;

        tick(&mut state, 1.0, 16);

        let comet = state.roster.comets[10];
        assert_eq!(comet.pos, state.hal.pos);
        assert_eq!(comet.pos.z, 150.0);
        assert!(comet.vel.z <= 0.0);
        assert_ne!(comet.hue, 0.25);
        assert_ne!(comet.saturation, 0.75);
        assert!((0.0..1.0).contains(&comet.hue));
        assert!((0.0..1.0).contains(&comet.saturation));
    }

    #[test]
    fn test_hit_decrements_health() {
        let mut state = fresh();
        arm_near_hal(&mut state, 50.0);

        let events = tick(&mut state, 1.0, 16);

        assert_eq!(state.hal.health, 99);
        assert!(!state.roster.shot.live);
        assert_eq!(state.status, "You hit. Hal integrity: 99.");
        assert!(events.contains(&SimEvent::Hit { health: 99 }));
    }

    #[test]
    fn test_miss_keeps_health() {
        let mut state = fresh();
        arm_near_hal(&mut state, 300.0);

        let events = tick(&mut state, 1.0, 16);

        assert_eq!(state.hal.health, 100);
        assert!(!state.roster.shot.live);
        assert_eq!(state.status, MISS_STATUS);
        assert_eq!(events, vec![SimEvent::Missed]);
    }

    #[test]
    fn test_last_hit_halts() {
        let mut state = fresh();
        state.hal.health = 1;
        arm_near_hal(&mut state, 0.0);

        let events = tick(&mut state, 1.0, 90_000);

        assert_eq!(state.hal.health, 0);
        assert_eq!(state.phase, GamePhase::Halted);
        assert!(events.contains(&SimEvent::Killed));
        assert_eq!(
            state.status,
            "You killed hal in: 1.50 minutes. Press R to start a new game."
        );
    }

    #[test]
    fn test_halted_world_is_frozen() {
        let mut state = fresh();
        state.phase = GamePhase::Halted;
        let comets = state.roster.comets.clone();

        let events = tick(&mut state, 1.0, 16);

        assert!(events.is_empty());
        assert_eq!(state.roster.comets, comets);
    }

    #[test]
    fn test_bounce_redirects_shot() {
        let mut state = fresh();
        state.roster.shot.pos = Vec3::new(200.0, 200.0, 10.0);
        state.roster.shot.dir = Vec3::Z;
        state.roster.shot.live = true;
        state.roster.comets[0].pos = Vec3::new(205.0, 200.0, 10.0);
        state.roster.comets[0].vel = Vec3::ZERO;

        let events = tick(&mut state, 0.1, 16);

        assert_eq!(events, vec![SimEvent::Bounce { comet: 0 }]);
        assert_eq!(state.status, BOUNCE_STATUS);
        assert!(state.roster.shot.live);
        assert_eq!(state.roster.comets[0].pos, state.hal.pos);
        let dir = state.roster.shot.dir;
        assert!(dir.z >= 0.0 && dir.z < 1.0);
    }

    /// Live shot about to cross hal's plane with a still comet waiting where it lands
    fn arm_resolve_and_bounce(state: &mut GameState) {
        arm_near_hal(state, 0.0);
        let hal = state.hal.pos;
        state.roster.comets[0].pos = Vec3::new(hal.x + 3.0, hal.y, 99.0 + 9.3);
        state.roster.comets[0].vel = Vec3::ZERO;
    }

    #[test]
    fn test_hit_and_bounce_in_one_frame() {
        let mut state = fresh();
        arm_resolve_and_bounce(&mut state);

        let events = tick(&mut state, 1.0, 16);

        assert_eq!(
            events,
            vec![SimEvent::Hit { health: 99 }, SimEvent::Bounce { comet: 0 }]
        );
        assert_eq!(state.hal.health, 99);
        // The bounce redirects the shot but cannot revive it
        assert!(!state.roster.shot.live);
        assert_eq!(state.roster.comets[0].pos, state.hal.pos);
        assert_eq!(state.status, BOUNCE_STATUS);

        // Nothing left in flight to score again
        let events = tick(&mut state, 1.0, 32);
        assert!(events.is_empty());
        assert_eq!(state.hal.health, 99);
    }

    #[test]
    fn test_kill_message_survives_same_frame_bounce() {
        let mut state = fresh();
        state.hal.health = 1;
        arm_resolve_and_bounce(&mut state);

        let events = tick(&mut state, 1.0, 30_000);

        assert_eq!(events, vec![SimEvent::Killed, SimEvent::Bounce { comet: 0 }]);
        assert_eq!(state.hal.health, 0);
        assert_eq!(state.phase, GamePhase::Halted);
        assert!(!state.roster.shot.live);
        assert_eq!(
            state.status,
            "You killed hal in: 0.50 minutes. Press R to start a new game."
        );
    }

    #[test]
    fn test_resolution_closes_aim_gate() {
        let mut state = fresh();
        state.aim_distance = 0.4;
        arm_near_hal(&mut state, 50.0);

        tick(&mut state, 1.0, 16);

        assert!(!state.roster.shot.live);
        assert_eq!(state.aim_distance, 0.0);
    }

    #[test]
    fn test_idle_shot_is_not_simulated() {
        let mut state = fresh();
        let before = state.roster.shot;
        let events = tick(&mut state, 1.0, 16);
        assert!(events.is_empty());
        assert_eq!(state.roster.shot, before);
    }

    #[test]
    fn test_idle_shot_parks_at_cursor() {
        let mut state = fresh();
        state.cursor = Some(Vec2::new(812.0, 384.0));

        tick(&mut state, 1.0, 16);

        assert_eq!(state.roster.shot.pos, Vec3::new(812.0, 384.0, 0.0));
        assert!((state.aim_distance - 300.0 / 640.0).abs() < 1e-5);
    }

    #[test]
    fn test_cursor_outside_play_area_is_ignored() {
        let mut state = fresh();
        state.cursor = Some(Vec2::new(10.0, 384.0));
        let before = state.roster.shot.pos;

        tick(&mut state, 1.0, 16);

        assert_eq!(state.roster.shot.pos, before);
        assert_eq!(state.aim_distance, 0.0);
    }

    #[test]
    fn test_health_never_increases() {
        let mut state = fresh();
        let mut last = state.hal.health;
        for frame in 0..400u64 {
            if !state.roster.shot.live {
                arm_near_hal(&mut state, (frame % 3) as f32 * 120.0);
            }
            tick(&mut state, 1.0, frame * 16);
            assert!(state.hal.health <= last);
            last = state.hal.health;
        }
        assert!(state.hal.health < 100);
    }
}
