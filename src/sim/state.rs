//! Game state and core simulation types
//!
//! One owned `GameState` carries the roster, hal, the screen metrics and the
//! session fields. Every pipeline stage borrows it explicitly.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Status line shown after every reset
pub const RESET_STATUS: &str = "Hal is not happy, projectiles incoming, prepare yourself.";

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Comets fly, the player may aim and fire
    Playing,
    /// Hal is down; only a reset resumes play
    Halted,
}

/// An enemy projectile emitted by hal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comet {
    pub pos: Vec3,
    /// Per-frame velocity (heading and speed, not normalized)
    pub vel: Vec3,
    pub hue: f32,
    pub saturation: f32,
}

impl Comet {
    /// Emit a fresh comet from `origin`, always heading toward the viewer
    pub fn emit<R: Rng + ?Sized>(rng: &mut R, origin: Vec3) -> Self {
        let mut vel = random_unit_vector(rng);
        vel.z = -rng.random::<f32>();
        Self {
            pos: origin,
            vel,
            hue: rng.random(),
            saturation: rng.random(),
        }
    }
}

/// The player's deflectable projectile ("gauss")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerShot {
    pub pos: Vec3,
    /// Unit heading once fired; redirected on every bounce
    pub dir: Vec3,
    /// True while in flight toward hal
    pub live: bool,
}

impl PlayerShot {
    pub fn parked(pos: Vec3) -> Self {
        Self {
            pos,
            dir: Vec3::ZERO,
            live: false,
        }
    }
}

/// The antagonist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hal {
    pub pos: Vec3,
    pub health: u8,
}

/// A roster slot viewed by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body<'a> {
    Comet(&'a Comet),
    Shot(&'a PlayerShot),
}

impl Body<'_> {
    pub fn pos(&self) -> Vec3 {
        match self {
            Body::Comet(comet) => comet.pos,
            Body::Shot(shot) => shot.pos,
        }
    }
}

/// Fixed roster of `ROSTER_SLOTS` bodies
///
/// Slot `SHOT_SLOT` is the player shot, slot `i > 0` is `comets[i - 1]`. The
/// shot is stored apart from the comets so there is always exactly one.
#[derive(Debug, Clone)]
pub struct Roster {
    pub comets: Vec<Comet>,
    pub shot: PlayerShot,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.comets.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_player_shot(&self, slot: usize) -> bool {
        slot == SHOT_SLOT
    }

    pub fn shot(&self) -> &PlayerShot {
        &self.shot
    }

    /// Indexed access by slot; `None` past the end of the roster
    pub fn body(&self, slot: usize) -> Option<Body<'_>> {
        if self.is_player_shot(slot) {
            Some(Body::Shot(&self.shot))
        } else {
            self.comets.get(slot - 1).map(Body::Comet)
        }
    }

    /// All bodies in slot order
    pub fn bodies(&self) -> impl Iterator<Item = Body<'_>> {
        std::iter::once(Body::Shot(&self.shot)).chain(self.comets.iter().map(Body::Comet))
    }
}

/// Cached screen geometry, recomputed on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// Reciprocal of the centre-to-corner distance
    pub inv_half_diagonal: f32,
}

impl ScreenMetrics {
    pub fn new(width: u32, height: u32) -> Self {
        // Integer halves, as the surface is addressed in whole pixels
        let half_width = (width / 2) as f32;
        let half_height = (height / 2) as f32;
        let half_diagonal = (half_width * half_width + half_height * half_height).sqrt();
        Self {
            width: width as f32,
            height: height as f32,
            half_width,
            half_height,
            inv_half_diagonal: if half_diagonal > 0.0 {
                half_diagonal.recip()
            } else {
                0.0
            },
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Cursor distance from centre as a fraction of the half diagonal
    pub fn normalized_distance(&self, point: Vec2) -> f32 {
        (self.center() - point).length() * self.inv_half_diagonal
    }

    /// True when `point` lies strictly inside the screen shrunk by `indent`
    pub fn in_play_area(&self, point: Vec2, indent: f32) -> bool {
        point.x > indent
            && point.x < self.width - indent
            && point.y > indent
            && point.y < self.height - indent
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub metrics: ScreenMetrics,
    pub roster: Roster,
    pub hal: Hal,
    pub phase: GamePhase,
    /// Last event text, drawn as the overlay
    pub status: String,
    /// Clock reading (ms) when the round began
    pub round_started_ms: u64,
    /// Latest cursor position in screen pixels
    pub cursor: Option<Vec2>,
    /// Normalized cursor distance from centre, refreshed while the shot is parked.
    /// Zero after a reset, a cancel or a resolved shot, so the aim gate stays
    /// shut until the cursor parks the shot again.
    pub aim_distance: f32,
    rng: Pcg32,
}

impl GameState {
    /// Build a fresh round for a `width` x `height` surface
    pub fn new(seed: u64, width: u32, height: u32, tuning: Tuning, now_ms: u64) -> Self {
        let metrics = ScreenMetrics::new(width, height);
        let hal_pos = metrics.center().extend(tuning.hal_depth);
        let mut state = Self {
            metrics,
            roster: Roster {
                comets: Vec::with_capacity(COMET_COUNT),
                shot: PlayerShot::parked(hal_pos),
            },
            hal: Hal {
                pos: hal_pos,
                health: tuning.hal_health,
            },
            phase: GamePhase::Playing,
            status: String::new(),
            round_started_ms: now_ms,
            cursor: None,
            aim_distance: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.reset(now_ms);
        state
    }

    /// Start a new round: every comet re-emitted from hal, full health, shot parked
    pub fn reset(&mut self, now_ms: u64) {
        self.round_started_ms = now_ms;
        self.status = RESET_STATUS.to_string();
        self.hal = Hal {
            pos: self.metrics.center().extend(self.tuning.hal_depth),
            health: self.tuning.hal_health,
        };

        let origin = self.hal.pos;
        self.roster.comets.clear();
        for _ in 0..COMET_COUNT {
            let comet = Comet::emit(&mut self.rng, origin);
            self.roster.comets.push(comet);
        }
        self.roster.shot = PlayerShot::parked(origin);
        self.aim_distance = 0.0;
        self.phase = GamePhase::Playing;

        log::info!("Round started ({} comets, hal health {})", COMET_COUNT, self.hal.health);
    }

    /// Re-emit comet `index` from hal's current position
    pub fn respawn_comet(&mut self, index: usize) {
        let comet = Comet::emit(&mut self.rng, self.hal.pos);
        self.roster.comets[index] = comet;
    }

    /// Recompute screen metrics and re-centre hal
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.metrics = ScreenMetrics::new(width, height);
        self.hal.pos.x = self.metrics.half_width;
        self.hal.pos.y = self.metrics.half_height;
        log::info!("Screen resized to {}x{}", width, height);
    }

    pub fn is_halted(&self) -> bool {
        self.phase == GamePhase::Halted
    }

    /// Minutes since the round began
    pub fn elapsed_minutes(&self, now_ms: u64) -> f64 {
        now_ms.saturating_sub(self.round_started_ms) as f64 / 60_000.0
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// Uniformly distributed point on the unit sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
