//! Data-driven game balance
//!
//! Every distance, speed and threshold the simulation uses lives here. Missing
//! fields in a tuning file fall back to the stock values.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Environment variable naming an optional JSON tuning file (native only)
pub const TUNING_ENV: &str = "HAL9000_TUNING";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Pinhole distance used by the perspective divide
    pub eye_distance: f32,
    /// Depth hal sits at after a reset
    pub hal_depth: f32,
    pub hal_health: u8,
    /// Draw radius of hal's orb (unprojected)
    pub hal_radius: f32,

    /// Comet drift multiplier applied to the per-frame velocity
    pub comet_speed: f32,
    /// Comets past this depth are recycled back to hal
    pub near_clip: f32,

    /// Player shot speed multiplier
    pub shot_speed: f32,
    /// Upward z bias added to the aim vector before normalization
    pub fire_z_bias: f32,
    /// A live shot resolves once it travels past this depth
    pub resolve_depth: f32,
    /// Shot-to-hal distance that counts as a hit
    pub hit_radius: f32,
    /// Shot-to-comet distance that triggers a bounce
    pub bounce_radius: f32,

    /// Minimum normalized cursor distance from centre required to fire
    pub aim_gate: f32,
    /// Cursor must be this many pixels inside every edge to aim
    pub window_indent: f32,

    /// Depth at which the visual scale reaches zero
    pub scale_origin: f32,
    /// Radius gained per unit of depth toward the viewer
    pub scale_per_depth: f32,

    /// Simulation units per elapsed millisecond (1/60 puts a 16 ms frame near 0.27)
    pub dt_per_ms: f32,
    /// Upper bound on a single frame delta
    pub max_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            eye_distance: 90.0,
            hal_depth: 150.0,
            hal_health: 100,
            hal_radius: 320.0,

            comet_speed: 0.3,
            near_clip: -4.0,

            shot_speed: 9.3,
            fire_z_bias: 33.0,
            resolve_depth: 100.0,
            hit_radius: 160.0,
            bounce_radius: 10.0,

            aim_gate: 0.073,
            window_indent: 33.0,

            scale_origin: 100.0,
            scale_per_depth: 1.3,

            dt_per_ms: 1.0 / 60.0,
            max_dt: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning table
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load the tuning file named by `HAL9000_TUNING`, or the stock table
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            log::info!("Using default tuning");
            return Ok(Self::default());
        };

        let json = std::fs::read_to_string(&path).map_err(|source| GameError::TuningIo {
            path: path.clone(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path);
        Ok(tuning)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }

    /// Reject tables that would break the projection or the win condition
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.eye_distance) {
            return Err(GameError::InvalidTuning(format!(
                "eye_distance must be positive, got {}",
                self.eye_distance
            )));
        }
        // Comets overshoot the clip by at most one step; keep them in front of the eye
        if self.near_clip - self.comet_speed * self.max_dt <= -self.eye_distance {
            return Err(GameError::InvalidTuning(format!(
                "near_clip {} reaches the eye plane at -{}",
                self.near_clip, self.eye_distance
            )));
        }
        let positives = [
            ("hal_radius", self.hal_radius),
            ("comet_speed", self.comet_speed),
            ("shot_speed", self.shot_speed),
            ("hit_radius", self.hit_radius),
            ("bounce_radius", self.bounce_radius),
            ("fire_z_bias", self.fire_z_bias),
            ("aim_gate", self.aim_gate),
            ("scale_per_depth", self.scale_per_depth),
            ("dt_per_ms", self.dt_per_ms),
            ("max_dt", self.max_dt),
        ];
        if let Some((name, value)) = positives.iter().find(|(_, v)| !is_positive(*v)) {
            return Err(GameError::InvalidTuning(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
        if self.hal_health == 0 {
            return Err(GameError::InvalidTuning("hal_health must be at least 1".into()));
        }
        Ok(())
    }
}

/// False for NaN as well as for zero and negatives
fn is_positive(value: f32) -> bool {
    value > 0.0
}
