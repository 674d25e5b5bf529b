//! Error type shared by the platform, renderer and tuning layers.
//!
//! Gameplay itself never fails: rejected input is reported through the status
//! line, not through `Result`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The platform could not hand out a drawable surface
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: u32, height: u32 },

    #[error("failed to read tuning file {path}: {source}")]
    TuningIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
