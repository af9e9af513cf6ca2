use thiserror::Error;

use crate::state::MatchState;

/// Configuration rejected by `Simulation::new`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("ball max speed {max} is below base speed {base}")]
    SpeedRange { base: f32, max: f32 },

    #[error("ball speed-up factor must be at least 1.0, got {0}")]
    SpeedUp(f32),

    #[error("paddle height {height} outside [{min}, {max}]")]
    PaddleHeight { height: f32, min: f32, max: f32 },

    #[error("cpu paddle height {0} must be positive")]
    CpuPaddleHeight(f32),

    #[error("win score must be at least 1")]
    WinScore,

    #[error("paddles do not fit a {width}x{height} playfield")]
    PlayfieldTooSmall { width: f32, height: f32 },
}

/// Errors returned by simulation commands
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid player input: {0}")]
    InvalidInput(&'static str),

    #[error("match can only start from idle, currently {0:?}")]
    NotIdle(MatchState),
}
