use crate::components::Side;
use crate::error::ConfigError;
use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_min_height: f32,
    pub paddle_max_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub cpu_height_reduction: f32,
    pub cpu_edge_buffer: f32,
    pub cpu_drift_range: f32,
    pub cpu_drift_rate: f32,
    pub idle_drift_decay: f32,
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_up: f32,
    pub win_score: u8,
    pub max_dt: f32,
    pub round_pause: f32,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield_width: Params::PLAYFIELD_WIDTH,
            playfield_height: Params::PLAYFIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_min_height: Params::PADDLE_MIN_HEIGHT,
            paddle_max_height: Params::PADDLE_MAX_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            cpu_height_reduction: Params::CPU_HEIGHT_REDUCTION,
            cpu_edge_buffer: Params::CPU_EDGE_BUFFER,
            cpu_drift_range: Params::CPU_DRIFT_RANGE,
            cpu_drift_rate: Params::CPU_DRIFT_RATE,
            idle_drift_decay: Params::IDLE_DRIFT_DECAY,
            ball_radius: Params::BALL_RADIUS,
            ball_base_speed: Params::BALL_BASE_SPEED,
            ball_max_speed: Params::BALL_MAX_SPEED,
            ball_speed_up: Params::BALL_SPEED_UP,
            win_score: Params::WIN_SCORE,
            max_dt: Params::MAX_DT,
            round_pause: Params::ROUND_PAUSE,
            seed: Params::DEFAULT_SEED,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults with a different random seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject values that would break the simulation instead of clamping them
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_min_height", self.paddle_min_height),
            ("paddle_max_height", self.paddle_max_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_base_speed", self.ball_base_speed),
            ("ball_max_speed", self.ball_max_speed),
            ("ball_speed_up", self.ball_speed_up),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("paddle_margin", self.paddle_margin),
            ("cpu_height_reduction", self.cpu_height_reduction),
            ("cpu_edge_buffer", self.cpu_edge_buffer),
            ("cpu_drift_range", self.cpu_drift_range),
            ("cpu_drift_rate", self.cpu_drift_rate),
            ("idle_drift_decay", self.idle_drift_decay),
            ("round_pause", self.round_pause),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.ball_max_speed < self.ball_base_speed {
            return Err(ConfigError::SpeedRange {
                base: self.ball_base_speed,
                max: self.ball_max_speed,
            });
        }
        if self.ball_speed_up < 1.0 {
            return Err(ConfigError::SpeedUp(self.ball_speed_up));
        }
        if self.paddle_min_height > self.paddle_max_height
            || self.paddle_height < self.paddle_min_height
            || self.paddle_height > self.paddle_max_height
        {
            return Err(ConfigError::PaddleHeight {
                height: self.paddle_height,
                min: self.paddle_min_height,
                max: self.paddle_max_height,
            });
        }
        if self.cpu_paddle_height() <= 0.0 {
            return Err(ConfigError::CpuPaddleHeight(self.cpu_paddle_height()));
        }
        if self.win_score == 0 {
            return Err(ConfigError::WinScore);
        }

        let too_tall = self.paddle_height > self.playfield_height
            || self.cpu_paddle_height() + 2.0 * self.cpu_edge_buffer > self.playfield_height;
        let too_narrow =
            2.0 * (self.paddle_margin + self.paddle_width + self.ball_radius) >= self.playfield_width;
        if too_tall || too_narrow {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        Ok(())
    }

    /// CPU paddle is shorter than the player's by a fixed amount
    pub fn cpu_paddle_height(&self) -> f32 {
        self.paddle_height - self.cpu_height_reduction
    }

    /// Height of the paddle on the given side
    pub fn paddle_height_for(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_height,
            Side::Cpu => self.cpu_paddle_height(),
        }
    }

    /// Left edge X of the paddle on the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_margin,
            Side::Cpu => self.playfield_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Centre of the playfield
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.playfield_width / 2.0, self.playfield_height / 2.0)
    }

    /// Clamp a paddle centre so the whole paddle stays on the field
    pub fn clamp_paddle_center(&self, center_y: f32, height: f32) -> f32 {
        let half_height = height / 2.0;
        center_y.clamp(half_height, self.playfield_height - half_height)
    }
}
