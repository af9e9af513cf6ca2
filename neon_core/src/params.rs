/// Game tuning parameters for Neon Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Playfield
    pub const PLAYFIELD_WIDTH: f32 = 960.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 14.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    pub const PADDLE_MIN_HEIGHT: f32 = 90.0;
    pub const PADDLE_MAX_HEIGHT: f32 = 160.0;
    pub const PADDLE_MARGIN: f32 = 24.0; // Gap between paddle and its side wall
    pub const PADDLE_SPEED: f32 = 540.0; // units per second
    pub const PLAYER_EASE: f32 = 0.9; // Fraction of paddle speed used when easing to target

    // CPU opponent
    pub const CPU_HEIGHT_REDUCTION: f32 = 40.0;
    pub const CPU_EDGE_BUFFER: f32 = 16.0;
    pub const CPU_DRIFT_RANGE: f32 = 40.0;
    pub const CPU_DRIFT_RATE: f32 = 0.005;
    pub const CPU_TRACKING_BASE: f32 = 0.9;
    pub const CPU_TRACKING_PENALTY_MAX: f32 = 0.7;
    pub const CPU_TRACKING_MIN: f32 = 0.2;
    pub const IDLE_DRIFT_DECAY: f32 = 0.03;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 420.0;
    pub const BALL_MAX_SPEED: f32 = 980.0;
    pub const BALL_SPEED_UP: f32 = 1.05; // Multiply speed on paddle hit
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3; // 60 degrees
    pub const MAX_SERVE_ANGLE: f32 = std::f32::consts::FRAC_PI_4; // 45 degrees

    // Idle wander
    pub const IDLE_EASE: f32 = 2.5;
    pub const IDLE_SWAY_X: f32 = 80.0;
    pub const IDLE_SWAY_Y: f32 = 30.0; // 0.25 * 120
    pub const IDLE_PERIOD_X: f32 = 1.0;
    pub const IDLE_PERIOD_Y: f32 = 0.6;

    // Match
    pub const WIN_SCORE: u8 = 7;
    pub const ROUND_PAUSE: f32 = 0.7; // seconds frozen after a point

    // Physics
    pub const MAX_DT: f32 = 0.05; // Clamp to prevent large jumps
    pub const DEFAULT_SEED: u64 = 0x6e65_6f6e; // "neon"
}
