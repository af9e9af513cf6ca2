use crate::components::Side;
use crate::error::SimError;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    pub dt: f32,  // Clamped delta for this step
    pub now: f32, // Total simulated time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Score {
    pub player: u8,
    pub cpu: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point and return the new value
    pub fn increment(&mut self, side: Side) -> u8 {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Cpu => &mut self.cpu,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.cpu >= win_score {
            Some(Side::Cpu)
        } else {
            None
        }
    }
}

/// Seedable random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(crate::params::Params::DEFAULT_SEED)
    }
}

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Wall {
    Top,
    Bottom,
}

/// Notifications for the renderer / UI, in emission order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GameEvent {
    WallHit(Wall),
    PaddleHit(Side),
    ScoreChanged {
        side: Side,
        score: u8,
    },
    RoundEnded {
        winner: Side,
    },
    MatchEnded {
        winner: Side,
        title: &'static str,
        message: &'static str,
    },
}

/// Events collected during one tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub list: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.list.push(event);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Hand the collected events to the caller, leaving this empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.list)
    }
}

/// Input submitted by the host for the human paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Pointer vertical coordinate in display space
    Pointer { y: f32, surface_height: f32 },
    /// Held state of the up/down keys
    Keys { up: bool, down: bool },
}

/// Latest player input, consumed by the player controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub pointer_target: Option<f32>, // Simulation-space centre from the last pointer move
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input; the last pointer position before a tick wins
    pub fn submit(&mut self, input: PlayerInput, playfield_height: f32) -> Result<(), SimError> {
        match input {
            PlayerInput::Pointer { y, surface_height } => {
                if !y.is_finite() {
                    return Err(SimError::InvalidInput("pointer coordinate is not finite"));
                }
                if !surface_height.is_finite() || surface_height <= 0.0 {
                    return Err(SimError::InvalidInput("surface height must be positive"));
                }
                let scaled = y * (playfield_height / surface_height);
                self.pointer_target = Some(scaled.clamp(0.0, playfield_height));
            }
            PlayerInput::Keys { up, down } => {
                self.up = up;
                self.down = down;
            }
        }
        Ok(())
    }

    /// Forget held keys and any pending pointer target
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
