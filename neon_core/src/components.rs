use glam::Vec2;

use crate::math::Aabb;

/// Which paddle / half of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Side {
    /// Human-controlled, left edge
    Player,
    /// Computer-controlled, right edge
    Cpu,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }

    /// Horizontal sign pointing at this side's wall
    pub fn toward(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Cpu => 1.0,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // Left edge, fixed per side
    pub y: f32, // Top edge
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            side,
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn set_center_y(&mut self, center_y: f32) {
        self.y = center_y - self.height / 2.0;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// Marks the human paddle; holds the centre it eases toward
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerControl {
    pub target_y: f32,
}

/// Marks the computer paddle; holds its random-walk aim bias
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuControl {
    pub drift: f32,
}

/// Ball component
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32, // Scalar speed; |vel| == speed while in play
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, speed: f32) -> Self {
        Self { pos, vel, speed }
    }

    /// Place the ball at `center` and launch it toward `direction` (-1 or 1)
    pub fn serve(&mut self, center: Vec2, speed: f32, angle: f32, direction: f32) {
        self.pos = center;
        self.speed = speed;
        self.vel = Vec2::new(angle.cos() * direction, angle.sin()) * speed;
    }

    /// Park the ball at `center` with no motion
    pub fn park(&mut self, center: Vec2, speed: f32) {
        self.pos = center;
        self.speed = speed;
        self.vel = Vec2::ZERO;
    }
}
