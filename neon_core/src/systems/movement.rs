use glam::Vec2;
use hecs::World;

use crate::math::lerp;
use crate::params::Params;
use crate::{Ball, Config, Time};

/// Move ball based on velocity
pub fn move_ball(world: &mut World, time: &Time) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel * time.dt;
    }
}

/// Cosmetic wander around the centre while no match is running
pub fn idle_wander(world: &mut World, time: &Time, config: &Config) {
    let center = config.center();
    let goal = Vec2::new(
        center.x + (time.now / Params::IDLE_PERIOD_X).sin() * Params::IDLE_SWAY_X,
        center.y + (time.now / Params::IDLE_PERIOD_Y).sin() * Params::IDLE_SWAY_Y,
    );
    let t = (time.dt * Params::IDLE_EASE).min(1.0);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos.x = lerp(ball.pos.x, goal.x, t);
        ball.pos.y = lerp(ball.pos.y, goal.y, t);
    }
}
