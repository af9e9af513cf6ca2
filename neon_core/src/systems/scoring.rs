use hecs::World;

use crate::{Ball, Config, Side};

/// Which side earns a point because the ball left the field, if any
pub fn check_scoring(world: &World, config: &Config) -> Option<Side> {
    let mut query = world.query::<&Ball>();
    let (_entity, ball) = query.iter().next()?;

    if ball.pos.x < -config.ball_radius {
        Some(Side::Cpu)
    } else if ball.pos.x > config.playfield_width + config.ball_radius {
        Some(Side::Player)
    } else {
        None
    }
}
