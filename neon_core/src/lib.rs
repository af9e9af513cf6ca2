pub mod components;
pub mod config;
pub mod error;
pub mod math;
pub mod params;
pub mod resources;
pub mod sim;
pub mod state;
pub mod systems;

pub use components::*;
pub use config::*;
pub use error::*;
pub use params::*;
pub use resources::*;
pub use sim::*;
pub use state::*;

use hecs::World;
use systems::*;

/// Run one live simulation step. `time.dt` must already be clamped.
/// Returns the side that scored, if the ball left the field.
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    input: &mut InputState,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Side> {
    // 1. Player paddle follows input
    update_player(world, input, time, config);

    // 2. CPU paddle tracks the ball
    update_opponent(world, time, config, rng);

    // 3. Move ball
    move_ball(world, time);

    // 4. Check collisions (walls, then the paddle the ball is heading toward)
    check_collisions(world, config, events);

    // 5. Check scoring (ball exited the field)
    check_scoring(world, config)
}

/// Helper to create the human paddle, centred
pub fn create_player_paddle(world: &mut World, config: &Config) -> hecs::Entity {
    let center_y = config.playfield_height / 2.0;
    let mut paddle = Paddle::new(
        Side::Player,
        config.paddle_x(Side::Player),
        0.0,
        config.paddle_width,
        config.paddle_height_for(Side::Player),
    );
    paddle.set_center_y(center_y);
    world.spawn((paddle, PlayerControl { target_y: center_y }))
}

/// Helper to create the computer paddle, centred
pub fn create_cpu_paddle(world: &mut World, config: &Config) -> hecs::Entity {
    let mut paddle = Paddle::new(
        Side::Cpu,
        config.paddle_x(Side::Cpu),
        0.0,
        config.paddle_width,
        config.paddle_height_for(Side::Cpu),
    );
    paddle.set_center_y(config.playfield_height / 2.0);
    world.spawn((paddle, CpuControl::default()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, speed: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, speed),))
}
