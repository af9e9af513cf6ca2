use hecs::World;

use crate::math::approach;
use crate::params::Params;
use crate::{Config, InputState, Paddle, PlayerControl, Time};

/// Turn the latest input into a target centre, then ease the paddle toward it
pub fn update_player(world: &mut World, input: &mut InputState, time: &Time, config: &Config) {
    let step = config.paddle_speed * time.dt;

    for (_entity, (paddle, control)) in world.query_mut::<(&mut Paddle, &mut PlayerControl)>() {
        if let Some(target) = input.pointer_target.take() {
            control.target_y = target;
        }

        if input.up {
            control.target_y -= step;
        } else if input.down {
            control.target_y += step;
        }
        control.target_y = config.clamp_paddle_center(control.target_y, paddle.height);

        // Slightly slower than the target moves, so the paddle lags behind
        let center = approach(
            paddle.center_y(),
            control.target_y,
            step * Params::PLAYER_EASE,
        );
        paddle.set_center_y(center);
    }
}
