use hecs::World;
use log::trace;

use crate::math::{approach, clamp, lerp, random_range};
use crate::params::Params;
use crate::{Ball, Config, CpuControl, GameRng, Paddle, Time};

/// How hard the CPU chases the ball; faster balls make it sloppier
pub fn tracking_strength(ball_speed: f32, max_speed: f32) -> f32 {
    let penalty = (ball_speed / max_speed).min(Params::CPU_TRACKING_PENALTY_MAX);
    (Params::CPU_TRACKING_BASE - penalty).max(Params::CPU_TRACKING_MIN)
}

/// Drive the CPU paddle toward a noisy guess of where the ball is
pub fn update_opponent(world: &mut World, time: &Time, config: &Config, rng: &mut GameRng) {
    let ball = {
        let mut query = world.query::<&Ball>();
        query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(ball) = ball else {
        return;
    };

    let strength = tracking_strength(ball.speed, config.ball_max_speed);
    let max_step = config.paddle_speed * strength * time.dt;

    for (_entity, (paddle, control)) in world.query_mut::<(&mut Paddle, &mut CpuControl)>() {
        // Recentre unless the ball is heading this way
        let target = if ball.vel.x > 0.0 {
            ball.pos.y + control.drift
        } else {
            config.playfield_height / 2.0
        };

        let half_height = paddle.height / 2.0;
        let desired = clamp(
            target,
            half_height + config.cpu_edge_buffer,
            config.playfield_height - half_height - config.cpu_edge_buffer,
        );
        paddle.set_center_y(approach(paddle.center_y(), desired, max_step));

        let sample = random_range(
            &mut rng.0,
            -config.cpu_drift_range,
            config.cpu_drift_range,
        );
        control.drift = lerp(control.drift, sample, config.cpu_drift_rate);
        trace!("cpu aim {:.1} drift {:.2}", desired, control.drift);
    }
}

/// Between matches the aim bias settles back to zero
pub fn decay_opponent_drift(world: &mut World, config: &Config) {
    for (_entity, control) in world.query_mut::<&mut CpuControl>() {
        control.drift = lerp(control.drift, 0.0, config.idle_drift_decay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_cpu_paddle};
    use glam::Vec2;

    fn setup_world() -> (World, Config, GameRng) {
        let mut world = World::new();
        let config = Config::new();
        create_cpu_paddle(&mut world, &config);
        (world, config, GameRng::new(12345))
    }

    fn cpu(world: &World) -> (Paddle, CpuControl) {
        let mut query = world.query::<(&Paddle, &CpuControl)>();
        let (_e, (paddle, control)) = query.iter().next().unwrap();
        (*paddle, *control)
    }

    #[test]
    fn test_tracking_strength_drops_with_speed() {
        assert!((tracking_strength(0.0, 980.0) - 0.9).abs() < 1e-6);
        assert!((tracking_strength(490.0, 980.0) - 0.4).abs() < 1e-6);
        assert!(
            (tracking_strength(980.0, 980.0) - 0.2).abs() < 1e-6,
            "Strength should bottom out at 0.2"
        );
        assert!(tracking_strength(420.0, 980.0) < tracking_strength(300.0, 980.0));
    }

    #[test]
    fn test_tracks_incoming_ball() {
        let (mut world, config, mut rng) = setup_world();
        create_ball(&mut world, Vec2::new(700.0, 100.0), Vec2::new(420.0, 0.0), 420.0);
        let time = Time::new(0.05, 0.0);

        let before = cpu(&world).0.center_y();
        update_opponent(&mut world, &time, &config, &mut rng);
        let after = cpu(&world).0.center_y();

        let expected_step = config.paddle_speed * tracking_strength(420.0, 980.0) * 0.05;
        assert!(after < before, "CPU should move up toward the ball");
        assert!((before - after - expected_step).abs() < 1e-3, "Move is rate limited");
    }

    #[test]
    fn test_recentres_when_ball_moves_away() {
        let (mut world, config, mut rng) = setup_world();
        create_ball(&mut world, Vec2::new(300.0, 100.0), Vec2::new(-420.0, 0.0), 420.0);
        for (_e, paddle) in world.query_mut::<&mut Paddle>() {
            paddle.set_center_y(450.0);
        }
        let time = Time::new(0.05, 0.0);

        for _ in 0..100 {
            update_opponent(&mut world, &time, &config, &mut rng);
        }

        assert_eq!(cpu(&world).0.center_y(), config.playfield_height / 2.0);
    }

    #[test]
    fn test_keeps_edge_buffer() {
        let (mut world, config, mut rng) = setup_world();
        create_ball(&mut world, Vec2::new(700.0, 0.0), Vec2::new(420.0, 0.0), 420.0);
        let time = Time::new(0.05, 0.0);

        for _ in 0..200 {
            update_opponent(&mut world, &time, &config, &mut rng);
        }

        let (paddle, _) = cpu(&world);
        assert!(
            paddle.y >= config.cpu_edge_buffer - 1e-3,
            "CPU paddle should stay {} units off the wall, top at {}",
            config.cpu_edge_buffer,
            paddle.y
        );
    }

    #[test]
    fn test_drift_moves_slowly() {
        let (mut world, config, mut rng) = setup_world();
        create_ball(&mut world, Vec2::new(700.0, 300.0), Vec2::new(420.0, 0.0), 420.0);
        let time = Time::new(0.016, 0.0);

        update_opponent(&mut world, &time, &config, &mut rng);

        let drift = cpu(&world).1.drift;
        assert!(
            drift.abs() <= config.cpu_drift_range * config.cpu_drift_rate + 1e-6,
            "One tick should only nudge the drift, got {}",
            drift
        );
    }

    #[test]
    fn test_drift_decays_when_idle() {
        let (mut world, config, _rng) = setup_world();
        for (_e, control) in world.query_mut::<&mut CpuControl>() {
            control.drift = 30.0;
        }

        decay_opponent_drift(&mut world, &config);

        assert!((cpu(&world).1.drift - 29.1).abs() < 1e-4);
    }

    #[test]
    fn test_same_seed_same_drift() {
        let (mut world_a, config, mut rng_a) = setup_world();
        let (mut world_b, _, mut rng_b) = setup_world();
        for world in [&mut world_a, &mut world_b] {
            create_ball(world, Vec2::new(700.0, 200.0), Vec2::new(420.0, 0.0), 420.0);
        }
        let time = Time::new(0.016, 0.0);

        for _ in 0..50 {
            update_opponent(&mut world_a, &time, &config, &mut rng_a);
            update_opponent(&mut world_b, &time, &config, &mut rng_b);
        }

        assert_eq!(cpu(&world_a), cpu(&world_b));
    }
}
