use glam::Vec2;
use hecs::World;
use log::trace;

use crate::math::clamp;
use crate::params::Params;
use crate::{Ball, Config, Events, GameEvent, Paddle, Side, Wall};

/// Deflection for a hit `relative_intersect` units above the paddle centre.
/// Positive sends the ball up, capped at 60 degrees either way.
pub fn bounce_angle(relative_intersect: f32, half_height: f32) -> f32 {
    let normalized = (relative_intersect / half_height).clamp(-1.0, 1.0);
    normalized * Params::MAX_BOUNCE_ANGLE
}

/// Outgoing velocity and scalar speed after a paddle hit.
/// `direction` is +1 off the player paddle and -1 off the CPU paddle.
pub fn bounce_velocity(angle: f32, speed: f32, direction: f32, config: &Config) -> (Vec2, f32) {
    let new_speed = clamp(
        speed * config.ball_speed_up,
        config.ball_base_speed,
        config.ball_max_speed,
    );
    let vel = Vec2::new(
        new_speed * angle.cos() * direction,
        new_speed * -angle.sin(),
    );
    (vel, new_speed)
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(mut ball) = ball_data else {
        return; // No ball in world
    };

    let radius = config.ball_radius;
    let height = config.playfield_height;

    // Top/bottom walls
    let hit_top = ball.pos.y - radius <= 0.0 && ball.vel.y < 0.0;
    let hit_bottom = ball.pos.y + radius >= height && ball.vel.y > 0.0;
    if hit_top || hit_bottom {
        ball.vel.y = -ball.vel.y;
    }
    ball.pos.y = clamp(ball.pos.y, radius, height - radius);
    if hit_top || hit_bottom {
        let wall = if ball.pos.y < height / 2.0 {
            Wall::Top
        } else {
            Wall::Bottom
        };
        trace!("ball hit {:?} wall at x={:.1}", wall, ball.pos.x);
        events.push(GameEvent::WallHit(wall));
    }

    // Only the paddle the ball is heading toward can be hit
    let facing = if ball.vel.x < 0.0 {
        Some(Side::Player)
    } else if ball.vel.x > 0.0 {
        Some(Side::Cpu)
    } else {
        None
    };

    let paddle = facing.and_then(|side| {
        world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, paddle)| paddle.side == side)
            .map(|(_e, paddle)| *paddle)
    });

    if let Some(paddle) = paddle {
        if paddle.bounds().intersects_circle(ball.pos, radius) {
            let relative_intersect = paddle.center_y() - ball.pos.y;
            let angle = bounce_angle(relative_intersect, paddle.height / 2.0);
            let direction = paddle.side.opponent().toward();
            let (vel, speed) = bounce_velocity(angle, ball.speed, direction, config);

            ball.vel = vel;
            ball.speed = speed;
            // Flush against the outer face so the next tick cannot re-hit
            ball.pos.x = match paddle.side {
                Side::Player => paddle.x + paddle.width + radius,
                Side::Cpu => paddle.x - radius,
            };

            trace!("ball hit {:?} paddle, speed now {:.1}", paddle.side, speed);
            events.push(GameEvent::PaddleHit(paddle.side));
        }
    }

    for (_entity, b) in world.query_mut::<&mut Ball>() {
        *b = ball;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_cpu_paddle, create_player_paddle};

    fn setup_world() -> (World, Config, Events) {
        let mut world = World::new();
        let config = Config::new();
        create_player_paddle(&mut world, &config);
        create_cpu_paddle(&mut world, &config);
        (world, config, Events::new())
    }

    fn ball(world: &World) -> Ball {
        let mut query = world.query::<&Ball>();
        let (_e, ball) = query.iter().next().unwrap();
        *ball
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(480.0, 5.0), Vec2::new(300.0, -200.0), 360.6);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert!(ball.vel.y > 0.0, "Ball should bounce down after hitting top wall");
        assert_eq!(ball.vel.x, 300.0, "X velocity should be unchanged");
        assert_eq!(ball.pos.y, config.ball_radius, "Ball should be pushed out of wall");
        assert_eq!(events.list, vec![GameEvent::WallHit(Wall::Top)]);
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(480.0, 598.0), Vec2::new(300.0, 200.0), 360.6);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert!(ball.vel.y < 0.0, "Ball should bounce up after hitting bottom wall");
        assert_eq!(ball.pos.y, config.playfield_height - config.ball_radius);
        assert_eq!(events.list, vec![GameEvent::WallHit(Wall::Bottom)]);
    }

    #[test]
    fn test_ball_leaving_wall_is_not_flipped_again() {
        let (mut world, config, mut events) = setup_world();
        create_ball(
            &mut world,
            Vec2::new(480.0, config.ball_radius),
            Vec2::new(300.0, 200.0),
            360.6,
        );

        check_collisions(&mut world, &config, &mut events);

        assert!(ball(&world).vel.y > 0.0);
        assert!(events.list.is_empty());
    }

    #[test]
    fn test_centre_hit_on_player_paddle() {
        let (mut world, config, mut events) = setup_world();
        // Player paddle spans x 24..38, centre y 300
        create_ball(&mut world, Vec2::new(45.0, 300.0), Vec2::new(-420.0, 0.0), 420.0);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert!((ball.vel.x - 441.0).abs() < 1e-2, "vx should be 441, got {}", ball.vel.x);
        assert!(ball.vel.y.abs() < 1e-3);
        assert!((ball.speed - 441.0).abs() < 1e-2);
        assert_eq!(ball.pos.x, 24.0 + 14.0 + config.ball_radius);
        assert_eq!(events.list, vec![GameEvent::PaddleHit(Side::Player)]);
    }

    #[test]
    fn test_ball_collides_with_cpu_paddle() {
        let (mut world, config, mut events) = setup_world();
        let paddle_x = config.paddle_x(Side::Cpu);
        create_ball(
            &mut world,
            Vec2::new(paddle_x - 5.0, 300.0),
            Vec2::new(420.0, 0.0),
            420.0,
        );

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert!(ball.vel.x < 0.0, "Ball should bounce left off the CPU paddle");
        assert_eq!(ball.pos.x, paddle_x - config.ball_radius);
        assert_eq!(events.list, vec![GameEvent::PaddleHit(Side::Cpu)]);
    }

    #[test]
    fn test_hit_above_centre_deflects_up() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(45.0, 250.0), Vec2::new(-420.0, 0.0), 420.0);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert!(ball.vel.y < 0.0, "Upper half hit should send the ball up");
        assert!(ball.vel.x > 0.0);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-2);
    }

    #[test]
    fn test_edge_hit_caps_at_sixty_degrees() {
        let (mut world, config, mut events) = setup_world();
        // Ball centre below the paddle's bottom edge but still overlapping
        create_ball(&mut world, Vec2::new(45.0, 365.0), Vec2::new(-420.0, 0.0), 420.0);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        let angle = (-ball.vel.y).atan2(ball.vel.x);
        assert!((angle + Params::MAX_BOUNCE_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_speed_caps_at_max() {
        let (mut world, config, mut events) = setup_world();
        let speed = config.ball_max_speed - 1.0;
        create_ball(&mut world, Vec2::new(45.0, 300.0), Vec2::new(-speed, 0.0), speed);

        check_collisions(&mut world, &config, &mut events);

        let ball = ball(&world);
        assert_eq!(ball.speed, config.ball_max_speed);
        assert!(ball.vel.length() <= config.ball_max_speed + 1e-2);
    }

    #[test]
    fn test_ball_does_not_bounce_when_moving_away_from_paddle() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(40.0, 300.0), Vec2::new(420.0, 0.0), 420.0);

        check_collisions(&mut world, &config, &mut events);

        assert_eq!(ball(&world).vel.x, 420.0, "Ball should not bounce when moving away");
        assert!(events.list.is_empty());
    }

    #[test]
    fn test_bounce_is_deterministic() {
        let config = Config::new();
        let angle_a = bounce_angle(-23.5, 60.0);
        let angle_b = bounce_angle(-23.5, 60.0);
        assert_eq!(angle_a, angle_b);
        assert_eq!(
            bounce_velocity(angle_a, 500.0, 1.0, &config),
            bounce_velocity(angle_b, 500.0, 1.0, &config)
        );
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let (mut world, config, mut events) = setup_world();

        check_collisions(&mut world, &config, &mut events);

        assert!(events.list.is_empty());
    }
}
