//! The simulation context handed to the host: one per session, driven by
//! `tick` from the host's frame callback.

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::Rng;

use crate::math::random_range;
use crate::params::Params;
use crate::systems::{decay_opponent_drift, idle_wander};
use crate::{
    create_ball, create_cpu_paddle, create_player_paddle, step, Ball, Config, ConfigError,
    CpuControl, Events, GameEvent, GameRng, InputState, MatchFlow, MatchState, Overlay, Paddle,
    PlayerControl, PlayerInput, Score, Side, SimError, Time,
};

/// Events emitted by one `tick`, in order
pub type FrameEvents = Vec<GameEvent>;

/// Read-only copy of everything the renderer and UI need
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub state: MatchState,
    pub score: Score,
    pub ball: Ball,
    pub ball_radius: f32,
    pub player: Paddle,
    pub cpu: Paddle,
    pub time: f32,
}

/// Owns the world and every resource of one session
pub struct Simulation {
    world: World,
    config: Config,
    time: Time,
    rng: GameRng,
    input: InputState,
    events: Events,
    flow: MatchFlow,
    player: Entity,
    cpu: Entity,
    ball: Entity,
}

impl Simulation {
    /// Validate `config` and build an idle session
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let player = create_player_paddle(&mut world, &config);
        let cpu = create_cpu_paddle(&mut world, &config);
        let ball = create_ball(&mut world, config.center(), Vec2::ZERO, config.ball_base_speed);

        debug!(
            "simulation ready: {}x{} field, first to {}",
            config.playfield_width, config.playfield_height, config.win_score
        );

        Ok(Self {
            world,
            rng: GameRng::new(config.seed),
            flow: MatchFlow::new(&config),
            time: Time::default(),
            input: InputState::new(),
            events: Events::new(),
            config,
            player,
            cpu,
            ball,
        })
    }

    /// Advance by one frame. `dt` is in seconds and is clamped to `max_dt`
    /// before it reaches the physics.
    pub fn tick(&mut self, dt: f32) -> FrameEvents {
        let raw_dt = if dt.is_finite() {
            dt.max(0.0)
        } else {
            warn!("non-finite frame delta {}, skipping advance", dt);
            0.0
        };
        self.time.dt = raw_dt.min(self.config.max_dt);
        self.time.now += self.time.dt;
        self.events.clear();

        match self.flow.state {
            MatchState::Idle => {
                idle_wander(&mut self.world, &self.time, &self.config);
                decay_opponent_drift(&mut self.world, &self.config);
            }
            MatchState::Running => {
                let scored = step(
                    &mut self.world,
                    &self.time,
                    &self.config,
                    &mut self.input,
                    &mut self.events,
                    &mut self.rng,
                );
                if let Some(scorer) = scored {
                    self.flow.award_point(scorer, &mut self.events);
                }
            }
            MatchState::RoundPausing { .. } => {
                // The pause is wall-clock, so it counts the unclamped delta
                if let Some(serve_toward) = self.flow.advance_pause(raw_dt) {
                    self.reset_round(serve_toward);
                }
            }
            MatchState::GameOver { .. } => {}
        }

        self.events.drain()
    }

    /// Record player input; applied on the next tick
    pub fn submit_player_input(&mut self, input: PlayerInput) -> Result<(), SimError> {
        self.input
            .submit(input, self.config.playfield_height)
            .map_err(|err| {
                warn!("rejected player input {:?}: {}", input, err);
                err
            })
    }

    /// Idle -> Running with a serve in a random direction
    pub fn start(&mut self) -> Result<(), SimError> {
        self.flow.start()?;
        let serve_toward = if self.rng.0.gen_bool(0.5) {
            Side::Cpu
        } else {
            Side::Player
        };
        self.reset_round(serve_toward);
        Ok(())
    }

    /// Zero the score and return to Idle from any state.
    /// Consumes no randomness, so repeating it changes nothing.
    pub fn restart(&mut self) {
        self.flow.restart();
        self.input.reset();
        self.center_paddles();
        let center = self.config.center();
        let base_speed = self.config.ball_base_speed;
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.park(center, base_speed);
        }
        info!("back to idle");
    }

    pub fn state(&self) -> MatchState {
        self.flow.state
    }

    pub fn score(&self) -> Score {
        self.flow.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.flow.winner()
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.flow.overlay()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| *ball)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        let entity = match side {
            Side::Player => self.player,
            Side::Cpu => self.cpu,
        };
        self.world.get::<&Paddle>(entity).ok().map(|paddle| *paddle)
    }

    /// Everything the renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        let ball = self
            .ball()
            .unwrap_or_else(|| Ball::new(self.config.center(), Vec2::ZERO, 0.0));
        let paddle = |side| {
            self.paddle(side).unwrap_or_else(|| {
                Paddle::new(
                    side,
                    self.config.paddle_x(side),
                    0.0,
                    self.config.paddle_width,
                    self.config.paddle_height_for(side),
                )
            })
        };

        Snapshot {
            state: self.flow.state,
            score: self.flow.score,
            ball,
            ball_radius: self.config.ball_radius,
            player: paddle(Side::Player),
            cpu: paddle(Side::Cpu),
            time: self.time.now,
        }
    }

    /// Centre everything and serve toward `serve_toward` at base speed
    fn reset_round(&mut self, serve_toward: Side) {
        self.center_paddles();
        let angle = random_range(
            &mut self.rng.0,
            -Params::MAX_SERVE_ANGLE,
            Params::MAX_SERVE_ANGLE,
        );
        let center = self.config.center();
        let base_speed = self.config.ball_base_speed;
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.serve(center, base_speed, angle, serve_toward.toward());
        }
        debug!("serve toward {:?} at {:.2} rad", serve_toward, angle);
    }

    fn center_paddles(&mut self) {
        let center_y = self.config.playfield_height / 2.0;
        for (_entity, (paddle, control)) in self
            .world
            .query_mut::<(&mut Paddle, Option<&mut PlayerControl>)>()
        {
            paddle.set_center_y(center_y);
            if let Some(control) = control {
                control.target_y = center_y;
            }
        }
        for (_entity, control) in self.world.query_mut::<&mut CpuControl>() {
            control.drift = 0.0;
        }
    }

    /// Place the ball directly; for hosts replaying a scenario and for tests.
    /// The speed is clamped into `[base, max]` and the velocity rescaled to it.
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.pos = pos;
            ball.speed = vel
                .length()
                .clamp(self.config.ball_base_speed, self.config.ball_max_speed);
            ball.vel = vel.normalize_or_zero() * ball.speed;
        }
    }
}
