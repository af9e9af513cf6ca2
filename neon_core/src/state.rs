//! Match lifecycle: Idle -> Running -> RoundPausing -> Running ... -> GameOver.
//!
//! The round pause is a countdown stored in the state itself and resolved by
//! the regular tick, so a restart simply overwrites it.

use log::{debug, info, warn};

use crate::components::Side;
use crate::config::Config;
use crate::error::SimError;
use crate::resources::{Events, GameEvent, Score};

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchState {
    /// Before the first serve or after a restart; ball wanders, nothing scores
    Idle,
    /// Live simulation
    Running,
    /// Frozen after a point until `remaining` seconds elapse
    RoundPausing { remaining: f32, serve_toward: Side },
    /// Terminal until restart
    GameOver { winner: Side },
}

impl MatchState {
    pub fn is_running(&self) -> bool {
        matches!(self, MatchState::Running)
    }
}

/// Text the UI shows over the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Overlay {
    pub title: &'static str,
    pub message: String,
    pub button: &'static str,
}

/// Title and message announced when a match ends
pub fn match_result_text(winner: Side) -> (&'static str, &'static str) {
    match winner {
        Side::Player => (
            "Victory!",
            "You dominated the arena. Click play to run it back.",
        ),
        Side::Cpu => (
            "CPU Wins",
            "The CPU outplayed you this time. Study the angles and try again!",
        ),
    }
}

/// Owns the score and the lifecycle state
#[derive(Debug, Clone)]
pub struct MatchFlow {
    pub state: MatchState,
    pub score: Score,
    win_score: u8,
    round_pause: f32,
}

impl MatchFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            state: MatchState::Idle,
            score: Score::new(),
            win_score: config.win_score,
            round_pause: config.round_pause,
        }
    }

    /// Idle -> Running. The caller serves the ball.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.state != MatchState::Idle {
            warn!("start ignored in state {:?}", self.state);
            return Err(SimError::NotIdle(self.state));
        }
        self.state = MatchState::Running;
        info!("match started");
        Ok(())
    }

    /// Zero the score and return to Idle from any state
    pub fn restart(&mut self) {
        self.score = Score::new();
        self.state = MatchState::Idle;
        info!("match restarted");
    }

    /// Record a point for `scorer`. Returns false when no point can be scored.
    pub fn award_point(&mut self, scorer: Side, events: &mut Events) -> bool {
        if !self.state.is_running() {
            debug!("point for {:?} ignored in state {:?}", scorer, self.state);
            return false;
        }

        let value = self.score.increment(scorer);
        events.push(GameEvent::ScoreChanged {
            side: scorer,
            score: value,
        });
        events.push(GameEvent::RoundEnded { winner: scorer });
        debug!(
            "{:?} scored: player {} - cpu {}",
            scorer, self.score.player, self.score.cpu
        );

        if let Some(winner) = self.score.has_winner(self.win_score) {
            let (title, message) = match_result_text(winner);
            self.state = MatchState::GameOver { winner };
            events.push(GameEvent::MatchEnded {
                winner,
                title,
                message,
            });
            info!(
                "match over, {:?} wins {}-{}",
                winner, self.score.player, self.score.cpu
            );
        } else {
            self.state = MatchState::RoundPausing {
                remaining: self.round_pause,
                serve_toward: scorer.opponent(),
            };
        }
        true
    }

    /// Count down a round pause. Returns the serve target once it has elapsed.
    pub fn advance_pause(&mut self, dt: f32) -> Option<Side> {
        if let MatchState::RoundPausing {
            remaining,
            serve_toward,
        } = self.state
        {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.state = MatchState::Running;
                debug!("round resumes, serving toward {:?}", serve_toward);
                return Some(serve_toward);
            }
            self.state = MatchState::RoundPausing {
                remaining,
                serve_toward,
            };
        }
        None
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        match self.state {
            MatchState::Idle => Some(Overlay {
                title: "Neon Pong",
                message: format!(
                    "Move your paddle with the mouse or arrow keys. First to {} points wins.",
                    self.win_score
                ),
                button: "Play",
            }),
            MatchState::GameOver { winner } => {
                let (title, message) = match_result_text(winner);
                Some(Overlay {
                    title,
                    message: message.to_string(),
                    button: "Play Again",
                })
            }
            MatchState::Running | MatchState::RoundPausing { .. } => None,
        }
    }
}
