//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::Paddle;
use super::wall::Wall;
use crate::config::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball parked on the paddle, waiting for the start trigger
    #[default]
    Idle,
    /// Ball in motion
    Live,
}

/// Something that happened during a tick
///
/// Purely informational: logging, rendering cues, tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    WallBounce,
    CeilingBounce,
    PaddleBounce,
    BlockHit { index: usize, durability: u8 },
    BlockDestroyed { index: usize },
    BallLost,
    /// Last block destroyed; play carries on
    WallCleared,
}

/// Per-session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub blocks_destroyed: u32,
    pub balls_lost: u32,
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub wall: Wall,
    pub paddle: Paddle,
    pub ball: Ball,
    pub stats: SessionStats,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// `WallCleared` already reported this session
    wall_cleared: bool,
}

impl GameState {
    /// Build a fresh session from the tuning
    pub fn new(tuning: Tuning) -> Self {
        let wall = Wall::new(
            tuning.grid_cols,
            tuning.grid_rows,
            tuning.cell_width(),
            tuning.block_height,
        );
        let paddle = Paddle::new(
            tuning.paddle_width(),
            tuning.paddle_height,
            tuning.screen_width,
            tuning.screen_height,
        );
        let mut ball = Ball::from_tuning(&tuning);
        ball.anchor_to(&paddle);

        log::debug!(
            "New session: {} blocks, paddle {}x{}",
            wall.len(),
            paddle.bounds.width,
            paddle.bounds.height
        );

        Self {
            tuning,
            phase: GamePhase::Idle,
            wall,
            paddle,
            ball,
            stats: SessionStats::default(),
            events: Vec::new(),
            wall_cleared: false,
        }
    }

    /// Start over with a new wall, paddle and ball
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone());
    }

    pub fn is_live(&self) -> bool {
        self.phase == GamePhase::Live
    }

    /// Record a cleared wall once per session
    pub(crate) fn note_wall_cleared(&mut self) {
        if !self.wall_cleared && !self.wall.is_empty() && self.wall.is_cleared() {
            self.wall_cleared = true;
            self.events.push(GameEvent::WallCleared);
            log::info!("Wall cleared after {} ticks", self.stats.ticks);
        }
    }
}
