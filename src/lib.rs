//! Vision Breakout - a block breaker steered by a tracked object
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (wall, paddle, ball, game phase)
//! - `source`: Camera frames, detection filtering and the paddle position source
//! - `renderer`: Drawing collaborator trait and scene description
//! - `app`: Fixed-cadence runner tying source, simulation and rendering together
//! - `config`: Tunable game constants

pub mod app;
pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod source;

pub use app::{Game, InputEvent, Interruptible, ScriptedEvents};
pub use config::Tuning;
pub use error::GameError;

/// Default tuning constants
pub mod consts {
    /// Window size (pixels)
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Block grid
    pub const GRID_COLS: u32 = 6;
    pub const GRID_ROWS: u32 = 6;
    pub const BLOCK_HEIGHT: f32 = 50.0;

    /// Paddle height; width is derived from screen width / columns
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Max distance between ball bottom and paddle top for a bounce
    pub const PADDLE_TOLERANCE: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VX: f32 = 4.0;
    pub const BALL_START_VY: f32 = -4.0;
    /// Intended speed cap (not enforced after bounces)
    pub const BALL_MAX_SPEED: f32 = 5.0;

    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 30;

    /// Detector defaults
    pub const CONFIDENCE_THRESHOLD: f32 = 0.5;
    /// Detector class ids treated as the paddle controller
    pub const TARGET_CLASSES: [u32; 2] = [67, 65];
}
