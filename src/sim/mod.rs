//! Simulation module
//!
//! All gameplay logic lives here. It must stay free of rendering, camera
//! and timing concerns:
//! - One step per tick, no variable timestep
//! - Stable iteration order (row-major wall arena)
//! - Collaborators passed in explicitly

pub mod ball;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;
pub mod wall;

pub use ball::{Ball, StepOutcome};
pub use geometry::Rect;
pub use paddle::Paddle;
pub use state::{GameEvent, GamePhase, GameState, SessionStats};
pub use tick::{TickInput, advance, tick, track};
pub use wall::{Block, BlockHit, Wall, durability_for_row};
