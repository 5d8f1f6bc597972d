//! Rendering module
//!
//! Describes frames through the `Canvas` trait; the backend is supplied by
//! whoever hosts the game.

pub mod canvas;
pub mod scene;

pub use canvas::{Canvas, Color, DrawCommand, DrawList, colors};
pub use scene::{START_PROMPT, block_color, draw_detections, draw_fps, draw_scene};
