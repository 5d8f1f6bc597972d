//! The player's paddle
//!
//! Follows the tracked object horizontally; vertical position is fixed
//! near the bottom of the screen.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Paddle fill color (RGB)
pub const PADDLE_GREEN: [u8; 3] = [86, 174, 87];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub bounds: Rect,
    pub color: [u8; 3],
}

impl Paddle {
    /// Create a paddle centered at the bottom of the screen
    pub fn new(width: f32, height: f32, screen_width: f32, screen_height: f32) -> Self {
        let mut paddle = Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            color: PADDLE_GREEN,
        };
        paddle.reset(screen_width, screen_height);
        paddle
    }

    /// Recenter horizontally, two paddle-heights above the bottom edge
    pub fn reset(&mut self, screen_width: f32, screen_height: f32) {
        self.bounds.x = (screen_width / 2.0 - self.bounds.width / 2.0).floor();
        self.bounds.y = screen_height - self.bounds.height * 2.0;
    }

    /// Move the paddle center to `target_x`, or hold position on `None`
    ///
    /// Afterwards the paddle is clamped into `[0, screen_width]`. If the
    /// paddle is wider than the screen the left edge wins and sits at 0.
    pub fn move_to(&mut self, target_x: Option<f32>, screen_width: f32) {
        if let Some(x) = target_x {
            if x.is_finite() {
                self.bounds.set_center_x(x);
            } else {
                log::warn!("Ignoring non-finite paddle target {}", x);
            }
        }
        if self.bounds.right() > screen_width {
            self.bounds.set_right(screen_width);
        }
        if self.bounds.left() < 0.0 {
            self.bounds.set_left(0.0);
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.bounds.center_x()
    }
}
