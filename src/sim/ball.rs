//! The ball
//!
//! Collision checks all run against the ball's position at the start of the
//! step; the position update happens once, last, with whatever velocity the
//! checks left behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::paddle::Paddle;
use super::state::GameEvent;
use super::wall::Wall;
use crate::config::Tuning;

/// What a single step did to the current life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    InPlay,
    /// Ball passed the bottom edge
    Lost,
}

impl StepOutcome {
    pub fn is_lost(self) -> bool {
        self == StepOutcome::Lost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Square bounding box of the ball (side = 2 * radius)
    pub bounds: Rect,
    pub radius: f32,
    pub vel: Vec2,
    /// Velocity restored on every reset
    pub start_vel: Vec2,
    /// Intended per-axis speed cap; bounces never clamp to it
    pub max_speed: f32,
    /// Sticky until the next reset
    pub lost: bool,
}

impl Ball {
    pub fn new(radius: f32, start_vel: Vec2, max_speed: f32) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, radius * 2.0, radius * 2.0),
            radius,
            vel: start_vel,
            start_vel,
            max_speed,
            lost: false,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.ball_radius,
            Vec2::new(tuning.ball_start_vx, tuning.ball_start_vy),
            tuning.ball_max_speed,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Park the ball at an anchor point (horizontally centered on `x`,
    /// top edge at `y`) with the starting velocity
    pub fn reset(&mut self, x: f32, y: f32) {
        self.bounds.x = x - self.radius;
        self.bounds.y = y;
        self.vel = self.start_vel;
        self.lost = false;
    }

    /// Park the ball on top of the paddle
    pub fn anchor_to(&mut self, paddle: &Paddle) {
        self.reset(paddle.center_x(), paddle.bounds.top() - paddle.bounds.height);
    }

    /// Advance one tick
    pub fn step(
        &mut self,
        wall: &mut Wall,
        paddle: &Paddle,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) -> StepOutcome {
        let rect = self.bounds;

        // Side walls
        if rect.left() < 0.0 || rect.right() > tuning.screen_width {
            self.vel.x = -self.vel.x;
            events.push(GameEvent::WallBounce);
        }

        // Ceiling
        if rect.top() < 0.0 {
            self.vel.y = -self.vel.y;
            events.push(GameEvent::CeilingBounce);
        }

        // Floor ends the life
        if rect.bottom() > tuning.screen_height && !self.lost {
            self.lost = true;
            events.push(GameEvent::BallLost);
        }

        // Paddle: only the top face, only while falling
        if rect.intersects(&paddle.bounds)
            && self.vel.y > 0.0
            && (rect.bottom() - paddle.bounds.top()).abs() < tuning.paddle_tolerance
        {
            self.vel.y = -self.vel.y;
            events.push(GameEvent::PaddleBounce);
        }

        // Blocks: every overlapping block takes damage, one vertical flip total
        let touched: Vec<usize> = wall
            .live_indices()
            .filter(|&i| wall.get(i).is_some_and(|b| rect.intersects(&b.bounds)))
            .collect();
        for index in &touched {
            if let Some(hit) = wall.hit(*index) {
                events.push(GameEvent::BlockHit {
                    index: hit.index,
                    durability: hit.durability,
                });
                if hit.destroyed {
                    events.push(GameEvent::BlockDestroyed { index: hit.index });
                }
            }
        }
        if !touched.is_empty() {
            self.vel.y = -self.vel.y;
        }

        self.bounds.translate(self.vel);

        if self.lost {
            StepOutcome::Lost
        } else {
            StepOutcome::InPlay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Ball, Wall, Paddle, Tuning) {
        let tuning = Tuning::default();
        let ball = Ball::from_tuning(&tuning);
        let wall = Wall::new(0, 0, 100.0, 50.0);
        let paddle = Paddle::new(100.0, 20.0, 600.0, 600.0);
        (ball, wall, paddle, tuning)
    }

    fn place(ball: &mut Ball, x: f32, y: f32, vel: Vec2) {
        ball.bounds.x = x;
        ball.bounds.y = y;
        ball.vel = vel;
    }

    #[test]
    fn test_free_flight() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        place(&mut ball, 300.0, 300.0, Vec2::new(4.0, -4.0));
        let outcome = ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(outcome, StepOutcome::InPlay);
        assert_eq!(ball.bounds.x, 304.0);
        assert_eq!(ball.bounds.y, 296.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_side_wall_reflects_before_move() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        place(&mut ball, 582.0, 300.0, Vec2::new(4.0, 4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.x, -4.0);
        // Moved with the already-inverted velocity
        assert_eq!(ball.bounds.x, 578.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);

        place(&mut ball, -1.0, 300.0, Vec2::new(-4.0, 4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.x, 4.0);
    }

    #[test]
    fn test_ceiling_reflects_on_first_violation() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        place(&mut ball, 300.0, 2.0, Vec2::new(4.0, -4.0));
        // Ends this tick above the ceiling
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert!(ball.bounds.top() < 0.0);
        assert_eq!(ball.vel.y, -4.0);
        // Next tick sees the violation and flips immediately
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.y, 4.0);
        assert_eq!(ball.bounds.top(), 2.0);
    }

    #[test]
    fn test_bottom_is_lost() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        place(&mut ball, 10.0, 585.0, Vec2::new(4.0, 4.0));
        let outcome = ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert!(outcome.is_lost());
        assert!(ball.lost);
        // No bounce off the floor
        assert_eq!(ball.vel.y, 4.0);
        assert_eq!(events, vec![GameEvent::BallLost]);

        // Loss stays signalled until reset, reported once
        events.clear();
        assert!(ball.step(&mut wall, &paddle, &tuning, &mut events).is_lost());
        assert!(events.is_empty());
        ball.reset(300.0, 300.0);
        assert!(!ball.lost);
    }

    #[test]
    fn test_paddle_bounce_top_face() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        // Paddle top at 560; ball bottom at 562
        place(&mut ball, 290.0, 542.0, Vec2::new(4.0, 4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.y, -4.0);
        assert_eq!(events, vec![GameEvent::PaddleBounce]);
    }

    #[test]
    fn test_paddle_ignored_while_rising() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        place(&mut ball, 290.0, 542.0, Vec2::new(4.0, -4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.y, -4.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_paddle_side_hit_ignored() {
        let (mut ball, mut wall, paddle, tuning) = setup();
        let mut events = Vec::new();
        // Overlaps the paddle's left side, ball bottom well below paddle top
        place(&mut ball, 235.0, 555.0, Vec2::new(4.0, 4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert_eq!(ball.vel.y, 4.0);
    }

    #[test]
    fn test_block_hit_destroys_weak_block() {
        let (mut ball, _, paddle, tuning) = setup();
        // Bottom block of a single column has durability 1
        let mut wall = Wall::new(1, 5, 100.0, 50.0);
        let mut events = Vec::new();
        // Ball moving down-right into block 4 (y 200..250)
        place(&mut ball, 40.0, 235.0, Vec2::new(4.0, 4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        let block = wall.get(4).unwrap();
        assert_eq!(block.durability, 0);
        assert!(!block.live);
        assert_eq!(ball.vel.y, -4.0);
        assert!(events.contains(&GameEvent::BlockDestroyed { index: 4 }));
        assert_eq!(wall.live_count(), 4);
    }

    #[test]
    fn test_multi_block_hit_flips_once() {
        let (mut ball, _, paddle, tuning) = setup();
        let mut wall = Wall::new(2, 5, 100.0, 50.0);
        let mut events = Vec::new();
        // Straddles the seam between blocks 8 and 9 (bottom row)
        place(&mut ball, 90.0, 235.0, Vec2::new(4.0, -4.0));
        ball.step(&mut wall, &paddle, &tuning, &mut events);
        assert!(!wall.get(8).unwrap().live);
        assert!(!wall.get(9).unwrap().live);
        assert_eq!(ball.vel.y, 4.0);
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BlockHit { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_reset_round_trip() {
        let (mut ball, _, _, _) = setup();
        ball.vel = Vec2::new(-7.0, 9.0);
        ball.lost = true;
        ball.reset(123.0, 456.0);
        let d = ball.center().distance(Vec2::new(123.0, 456.0));
        assert!(d <= ball.radius + 1e-4);
        assert_eq!(ball.vel, Vec2::new(4.0, -4.0));
        assert!(!ball.lost);
    }

    #[test]
    fn test_anchor_sits_on_paddle() {
        let (mut ball, _, paddle, _) = setup();
        ball.anchor_to(&paddle);
        assert_eq!(ball.center().x, paddle.center_x());
        assert_eq!(ball.bounds.bottom(), paddle.bounds.top());
    }
}
