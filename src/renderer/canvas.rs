//! Drawing collaborator
//!
//! The game never owns a window or a pixel format. It describes each frame
//! through `Canvas`; `DrawList` records those calls so headless runs and
//! tests can inspect them.

use glam::Vec2;

use crate::sim::Rect;

/// RGB color
pub type Color = [u8; 3];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [234, 218, 184];
    pub const OUTLINE: Color = [100, 100, 100];
    pub const TEXT: Color = [78, 81, 139];
    pub const BLOCK_RED: Color = [242, 85, 96];
    pub const BLOCK_GREEN: Color = [86, 174, 87];
    pub const BLOCK_BLUE: Color = [69, 177, 232];
    pub const BALL: Color = [86, 174, 87];
    pub const DETECTION: Color = [0, 255, 0];
    pub const FPS: Color = [0, 0, 255];
}

pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    fn text(&mut self, text: &str, pos: Vec2, color: Color);
    /// Finish the frame
    fn present(&mut self) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f32),
    FillCircle(Vec2, f32, Color),
    StrokeCircle(Vec2, f32, Color, f32),
    Text(String, Vec2, Color),
}

/// Canvas that records the last presented frame
#[derive(Debug, Default)]
pub struct DrawList {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Text strings drawn in the last frame
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.last_frame.iter().filter_map(|c| match c {
            DrawCommand::Text(s, _, _) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.pending.push(DrawCommand::StrokeRect(rect, color, width));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.pending.push(DrawCommand::FillCircle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.pending
            .push(DrawCommand::StrokeCircle(center, radius, color, width));
    }

    fn text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.pending
            .push(DrawCommand::Text(text.to_string(), pos, color));
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}
