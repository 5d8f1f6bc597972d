//! Scene description: what a frame of the game looks like

use glam::Vec2;

use super::canvas::{Canvas, Color, colors};
use crate::sim::GameState;
use crate::source::Detection;

/// Prompt shown while the ball waits on the paddle
pub const START_PROMPT: &str = "CLICK TO START";

/// Block color by remaining durability
pub fn block_color(durability: u8) -> Color {
    match durability {
        0 | 1 => colors::BLOCK_GREEN,
        2 => colors::BLOCK_RED,
        _ => colors::BLOCK_BLUE,
    }
}

/// Draw wall, paddle, ball, and the idle prompt
pub fn draw_scene(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.clear(colors::BACKGROUND);

    for block in state.wall.live_blocks() {
        canvas.fill_rect(block.bounds, block_color(block.durability));
        canvas.stroke_rect(block.bounds, colors::BACKGROUND, 2.0);
    }

    let paddle = &state.paddle;
    canvas.fill_rect(paddle.bounds, paddle.color);
    canvas.stroke_rect(paddle.bounds, colors::OUTLINE, 3.0);

    let ball = &state.ball;
    canvas.fill_circle(ball.center(), ball.radius, colors::BALL);
    canvas.stroke_circle(ball.center(), ball.radius, colors::OUTLINE, 3.0);

    if !state.is_live() {
        let pos = Vec2::new(140.0, state.tuning.screen_height / 2.0 + 80.0);
        canvas.text(START_PROMPT, pos, colors::TEXT);
    }
}

/// Boxed and captioned detections, in camera frame pixels
pub fn draw_detections(detections: &[Detection], canvas: &mut dyn Canvas) {
    for detection in detections {
        canvas.stroke_rect(detection.bounds(), colors::DETECTION, 2.0);
        let pos = Vec2::new(detection.x1, detection.y1 - 10.0);
        canvas.text(&detection.label(), pos, colors::DETECTION);
    }
}

/// Camera frame rate in the top-left corner
pub fn draw_fps(fps: u32, canvas: &mut dyn Canvas) {
    canvas.text(&format!("FPS: {}", fps), Vec2::new(10.0, 30.0), colors::FPS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::renderer::canvas::{DrawCommand, DrawList};
    use crate::sim::GamePhase;

    #[test]
    fn test_block_colors() {
        assert_eq!(block_color(3), colors::BLOCK_BLUE);
        assert_eq!(block_color(2), colors::BLOCK_RED);
        assert_eq!(block_color(1), colors::BLOCK_GREEN);
    }

    #[test]
    fn test_idle_scene() {
        let state = GameState::new(Tuning::default());
        let mut list = DrawList::new();
        draw_scene(&state, &mut list);
        list.present();

        let fills = list
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect(..)))
            .count();
        // 36 blocks + paddle
        assert_eq!(fills, 37);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec![START_PROMPT]);
    }

    #[test]
    fn test_detection_boxes() {
        let det = Detection {
            x1: 100.0,
            y1: 40.0,
            x2: 160.0,
            y2: 140.0,
            confidence: 0.9,
            class_id: 65,
        };
        let mut list = DrawList::new();
        draw_detections(&[det], &mut list);
        list.present();

        assert_eq!(
            list.last_frame(),
            &[
                DrawCommand::StrokeRect(det.bounds(), colors::DETECTION, 2.0),
                DrawCommand::Text(
                    "remote: 0.90".to_string(),
                    Vec2::new(100.0, 30.0),
                    colors::DETECTION
                ),
            ]
        );
    }

    #[test]
    fn test_live_scene_has_no_prompt() {
        let mut state = GameState::new(Tuning::default());
        state.phase = GamePhase::Live;
        state.wall.hit(35);
        let mut list = DrawList::new();
        draw_scene(&state, &mut list);
        draw_fps(30, &mut list);
        list.present();

        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["FPS: 30"]);
        let circles = list
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle(..)))
            .count();
        assert_eq!(circles, 1);
        let fills = list
            .last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect(..)))
            .count();
        assert_eq!(fills, 36);
    }
}
