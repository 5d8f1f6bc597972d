//! Fixed-cadence simulation tick
//!
//! A tick is split in two so the runner can draw between them:
//! `track` applies the position sample to the paddle, `advance` moves the
//! ball and handles phase changes. `tick` runs both back to back.

use super::ball::StepOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle center target from the position source (None = no signal)
    pub target_x: Option<f32>,
    /// Start trigger (pointer press)
    pub start: bool,
}

/// Apply this tick's position sample to the paddle
pub fn track(state: &mut GameState, target_x: Option<f32>) {
    state.events.clear();
    state.stats.ticks += 1;
    state.paddle.move_to(target_x, state.tuning.screen_width);
}

/// Advance the ball and the phase machine by one tick
pub fn advance(state: &mut GameState, start: bool) {
    match state.phase {
        GamePhase::Live => {
            let first_new = state.events.len();
            let outcome = state.ball.step(
                &mut state.wall,
                &state.paddle,
                &state.tuning,
                &mut state.events,
            );

            state.stats.blocks_destroyed += state.events[first_new..]
                .iter()
                .filter(|e| matches!(e, GameEvent::BlockDestroyed { .. }))
                .count() as u32;
            state.note_wall_cleared();

            if outcome == StepOutcome::Lost {
                state.stats.balls_lost += 1;
                state.phase = GamePhase::Idle;
                log::info!(
                    "Ball lost (total {}), {} blocks left",
                    state.stats.balls_lost,
                    state.wall.live_count()
                );
            }
        }
        GamePhase::Idle => {
            // Ball rides the paddle for as long as we're idle
            state.ball.anchor_to(&state.paddle);
        }
    }

    if start && state.phase == GamePhase::Idle {
        // A start in the same tick as a loss would otherwise launch from the floor
        state.ball.anchor_to(&state.paddle);
        state.phase = GamePhase::Live;
        state.events.push(GameEvent::Launched);
        log::debug!("Ball launched at x={:.1}", state.ball.center().x);
    }

    for event in &state.events {
        log::trace!("tick {}: {:?}", state.stats.ticks, event);
    }
}

/// Run a whole tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    track(state, input.target_x);
    advance(state, input.start);
}
