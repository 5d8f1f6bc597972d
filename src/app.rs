//! Fixed-cadence game runner
//!
//! One tick: poll the position source, move the paddle, draw, advance the
//! ball, handle input events. Ticks are never sub-stepped or caught up; a
//! late tick simply runs late.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::renderer::{Canvas, draw_detections, draw_fps, draw_scene};
use crate::sim::{self, GameState, SessionStats};
use crate::source::{PositionSource, first_target};

/// Camera frame timestamps kept for the FPS readout
const FPS_WINDOW: usize = 30;

/// Control inputs from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer press: launch the ball
    Start,
    /// Window closed / quit requested
    Quit,
}

/// Supplies input events, polled once per tick
pub trait EventSource {
    fn poll_events(&mut self, tick: u64) -> Vec<InputEvent>;
}

impl<E: EventSource + ?Sized> EventSource for Box<E> {
    fn poll_events(&mut self, tick: u64) -> Vec<InputEvent> {
        (**self).poll_events(tick)
    }
}

/// Events fired at fixed tick numbers
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    script: VecDeque<(u64, InputEvent)>,
}

impl ScriptedEvents {
    /// `script` must be ordered by tick
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(&(at, event)) = self.script.front() {
            if at > tick {
                break;
            }
            events.push(event);
            self.script.pop_front();
        }
        events
    }
}

/// Presses start on every tick, so a lost ball relaunches right away
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoStart;

impl EventSource for AutoStart {
    fn poll_events(&mut self, _tick: u64) -> Vec<InputEvent> {
        vec![InputEvent::Start]
    }
}

/// Adds `Quit` once a shared stop flag is raised (e.g. from a Ctrl-C handler)
#[derive(Debug)]
pub struct Interruptible<E> {
    inner: E,
    stop: Arc<AtomicBool>,
}

impl<E: EventSource> Interruptible<E> {
    pub fn new(inner: E, stop: Arc<AtomicBool>) -> Self {
        Self { inner, stop }
    }
}

impl<E: EventSource> EventSource for Interruptible<E> {
    fn poll_events(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut events = self.inner.poll_events(tick);
        if self.stop.load(Ordering::SeqCst) {
            log::info!("Interrupted at tick {}", tick);
            events.push(InputEvent::Quit);
        }
        events
    }
}

/// Sleeps out the remainder of each tick period
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Option<Instant>,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64),
            next: None,
        }
    }

    /// A clock that never sleeps (tests, benchmarks)
    pub fn unpaced() -> Self {
        Self {
            period: Duration::ZERO,
            next: None,
        }
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        let due = match self.next {
            Some(next) if next > now => {
                std::thread::sleep(next - now);
                next
            }
            // First tick, or running late: start counting from now
            _ => now,
        };
        self.next = Some(due + self.period);
    }
}

/// A running game with its collaborators
pub struct Game<S: PositionSource, C: Canvas> {
    pub state: GameState,
    source: S,
    canvas: C,
    clock: FrameClock,
    frame_times: VecDeque<Instant>,
    fps: u32,
}

impl<S: PositionSource, C: Canvas> Game<S, C> {
    pub fn new(state: GameState, source: S, canvas: C) -> Self {
        let clock = FrameClock::new(state.tuning.tick_rate);
        Self {
            state,
            source,
            canvas,
            clock,
            frame_times: VecDeque::with_capacity(FPS_WINDOW),
            fps: 0,
        }
    }

    /// Replace the pacing clock
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Camera frames per second, not ticks
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Record a processed camera frame and refresh the FPS figure
    fn update_fps(&mut self, now: Instant) {
        if self.frame_times.len() == FPS_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(now);

        if let (Some(oldest), Some(newest)) = (self.frame_times.front(), self.frame_times.back()) {
            let elapsed = newest.duration_since(*oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Run one tick; returns `false` once a quit was requested
    pub fn run_tick(&mut self, events: &[InputEvent]) -> bool {
        let sample = self.source.poll();
        let has_frame = sample.is_some();
        if has_frame {
            self.update_fps(Instant::now());
        }
        sim::track(&mut self.state, first_target(sample));

        draw_scene(&self.state, &mut self.canvas);
        // Overlay only exists for ticks that processed a camera frame
        if has_frame && self.state.tuning.show_overlay {
            draw_detections(self.source.overlay().unwrap_or_default(), &mut self.canvas);
            draw_fps(self.fps, &mut self.canvas);
        }
        self.canvas.present();

        let start = events.contains(&InputEvent::Start);
        sim::advance(&mut self.state, start);

        !events.contains(&InputEvent::Quit)
    }

    /// Tick at the configured cadence until quit (or `max_ticks`)
    pub fn run(&mut self, events: &mut dyn EventSource, max_ticks: Option<u64>) -> SessionStats {
        log::info!("Game loop running at {} ticks/s", self.state.tuning.tick_rate);
        let mut tick = 0u64;
        loop {
            self.clock.wait();
            let input = events.poll_events(tick);
            let keep_going = self.run_tick(&input);
            tick += 1;

            if !keep_going {
                log::info!("Quit requested after {} ticks", tick);
                break;
            }
            if max_ticks.is_some_and(|max| tick >= max) {
                log::info!("Tick limit {} reached", tick);
                break;
            }
            if tick % (self.state.tuning.tick_rate.max(1) as u64 * 10) == 0 {
                log::debug!(
                    "{} fps, {} blocks left, {} balls lost",
                    self.fps,
                    self.state.wall.live_count(),
                    self.state.stats.balls_lost
                );
            }
        }
        self.state.stats
    }
}
