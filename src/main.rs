//! Vision Breakout entry point
//!
//! Runs the game headless: synthetic camera and detector in place of real
//! hardware, frames recorded to a `DrawList`.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use vision_breakout::app::{AutoStart, EventSource, Game, InputEvent, Interruptible, ScriptedEvents};
use vision_breakout::renderer::DrawList;
use vision_breakout::sim::GameState;
use vision_breakout::source::camera::DECOY_CLASS;
use vision_breakout::source::{
    CameraPositionSource, DetectionFilter, SyntheticCamera, SyntheticDetector,
};
use vision_breakout::{GameError, Tuning};

/// Command line options
struct Args {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    seed: u64,
    autostart: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, GameError> {
        let mut parsed = Args {
            config: None,
            ticks: None,
            seed: 0x5EED,
            autostart: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| GameError::Config("--config requires a path".into()))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--ticks" | "-t" => {
                    parsed.ticks = Some(parse_number(args.next(), "--ticks")?);
                }
                "--seed" | "-s" => {
                    parsed.seed = parse_number(args.next(), "--seed")?;
                }
                "--autostart" => parsed.autostart = true,
                other => {
                    return Err(GameError::Config(format!("unknown argument '{}'", other)));
                }
            }
        }
        Ok(parsed)
    }
}

fn parse_number(value: Option<String>, flag: &str) -> Result<u64, GameError> {
    let value = value.ok_or_else(|| GameError::Config(format!("{} requires a value", flag)))?;
    value
        .parse()
        .map_err(|e| GameError::Config(format!("{} '{}': {}", flag, value, e)))
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--config <file.json>] [--ticks <n>] [--seed <n>] [--autostart]",
        program
    );
}

/// Ctrl-C raises the returned flag; the loop turns it into a normal quit
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("Ctrl-C handler not installed: {}", e);
    }
    stop
}

fn run() -> Result<(), GameError> {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "vision-breakout".to_string());
    let args = match Args::parse(argv) {
        Ok(args) => args,
        Err(e) => {
            print_usage(&program);
            return Err(e);
        }
    };

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    // Fatal before the loop starts; the camera is released when `game` drops
    let camera = SyntheticCamera::open(&tuning.camera, args.seed)?;
    let target_class = tuning
        .detector
        .target_classes
        .first()
        .copied()
        .unwrap_or(DECOY_CLASS);
    let detector = SyntheticDetector::new(target_class, args.seed.wrapping_add(1));
    let filter = DetectionFilter::new(&tuning.detector, tuning.camera.mirror);

    let mut source = CameraPositionSource::new(camera, detector, filter);
    if tuning.camera.map_to_screen {
        source = source.with_screen_mapping(tuning.camera.frame_width as f32, tuning.screen_width);
    }

    // Without a window there is nobody to click; press start once after a second
    let script: Box<dyn EventSource> = if args.autostart {
        Box::new(AutoStart)
    } else {
        Box::new(ScriptedEvents::new([(tuning.tick_rate as u64, InputEvent::Start)]))
    };
    let mut events = Interruptible::new(script, install_interrupt_handler());

    let ticks = args.ticks.unwrap_or(tuning.tick_rate as u64 * 60);
    let mut game = Game::new(GameState::new(tuning), source, DrawList::new());
    let stats = game.run(&mut events, Some(ticks));

    log::info!(
        "Session over: {} ticks, {} blocks destroyed, {} balls lost, {} blocks left",
        stats.ticks,
        stats.blocks_destroyed,
        stats.balls_lost,
        game.state.wall.live_count()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Vision Breakout starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
