//! Radial Breakout headless runner
//!
//! Usage: `radial-breakout [config.json] [ticks]`
//!
//! Runs the arena without a renderer, sweeping the pads back and forth, and
//! logs the outcome. Set `RUST_LOG=debug` to see bricks falling.

use std::process::ExitCode;

use radial_breakout::ArenaConfig;
use radial_breakout::sim::{Arena, GamePhase, TickInput, tick};

const DEFAULT_TICKS: u64 = 3600;
/// Ticks spent sweeping in each direction
const SWEEP_TICKS: u64 = 120;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match ArenaConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ArenaConfig::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(ticks)) => ticks,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_TICKS,
    };

    if let Err(e) = config.validate() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    log::info!("Radial Breakout (headless) starting, {ticks} ticks");
    let mut arena = Arena::new(config);

    let mut hits = 0u64;
    for t in 0..ticks {
        let movement = if (t / SWEEP_TICKS) % 2 == 0 { 1.0 } else { -1.0 };
        let input = TickInput {
            movement,
            ..Default::default()
        };
        if let Some(report) = tick(&mut arena, &input) {
            hits += u64::from(report.total_hits());
        }
        if arena.phase() == GamePhase::Cleared {
            break;
        }
    }

    log::info!(
        "Finished at tick {} ({:?}): score {}, {} bricks left, {hits} collisions",
        arena.time_ticks(),
        arena.phase(),
        arena.score(),
        arena.bricks().len()
    );
    for (i, ball) in arena.balls().iter().enumerate() {
        log::info!(
            "Ball {i}: position {} velocity {}",
            ball.position(),
            ball.velocity()
        );
    }

    ExitCode::SUCCESS
}
