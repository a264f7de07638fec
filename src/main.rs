//! Headless driver: plays a scripted session and prints the final snapshot.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use miffed_ducks::consts::SIM_DT;
use miffed_ducks::sim::{Command, GameMode, GameState};
use miffed_ducks::{BuiltinLevels, GameError, LevelDir, LevelSource, Runner, Tuning};

#[derive(Parser, Debug)]
#[command(version, about = "Play a scripted headless Miffed Ducks session", long_about = None)]
struct Cli {
    /// Seed for random round layouts
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Tuning JSON file; omitted fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Directory of `<id>.json` level files instead of the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,
}

/// Pulls tried in turn on every level/round
const SHOTS: [(f32, f32); 6] = [
    (-30.0, -18.0),
    (-35.0, -8.0),
    (-28.0, -22.0),
    (-33.0, -12.0),
    (-25.0, -25.0),
    (-35.0, -3.0),
];

/// Frames the duck may fly before the session gives up on it
const MAX_FLIGHT_FRAMES: u32 = 2000;

fn fly(runner: &mut Runner) {
    let mut frames = 0;
    while runner.state.duck.in_flight && frames < MAX_FLIGHT_FRAMES {
        runner.advance_with(SIM_DT, |report| {
            if let Some(t) = &report.transition {
                log::info!("Transition: {t:?}");
            }
        });
        frames += 1;
    }
}

fn play(runner: &mut Runner, start: Command) -> Result<GameMode, GameError> {
    runner.command(start)?;
    let mut shot = 0;

    loop {
        match runner.state.mode.clone() {
            GameMode::Win => {
                if runner.state.next_level.is_none() {
                    return Ok(GameMode::Win);
                }
                runner.command(Command::Continue)?;
            }
            GameMode::Lose => return Ok(GameMode::Lose),
            GameMode::Menu => return Ok(GameMode::Menu),
            _ => {
                let (dx, dy) = SHOTS[shot % SHOTS.len()];
                shot += 1;
                runner.begin_drag(Vec2::new(dx, dy));
                runner.release()?;
                fly(runner);
                // Let collapsing planks finish before the next shot
                runner.advance(0.1);
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), GameError> {
    let seed = cli.seed;
    let tuning = match cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let levels: Box<dyn LevelSource> = match cli.levels {
        Some(dir) => Box::new(LevelDir::new(dir)),
        None => Box::new(BuiltinLevels),
    };

    log::info!("Miffed Ducks headless run, seed {seed:#x}");
    let mut runner = Runner::new(GameState::with_tuning(seed, tuning), levels);

    for start in [Command::PlayFixed, Command::PlayRandom] {
        let outcome = play(&mut runner, start)?;
        log::info!("{} finished: {outcome:?}", start.name());
        match runner.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Snapshot not serializable: {e}"),
        }
        runner.command(Command::Menu)?;
    }

    runner.command(Command::Quit)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
