//! Temple Runner headless runner
//!
//! Usage: `temple-runner [seed] [ticks]`
//!
//! Plays one autopilot run without a window, logs a summary and keeps the
//! high score file up to date. `RUST_LOG=debug` shows spawns and sounds.

use std::process::ExitCode;

use temple_runner::Game;
use temple_runner::audio::{AudioSink, LogAudio, NullAudio};
use temple_runner::consts::TICKS_PER_SECOND;
use temple_runner::renderer::NullFrameSink;
use temple_runner::settings::{DEFAULT_SETTINGS_FILE, Settings};
use temple_runner::sim::{GamePhase, TickInput};

/// Ten minutes of play
const DEFAULT_TICKS: u64 = 36_000;

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str) -> Result<Option<T>, String> {
    match arg {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid {name}: {raw}")),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match parse_arg::<u64>(args.next(), "seed") {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("{e}\nusage: temple-runner [seed] [ticks]");
            return ExitCode::FAILURE;
        }
    };
    let max_ticks = match parse_arg::<u64>(args.next(), "ticks") {
        Ok(ticks) => ticks.unwrap_or(DEFAULT_TICKS),
        Err(e) => {
            eprintln!("{e}\nusage: temple-runner [seed] [ticks]");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load(DEFAULT_SETTINGS_FILE);
    if seed.is_some() {
        settings.seed = seed;
    }

    let audio: Box<dyn AudioSink> = if settings.muted {
        Box::new(NullAudio)
    } else {
        Box::new(LogAudio)
    };
    let mut game = Game::new(settings, audio, Box::new(NullFrameSink));
    game.set_autopilot(true);
    game.handle_input(&TickInput {
        confirm: true,
        ..Default::default()
    });

    let mut ticks = 0;
    while ticks < max_ticks && !game.quit_requested() {
        game.step();
        game.render();
        ticks += 1;
        if game.state().phase != GamePhase::Playing {
            break;
        }
    }

    game.save_high_score();

    let state = game.state();
    let outcome = match state.phase {
        GamePhase::GameOver => "crashed",
        _ => "still running",
    };
    log::info!(
        "Run {} after {} ticks ({:.1}s): distance {:.0}m, score {}, coins {}, level {}, speed x{:.1}",
        outcome,
        state.time_ticks,
        state.time_ticks as f32 / TICKS_PER_SECOND as f32,
        state.distance,
        state.score,
        state.coins,
        state.difficulty,
        state.speed_multiplier
    );
    log::info!("Seed {}, high score {}", state.seed, game.high_score());

    ExitCode::SUCCESS
}
