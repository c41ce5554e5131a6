use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use holdout_app::cli::Args;
use holdout_app::game_loop::{self, LoopExit, LoopOptions};
use holdout_app::state::AppState;
use holdout_core::commands::PlayerCommand;
use holdout_sim::engine::SimulationEngine;

fn main() -> ExitCode {
    // info+ unless RUST_LOG overrides
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = Args::parse();
    let config = match args.encounter_config() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };
    let options = LoopOptions {
        realtime: args.realtime,
        max_secs: args.max_secs,
        autopilot: Some(args.autopilot(&config)),
    };
    let engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            error!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    let state = AppState::new();
    let (tx, handle) =
        match game_loop::spawn_game_loop(engine, options, state.latest_snapshot.clone()) {
            Ok(spawned) => spawned,
            Err(err) => {
                error!("failed to spawn game loop thread: {err}");
                return ExitCode::FAILURE;
            }
        };
    if let Err(err) = state
        .attach(tx)
        .and_then(|()| state.send_command(PlayerCommand::StartEncounter))
    {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    let exit = match handle.join() {
        Ok(exit) => exit,
        Err(_) => {
            error!("game loop thread panicked");
            return ExitCode::FAILURE;
        }
    };
    let _ = state.shutdown();

    if let Some(snap) = state.snapshot() {
        info!(
            "{:?} after {:.1}s: wave {}/{}, {} kills, score {}, target health {}/{}",
            exit,
            snap.time.elapsed_secs,
            snap.wave.index,
            snap.wave.total_waves,
            snap.score.total_kills,
            snap.score.score,
            snap.target.health,
            snap.target.max_health
        );
        if let Ok(json) = serde_json::to_string(&snap) {
            debug!("final snapshot: {json}");
        }
    }

    match exit {
        LoopExit::Won => ExitCode::SUCCESS,
        LoopExit::Lost | LoopExit::TimedOut | LoopExit::Shutdown => ExitCode::FAILURE,
    }
}
