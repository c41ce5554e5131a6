//! Game loop thread: runs the simulation engine at 30Hz and publishes snapshots.
//!
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for polling. The loop ends when the encounter is decided, the time
//! limit passes, or a Shutdown command arrives.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use holdout_core::constants::TICK_RATE;
use holdout_core::enums::GamePhase;
use holdout_core::events::SimEvent;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::engine::SimulationEngine;

use crate::autopilot::{Autopilot, AutopilotSettings};
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Sleep between ticks to hold the tick rate.
    pub realtime: bool,
    /// Stop once this much simulated time has passed.
    pub max_secs: f64,
    /// Scripted player, if any.
    pub autopilot: Option<AutopilotSettings>,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Won,
    Lost,
    TimedOut,
    Shutdown,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle to join for the exit reason.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopExit>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("holdout-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &latest_snapshot, options))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the encounter ends, Shutdown, or channel disconnect.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: LoopOptions,
) -> LoopExit {
    let mut autopilot = options.autopilot.map(Autopilot::new);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return LoopExit::Shutdown,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return LoopExit::Shutdown,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        snapshot.events.iter().for_each(log_event);

        // 3. Scripted player reacts for the next tick
        if let Some(pilot) = autopilot.as_mut() {
            engine.queue_commands(pilot.plan(&snapshot));
        }

        let exit = match snapshot.phase {
            GamePhase::Won => Some(LoopExit::Won),
            GamePhase::GameOver => Some(LoopExit::Lost),
            _ if snapshot.time.elapsed_secs >= options.max_secs => Some(LoopExit::TimedOut),
            _ => None,
        };

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let Some(exit) = exit {
            return exit;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::WaveStarted { wave, quota } => info!("wave {wave}: {quota} enemies incoming"),
        SimEvent::WaveProgress {
            wave,
            killed,
            quota,
        } => info!("wave {wave}: {killed}/{quota}"),
        SimEvent::WaveCooldown {
            next_wave,
            remaining_secs,
        } => info!("wave {next_wave} in {remaining_secs}s"),
        SimEvent::WaveCompleted { wave } => info!("wave {wave} complete"),
        SimEvent::PickupSpawnRequest { points, .. } => info!("{} pickups placed", points.len()),
        SimEvent::EncounterWon {
            waves_cleared,
            score,
        } => info!("victory: {waves_cleared} waves, score {score}"),
        SimEvent::EncounterLost { wave, score } => info!("defeat in wave {wave}, score {score}"),
        other => debug!("{other:?}"),
    }
}
