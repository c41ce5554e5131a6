//! Application state shared between the main thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use holdout_core::commands::PlayerCommand;
use holdout_core::state::GameStateSnapshot;

/// Commands sent from the main thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles onto a running game loop.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state can be shared by reference
/// - `Mutex<Option<...>>` for the sender that does not exist before the loop starts
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with game loop thread)
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly spawned loop.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            return Err("Game loop already running".into());
        }
        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        *tx_lock = Some(tx);
        *running = true;
        Ok(())
    }

    /// Send a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), String> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Ask the loop to stop. Harmless if it already has.
    pub fn shutdown(&self) -> Result<(), String> {
        let result = self.send(GameLoopCommand::Shutdown);
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
        result
    }

    /// Latest snapshot, if any tick has run yet.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {}", e)),
            None => Err("Game loop not started".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
        assert!(state.send_command(PlayerCommand::Pause).is_err());
    }

    #[test]
    fn test_attach_and_send() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        state.attach(tx).unwrap();
        assert!(*state.running.lock().unwrap());

        let (tx2, _rx2) = mpsc::channel();
        assert!(state.attach(tx2).is_err(), "second loop refused");

        state.send_command(PlayerCommand::TogglePause).unwrap();
        state.shutdown().unwrap();
        assert!(matches!(
            rx.try_recv(),
            Ok(GameLoopCommand::PlayerCommand(PlayerCommand::TogglePause))
        ));
        assert!(matches!(rx.try_recv(), Ok(GameLoopCommand::Shutdown)));
        assert!(!*state.running.lock().unwrap());
    }
}
