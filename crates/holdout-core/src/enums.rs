//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavioral state of a single enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walking toward the target.
    #[default]
    Pursuing,
    /// Inside an attack cycle.
    Attacking,
    /// Killed. Terminal.
    Dead,
}

/// Phase of the wave director.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Not running: before start, or stopped by game over.
    #[default]
    Idle,
    /// Spawning the current wave's quota.
    Spawning,
    /// Quota spawned, waiting for the survivors to die.
    AwaitingClear,
    /// Between waves.
    Cooldown,
    /// Every configured wave cleared.
    Completed,
}

/// Top-level game phase owned by the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Configured but not started.
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
    Won,
}

impl GamePhase {
    /// Whether the encounter has ended (no further transitions except restart).
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Terminal animation picked at random when an enemy dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathAnimation {
    FallForward,
    FallBackward,
}

impl DeathAnimation {
    pub const ALL: [DeathAnimation; 2] = [DeathAnimation::FallForward, DeathAnimation::FallBackward];
}
