//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// All actions the host can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game state ---
    /// Begin the encounter (first wave).
    StartEncounter,
    Pause,
    Resume,
    TogglePause,
    /// Tear down and start a fresh encounter with the same configuration.
    Restart,

    // --- Collaborator stand-ins ---
    /// The target moved (input/controller collaborator).
    MoveTarget { position: DVec3 },
    /// A shot landed on an enemy (shooting collaborator).
    DamageEnemy { enemy: EntityId, amount: u32 },
    /// The target collected a pickup.
    HealTarget { amount: u32 },
}
