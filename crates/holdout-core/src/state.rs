//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub target: TargetView,
    pub score: ScoreView,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Wave director status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-based wave index, 0 before the first wave.
    pub index: u32,
    pub total_waves: u32,
    pub phase: WavePhase,
    pub quota: u32,
    pub spawned: u32,
    pub killed: u32,
    /// Enemies of this wave still alive.
    pub alive: u32,
    pub spawn_interval_secs: f64,
    pub cooldown_remaining_secs: f64,
}

/// One enemy (alive or corpse).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: String,
    pub state: EnemyState,
    pub position: DVec3,
    /// Facing yaw in radians (0 = +z).
    pub yaw: f64,
    pub health_fraction: f64,
}

/// The player/objective the enemies attack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetView {
    pub id: Option<EntityId>,
    pub position: DVec3,
    pub health: u32,
    pub max_health: u32,
    pub dead: bool,
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub total_kills: u32,
    pub waves_cleared: u32,
}
