//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use holdout_core::enums::GamePhase;
use holdout_core::events::SimEvent;
use holdout_core::state::*;
use holdout_core::types::{Position, SimTime};
use holdout_enemy_ai::fsm::EnemyBrain;
use holdout_enemy_ai::steering::Facing;

use crate::components::{entity_id, Archetype, Enemy};
use crate::director::WaveDirector;
use crate::health::Health;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    director: &WaveDirector,
    target: Option<Entity>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave: director.view(),
        enemies: build_enemies(world),
        target: build_target(world, target),
        score: director.score_view(),
        events,
    }
}

/// Build EnemyView list, living and dead, ordered by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Archetype, &EnemyBrain, &Position, &Facing, &Health)>()
        .iter()
        .map(|(entity, (_, archetype, brain, pos, facing, health))| EnemyView {
            id: entity_id(entity),
            archetype: archetype.name.clone(),
            state: brain.state(),
            position: pos.0,
            yaw: facing.yaw,
            health_fraction: health.fraction(),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_target(world: &World, target: Option<Entity>) -> TargetView {
    let Some(entity) = target else {
        return TargetView::default();
    };
    let position = world.get::<&Position>(entity).map(|p| p.0).unwrap_or_default();
    match world.get::<&Health>(entity) {
        Ok(health) => TargetView {
            id: Some(entity_id(entity)),
            position,
            health: health.current(),
            max_health: health.max(),
            dead: health.is_dead(),
        },
        Err(_) => TargetView::default(),
    }
}
