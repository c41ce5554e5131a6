//! Entity spawn factories for the encounter world.

use hecs::{Entity, World};

use holdout_core::error::SpawnError;
use holdout_core::types::Position;
use holdout_enemy_ai::fsm::EnemyBrain;
use holdout_enemy_ai::navigation::PathFollower;
use holdout_enemy_ai::steering::Facing;

use crate::components::{Archetype, Enemy, Target};
use crate::config::{ArchetypeSpec, EncounterConfig, SpawnPoint, TargetSpec};
use crate::director::{EnemySpawner, SpawnedEnemy};
use crate::health::Health;

/// Spawn the target. Enemies resolve it once, by entity, for the whole encounter.
pub fn spawn_target(world: &mut World, spec: &TargetSpec) -> Entity {
    world.spawn((Target, Position(spec.position), Health::new(spec.max_health)))
}

/// Spawn one enemy at full health, pursuing.
pub fn spawn_enemy(
    world: &mut World,
    point: &SpawnPoint,
    archetype: &ArchetypeSpec,
) -> Entity {
    world.spawn((
        Enemy,
        Archetype {
            name: archetype.name.clone(),
        },
        Position(point.position),
        Facing::new(point.yaw),
        PathFollower::from_profile(&archetype.behavior),
        EnemyBrain::new(),
        archetype.behavior.clone(),
        Health::new(archetype.max_health),
    ))
}

/// Director-facing spawner backed by the ECS world.
pub struct WorldSpawner<'a> {
    pub world: &'a mut World,
    pub config: &'a EncounterConfig,
}

impl EnemySpawner for WorldSpawner<'_> {
    fn spawn_enemy(
        &mut self,
        spawn_point: usize,
        archetype: usize,
    ) -> Result<SpawnedEnemy, SpawnError> {
        let point = self
            .config
            .spawn_points
            .get(spawn_point)
            .filter(|p| p.position.is_finite())
            .ok_or(SpawnError::InvalidSpawnPoint(spawn_point))?;
        let spec = self
            .config
            .archetypes
            .get(archetype)
            .ok_or_else(|| SpawnError::Rejected(format!("unknown archetype {archetype}")))?;

        let entity = spawn_enemy(self.world, point, spec);
        Ok(SpawnedEnemy {
            entity,
            archetype: spec.name.clone(),
            position: point.position,
        })
    }
}
