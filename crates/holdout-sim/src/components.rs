//! ECS components for enemies and the target.
//!
//! An enemy entity carries `Enemy`, `Archetype`, `Position`, `Facing`,
//! `PathFollower`, `EnemyBrain`, `BehaviorProfile` and `Health`.
//! The target carries `Target`, `Position` and `Health`.

use hecs::Entity;

use holdout_core::types::EntityId;

/// Marker for enemy entities.
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

/// Marker for the entity enemies attack.
#[derive(Debug, Clone, Copy)]
pub struct Target;

/// Which configured archetype an enemy was spawned from.
#[derive(Debug, Clone)]
pub struct Archetype {
    pub name: String,
}

/// A dead enemy waiting for removal.
#[derive(Debug, Clone, Copy)]
pub struct Corpse {
    pub remaining_secs: f64,
}

/// Outward id of an ECS entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// ECS entity behind an outward id, if the bits are well-formed.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
