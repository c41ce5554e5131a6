//! Cleanup system: removes corpses whose grace period ran out.

use hecs::{Entity, World};

use holdout_core::events::SimEvent;
use holdout_core::types::expired;

use crate::components::{entity_id, Corpse};
use crate::event_bus::EventBus;

/// Count down corpse timers and despawn the expired ones.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>, bus: &mut EventBus) {
    despawn_buffer.clear();

    for (entity, corpse) in world.query_mut::<&mut Corpse>() {
        corpse.remaining_secs -= dt;
        if expired(corpse.remaining_secs) {
            despawn_buffer.push(entity);
        }
    }

    despawn(world, despawn_buffer.drain(..), bus);
}

/// Remove entities immediately, announcing each one that existed.
pub fn despawn(world: &mut World, entities: impl IntoIterator<Item = Entity>, bus: &mut EventBus) {
    for entity in entities {
        if world.despawn(entity).is_ok() {
            bus.emit(SimEvent::EnemyRemoved {
                enemy: entity_id(entity),
            });
        }
    }
}
