//! Damage and healing between combatants.
//!
//! Deaths are resolved here, synchronously: the brain is killed, the corpse
//! timer starts and the director hears about it before anything else in the
//! tick looks at the registry.

use hecs::{Entity, World};
use log::warn;
use rand_chacha::ChaCha8Rng;

use holdout_core::events::SimEvent;
use holdout_enemy_ai::fsm::EnemyBrain;
use holdout_enemy_ai::navigation::PathFollower;

use crate::components::{entity_id, Corpse, Enemy};
use crate::director::WaveDirector;
use crate::event_bus::EventBus;
use crate::health::{DamageOutcome, Health};

/// Damage an enemy. `None` if the entity is not an enemy.
pub fn damage_enemy(
    world: &mut World,
    enemy: Entity,
    amount: u32,
    corpse_grace_secs: f64,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    bus: &mut EventBus,
) -> Option<DamageOutcome> {
    if world.get::<&Enemy>(enemy).is_err() {
        return None;
    }
    let outcome = apply_damage(world, enemy, amount, bus)?;
    if outcome != DamageOutcome::Killed {
        return Some(outcome);
    }

    let animation = match world.query_one_mut::<(&mut EnemyBrain, &mut PathFollower)>(enemy) {
        Ok((brain, follower)) => brain.kill(follower, rng),
        Err(_) => None,
    };
    if let Some(animation) = animation {
        bus.emit(SimEvent::EnemyDied {
            enemy: entity_id(enemy),
            animation,
        });
    }
    let corpse = Corpse {
        remaining_secs: corpse_grace_secs,
    };
    if let Err(err) = world.insert_one(enemy, corpse) {
        warn!("enemy {:?} left no corpse: {err}", entity_id(enemy));
    }
    director.on_enemy_died(enemy, bus);
    Some(outcome)
}

/// Damage the target. `None` if it has no health.
pub fn damage_target(
    world: &mut World,
    target: Entity,
    amount: u32,
    bus: &mut EventBus,
) -> Option<DamageOutcome> {
    apply_damage(world, target, amount, bus)
}

/// Heal an entity, returning the amount actually restored.
pub fn heal(world: &mut World, entity: Entity, amount: u32) -> u32 {
    world
        .get::<&mut Health>(entity)
        .map(|mut health| health.heal(amount))
        .unwrap_or(0)
}

fn apply_damage(
    world: &mut World,
    entity: Entity,
    amount: u32,
    bus: &mut EventBus,
) -> Option<DamageOutcome> {
    let outcome = world.get::<&mut Health>(entity).ok()?.apply_damage(amount);
    let remaining = match outcome {
        DamageOutcome::Ignored => return Some(outcome),
        DamageOutcome::Damaged { remaining } => remaining,
        DamageOutcome::Killed => 0,
    };
    bus.emit(SimEvent::DamageReceived {
        entity: entity_id(entity),
        amount,
        remaining,
    });
    Some(outcome)
}
