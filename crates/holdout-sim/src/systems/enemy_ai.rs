//! Enemy AI system: runs every enemy brain for one step.
//!
//! Calls the FSM from holdout-enemy-ai, then turns its signals into events
//! and target damage once the query borrow is released.

use hecs::{Entity, World};
use log::{debug, warn};

use holdout_core::events::SimEvent;
use holdout_core::types::Position;
use holdout_enemy_ai::fsm::{BrainInput, BrainSignal, EnemyBrain};
use holdout_enemy_ai::navigation::PathFollower;
use holdout_enemy_ai::profiles::BehaviorProfile;

use crate::components::{entity_id, Enemy};
use crate::event_bus::EventBus;
use crate::health::DamageOutcome;
use crate::systems::combat;

/// Run the enemy AI. Returns `true` if a strike killed the target.
pub fn run(world: &mut World, target: Option<Entity>, dt: f64, bus: &mut EventBus) -> bool {
    let target_position = target.and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));

    // Collect signals first; damage needs the world back.
    let mut signals: Vec<(Entity, BrainSignal, u32)> = Vec::new();
    for (entity, (_enemy, position, brain, follower, profile)) in world.query_mut::<(
        &Enemy,
        &Position,
        &mut EnemyBrain,
        &mut PathFollower,
        &BehaviorProfile,
    )>() {
        let input = BrainInput {
            position: position.0,
            target: target_position,
            dt,
        };
        let update = brain.update(profile, &input, follower);
        signals.extend(
            update
                .signals
                .into_iter()
                .map(|signal| (entity, signal, profile.attack_damage)),
        );
    }

    let mut target_killed = false;
    for (entity, signal, damage) in signals {
        let enemy = entity_id(entity);
        match signal {
            BrainSignal::AttackStarted => bus.emit(SimEvent::EnemyAttackStarted { enemy }),
            BrainSignal::Strike { instant, in_range } => {
                bus.emit(SimEvent::EnemyAttackPerformed {
                    enemy,
                    instant,
                    landed: in_range,
                });
                if let (true, Some(target)) = (in_range, target) {
                    let outcome = combat::damage_target(world, target, damage, bus);
                    target_killed |= outcome == Some(DamageOutcome::Killed);
                }
            }
            BrainSignal::AttackInterrupted | BrainSignal::AttackCompleted { .. } => {}
            BrainSignal::Froze => warn!("enemy {enemy:?} lost its target and is idling"),
            BrainSignal::Thawed => debug!("enemy {enemy:?} reacquired its target"),
        }
    }
    target_killed
}
