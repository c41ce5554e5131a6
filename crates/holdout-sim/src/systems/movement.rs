//! Movement integration and facing.
//!
//! Advances every enemy's path follower and blends its facing toward the
//! direction its brain wants.

use hecs::{Entity, World};

use holdout_core::types::Position;
use holdout_enemy_ai::fsm::EnemyBrain;
use holdout_enemy_ai::navigation::{Navigation, PathFollower};
use holdout_enemy_ai::profiles::BehaviorProfile;
use holdout_enemy_ai::steering::Facing;

pub fn run(world: &mut World, target: Option<Entity>, dt: f64) {
    let target_position = target.and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));

    for (_entity, (position, follower, facing, brain, profile)) in world.query_mut::<(
        &mut Position,
        &mut PathFollower,
        &mut Facing,
        &EnemyBrain,
        &BehaviorProfile,
    )>() {
        position.0 = follower.advance(position.0, dt);
        let desired = brain.desired_facing(
            profile,
            position.0,
            target_position,
            follower.current_velocity(),
        );
        if let Some(direction) = desired {
            facing.turn_toward(direction, profile.rotation_speed, dt);
        }
    }
}
