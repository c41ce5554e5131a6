use glam::DVec3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use holdout_core::constants::DT;
use holdout_core::enums::EnemyState;

use crate::fsm::{BrainInput, BrainSignal, BrainUpdate, EnemyBrain};
use crate::navigation::{Navigation, PathFollower};
use crate::profiles::BehaviorProfile;
use crate::steering::{wrap_angle, Facing};

/// Navigation double that records what the FSM asked of it.
#[derive(Debug, Default)]
struct RecordingNav {
    destination: Option<DVec3>,
    velocity: DVec3,
    stopped: bool,
    disabled: bool,
    set_destination_calls: u32,
}

impl Navigation for RecordingNav {
    fn set_destination(&mut self, point: DVec3) {
        self.destination = Some(point);
        self.set_destination_calls += 1;
    }
    fn current_velocity(&self) -> DVec3 {
        self.velocity
    }
    fn stop(&mut self) {
        self.stopped = true;
    }
    fn resume(&mut self) {
        self.stopped = false;
    }
    fn is_stopped(&self) -> bool {
        self.stopped
    }
    fn can_navigate(&self) -> bool {
        !self.disabled
    }
    fn disable(&mut self) {
        self.disabled = true;
    }
}

fn target_at(distance: f64) -> Option<DVec3> {
    Some(DVec3::new(0.0, 0.0, distance))
}

fn step(
    brain: &mut EnemyBrain,
    profile: &BehaviorProfile,
    nav: &mut RecordingNav,
    distance: f64,
) -> BrainUpdate {
    let input = BrainInput {
        position: DVec3::ZERO,
        target: target_at(distance),
        dt: DT,
    };
    brain.update(profile, &input, nav)
}

/// Put a fresh brain into Attacking at the given distance.
fn attacking_brain(profile: &BehaviorProfile, nav: &mut RecordingNav, distance: f64) -> EnemyBrain {
    let mut brain = EnemyBrain::new();
    let update = step(&mut brain, profile, nav, distance);
    assert_eq!(update.signals, vec![BrainSignal::AttackStarted]);
    assert_eq!(brain.state(), EnemyState::Attacking);
    brain
}

// ---- Pursuing ----

#[test]
fn test_pursuit_repaths_at_bounded_cadence() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = EnemyBrain::new();

    let first = step(&mut brain, &profile, &mut nav, 10.0);
    assert!(first.repathed, "first pursuit update must set a destination");
    assert_eq!(nav.destination, target_at(10.0));

    // 0.25 s refresh at 30 Hz: no new path for the next 6 ticks, one on the 7th or 8th.
    let mut ticks_until_repath = 0;
    loop {
        ticks_until_repath += 1;
        if step(&mut brain, &profile, &mut nav, 10.0).repathed {
            break;
        }
        assert!(ticks_until_repath < 30, "path was never refreshed");
    }
    let expected = (profile.path_refresh_secs / DT).round() as i32;
    assert!(
        (ticks_until_repath - expected).abs() <= 1,
        "repath after {ticks_until_repath} ticks, expected about {expected}"
    );
    assert_eq!(nav.set_destination_calls, 2);
}

#[test]
fn test_no_attack_while_still_moving() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav {
        velocity: DVec3::new(0.0, 0.0, 2.0),
        ..Default::default()
    };
    let mut brain = EnemyBrain::new();
    let update = step(&mut brain, &profile, &mut nav, 1.5);
    assert_eq!(brain.state(), EnemyState::Pursuing);
    assert!(update.signals.is_empty());

    nav.velocity = DVec3::ZERO;
    let update = step(&mut brain, &profile, &mut nav, 1.5);
    assert_eq!(update.signals, vec![BrainSignal::AttackStarted]);
    assert!(nav.stopped, "entering an attack halts movement");
}

#[test]
fn test_no_attack_outside_range() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = EnemyBrain::new();
    for _ in 0..60 {
        step(&mut brain, &profile, &mut nav, profile.attack_range + 0.01);
    }
    assert_eq!(brain.state(), EnemyState::Pursuing);
}

// ---- Attacking ----

#[test]
fn test_strikes_fire_once_each_at_their_instants() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 1.8);

    let mut strikes = Vec::new();
    let mut elapsed = 0.0;
    while brain.state() == EnemyState::Attacking {
        elapsed += DT;
        for signal in step(&mut brain, &profile, &mut nav, 1.8).signals {
            if let BrainSignal::Strike { instant, in_range } = signal {
                strikes.push((instant, in_range, elapsed));
            }
        }
        assert!(elapsed < 5.0, "attack never ended");
    }

    assert_eq!(strikes.len(), 2);
    assert_eq!(strikes[0].0, 0);
    assert_eq!(strikes[1].0, 1);
    assert!(strikes.iter().all(|s| s.1), "target stayed in range");
    assert!((strikes[0].2 - 0.5).abs() < DT, "first strike at {}", strikes[0].2);
    assert!((strikes[1].2 - 0.9).abs() < DT, "second strike at {}", strikes[1].2);
}

/// Enters at 2.0 (range 2.0), target retreats to 2.6 (interrupt 2.5):
/// attack aborted, cooldown 2.0 halved to 1.0, pursuit resumes.
#[test]
fn test_interrupt_applies_reduced_cooldown() {
    let profile = BehaviorProfile::walker();
    assert_eq!(profile.attack_cooldown_secs, 2.0);
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 2.0);

    for _ in 0..10 {
        step(&mut brain, &profile, &mut nav, 2.0);
    }
    assert_eq!(brain.state(), EnemyState::Attacking);

    let update = step(&mut brain, &profile, &mut nav, 2.6);
    assert_eq!(update.signals, vec![BrainSignal::AttackInterrupted]);
    assert_eq!(brain.state(), EnemyState::Pursuing);
    assert!((brain.attack_ready_in() - 1.0).abs() < 1e-9);
    assert_eq!(brain.attack_timer(), 0.0);
    assert!(brain.fired().is_empty());
    assert!(!nav.stopped, "movement resumes after an interrupt");

    // Next update re-paths toward the fleeing target straight away.
    let update = step(&mut brain, &profile, &mut nav, 2.6);
    assert!(update.repathed);
}

#[test]
fn test_between_ranges_strikes_miss_and_full_cooldown_applies() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 2.0);

    let mut signals = Vec::new();
    for _ in 0..60 {
        signals.extend(step(&mut brain, &profile, &mut nav, 2.3).signals);
        if brain.state() != EnemyState::Attacking {
            break;
        }
    }

    let misses = signals
        .iter()
        .filter(|s| matches!(s, BrainSignal::Strike { in_range: false, .. }))
        .count();
    assert_eq!(misses, 2, "both instants fire but neither lands: {signals:?}");
    assert_eq!(
        signals.last(),
        Some(&BrainSignal::AttackCompleted { chain: false })
    );
    assert!((brain.attack_ready_in() - profile.attack_cooldown_secs).abs() < 1e-9);
    assert!(!nav.stopped);
}

#[test]
fn test_target_still_in_range_chains_next_attack() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 1.5);

    let mut completed = false;
    for _ in 0..60 {
        let update = step(&mut brain, &profile, &mut nav, 1.5);
        if update
            .signals
            .contains(&BrainSignal::AttackCompleted { chain: true })
        {
            completed = true;
            break;
        }
    }
    assert!(completed);
    assert_eq!(brain.attack_ready_in(), 0.0);
    assert!(nav.stopped, "no movement between chained attacks");

    let update = step(&mut brain, &profile, &mut nav, 1.5);
    assert_eq!(update.signals, vec![BrainSignal::AttackStarted]);
    assert!(brain.fired().is_empty(), "fresh cycle starts with no fired instants");
}

#[test]
fn test_cooldown_blocks_reentry_until_elapsed() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 2.0);
    step(&mut brain, &profile, &mut nav, 2.6);
    assert!((brain.attack_ready_in() - 1.0).abs() < 1e-9);

    // Back in range but cooling down for 1 s.
    let mut ticks = 0;
    while brain.state() == EnemyState::Pursuing {
        ticks += 1;
        step(&mut brain, &profile, &mut nav, 1.5);
        assert!(ticks < 100);
    }
    let expected = (1.0 / DT).round() as i32;
    assert!((ticks - expected).abs() <= 1, "re-entered after {ticks} ticks");
}

// ---- Death and invalid targets ----

#[test]
fn test_death_is_terminal_and_reported_once() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut brain = attacking_brain(&profile, &mut nav, 1.0);

    assert!(brain.kill(&mut nav, &mut rng).is_some());
    assert!(brain.kill(&mut nav, &mut rng).is_none());
    assert_eq!(brain.state(), EnemyState::Dead);
    assert!(nav.disabled && nav.stopped);

    for distance in [0.5, 1.0, 3.0] {
        let update = step(&mut brain, &profile, &mut nav, distance);
        assert_eq!(update, BrainUpdate::default());
        assert_eq!(brain.state(), EnemyState::Dead);
    }
}

#[test]
fn test_invalid_target_freezes_without_faulting() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = attacking_brain(&profile, &mut nav, 1.0);
    step(&mut brain, &profile, &mut nav, 1.0);
    let timer = brain.attack_timer();

    let lost = BrainInput {
        position: DVec3::ZERO,
        target: None,
        dt: DT,
    };
    assert_eq!(brain.update(&profile, &lost, &mut nav).signals, vec![BrainSignal::Froze]);
    for _ in 0..30 {
        assert!(brain.update(&profile, &lost, &mut nav).signals.is_empty());
    }
    assert!(brain.is_frozen());
    assert_eq!(brain.attack_timer(), timer, "frozen brain does not accumulate time");

    let update = step(&mut brain, &profile, &mut nav, 1.0);
    assert_eq!(update.signals.first(), Some(&BrainSignal::Thawed));
    assert!(!brain.is_frozen());
}

// ---- Facing ----

#[test]
fn test_facing_tracks_target_when_attacking_and_velocity_when_walking() {
    let profile = BehaviorProfile::walker();
    let mut nav = RecordingNav::default();
    let mut brain = EnemyBrain::new();
    let target = Some(DVec3::new(5.0, 0.0, 0.0));
    let walking = DVec3::new(0.0, 0.0, 3.0);

    assert_eq!(
        brain.desired_facing(&profile, DVec3::ZERO, target, walking),
        Some(walking)
    );
    assert_eq!(
        brain.desired_facing(&profile, DVec3::ZERO, target, DVec3::ZERO),
        target
    );

    brain = attacking_brain(&profile, &mut nav, 1.0);
    assert_eq!(
        brain.desired_facing(&profile, DVec3::ZERO, target, walking),
        target
    );
}

#[test]
fn test_facing_blends_the_short_way_round() {
    use std::f64::consts::PI;
    let mut facing = Facing::new(0.9 * PI);
    // Desired yaw is -0.9 PI: the short way crosses PI, not zero.
    let desired = DVec3::new((-0.9 * PI).sin(), 0.0, (-0.9 * PI).cos());
    facing.turn_toward(desired, 10.0, DT);
    assert!(facing.yaw.abs() > 0.9 * PI - 1e-9, "turned the long way: {}", facing.yaw);

    for _ in 0..200 {
        facing.turn_toward(desired, 10.0, DT);
    }
    assert!(wrap_angle(facing.yaw + 0.9 * PI).abs() < 1e-6);

    let before = facing.yaw;
    facing.turn_toward(DVec3::new(0.0, 1.0, 0.0), 10.0, DT);
    assert_eq!(facing.yaw, before, "vertical direction leaves facing unchanged");
}

// ---- PathFollower ----

#[test]
fn test_path_follower_settles_inside_attack_range() {
    let profile = BehaviorProfile::walker();
    let mut follower = PathFollower::from_profile(&profile);
    let target = DVec3::new(0.0, 0.0, 12.0);
    follower.set_destination(target);

    let mut position = DVec3::ZERO;
    for _ in 0..300 {
        position = follower.advance(position, DT);
    }
    let distance = position.distance(target);
    assert!(
        distance <= profile.attack_range,
        "settled at {distance}, outside attack range"
    );
    assert!(distance >= profile.stopping_distance() - 0.3, "overshot to {distance}");
    assert!(follower.current_velocity().length() < profile.settle_speed);
}

#[test]
fn test_elevated_target_is_reached_and_struck() {
    let profile = BehaviorProfile::walker();
    let mut follower = PathFollower::from_profile(&profile);
    let mut brain = EnemyBrain::new();
    let target = DVec3::new(0.0, 1.5, 0.0);
    let mut position = DVec3::new(0.0, 0.0, 10.0);

    let mut started = false;
    let mut landed = 0;
    for _ in 0..(20 * 30) {
        let input = BrainInput {
            position,
            target: Some(target),
            dt: DT,
        };
        for signal in brain.update(&profile, &input, &mut follower).signals {
            match signal {
                BrainSignal::AttackStarted => started = true,
                BrainSignal::Strike { in_range: true, .. } => landed += 1,
                _ => {}
            }
        }
        position = follower.advance(position, DT);
    }

    assert!(
        started,
        "never attacked; parked {:.3} m away on the ground",
        DVec3::new(position.x, 0.0, position.z).length()
    );
    assert!(landed > 0, "attacks began but no strike landed");
}

#[test]
fn test_path_follower_stop_and_disable() {
    let mut follower = PathFollower::new(3.0, 10.0, 1.0);
    follower.set_destination(DVec3::new(10.0, 0.0, 0.0));
    let mut position = DVec3::ZERO;
    for _ in 0..10 {
        position = follower.advance(position, DT);
    }
    assert!(follower.current_velocity().length() > 0.0);

    follower.stop();
    assert_eq!(follower.advance(position, DT), position);
    assert_eq!(follower.current_velocity(), DVec3::ZERO);

    follower.resume();
    assert_ne!(follower.advance(position, DT), position);

    follower.disable();
    follower.resume();
    assert!(!follower.can_navigate());
    assert_eq!(follower.advance(position, DT), position);
}

// ---- Profiles ----

#[test]
fn test_presets_are_valid() {
    for (name, profile) in [
        ("walker", BehaviorProfile::walker()),
        ("runner", BehaviorProfile::runner()),
        ("brute", BehaviorProfile::brute()),
    ] {
        assert!(profile.validate(name).is_ok(), "{name} preset invalid");
        assert!(profile.stopping_distance() < profile.attack_range);
    }
}

#[test]
fn test_invalid_profiles_are_rejected() {
    let mut profile = BehaviorProfile::walker();
    profile.interrupt_range = profile.attack_range;
    assert!(profile.validate("x").is_err());

    let mut profile = BehaviorProfile::walker();
    profile.damage_instants_secs = vec![0.9, 0.5];
    assert!(profile.validate("x").is_err());

    let mut profile = BehaviorProfile::walker();
    profile.damage_instants_secs = vec![profile.attack_duration_secs + 0.1];
    assert!(profile.validate("x").is_err());

    let mut profile = BehaviorProfile::walker();
    profile.attack_range = f64::NAN;
    assert!(profile.validate("x").is_err());
}

#[test]
fn test_profile_fields_default_when_missing_from_json() {
    let profile: BehaviorProfile =
        serde_json::from_str(r#"{"attack_damage": 9, "move_speed": 5.0}"#).unwrap();
    assert_eq!(profile.attack_damage, 9);
    assert_eq!(profile.move_speed, 5.0);
    assert_eq!(profile.attack_range, BehaviorProfile::walker().attack_range);
}

proptest! {
    /// Whatever the target does, each damage instant fires at most once per
    /// attack cycle and every cycle starts with an empty fired set.
    #[test]
    fn prop_instants_fire_at_most_once_per_cycle(
        distances in prop::collection::vec(0.0f64..3.5, 1..400),
    ) {
        let profile = BehaviorProfile::walker();
        let mut nav = RecordingNav::default();
        let mut brain = EnemyBrain::new();
        let mut fired_this_cycle: Vec<u8> = Vec::new();

        for distance in distances {
            let update = step(&mut brain, &profile, &mut nav, distance);
            for signal in update.signals {
                match signal {
                    BrainSignal::AttackStarted => {
                        prop_assert!(brain.fired().is_empty());
                        fired_this_cycle.clear();
                    }
                    BrainSignal::Strike { instant, .. } => {
                        prop_assert!(!fired_this_cycle.contains(&instant));
                        fired_this_cycle.push(instant);
                    }
                    _ => {}
                }
            }
            prop_assert!(fired_this_cycle.len() <= profile.damage_instants_secs.len());
        }
    }
}
