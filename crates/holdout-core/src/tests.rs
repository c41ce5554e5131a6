use glam::DVec3;

use crate::commands::PlayerCommand;
use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::state::GameStateSnapshot;
use crate::types::{expired, reached, EntityId, Position, SimTime};

/// Commands arrive as tagged JSON from the host.
#[test]
fn test_player_command_from_tagged_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"DamageEnemy","enemy":7,"amount":25}"#).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::DamageEnemy {
            enemy: EntityId(7),
            amount: 25
        }
    );

    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"MoveTarget","position":[1.0,0.0,-2.0]}"#).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::MoveTarget {
            position: DVec3::new(1.0, 0.0, -2.0)
        }
    );

    let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"TogglePause"}"#).unwrap();
    assert_eq!(cmd, PlayerCommand::TogglePause);
}

#[test]
fn test_event_is_tagged_by_type() {
    let event = SimEvent::WaveProgress {
        wave: 2,
        killed: 3,
        quota: 15,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "WaveProgress");
    assert_eq!(json["killed"], 3);
    assert_eq!(json["quota"], 15);
}

#[test]
fn test_snapshot_default_is_not_started() {
    let snap = GameStateSnapshot::default();
    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert_eq!(snap.wave.phase, WavePhase::Idle);
    assert_eq!(snap.wave.index, 0);
    assert!(snap.events.is_empty());
    // Snapshot must be serializable for the host.
    assert!(serde_json::to_string(&snap).is_ok());
}

#[test]
fn test_terminal_phases() {
    assert!(GamePhase::GameOver.is_terminal());
    assert!(GamePhase::Won.is_terminal());
    assert!(!GamePhase::Playing.is_terminal());
    assert!(!GamePhase::Paused.is_terminal());
    assert!(!GamePhase::NotStarted.is_terminal());
}

#[test]
fn test_sim_time_30_ticks_reach_one_second() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance_by(DT);
    }
    assert_eq!(time.tick, TICK_RATE as u64);
    assert!(
        reached(time.elapsed_secs, 1.0),
        "30 ticks should count as one second, got {}",
        time.elapsed_secs
    );
}

#[test]
fn test_timer_helpers() {
    assert!(reached(0.5, 0.5));
    assert!(reached(0.5 - TIME_EPSILON / 2.0, 0.5));
    assert!(!reached(0.49, 0.5));
    assert!(expired(0.0));
    assert!(expired(-0.1));
    assert!(!expired(0.1));
}

#[test]
fn test_ground_range_ignores_height() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(3.0, 4.0, 4.0);
    assert!((a.ground_range_to(&b) - 5.0).abs() < 1e-12);
}

#[test]
fn test_default_tuning_is_consistent() {
    assert!(ATTACK_INTERRUPT_RANGE > ATTACK_RANGE);
    assert!(STOPPING_MARGIN < ATTACK_RANGE);
    assert!(MIN_SPAWN_INTERVAL_SECS <= INITIAL_SPAWN_INTERVAL_SECS);
    assert!(PICKUPS_MIN_PER_WAVE <= PICKUPS_MAX_PER_WAVE);
    assert!(ATTACK_DAMAGE_INSTANTS_SECS.len() <= MAX_DAMAGE_INSTANTS);
    assert!(ATTACK_DAMAGE_INSTANTS_SECS
        .iter()
        .all(|&t| t >= 0.0 && t <= ATTACK_DURATION_SECS));
}

#[test]
fn test_config_error_messages() {
    assert_eq!(ConfigError::NoSpawnPoints.to_string(), "no spawn points configured");
    assert_eq!(
        ConfigError::ZeroQuota { wave: 3 }.to_string(),
        "wave 3 has a quota of zero"
    );
    let parse = serde_json::from_str::<PlayerCommand>("{").unwrap_err();
    assert!(matches!(ConfigError::from(parse), ConfigError::Parse(_)));
}
