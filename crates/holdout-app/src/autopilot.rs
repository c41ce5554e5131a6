//! Scripted player: stands in for input, shooting and pickup collection.
//!
//! Reads each snapshot and answers with commands for the next tick. It
//! shoots the nearest living enemy in range at a fixed fire interval, reloads
//! when the magazine runs dry, steps back from any enemy that starts an
//! attack, and uses a pickup when hurt. Every timer runs on simulated time,
//! so a paused encounter also pauses the reload.

use glam::DVec3;

use holdout_core::commands::PlayerCommand;
use holdout_core::enums::EnemyState;
use holdout_core::events::SimEvent;
use holdout_core::state::{EnemyView, GameStateSnapshot};
use holdout_core::types::{expired, reached};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotSettings {
    /// Damage per shot.
    pub damage: u32,
    /// Time between shots (s).
    pub fire_interval_secs: f64,
    /// Rounds per magazine.
    pub magazine_size: u32,
    /// Time to swap magazines (s).
    pub reload_secs: f64,
    /// Maximum shooting distance (m).
    pub range: f64,
    /// How far to step away from an attacker (m).
    pub evade_distance: f64,
    /// Health restored by one pickup.
    pub pickup_heal: u32,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            damage: 34,
            fire_interval_secs: 0.3,
            magazine_size: 30,
            reload_secs: 1.0,
            range: 30.0,
            evade_distance: 1.0,
            pickup_heal: 50,
        }
    }
}

#[derive(Debug)]
pub struct Autopilot {
    settings: AutopilotSettings,
    since_shot: f64,
    rounds: u32,
    /// Time left on the current reload, if one is running.
    reloading: Option<f64>,
    last_elapsed: f64,
    pickups_available: usize,
}

impl Autopilot {
    pub fn new(settings: AutopilotSettings) -> Self {
        Self {
            settings,
            // Ready to fire on the first tick.
            since_shot: settings.fire_interval_secs,
            rounds: settings.magazine_size,
            reloading: None,
            last_elapsed: 0.0,
            pickups_available: 0,
        }
    }

    pub fn pickups_available(&self) -> usize {
        self.pickups_available
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading.is_some()
    }

    /// Commands to queue for the next tick.
    pub fn plan(&mut self, snap: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if snap.target.dead {
            return commands;
        }

        let step = (snap.time.elapsed_secs - self.last_elapsed).max(0.0);
        self.last_elapsed = snap.time.elapsed_secs;
        self.since_shot += step;
        self.advance_reload(step);

        let target = snap.target.position;
        for event in &snap.events {
            match event {
                SimEvent::PickupSpawnRequest { points, .. } => {
                    self.pickups_available = points.len();
                }
                SimEvent::EnemyAttackStarted { enemy } => {
                    let attacker = snap.enemies.iter().find(|e| e.id == *enemy);
                    if let Some(step) = attacker.and_then(|a| self.evade_step(target, a)) {
                        commands.push(PlayerCommand::MoveTarget {
                            position: target + step,
                        });
                    }
                }
                _ => {}
            }
        }

        if self.pickups_available > 0 && snap.target.health * 2 < snap.target.max_health {
            self.pickups_available -= 1;
            commands.push(PlayerCommand::HealTarget {
                amount: self.settings.pickup_heal,
            });
        }

        if self.reloading.is_none() && reached(self.since_shot, self.settings.fire_interval_secs) {
            if let Some(enemy) = self.nearest_in_range(snap) {
                self.since_shot = 0.0;
                self.fire_round();
                commands.push(PlayerCommand::DamageEnemy {
                    enemy: enemy.id,
                    amount: self.settings.damage,
                });
            }
        }
        commands
    }

    fn fire_round(&mut self) {
        self.rounds = self.rounds.saturating_sub(1);
        if self.rounds == 0 {
            self.reloading = Some(self.settings.reload_secs);
        }
    }

    fn advance_reload(&mut self, step: f64) {
        let Some(remaining) = self.reloading else {
            return;
        };
        let remaining = remaining - step;
        if expired(remaining) {
            self.reloading = None;
            self.rounds = self.settings.magazine_size;
        } else {
            self.reloading = Some(remaining);
        }
    }

    fn nearest_in_range<'a>(&self, snap: &'a GameStateSnapshot) -> Option<&'a EnemyView> {
        let target = snap.target.position;
        snap.enemies
            .iter()
            .filter(|e| e.state != EnemyState::Dead)
            .map(|e| (e, e.position.distance(target)))
            .filter(|(_, d)| *d <= self.settings.range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(e, _)| e)
    }

    /// Straight away from the attacker on the ground plane.
    fn evade_step(&self, target: DVec3, attacker: &EnemyView) -> Option<DVec3> {
        let away = target - attacker.position;
        let flat = DVec3::new(away.x, 0.0, away.z).try_normalize()?;
        Some(flat * self.settings.evade_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::types::{EntityId, SimTime};

    fn enemy(id: u64, z: f64, state: EnemyState) -> EnemyView {
        EnemyView {
            id: EntityId(id),
            archetype: "walker".into(),
            state,
            position: DVec3::new(0.0, 0.0, z),
            yaw: 0.0,
            health_fraction: 1.0,
        }
    }

    fn snapshot(elapsed: f64, enemies: Vec<EnemyView>) -> GameStateSnapshot {
        let mut snap = GameStateSnapshot {
            time: SimTime {
                tick: 0,
                elapsed_secs: elapsed,
            },
            enemies,
            ..Default::default()
        };
        snap.target.health = 100;
        snap.target.max_health = 100;
        snap
    }

    #[test]
    fn test_shoots_nearest_living_enemy_at_fire_interval() {
        let mut pilot = Autopilot::new(AutopilotSettings::default());
        let enemies = vec![
            enemy(1, 3.0, EnemyState::Dead),
            enemy(2, 8.0, EnemyState::Pursuing),
            enemy(3, 5.0, EnemyState::Pursuing),
            enemy(4, 45.0, EnemyState::Pursuing),
        ];

        let commands = pilot.plan(&snapshot(0.1, enemies.clone()));
        assert_eq!(
            commands,
            vec![PlayerCommand::DamageEnemy {
                enemy: EntityId(3),
                amount: 34
            }]
        );

        assert!(pilot.plan(&snapshot(0.2, enemies.clone())).is_empty(), "still reloading");
        assert_eq!(pilot.plan(&snapshot(0.4, enemies)).len(), 1);
    }

    #[test]
    fn test_stops_firing_while_reloading() {
        let mut pilot = Autopilot::new(AutopilotSettings {
            magazine_size: 2,
            reload_secs: 1.0,
            ..Default::default()
        });
        let enemies = vec![enemy(1, 5.0, EnemyState::Pursuing)];

        assert_eq!(pilot.plan(&snapshot(0.3, enemies.clone())).len(), 1);
        assert_eq!(pilot.plan(&snapshot(0.6, enemies.clone())).len(), 1);
        assert_eq!(pilot.rounds(), 0);
        assert!(pilot.is_reloading());

        for elapsed in [0.9, 1.2, 1.5] {
            assert!(
                pilot.plan(&snapshot(elapsed, enemies.clone())).is_empty(),
                "fired mid-reload at {elapsed}"
            );
        }

        // Reload done one second after the last round.
        assert_eq!(pilot.plan(&snapshot(1.6, enemies)).len(), 1);
        assert!(!pilot.is_reloading());
        assert_eq!(pilot.rounds(), 1);
    }

    #[test]
    fn test_reload_waits_while_time_is_frozen() {
        let mut pilot = Autopilot::new(AutopilotSettings {
            magazine_size: 1,
            ..Default::default()
        });
        let enemies = vec![enemy(1, 5.0, EnemyState::Pursuing)];
        assert_eq!(pilot.plan(&snapshot(0.5, enemies.clone())).len(), 1);
        assert!(pilot.is_reloading());

        // Paused: snapshots repeat the same simulated time.
        for _ in 0..100 {
            assert!(pilot.plan(&snapshot(0.9, enemies.clone())).is_empty());
        }
        assert!(pilot.is_reloading());
        assert_eq!(pilot.plan(&snapshot(1.5, enemies)).len(), 1);
    }

    #[test]
    fn test_holds_fire_with_nothing_in_range() {
        let mut pilot = Autopilot::new(AutopilotSettings::default());
        let far = vec![enemy(1, 50.0, EnemyState::Pursuing)];
        assert!(pilot.plan(&snapshot(1.0, far)).is_empty());
    }

    #[test]
    fn test_steps_away_from_attacker() {
        let mut pilot = Autopilot::new(AutopilotSettings {
            range: 0.5,
            ..Default::default()
        });
        let mut snap = snapshot(1.0, vec![enemy(7, 1.8, EnemyState::Attacking)]);
        snap.events.push(SimEvent::EnemyAttackStarted { enemy: EntityId(7) });

        let commands = pilot.plan(&snap);
        assert_eq!(
            commands,
            vec![PlayerCommand::MoveTarget {
                position: DVec3::new(0.0, 0.0, -1.0)
            }]
        );
    }

    #[test]
    fn test_uses_pickup_when_hurt() {
        let mut pilot = Autopilot::new(AutopilotSettings::default());
        let mut snap = snapshot(1.0, Vec::new());
        snap.events.push(SimEvent::PickupSpawnRequest {
            wave: 1,
            points: vec![DVec3::X, DVec3::Z],
        });
        assert!(pilot.plan(&snap).is_empty(), "healthy: keep the pickups");
        assert_eq!(pilot.pickups_available(), 2);

        let mut hurt = snapshot(1.1, Vec::new());
        hurt.target.health = 30;
        assert_eq!(
            pilot.plan(&hurt),
            vec![PlayerCommand::HealTarget { amount: 50 }]
        );
        assert_eq!(pilot.pickups_available(), 1);
    }
}
