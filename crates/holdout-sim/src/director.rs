//! Wave director: spawning cadence, kill accounting, cooldowns, difficulty.
//!
//! ```text
//!   Idle ──start──► Spawning ──quota spawned──► AwaitingClear
//!                      ▲                              │ registry empty
//!                      │ cooldown over                ▼
//!                      └──────── Cooldown ◄── wave completed ──► Completed (last wave)
//!
//!   any ──stop (game over)──► Idle
//! ```
//!
//! The director owns the registry and every wave counter. Enemies never
//! touch them; their deaths arrive through `on_enemy_died`.

use glam::DVec3;
use hecs::Entity;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::constants::TIME_EPSILON;
use holdout_core::enums::WavePhase;
use holdout_core::error::SpawnError;
use holdout_core::events::SimEvent;
use holdout_core::state::{ScoreView, WaveView};
use holdout_core::types::expired;

use crate::components::entity_id;
use crate::config::{EncounterConfig, PickupSettings, WaveSettings};
use crate::event_bus::EventBus;
use crate::registry::EnemyRegistry;

/// Creates enemies on the director's behalf.
pub trait EnemySpawner {
    /// Spawn one enemy of archetype `archetype` at spawn point `spawn_point`.
    fn spawn_enemy(
        &mut self,
        spawn_point: usize,
        archetype: usize,
    ) -> Result<SpawnedEnemy, SpawnError>;
}

/// What a successful spawn produced.
#[derive(Debug, Clone)]
pub struct SpawnedEnemy {
    pub entity: Entity,
    pub archetype: String,
    pub position: DVec3,
}

/// Notable result of a director update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorOutcome {
    Continue,
    /// The last configured wave was cleared.
    AllWavesCleared,
}

/// Running score across the encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub total_kills: u32,
    pub waves_cleared: u32,
}

#[derive(Debug)]
pub struct WaveDirector {
    settings: WaveSettings,
    pickups: PickupSettings,
    spawn_point_count: usize,
    archetype_count: usize,

    phase: WavePhase,
    /// 1-based, 0 before the first wave.
    wave: u32,
    spawned: u32,
    killed: u32,
    spawn_interval: f64,
    /// Time until the next spawn attempt.
    spawn_countdown: f64,
    cooldown_remaining: f64,
    /// Last whole-second cooldown value reported outward.
    reported_cooldown: Option<u32>,

    registry: EnemyRegistry,
    score: ScoreState,
}

impl WaveDirector {
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            settings: config.waves.clone(),
            pickups: config.pickups.clone(),
            spawn_point_count: config.spawn_points.len(),
            archetype_count: config.archetypes.len(),
            phase: WavePhase::Idle,
            wave: 0,
            spawned: 0,
            killed: 0,
            spawn_interval: config.waves.initial_spawn_interval_secs,
            spawn_countdown: 0.0,
            cooldown_remaining: 0.0,
            reported_cooldown: None,
            registry: EnemyRegistry::new(),
            score: ScoreState::default(),
        }
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn quota(&self) -> u32 {
        self.settings.quota(self.wave)
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn killed(&self) -> u32 {
        self.killed
    }

    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    pub fn spawn_countdown(&self) -> f64 {
        self.spawn_countdown
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown_remaining
    }

    pub fn registry(&self) -> &EnemyRegistry {
        &self.registry
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    /// Begin the first wave. Only valid once, from Idle.
    pub fn start(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != WavePhase::Idle || self.wave != 0 {
            return false;
        }
        self.begin_wave(1, bus);
        true
    }

    /// Advance spawning, completion and cooldown by `dt`.
    pub fn update(
        &mut self,
        dt: f64,
        rng: &mut ChaCha8Rng,
        spawner: &mut dyn EnemySpawner,
        bus: &mut EventBus,
    ) -> DirectorOutcome {
        if self.phase == WavePhase::Spawning {
            self.run_spawning(dt, rng, spawner, bus);
        }

        if self.phase == WavePhase::AwaitingClear && self.registry.is_empty() {
            return self.complete_wave(rng, bus);
        }

        if self.phase == WavePhase::Cooldown {
            self.run_cooldown(dt, bus);
        }

        DirectorOutcome::Continue
    }

    /// Kill accounting for a registered enemy. Returns `false` for enemies
    /// that are not (or no longer) in the registry.
    pub fn on_enemy_died(&mut self, enemy: Entity, bus: &mut EventBus) -> bool {
        if !self.registry.remove(enemy) {
            return false;
        }
        self.killed += 1;
        self.score.total_kills += 1;
        self.score.score += self.settings.score_per_kill;

        let quota = self.quota();
        debug!("wave {} kill {}/{}", self.wave, self.killed, quota);
        bus.emit(SimEvent::WaveProgress {
            wave: self.wave,
            killed: self.killed,
            quota,
        });
        true
    }

    /// Halt everything and hand back the enemies still registered so the
    /// caller can destroy them.
    pub fn stop(&mut self) -> Vec<Entity> {
        self.phase = WavePhase::Idle;
        self.spawn_countdown = 0.0;
        self.cooldown_remaining = 0.0;
        self.reported_cooldown = None;
        self.registry.drain()
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            index: self.wave,
            total_waves: self.settings.total_waves(),
            phase: self.phase,
            quota: self.quota(),
            spawned: self.spawned,
            killed: self.killed,
            alive: self.registry.len() as u32,
            spawn_interval_secs: self.spawn_interval,
            cooldown_remaining_secs: self.cooldown_remaining,
        }
    }

    pub fn score_view(&self) -> ScoreView {
        ScoreView {
            score: self.score.score,
            total_kills: self.score.total_kills,
            waves_cleared: self.score.waves_cleared,
        }
    }

    fn begin_wave(&mut self, wave: u32, bus: &mut EventBus) {
        self.wave = wave;
        self.spawned = 0;
        self.killed = 0;
        self.spawn_countdown = self.settings.initial_spawn_delay_secs;
        self.phase = WavePhase::Spawning;

        let quota = self.quota();
        info!(
            "wave {wave}/{} started: {quota} enemies every {:.2}s",
            self.settings.total_waves(),
            self.spawn_interval
        );
        bus.emit(SimEvent::WaveStarted { wave, quota });
    }

    fn run_spawning(
        &mut self,
        dt: f64,
        rng: &mut ChaCha8Rng,
        spawner: &mut dyn EnemySpawner,
        bus: &mut EventBus,
    ) {
        let quota = self.quota();
        while self.spawned < quota && expired(self.spawn_countdown) {
            self.spawn_countdown += self.spawn_interval;
            self.try_spawn(rng, spawner, bus);
        }

        if self.spawned >= quota {
            self.phase = WavePhase::AwaitingClear;
        } else {
            self.spawn_countdown -= dt;
        }
    }

    fn try_spawn(&mut self, rng: &mut ChaCha8Rng, spawner: &mut dyn EnemySpawner, bus: &mut EventBus) {
        if self.spawn_point_count == 0 || self.archetype_count == 0 {
            warn!("wave {}: nothing to spawn from", self.wave);
            return;
        }
        let spawn_point = rng.gen_range(0..self.spawn_point_count);
        let archetype = rng.gen_range(0..self.archetype_count);

        match spawner.spawn_enemy(spawn_point, archetype) {
            Ok(spawned) => {
                self.registry.insert(spawned.entity);
                self.spawned += 1;
                let enemy = entity_id(spawned.entity);
                debug!(
                    "wave {} spawned {} {:?} at point {spawn_point} ({}/{})",
                    self.wave,
                    spawned.archetype,
                    enemy,
                    self.spawned,
                    self.quota()
                );
                bus.emit(SimEvent::EnemySpawned {
                    enemy,
                    archetype: spawned.archetype,
                    position: spawned.position,
                });
            }
            Err(err) => {
                warn!("wave {}: spawn attempt skipped: {err}", self.wave);
            }
        }
    }

    fn complete_wave(&mut self, rng: &mut ChaCha8Rng, bus: &mut EventBus) -> DirectorOutcome {
        let wave = self.wave;
        self.score.waves_cleared += 1;
        info!("wave {wave} cleared ({} kills)", self.killed);
        bus.emit(SimEvent::WaveCompleted { wave });
        self.request_pickups(rng, bus);

        if wave >= self.settings.total_waves() {
            self.phase = WavePhase::Completed;
            return DirectorOutcome::AllWavesCleared;
        }

        self.phase = WavePhase::Cooldown;
        self.cooldown_remaining = self.settings.cooldown_secs;
        self.reported_cooldown = None;
        self.report_cooldown(bus);
        DirectorOutcome::Continue
    }

    fn run_cooldown(&mut self, dt: f64, bus: &mut EventBus) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        if !expired(self.cooldown_remaining) {
            self.report_cooldown(bus);
            return;
        }

        self.cooldown_remaining = 0.0;
        self.spawn_interval = self.settings.next_interval(self.spawn_interval);
        info!(
            "cooldown over, spawn interval now {:.2}s",
            self.spawn_interval
        );
        self.begin_wave(self.wave + 1, bus);
    }

    /// Emit the remaining whole seconds when that value changes.
    fn report_cooldown(&mut self, bus: &mut EventBus) {
        let secs = (self.cooldown_remaining - TIME_EPSILON).ceil().max(0.0) as u32;
        if self.reported_cooldown == Some(secs) {
            return;
        }
        self.reported_cooldown = Some(secs);
        bus.emit(SimEvent::WaveCooldown {
            next_wave: self.wave + 1,
            remaining_secs: secs,
        });
    }

    /// Choose distinct pickup points for the next wave, replacing the old set.
    fn request_pickups(&self, rng: &mut ChaCha8Rng, bus: &mut EventBus) {
        let pickups = &self.pickups;
        if pickups.points.is_empty() || pickups.max_per_wave == 0 {
            return;
        }
        let count = rng.gen_range(pickups.min_per_wave..=pickups.max_per_wave) as usize;
        let points: Vec<DVec3> = pickups
            .points
            .choose_multiple(rng, count.min(pickups.points.len()))
            .copied()
            .collect();
        if points.is_empty() {
            return;
        }
        bus.emit(SimEvent::PickupSpawnRequest {
            wave: self.wave,
            points,
        });
    }
}
