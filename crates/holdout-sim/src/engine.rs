//! Simulation engine: the encounter in one tick function.
//!
//! `SimulationEngine` owns the hecs ECS world, the coordinator, the wave
//! director and the event bus, processes player commands, runs all systems
//! and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use holdout_core::commands::PlayerCommand;
use holdout_core::constants::DT;
use holdout_core::enums::GamePhase;
use holdout_core::error::ConfigError;
use holdout_core::events::SimEvent;
use holdout_core::state::GameStateSnapshot;
use holdout_core::types::{EntityId, Position, SimTime};

use crate::components::entity_from_id;
use crate::config::EncounterConfig;
use crate::coordinator::GameCoordinator;
use crate::director::{DirectorOutcome, WaveDirector};
use crate::event_bus::{EventBus, ListenerId};
use crate::systems;
use crate::world_setup::{self, WorldSpawner};

/// The simulation engine. Owns the ECS world and all encounter state.
pub struct SimulationEngine {
    config: EncounterConfig,
    world: World,
    time: SimTime,
    coordinator: GameCoordinator,
    director: WaveDirector,
    rng: ChaCha8Rng,
    target: Option<Entity>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    bus: EventBus,
}

impl SimulationEngine {
    /// Validate `config` and build an encounter ready to start.
    pub fn new(config: EncounterConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            error!("invalid encounter configuration: {err}");
            return Err(err);
        }

        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            coordinator: GameCoordinator::new(),
            director: WaveDirector::new(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            target: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            bus: EventBus::new(),
            config,
        };
        engine.setup_world();
        Ok(engine)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register a synchronous listener for presentation events.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SimEvent) + Send + 'static,
    ) -> ListenerId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_with(DT)
    }

    /// Advance by an arbitrary time step.
    pub fn tick_with(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.coordinator.is_time_advancing() {
            self.run_systems(dt);
            self.time.advance_by(dt);
        }

        let events = self.bus.drain();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.coordinator.phase(),
            &self.director,
            self.target,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.coordinator.phase()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// The target entity, resolved once at setup.
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartEncounter => self.start(),
            PlayerCommand::Pause => {
                self.coordinator.pause(&mut self.bus);
            }
            PlayerCommand::Resume => {
                self.coordinator.resume(&mut self.bus);
            }
            PlayerCommand::TogglePause => {
                self.coordinator.toggle_pause(&mut self.bus);
            }
            PlayerCommand::Restart => {
                info!("restarting encounter");
                self.reset();
                self.start();
            }
            // Gameplay commands only act on a running encounter.
            _ if self.coordinator.phase() != GamePhase::Playing => {}
            PlayerCommand::MoveTarget { position } => {
                if let Some(target) = self.target {
                    if let Ok(mut pos) = self.world.get::<&mut Position>(target) {
                        pos.0 = position;
                    }
                }
            }
            PlayerCommand::DamageEnemy { enemy, amount } => self.damage_enemy(enemy, amount),
            PlayerCommand::HealTarget { amount } => {
                if let Some(target) = self.target {
                    systems::combat::heal(&mut self.world, target, amount);
                }
            }
        }
    }

    fn start(&mut self) {
        if self.coordinator.start(&mut self.bus) {
            self.director.start(&mut self.bus);
        }
    }

    fn damage_enemy(&mut self, enemy: EntityId, amount: u32) {
        let outcome = entity_from_id(enemy).and_then(|entity| {
            systems::combat::damage_enemy(
                &mut self.world,
                entity,
                amount,
                self.config.corpse_grace_secs,
                &mut self.rng,
                &mut self.director,
                &mut self.bus,
            )
        });
        if outcome.is_none() {
            warn!("damage for unknown enemy {enemy:?} ignored");
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Wave director (spawning, clear check, cooldown)
        let mut spawner = WorldSpawner {
            world: &mut self.world,
            config: &self.config,
        };
        let outcome = self
            .director
            .update(dt, &mut self.rng, &mut spawner, &mut self.bus);
        if outcome == DirectorOutcome::AllWavesCleared {
            let score = self.director.score();
            self.coordinator
                .win(&mut self.bus, score.waves_cleared, score.score);
            return;
        }
        // 2. Enemy AI (state machines, strikes on the target)
        let target_killed =
            systems::enemy_ai::run(&mut self.world, self.target, dt, &mut self.bus);
        if target_killed {
            self.lose();
            return;
        }
        // 3. Movement and facing
        systems::movement::run(&mut self.world, self.target, dt);
        // 4. Corpse removal
        systems::cleanup::run(&mut self.world, dt, &mut self.despawn_buffer, &mut self.bus);
    }

    /// Game over: stop the director and destroy every registered enemy.
    fn lose(&mut self) {
        let score = self.director.score();
        if self
            .coordinator
            .game_over(&mut self.bus, self.director.wave(), score.score)
        {
            let survivors = self.director.stop();
            systems::cleanup::despawn(&mut self.world, survivors, &mut self.bus);
        }
    }

    fn setup_world(&mut self) {
        self.target = self
            .config
            .target
            .as_ref()
            .map(|spec| world_setup::spawn_target(&mut self.world, spec));
    }

    /// Fresh world, director and RNG from the same configuration.
    /// Listeners stay subscribed.
    fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.coordinator = GameCoordinator::new();
        self.director = WaveDirector::new(&self.config);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.despawn_buffer.clear();
        self.setup_world();
    }
}
