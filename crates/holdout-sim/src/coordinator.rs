//! Game state coordinator: the single owner of the game phase.
//!
//! Whether simulated time advances is decided here and nowhere else. The
//! engine only runs systems while `is_time_advancing` holds, so every timer
//! in the director and the enemy brains freezes together on pause.

use log::info;

use holdout_core::enums::GamePhase;
use holdout_core::events::SimEvent;

use crate::event_bus::EventBus;

#[derive(Debug, Default)]
pub struct GameCoordinator {
    phase: GamePhase,
}

impl GameCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_time_advancing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// NotStarted → Playing.
    pub fn start(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Playing;
        info!("encounter started");
        bus.emit(SimEvent::GameStarted);
        true
    }

    /// Playing → Paused.
    pub fn pause(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        info!("game paused");
        bus.emit(SimEvent::GamePaused);
        true
    }

    /// Paused → Playing.
    pub fn resume(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        info!("game resumed");
        bus.emit(SimEvent::GameResumed);
        true
    }

    pub fn toggle_pause(&mut self, bus: &mut EventBus) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(bus),
            GamePhase::Paused => self.resume(bus),
            _ => false,
        }
    }

    /// Playing or Paused → GameOver.
    pub fn game_over(&mut self, bus: &mut EventBus, wave: u32, score: u32) -> bool {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            return false;
        }
        self.phase = GamePhase::GameOver;
        info!("encounter lost in wave {wave} with score {score}");
        bus.emit(SimEvent::EncounterLost { wave, score });
        true
    }

    /// Playing → Won.
    pub fn win(&mut self, bus: &mut EventBus, waves_cleared: u32, score: u32) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Won;
        info!("encounter won: {waves_cleared} waves cleared, score {score}");
        bus.emit(SimEvent::EncounterWon {
            waves_cleared,
            score,
        });
        true
    }
}
