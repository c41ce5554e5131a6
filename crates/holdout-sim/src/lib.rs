//! Simulation engine for HOLDOUT.
//!
//! Owns the hecs ECS world, runs the wave director and enemy systems at a
//! fixed tick rate, and produces GameStateSnapshots for the host.

pub mod components;
pub mod config;
pub mod coordinator;
pub mod director;
pub mod engine;
pub mod event_bus;
pub mod health;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use config::EncounterConfig;
pub use engine::SimulationEngine;
pub use holdout_core as core;
