//! Enemy AI for HOLDOUT.
//!
//! Implements the per-enemy pursue/attack state machine, archetype
//! behavior profiles, and the navigation capability it drives.
//! No ECS dependency: everything operates on plain data.

pub mod fsm;
pub mod navigation;
pub mod profiles;
pub mod steering;

pub use holdout_core as core;

#[cfg(test)]
mod tests;
