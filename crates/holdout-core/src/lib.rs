//! Core types and definitions for the HOLDOUT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! constants, commands, state snapshots, presentation events and errors.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
