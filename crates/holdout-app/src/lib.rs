//! HOLDOUT headless runner.
//!
//! Wires the simulation engine to a game loop thread, a scripted player
//! standing in for input and shooting, and the command line.

pub mod autopilot;
pub mod cli;
pub mod game_loop;
pub mod state;

pub use holdout_core as core;
