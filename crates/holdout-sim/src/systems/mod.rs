//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They keep no state of their own; everything lives in components, the
//! director or the event bus passed in.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod movement;
pub mod snapshot;
