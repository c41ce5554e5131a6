//! Error taxonomy.
//!
//! Configuration errors are fatal and surface before the first tick.
//! Spawn errors are per-attempt: logged and skipped by the director.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete encounter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no spawn points configured")]
    NoSpawnPoints,
    #[error("no enemy archetypes configured")]
    NoArchetypes,
    #[error("no wave quotas configured")]
    NoWaveQuotas,
    #[error("wave {wave} has a quota of zero")]
    ZeroQuota { wave: u32 },
    #[error("no target configured")]
    MissingTarget,
    #[error("target: {0}")]
    InvalidTarget(String),
    #[error("invalid timing for {field}: {value}")]
    InvalidTiming { field: &'static str, value: f64 },
    #[error("archetype {archetype}: {reason}")]
    InvalidArchetype { archetype: String, reason: String },
    #[error("pickup settings: {0}")]
    InvalidPickups(String),
    #[error("parse error")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single spawn attempt failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("spawn point {0} is not a finite position")]
    InvalidSpawnPoint(usize),
    #[error("spawn rejected: {0}")]
    Rejected(String),
}
