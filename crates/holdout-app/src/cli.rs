//! Command-line arguments and configuration loading.

use std::path::PathBuf;

use clap::Parser;

use holdout_core::error::ConfigError;
use holdout_sim::config::EncounterConfig;

use crate::autopilot::AutopilotSettings;

/// Run a HOLDOUT encounter headless with a scripted player.
#[derive(Parser, Debug)]
#[command(name = "holdout", version)]
pub struct Args {
    /// Encounter configuration (JSON). Built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the configured RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Give up after this much simulated time (s).
    #[arg(long, default_value_t = 900.0)]
    pub max_secs: f64,
    /// Sleep to the tick rate instead of running as fast as possible.
    #[arg(long)]
    pub realtime: bool,
    /// Damage per autopilot shot.
    #[arg(long, default_value_t = 34)]
    pub autopilot_damage: u32,
    /// Seconds between autopilot shots.
    #[arg(long, default_value_t = 0.3)]
    pub autopilot_fire_interval: f64,
}

impl Args {
    /// Load, override and validate the encounter configuration.
    pub fn encounter_config(&self) -> Result<EncounterConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => EncounterConfig::from_path(path)?,
            None => EncounterConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn autopilot(&self, config: &EncounterConfig) -> AutopilotSettings {
        AutopilotSettings {
            damage: self.autopilot_damage,
            fire_interval_secs: self.autopilot_fire_interval,
            pickup_heal: config.pickups.heal_amount,
            ..Default::default()
        }
    }
}
