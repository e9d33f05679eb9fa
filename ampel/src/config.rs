//! Defines the configuration structure for the traffic light engine.
//!
//! The struct is designed to be deserialized from a configuration file
//! (e.g., a TOML file) using `serde`, merged with environment overrides.
//! This allows the light's timing and starting phase to be defined
//! externally from the application code.

use crate::common::Phase;
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Timing and startup settings for a [`TrafficLight`](crate::engine::TrafficLight).
///
/// Typically loaded from a TOML file at application startup via
/// [`CyclerConfig::from_file`]; `Default` reproduces the classic
/// 4-to-6-second red/green cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CyclerConfig {
    /// Shortest possible dwell time in a phase, in milliseconds.
    #[serde(default = "default_min_cycle_ms")]
    pub min_cycle_ms: u64,

    /// Longest possible dwell time in a phase, in milliseconds.
    #[serde(default = "default_max_cycle_ms")]
    pub max_cycle_ms: u64,

    /// The phase the light displays before its first transition.
    #[serde(default = "default_initial_phase")]
    pub initial_phase: Phase,

    /// Capacity of the broadcast channels carrying phase and system events.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl CyclerConfig {
    /// Loads a configuration from a TOML file, with `AMPEL_*` environment
    /// variables taking precedence over file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("AMPEL"))
            .build()
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let parsed: CyclerConfig = settings
            .try_deserialize()
            .context("config file did not match the expected schema")?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Rejects dwell ranges that the cycle loop cannot draw from.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_cycle_ms > 0, "min_cycle_ms must be positive");
        ensure!(
            self.min_cycle_ms <= self.max_cycle_ms,
            "min_cycle_ms ({}) must not exceed max_cycle_ms ({})",
            self.min_cycle_ms,
            self.max_cycle_ms
        );
        ensure!(self.event_capacity > 0, "event_capacity must be positive");
        Ok(())
    }

    /// Shortest dwell as a `Duration`.
    pub fn min_cycle(&self) -> Duration {
        Duration::from_millis(self.min_cycle_ms)
    }

    /// Longest dwell as a `Duration`.
    pub fn max_cycle(&self) -> Duration {
        Duration::from_millis(self.max_cycle_ms)
    }
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            min_cycle_ms: default_min_cycle_ms(),
            max_cycle_ms: default_max_cycle_ms(),
            initial_phase: default_initial_phase(),
            event_capacity: default_event_capacity(),
        }
    }
}

// --- Default value functions for serde ---

fn default_min_cycle_ms() -> u64 {
    4_000
}

fn default_max_cycle_ms() -> u64 {
    6_000
}

fn default_initial_phase() -> Phase {
    Phase::Red
}

fn default_event_capacity() -> usize {
    64
}
