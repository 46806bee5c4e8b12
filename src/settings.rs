//! Game settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::Ministep;

/// Host-side settings (the simulation itself has no tunables here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pacing ===
    /// Delay after a rising ministep (ms)
    pub jump_tick_ms: u64,
    /// Delay after a falling ministep (ms); shorter so descent looks faster
    pub fall_tick_ms: u64,
    /// Sleep between ministeps (off for headless runs)
    pub realtime: bool,

    // === Run ===
    /// Fixed RNG seed for reproducible layouts
    pub seed: Option<u64>,
    /// Jumps performed by the headless demo
    pub demo_jumps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_tick_ms: 50,
            fall_tick_ms: 20,
            realtime: true,
            seed: None,
            demo_jumps: 12,
        }
    }
}

impl Settings {
    /// Delay the host should wait after a ministep
    pub fn tick_interval(&self, step: Ministep) -> Duration {
        match step {
            Ministep::Rising => Duration::from_millis(self.jump_tick_ms),
            Ministep::Falling | Ministep::Landed => Duration::from_millis(self.fall_tick_ms),
            Ministep::Idle | Ministep::Halted => Duration::ZERO,
        }
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({}), using default settings", path.display(), e);
                Self::default()
            }
        }
    }
}
