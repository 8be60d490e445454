//! Sandbox configuration (movement tuning, scoring, session). Loaded from config.ron at startup.

use movement::MovementConfig;
use scoring::MatchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent sandbox settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Agent movement tuning. Validated before the agent is built.
    #[serde(default)]
    pub movement: MovementConfig,
    /// Goal and score rules.
    #[serde(default)]
    pub scoring: MatchConfig,
    /// Headless session parameters.
    #[serde(default)]
    pub session: SessionConfig,
}

/// How long the scripted session runs and at what rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of simulation ticks.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Nominal tick rate in Hz. Every third tick runs long to exercise variable steps.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: f32,
    /// Standing capsule height of the agent.
    #[serde(default = "default_agent_height")]
    pub agent_height: f32,
    /// Capsule radius of the agent.
    #[serde(default = "default_agent_radius")]
    pub agent_radius: f32,
    /// Log the agent every this many ticks.
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

fn default_ticks() -> u64 {
    300
}
fn default_tick_hz() -> f32 {
    60.0
}
fn default_agent_height() -> f32 {
    2.0
}
fn default_agent_radius() -> f32 {
    0.5
}
fn default_log_every() -> u64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            tick_hz: default_tick_hz(),
            agent_height: default_agent_height(),
            agent_radius: default_agent_radius(),
            log_every: default_log_every(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or unparsable, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
