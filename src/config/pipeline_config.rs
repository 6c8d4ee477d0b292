//! Pipeline Configuration - sensor node, monitor and alert tunables as TOML values
//!
//! Each struct implements `Default` with the reference constants from
//! [`super::defaults`], so a missing config file changes nothing.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "THIRD_EYE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "third_eye.toml";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration shared by the sensor node and the monitor.
///
/// Load with `PipelineConfig::load()` which searches:
/// 1. `$THIRD_EYE_CONFIG` env var
/// 2. `./third_eye.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Simulated sensor node
    #[serde(default)]
    pub sender: SenderConfig,

    /// Monitor listener and history
    #[serde(default)]
    pub receiver: ReceiverConfig,

    /// Alert evaluation and display cadence
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Speech output
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl PipelineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$THIRD_EYE_CONFIG` environment variable
    /// 2. `./third_eye.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded pipeline config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded pipeline config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found — using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants, collecting every violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.sender.ports.is_empty() {
            errors.push("sender.ports must list at least one destination port".to_string());
        }
        if self.sender.ports.contains(&0) {
            errors.push("sender.ports must not contain port 0".to_string());
        }
        if self.sender.tick_interval_ms == 0 {
            errors.push("sender.tick_interval_ms must be greater than 0".to_string());
        }
        if !(self.sender.dwell_secs.is_finite() && self.sender.dwell_secs > 0.0) {
            errors.push(format!(
                "sender.dwell_secs ({}) must be a positive number of seconds",
                self.sender.dwell_secs
            ));
        }

        if self.receiver.port == 0 {
            errors.push("receiver.port must not be 0".to_string());
        }
        if self.receiver.buffer_capacity == 0 {
            errors.push("receiver.buffer_capacity must be greater than 0".to_string());
        }
        if self.receiver.max_datagram_bytes < defaults::MIN_DATAGRAM_BYTES {
            errors.push(format!(
                "receiver.max_datagram_bytes ({}) must be at least {}",
                self.receiver.max_datagram_bytes,
                defaults::MIN_DATAGRAM_BYTES
            ));
        }

        if self.alerts.evaluation_interval_ms == 0 {
            errors.push("alerts.evaluation_interval_ms must be greater than 0".to_string());
        }
        if self.alerts.ui_tick_ms == 0 {
            errors.push("alerts.ui_tick_ms must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    pub host: String,
    pub ports: Vec<u16>,
    pub tick_interval_ms: u64,
    pub dwell_secs: f64,
    /// Fixed RNG seed for reproducible scenario runs
    pub seed: Option<u64>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            host: defaults::SENDER_HOST.to_string(),
            ports: defaults::SENDER_PORTS.to_vec(),
            tick_interval_ms: defaults::SENDER_TICK_INTERVAL_MS,
            dwell_secs: defaults::SCENARIO_DWELL_SECS,
            seed: None,
        }
    }
}

impl SenderConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    pub bind_host: String,
    pub port: u16,
    pub buffer_capacity: usize,
    pub max_datagram_bytes: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_host: defaults::RECEIVER_BIND_HOST.to_string(),
            port: defaults::RECEIVER_PORT,
            buffer_capacity: defaults::MOTION_BUFFER_CAPACITY,
            max_datagram_bytes: defaults::MAX_DATAGRAM_BYTES,
        }
    }
}

impl ReceiverConfig {
    /// Resolve the listen endpoint.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(vec![format!(
                    "receiver.bind_host '{}' is not a valid IP address: {}",
                    self.bind_host, e
                )])
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub proximity_threshold_mm: u32,
    pub evaluation_interval_ms: u64,
    pub ui_tick_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_mm: defaults::OBSTACLE_THRESHOLD_MM,
            evaluation_interval_ms: defaults::ALERT_EVALUATION_INTERVAL_MS,
            ui_tick_ms: defaults::UI_TICK_MS,
        }
    }
}

impl AlertConfig {
    pub fn evaluation_interval(&self) -> Duration {
        Duration::from_millis(self.evaluation_interval_ms)
    }

    pub fn ui_tick(&self) -> Duration {
        Duration::from_millis(self.ui_tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// External text-to-speech program (e.g. `espeak`). Console-only when unset.
    pub command: Option<String>,
    pub rate_wpm: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            rate_wpm: defaults::SPEECH_RATE_WPM,
        }
    }
}
