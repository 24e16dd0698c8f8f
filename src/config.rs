//! Engine configuration
//!
//! Timing constants for the sync engine, optionally loaded from YAML:
//!
//! ```yaml
//! lookahead-buffer: 0.3
//! grace-period: 2.0
//! tick-interval-ms: 100
//! ```
//!
//! Every key is optional and falls back to the defaults above.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TypesyncError;

pub const DEFAULT_LOOKAHEAD_BUFFER: f64 = 0.3;
pub const DEFAULT_GRACE_PERIOD: f64 = 2.0;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seconds added to the raw playback time before lookup, to get ahead of
    /// reaction and render latency.
    pub lookahead_buffer: f64,
    /// How far past the current line's start a stuck pause may run before an
    /// offset change forces playback to resume.
    pub grace_period: f64,
    /// Cadence hosts should tick the engine at.
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead_buffer: DEFAULT_LOOKAHEAD_BUFFER,
            grace_period: DEFAULT_GRACE_PERIOD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML configuration document.
    ///
    /// # Example
    /// ```
    /// use typesync::EngineConfig;
    ///
    /// let config = EngineConfig::from_yaml("lookahead-buffer: 0.5\n").unwrap();
    /// assert_eq!(config.lookahead_buffer, 0.5);
    /// assert_eq!(config.grace_period, 2.0);
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, TypesyncError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EngineConfig =
            serde_yaml::from_str(source).map_err(|e| TypesyncError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TypesyncError> {
        if !self.lookahead_buffer.is_finite() || self.lookahead_buffer < 0.0 {
            return Err(TypesyncError::ConfigError(format!(
                "lookahead-buffer must be a non-negative number of seconds, got {}",
                self.lookahead_buffer
            )));
        }
        if !self.grace_period.is_finite() || self.grace_period < 0.0 {
            return Err(TypesyncError::ConfigError(format!(
                "grace-period must be a non-negative number of seconds, got {}",
                self.grace_period
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(TypesyncError::ConfigError(
                "tick-interval-ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
