//! helpkit configuration
//!
//! Optional TOML file with defaults for the merge and debounce helpers:
//!
//! ```toml
//! [merge]
//! array_mode = "replace"
//!
//! [debounce]
//! wait_ms = 25
//! ```
//!
//! ## Lookup order
//!
//! 1. Explicit path (`--config` on the CLI, or [`HelpersConfig::load_from`])
//! 2. `HELPKIT_CONFIG` environment variable
//! 3. Defaults

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_WAIT;
use crate::error::{HelperError, Result};
use crate::merge::ArrayMode;

/// Environment variable holding the config file path
pub const CONFIG_ENV: &str = "HELPKIT_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HelpersConfig {
    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub debounce: DebounceConfig,
}

/// Deep merge defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MergeConfig {
    #[serde(default)]
    pub array_mode: ArrayMode,
}

/// Debounce defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebounceConfig {
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
}

fn default_wait_ms() -> u64 {
    DEFAULT_WAIT.as_millis() as u64
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
        }
    }
}

impl DebounceConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

impl HelpersConfig {
    /// Load from `HELPKIT_CONFIG` if set, defaults otherwise
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a file
    ///
    /// Returns error if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| HelperError::ConfigError {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HelperError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HelperError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_helpers() {
        let config = HelpersConfig::default();
        assert_eq!(config.merge.array_mode, ArrayMode::Merge);
        assert_eq!(config.debounce.wait(), DEFAULT_WAIT);
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(HelpersConfig::parse("").unwrap(), HelpersConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = HelpersConfig::parse("[merge]\narray_mode = \"replace\"\n").unwrap();
        assert_eq!(config.merge.array_mode, ArrayMode::Replace);
        assert_eq!(config.debounce.wait_ms, 10);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = HelpersConfig {
            merge: MergeConfig {
                array_mode: ArrayMode::Replace,
            },
            debounce: DebounceConfig { wait_ms: 250 },
        };
        let text = config.to_toml().unwrap();
        assert_eq!(HelpersConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_array_mode() {
        let err = HelpersConfig::parse("[merge]\narray_mode = \"append\"\n").unwrap_err();
        assert!(matches!(err, HelperError::ConfigError { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("helpkit.toml");
        fs::write(&path, "[debounce]\nwait_ms = 42\n").unwrap();

        let config = HelpersConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce.wait(), Duration::from_millis(42));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = HelpersConfig::load_from(dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
