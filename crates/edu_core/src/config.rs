//! Configuration for the simulated services and CLI output.
//!
//! Every key is optional. A file only needs the values it overrides:
//!
//! ```toml
//! [simulation]
//! brief_delay_ms = 2500
//! content_delay_ms = 3000
//!
//! [output]
//! format = "json"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigResult;

/// Default latency of the simulated brief generation.
pub const DEFAULT_BRIEF_DELAY_MS: u64 = 2500;

/// Default latency of the simulated slide generation.
pub const DEFAULT_CONTENT_DELAY_MS: u64 = 3000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EduConfig {
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Latencies of the mock services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay before the mock brief generator answers, in milliseconds
    pub brief_delay_ms: u64,
    /// Delay of one simulated content generation run, in milliseconds
    pub content_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            brief_delay_ms: DEFAULT_BRIEF_DELAY_MS,
            content_delay_ms: DEFAULT_CONTENT_DELAY_MS,
        }
    }
}

impl SimulationConfig {
    pub fn brief_delay(&self) -> Duration {
        Duration::from_millis(self.brief_delay_ms)
    }

    pub fn content_delay(&self) -> Duration {
        Duration::from_millis(self.content_delay_ms)
    }
}

/// How the CLI renders results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl EduConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the file at `path` if there is one, otherwise use defaults.
    ///
    /// A path that does not exist falls back to defaults; a file that exists
    /// but does not parse is an error.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!("Config file {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EduConfig::default();
        assert_eq!(config.simulation.brief_delay(), Duration::from_millis(2500));
        assert_eq!(config.simulation.content_delay(), Duration::from_millis(3000));
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_override() {
        let config = EduConfig::from_toml_str(
            r#"
            [simulation]
            brief_delay_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.brief_delay_ms, 10);
        assert_eq!(config.simulation.content_delay_ms, DEFAULT_CONTENT_DELAY_MS);
    }

    #[test]
    fn test_output_format() {
        let config = EduConfig::from_toml_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(EduConfig::from_toml_str("[simulation\nbrief_delay_ms = ").is_err());
        assert!(EduConfig::from_toml_str("[simulation]\nbrief_delay_ms = \"slow\"").is_err());
    }
}
