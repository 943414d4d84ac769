use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input document configuration
    pub input: InputConfig,
    /// Geolocation lookup configuration
    pub lookup: LookupConfig,
    /// Output artifact configuration
    pub output: OutputConfig,
}

/// Input document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the JSON document holding the login events
    pub file_path: PathBuf,
}

/// Geolocation lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// URL of the batch lookup endpoint
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Output artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the result artifacts are written into
    pub directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig {
                file_path: PathBuf::from("login_events.json"),
            },
            lookup: LookupConfig {
                endpoint: "http://ip-api.com/batch".to_string(),
                timeout_seconds: 30,
            },
            output: OutputConfig {
                directory: PathBuf::from("results"),
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
