use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Default config file path, overridable via `TEMPBRIDGE_CONFIG`.
pub const CONFIG_PATH: &str = "tempbridge.toml";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    pub broker: BrokerSettings,
    pub http: HttpSettings,
}

/// Broker endpoint and topic. Immutable after startup.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub topic: String,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            host: "broker.hivemq.com".to_string(),
            port: 1883,
            topic: "temperature".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BridgeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Loads the config file, falling back to defaults when none exists.
    pub fn load_or_default() -> Self {
        let path = std::env::var("TEMPBRIDGE_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                info!("Loaded configuration from {path}");
                config
            }
            Err(e) => {
                warn!("Unable to load {path}: {e}, using defaults");
                Self::default()
            }
        }
    }
}
