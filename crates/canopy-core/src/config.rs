use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 65432;

/// Persisted server settings, stored as a small TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when no
    /// configuration has been persisted yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates and persists the settings. Out-of-range values are
    /// rejected before anything is written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        validate_port(i64::from(self.port))?;
        Ok(())
    }

    /// Builds the per-attempt destination address from these settings.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        Endpoint::new(&self.host, self.port)
    }
}

/// Takes a raw integer; anything outside 1..=65535 (including 0 and
/// 65536) is rejected, never truncated.
pub fn validate_port(port: i64) -> Result<u16, ConfigError> {
    if (1..=65535).contains(&port) {
        Ok(port as u16)
    } else {
        Err(ConfigError::PortOutOfRange { port })
    }
}
