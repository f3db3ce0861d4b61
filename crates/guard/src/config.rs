use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading the client config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client-side settings that affect fault handling.
///
/// Missing fields take their defaults, so an empty object is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Contain single-render faults (log and draw a fallback) instead of
    /// raising a crash report.
    pub catch_render_errors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catch_render_errors: true,
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        serde_json::to_writer_pretty(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}

/// Where the shim reads its configuration from.
///
/// `None` means the config system is not available yet.
pub trait ConfigSource {
    fn client_config(&self) -> Option<ClientConfig>;

    /// Whether single-render faults are contained. False when no config is
    /// available.
    fn catch_render_errors(&self) -> bool {
        self.client_config()
            .map(|c| c.catch_render_errors)
            .unwrap_or(false)
    }
}

impl ConfigSource for ClientConfig {
    fn client_config(&self) -> Option<ClientConfig> {
        Some(*self)
    }
}

impl ConfigSource for Option<ClientConfig> {
    fn client_config(&self) -> Option<ClientConfig> {
        *self
    }
}
