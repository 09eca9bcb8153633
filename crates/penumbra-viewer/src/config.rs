//! Viewer configuration loading

use std::path::Path;

use serde::{Deserialize, Serialize};

use penumbra_renderer::RendererConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "penumbra.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    /// Renderer settings.
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// Errors raised while loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid RON.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl ViewerConfig {
    /// Load configuration from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load from [`CONFIG_FILE`] when present; a missing file is the normal
    /// case and a malformed one falls back to defaults with a warning.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("loaded configuration from {CONFIG_FILE}");
                config
            }
            Err(err) => {
                tracing::warn!("ignoring {CONFIG_FILE}: {err}");
                Self::default()
            }
        }
    }
}
