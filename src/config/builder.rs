use crate::config::viewport::ViewportConfig;
use crate::domain::reorder::RetagPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Viewport band leaves only {remaining:.2} of the {axis} axis")]
    InvalidBand { axis: &'static str, remaining: f64 },
}

/// Drag behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragConfig {
    pub retag_policy: RetagPolicy,
}

/// Top-level configuration for a course builder session
///
/// ```toml
/// [viewport]
/// bottom_inset = 0.5
///
/// [drag]
/// retag_policy = "append-to-module"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub viewport: ViewportConfig,
    pub drag: DragConfig,
}

impl BuilderConfig {
    /// Parses and sanitizes a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut config: BuilderConfig = toml::from_str(source)?;
        config.viewport = config.viewport.sanitized()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
