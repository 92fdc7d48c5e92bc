use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::TabStripConfig;

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "tabstrip.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<TabStripConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: TabStripConfig = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), tabs = config.tabs.len(), "loaded config");
    Ok(config)
}

/// Resolve the config for a run: the explicit path when given, otherwise
/// `tabstrip.toml` in `dir` if present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<TabStripConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        read_config(&candidate)
    } else {
        Ok(TabStripConfig::default())
    }
}
