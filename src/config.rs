use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CATALOG_PATH, DEFAULT_CONFIG_PATH};
use crate::error::{PickerError, Result};
use crate::selector::PolicyKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path or http(s) URL of the catalog document
    pub catalog: String,
    pub policy: PolicyKind,
    pub seed: Option<u64>,
    /// Directory for rolling JSON log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_PATH.to_string(),
            policy: PolicyKind::default(),
            seed: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, `$PICKER_CONFIG`, or
    /// `picker.toml` in the working directory. Only the implicit default file
    /// is allowed to be missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            PickerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
