//! Persisted user settings.
//!
//! Settings live in `settings.json` under the per-user config directory so
//! they survive replacing a packaged executable. A missing or corrupt file is
//! never fatal: defaults are used and the problem is logged.

use crate::passage::{DEFAULT_CITATION_LABEL, PassageOptions, default_layers};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the config directory (tests, portable installs).
pub const ENV_CONFIG_DIR: &str = "GETVERSE_CONFIG_DIR";
pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_LANGUAGE: &str = "tamil";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Verse tree to load when neither `--root` nor `GETVERSE_ROOT` is given.
    pub verses_root: Option<PathBuf>,
    pub default_language: String,
    /// Passage layers in output order (`text` is the verse body).
    pub layers: Vec<String>,
    pub citation_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verses_root: None,
            default_language: DEFAULT_LANGUAGE.to_string(),
            layers: default_layers(),
            citation_label: DEFAULT_CITATION_LABEL.to_string(),
        }
    }
}

impl Settings {
    /// Directory holding `settings.json`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("", "", "getverse")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow!("unable to determine a config directory; set {ENV_CONFIG_DIR}"))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(err) => {
                warn!("{err:#}; using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults when it is absent or corrupt.
    pub fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            debug!(path = %path.display(), "no settings file; using defaults");
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))
            .and_then(|data| {
                serde_json::from_str::<Settings>(&data)
                    .with_context(|| format!("parsing settings {}", path.display()))
            });
        match parsed {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{err:#}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, data + "\n")
            .with_context(|| format!("writing settings {}", path.display()))
    }

    pub fn passage_options(&self) -> PassageOptions {
        PassageOptions {
            layers: self.layers.clone(),
            citation_label: self.citation_label.clone(),
        }
    }
}
