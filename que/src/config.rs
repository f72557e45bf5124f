use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::LayoutContext;

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueConfig {
    /// Label of the Next button.
    #[serde(default = "default_next_label")]
    pub next_label: String,

    /// Where the finished flag is stored. Defaults to `preferences.toml` next to the config.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,

    /// Directory answer files are written to. Without it answers go to stdout.
    #[serde(default)]
    pub answers_dir: Option<PathBuf>,

    /// Use colors in terminal prompts.
    #[serde(default = "default_colorful")]
    pub colorful: bool,
}

fn default_next_label() -> String {
    "Next".to_string()
}

fn default_colorful() -> bool {
    true
}

impl Default for QueConfig {
    fn default() -> Self {
        Self {
            next_label: default_next_label(),
            preferences_path: None,
            answers_dir: None,
            colorful: default_colorful(),
        }
    }
}

impl QueConfig {
    /// The per-user configuration directory, e.g. `~/.config/que`.
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("que"))
    }

    /// Path of the default config file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the default config file.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {:?}", path);

        if !path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Config saved to {:?}", path);
        Ok(())
    }

    /// The configured preferences file, or the default one in the config directory.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        match &self.preferences_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("preferences.toml")),
        }
    }

    /// The context handed to layouts.
    pub fn layout_context(&self) -> LayoutContext {
        LayoutContext::new(self.next_label.clone())
    }
}
