use nonogram_core::GridConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Terminal padding, in columns
pub const TERMINAL_PADDING: f64 = 1.0;

/// Settings read from `config.json` in the user's config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub padding: f64,
    pub square_surface: bool,
    pub separator_interval: usize,
    pub theme: String,
    /// Puzzle opened when none is given on the command line
    pub puzzle: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            padding: TERMINAL_PADDING,
            square_surface: grid.square_surface,
            separator_interval: grid.separator_interval,
            theme: grid.theme,
            puzzle: None,
        }
    }
}

impl Settings {
    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nonogram")
            .join("config.json")
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`; a missing or unreadable file gives defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring bad config");
                Self::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file");
                Self::default()
            }
        }
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            padding: self.padding,
            square_surface: self.square_surface,
            separator_interval: self.separator_interval,
            theme: self.theme.clone(),
        }
    }
}
