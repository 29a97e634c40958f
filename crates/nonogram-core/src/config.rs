//! Grid configuration shared by the front ends

use crate::layout::{DEFAULT_PADDING, DEFAULT_SEPARATOR_INTERVAL};
use serde::{Deserialize, Serialize};

/// Layout and presentation settings.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Free space on every side of the surface
    pub padding: f64,
    /// Lay out in a `min(height, width)` square instead of the full box
    pub square_surface: bool,
    /// Heavy separator every n rows/columns, 0 to disable
    pub separator_interval: usize,
    /// Theme name understood by the front end
    pub theme: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            square_surface: false,
            separator_interval: DEFAULT_SEPARATOR_INTERVAL,
            theme: "light".to_string(),
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The box the layout should use for a container of `height` x `width`
    pub fn layout_box(&self, height: f64, width: f64) -> (f64, f64) {
        if self.square_surface {
            let side = height.min(width);
            (side, side)
        } else {
            (height, width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{ "padding": 12.0 }"#).unwrap();
        assert_eq!(config.padding, 12.0);
        assert_eq!(config.separator_interval, DEFAULT_SEPARATOR_INTERVAL);
        assert_eq!(config.theme, "light");
        assert!(!config.square_surface);
    }

    #[test]
    fn test_layout_box() {
        let mut config = GridConfig::default();
        assert_eq!(config.layout_box(300.0, 500.0), (300.0, 500.0));
        config.square_surface = true;
        assert_eq!(config.layout_box(300.0, 500.0), (300.0, 300.0));
    }

    #[test]
    fn test_bad_json() {
        assert!(GridConfig::from_json(r#"{ "padding": "wide" }"#).is_err());
    }
}
