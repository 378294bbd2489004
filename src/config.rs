//! Configuration for the street component.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::popup::PopupGeometry;

/// Top-level configuration.
///
/// | Field                         | Purpose |
/// |-------------------------------|---------|
/// | `popup`                       | Fixed popup dimensions |
/// | `resize_debounce_ms`          | Quiet period before a resize redraw |
/// | `hover_suppression_threshold` | Match count that hides the single-place hover |
/// | `show_slider_hint`            | Draw the scale with a slider hint |
/// | `context`                     | Context token sent with thumbnail navigation |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetConfig {
    pub popup: PopupGeometry,
    pub resize_debounce_ms: u64,
    /// From this many matched places on, the component clears the hover
    /// channel and swallows its own clearing emission.
    pub hover_suppression_threshold: usize,
    /// Draw the slider hint even when no slider channel is wired.
    pub show_slider_hint: bool,
    pub context: String,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self {
            popup: PopupGeometry::default(),
            resize_debounce_ms: 150,
            hover_suppression_threshold: 3,
            show_slider_hint: false,
            context: String::new(),
        }
    }
}

impl StreetConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&txt)
        } else {
            Self::from_yaml_str(&txt)
        }
    }

    /// Save as JSON for `.json` paths, YAML otherwise.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let txt = if is_json(path) {
            self.to_json_string()?
        } else {
            self.to_yaml_string()?
        };
        std::fs::write(path, txt)?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
