//! Editor configuration.

use crate::error::CoreResult;
use serde::{Deserialize, Serialize};

/// Styling of the selection wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementWrapperConfig {
    /// Wrapper and dot colour (CSS syntax).
    pub color: String,
    /// Wrapper line width in screen pixels.
    pub line_width: f64,
    /// Dot radius in screen pixels; also the dot hit radius.
    pub dot_size: f64,
}

impl Default for ElementWrapperConfig {
    fn default() -> Self {
        Self {
            color: "#2ab6f1".to_string(),
            line_width: 1.0,
            dot_size: 6.0,
        }
    }
}

/// Full editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub element_wrapper: ElementWrapperConfig,
}

/// Wrapper styling with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialElementWrapperConfig {
    pub color: Option<String>,
    pub line_width: Option<f64>,
    pub dot_size: Option<f64>,
}

/// User supplied configuration, merged over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfig {
    pub element_wrapper: Option<PartialElementWrapperConfig>,
}

impl PartialConfig {
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Config {
    /// Overlay a partial configuration. Non-positive sizes are ignored.
    pub fn merge(mut self, partial: PartialConfig) -> Self {
        if let Some(wrapper) = partial.element_wrapper {
            if let Some(color) = wrapper.color {
                self.element_wrapper.color = color;
            }
            if let Some(width) = wrapper.line_width {
                if width > 0.0 {
                    self.element_wrapper.line_width = width;
                } else {
                    log::warn!("Ignoring elementWrapper.lineWidth {}", width);
                }
            }
            if let Some(size) = wrapper.dot_size {
                if size > 0.0 {
                    self.element_wrapper.dot_size = size;
                } else {
                    log::warn!("Ignoring elementWrapper.dotSize {}", size);
                }
            }
        }
        self
    }

    /// Parse a partial configuration and merge it over the defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(merge_config(PartialConfig::from_json(json)?))
    }
}

/// Merge a partial configuration over the defaults.
pub fn merge_config(partial: PartialConfig) -> Config {
    Config::default().merge(partial)
}
