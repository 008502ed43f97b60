//! Engine tuning knobs.
//!
//! # Responsibility
//! - Hold placement margins, grid step, item sizing and debounce settings.
//! - Load overrides from JSON and reject values that break placement.
//!
//! # Invariants
//! - `grid_step` is positive and smaller than both minimum item dimensions.
//! - Minimum item size never exceeds the default item size.

use crate::model::geometry::Size;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Layout and placement configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Inset applied to the left and right of every section.
    pub side_margin: f64,
    /// Inset applied to the top of every section (title strip).
    pub top_margin: f64,
    /// Inset applied to the bottom of every section.
    pub bottom_margin: f64,
    /// Distance between candidate origins in the placement scan.
    pub grid_step: f64,
    pub default_item_width: f64,
    pub default_item_height: f64,
    pub min_item_width: f64,
    pub min_item_height: f64,
    /// Window after an applied AddSection in which further AddSection calls are dropped.
    pub add_section_debounce_ms: u64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_margin: 10.0,
            top_margin: 40.0,
            bottom_margin: 10.0,
            grid_step: 20.0,
            default_item_width: 200.0,
            default_item_height: 150.0,
            min_item_width: 100.0,
            min_item_height: 80.0,
            add_section_debounce_ms: 100,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Parses a JSON object of overrides; missing fields keep defaults.
    ///
    /// # Errors
    /// - Returns `ConfigError::Parse` for malformed JSON or unknown fields.
    /// - Returns `ConfigError::Invalid` when the result fails [`Self::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values keep placement and debounce well-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("side_margin", self.side_margin),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if !self.min_item_size().is_positive() {
            return Err(ConfigError::Invalid {
                field: "min_item_width/min_item_height",
                reason: "must be finite and positive",
            });
        }
        if !self.grid_step.is_finite() || self.grid_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "grid_step",
                reason: "must be finite and positive",
            });
        }
        if self.grid_step >= self.min_item_width.min(self.min_item_height) {
            return Err(ConfigError::Invalid {
                field: "grid_step",
                reason: "must be smaller than the minimum item dimensions",
            });
        }
        if !self.default_item_size().is_positive()
            || self.default_item_width < self.min_item_width
            || self.default_item_height < self.min_item_height
        {
            return Err(ConfigError::Invalid {
                field: "default_item_width/default_item_height",
                reason: "must be finite and at least the minimum item size",
            });
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return Err(ConfigError::Invalid {
                field: "min_zoom/max_zoom",
                reason: "must satisfy 0 < min_zoom <= max_zoom",
            });
        }
        Ok(())
    }

    pub fn default_item_size(&self) -> Size {
        Size::new(self.default_item_width, self.default_item_height)
    }

    pub fn min_item_size(&self) -> Size {
        Size::new(self.min_item_width, self.min_item_height)
    }

    pub fn add_section_debounce(&self) -> Duration {
        Duration::from_millis(self.add_section_debounce_ms)
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into the config shape.
    Parse(serde_json::Error),
    /// A value is outside its allowed range.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid layout config json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid layout config `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
