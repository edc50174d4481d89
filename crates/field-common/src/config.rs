//! Configuration for field sampling and contour extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::grid::GridSpec;

/// Grid resolution, contour level and color banding bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of grid cells along X.
    pub grid_width: u32,

    /// Number of grid cells along Y.
    pub grid_height: u32,

    /// Field value the isoline is extracted at.
    pub threshold: f32,

    /// Value at which the low band saturates to pure blue.
    pub min_value: f32,

    /// Value at which the high band saturates to pure red.
    pub max_value: f32,

    /// Boundary between the blue and red color bands.
    pub change_value: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 100,
            threshold: 0.0,
            min_value: -2.0,
            max_value: 2.0,
            change_value: 0.0,
        }
    }
}

impl FieldConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay `ISOLINE_*` environment variables. Unparsable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(width) = env_parse("ISOLINE_GRID_WIDTH") {
            self.grid_width = width;
        }

        if let Some(height) = env_parse("ISOLINE_GRID_HEIGHT") {
            self.grid_height = height;
        }

        if let Some(threshold) = env_parse("ISOLINE_THRESHOLD") {
            self.threshold = threshold;
        }

        if let Some(min) = env_parse("ISOLINE_MIN_VALUE") {
            self.min_value = min;
        }

        if let Some(max) = env_parse("ISOLINE_MAX_VALUE") {
            self.max_value = max;
        }

        if let Some(change) = env_parse("ISOLINE_CHANGE_VALUE") {
            self.change_value = change;
        }

        self
    }

    /// Parse configuration from a YAML document. Missing keys take defaults.
    pub fn from_yaml(yaml: &str) -> FieldResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FieldResult<()> {
        if self.grid_width == 0 {
            return Err(FieldError::invalid_config("grid_width", "must be >= 1"));
        }

        if self.grid_height == 0 {
            return Err(FieldError::invalid_config("grid_height", "must be >= 1"));
        }

        if !self.grid().fits_u32_indices() {
            return Err(FieldError::invalid_config(
                "grid_width",
                format!(
                    "{}x{} grid has more vertices than a u32 index buffer can address",
                    self.grid_width, self.grid_height
                ),
            ));
        }

        for (param, value) in [
            ("threshold", self.threshold),
            ("min_value", self.min_value),
            ("max_value", self.max_value),
            ("change_value", self.change_value),
        ] {
            if !value.is_finite() {
                return Err(FieldError::invalid_config(param, "must be finite"));
            }
        }

        if self.min_value >= self.change_value {
            return Err(FieldError::invalid_config(
                "min_value",
                format!(
                    "must be below change_value ({} >= {})",
                    self.min_value, self.change_value
                ),
            ));
        }

        if self.change_value >= self.max_value {
            return Err(FieldError::invalid_config(
                "max_value",
                format!(
                    "must be above change_value ({} <= {})",
                    self.max_value, self.change_value
                ),
            ));
        }

        Ok(())
    }

    /// Grid dimensions described by this configuration.
    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_width, self.grid_height)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.trim().parse().ok())
}
