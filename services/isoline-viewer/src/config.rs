//! Viewer settings resolved from a YAML file, the environment and flags.
//!
//! Precedence, lowest first: built-in defaults, the YAML file, `ISOLINE_*`
//! environment variables, command line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use field_common::FieldConfig;
use isoline::FieldKind;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_FRAMES: u64 = 120;
pub const DEFAULT_IMAGE_SIZE: u32 = 600;
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Layout of the optional viewer YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerFile {
    pub field: FieldKind,
    pub frames: Option<u64>,
    pub fixed_dt: Option<f32>,
    pub image_size: Option<u32>,
    pub line_width: Option<f32>,
    pub output_dir: Option<PathBuf>,
    pub parameters: FieldConfig,
}

impl ViewerFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse viewer config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = Self::from_yaml(&content)?;
        info!(path = %path.display(), "Loaded viewer config");
        Ok(file)
    }
}

/// Values given on the command line. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub field: Option<FieldKind>,
    pub frames: Option<u64>,
    pub fixed_dt: Option<f32>,
    pub image_size: Option<u32>,
    pub line_width: Option<f32>,
    pub output_dir: Option<PathBuf>,
    pub grid_width: Option<u32>,
    pub grid_height: Option<u32>,
    pub threshold: Option<f32>,
    pub min_value: Option<f32>,
    pub max_value: Option<f32>,
    pub change_value: Option<f32>,
}

/// Fully resolved viewer settings.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub field: FieldKind,
    pub frames: u64,
    /// Fixed seconds per frame; wall-clock deltas when `None`
    pub fixed_dt: Option<f32>,
    pub image_size: u32,
    pub line_width: f32,
    pub output_dir: Option<PathBuf>,
    pub parameters: FieldConfig,
}

impl ViewerSettings {
    /// Load the optional file, overlay the environment, then apply `cli`.
    pub fn load(path: Option<&Path>, cli: CliOverrides) -> Result<Self> {
        let file = match path {
            Some(path) => ViewerFile::load(path)?,
            None => ViewerFile::default(),
        };
        let settings = Self::resolve(file, cli, true);
        settings.parameters.validate()?;
        Ok(settings)
    }

    /// Merge the layers. Environment variables are read only when `use_env`.
    pub fn resolve(file: ViewerFile, cli: CliOverrides, use_env: bool) -> Self {
        let mut parameters = file.parameters;
        if use_env {
            parameters = parameters.with_env_overrides();
        }

        if let Some(v) = cli.grid_width {
            parameters.grid_width = v;
        }
        if let Some(v) = cli.grid_height {
            parameters.grid_height = v;
        }
        if let Some(v) = cli.threshold {
            parameters.threshold = v;
        }
        if let Some(v) = cli.min_value {
            parameters.min_value = v;
        }
        if let Some(v) = cli.max_value {
            parameters.max_value = v;
        }
        if let Some(v) = cli.change_value {
            parameters.change_value = v;
        }

        let settings = Self {
            field: cli.field.unwrap_or(file.field),
            frames: cli.frames.or(file.frames).unwrap_or(DEFAULT_FRAMES),
            fixed_dt: cli.fixed_dt.or(file.fixed_dt),
            image_size: cli.image_size.or(file.image_size).unwrap_or(DEFAULT_IMAGE_SIZE),
            line_width: cli.line_width.or(file.line_width).unwrap_or(DEFAULT_LINE_WIDTH),
            output_dir: cli.output_dir.or(file.output_dir),
            parameters,
        };

        debug!(?settings, "Resolved viewer settings");
        settings
    }
}
