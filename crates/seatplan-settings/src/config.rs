//! Configuration and settings management for Seatplan
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas dimensions and the POS screen bounds
//! - Snapping and guide thresholds
//! - Per-mode view scale
//! - Table type button dimensions and colours
//! - Quick seat placement defaults

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Logical canvas width; entities are clamped into it
    pub width: f64,
    /// Logical canvas height
    pub height: f64,
    /// Width of the register screen drawn as a dashed outline
    pub pos_width: f64,
    /// Height of the register screen
    pub pos_height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            pos_width: 942.0,
            pos_height: 624.0,
        }
    }
}

/// Snapping and alignment guide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Maximum distance at which a dragged edge snaps to a neighbour
    pub snap_threshold: f64,
    /// Maximum distance at which a near-alignment guide is drawn
    pub guide_threshold: f64,
    /// Grid step for quick seats and handy-mode creation points
    pub grid_step: f64,
    /// Step used by the shifted edge-jump keys
    pub decagrid_step: f64,
    /// Nearest-neighbour connectors shorter than this are drawn without a label
    pub label_threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_threshold: 5.0,
            guide_threshold: 10.0,
            grid_step: 5.0,
            decagrid_step: 10.0,
            label_threshold: 10.0,
        }
    }
}

/// Per-mode view scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub register_scale: f64,
    pub handy_scale: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            register_scale: 1.0,
            handy_scale: 0.8,
        }
    }
}

/// Button dimensions and border colour for one table type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDimensions {
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl TableDimensions {
    fn new(width: f64, height: f64, color: &str) -> Self {
        Self {
            width,
            height,
            color: color.to_string(),
        }
    }
}

/// Table type settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTypeSettings {
    pub table: TableDimensions,
    pub counter: TableDimensions,
    pub bar: TableDimensions,
    pub togo: TableDimensions,
}

impl Default for TableTypeSettings {
    fn default() -> Self {
        Self {
            table: TableDimensions::new(100.0, 60.0, "#ffa500"),
            counter: TableDimensions::new(90.0, 50.0, "#ffff00"),
            bar: TableDimensions::new(90.0, 53.0, "#008000"),
            togo: TableDimensions::new(90.0, 50.0, "#F5FAF5"),
        }
    }
}

impl TableTypeSettings {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &TableDimensions)> {
        [
            ("table", &self.table),
            ("counter", &self.counter),
            ("bar", &self.bar),
            ("togo", &self.togo),
        ]
        .into_iter()
    }
}

/// Outline of a handy-mode seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatShape {
    #[default]
    Rectangle,
    Ellipse,
}

impl std::fmt::Display for SeatShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Ellipse => write!(f, "ellipse"),
        }
    }
}

/// Quick seat placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickSeatSettings {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub shape: SeatShape,
}

impl Default for QuickSeatSettings {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            shape: SeatShape::Rectangle,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub snap: SnapSettings,
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub tables: TableTypeSettings,
    #[serde(default)]
    pub quick_seat: QuickSeatSettings,
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file: `<config dir>/seatplan/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("seatplan").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Canvas
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("canvas.pos_width", self.canvas.pos_width)?;
        positive("canvas.pos_height", self.canvas.pos_height)?;

        // Snapping
        positive("snap.snap_threshold", self.snap.snap_threshold)?;
        positive("snap.guide_threshold", self.snap.guide_threshold)?;
        positive("snap.grid_step", self.snap.grid_step)?;
        positive("snap.decagrid_step", self.snap.decagrid_step)?;
        let label = self.snap.label_threshold;
        if !label.is_finite() || label < 0.0 {
            return Err(ConfigError::out_of_range("snap.label_threshold", label).into());
        }

        // View
        positive("view.register_scale", self.view.register_scale)?;
        positive("view.handy_scale", self.view.handy_scale)?;

        // Table types
        for (name, dims) in self.tables.iter() {
            positive(&format!("tables.{}.width", name), dims.width)?;
            positive(&format!("tables.{}.height", name), dims.height)?;
            if dims.color.trim().is_empty() {
                return Err(SettingsError::InvalidSetting {
                    key: format!("tables.{}.color", name),
                    reason: "colour must not be empty".to_string(),
                });
            }
        }

        // Quick seat
        positive("quick_seat.width", self.quick_seat.width)?;
        positive("quick_seat.height", self.quick_seat.height)?;

        Ok(())
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value).into())
    }
}
