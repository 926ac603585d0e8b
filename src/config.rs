//! Configuration for the scatter viewer and its sessions.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::color_table::{ColorTable, Rgba};
use crate::data::dataset::{Dataset, InvalidRecordPolicy};
use crate::data::loader::CsvColumns;
use crate::error::ConfigError;
use crate::transform::ZoomBounds;

// ─────────────────────────────────────────────────────────────────────────────
// Point style
// ─────────────────────────────────────────────────────────────────────────────

/// How each point is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyleConfig {
    /// Disc diameter in pixels. Default: `4.0`.
    pub size_px: f64,
    /// Opacity multiplier in `[0, 1]`. Default: `0.8`.
    pub opacity: f64,
}

impl Default for PointStyleConfig {
    fn default() -> Self {
        Self {
            size_px: 4.0,
            opacity: 0.8,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Margins
// ─────────────────────────────────────────────────────────────────────────────

/// Space around the plot area (axes and labels live here), in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 56.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hover
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Maximum pointer distance (px) for a point to count as hovered. Default: `6.0`.
    pub radius_px: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self { radius_px: 6.0 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle overlay elements on or off. All default to `true`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Draw x/y axes with tick labels.
    pub axes: bool,
    /// Show the category legend.
    pub legend: bool,
    /// Show a tooltip for the hovered point.
    pub tooltip: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            axes: true,
            legend: true,
            tooltip: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScatterConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field              | Purpose |
/// |--------------------|---------|
/// | `points`           | Point size and opacity |
/// | `margins`          | Space around the plot area |
/// | `zoom`             | Allowed zoom range |
/// | `hover`            | Hover hit radius |
/// | `features`         | Axes / legend / tooltip toggles |
/// | `color_scheme`     | Visual theme |
/// | `palette`          | Category palette override (empty = scheme default) |
/// | `category_colors`  | Fixed colors for named categories |
/// | `columns`          | CSV column names |
/// | `invalid_records`  | What to do with non-numeric coordinates |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Native window title.
    pub title: String,
    pub points: PointStyleConfig,
    pub margins: Margins,
    pub zoom: ZoomBounds,
    pub hover: HoverConfig,
    pub features: FeatureFlags,
    pub color_scheme: ColorScheme,
    pub palette: Vec<Rgba>,
    pub category_colors: HashMap<String, Rgba>,
    pub columns: CsvColumns,
    pub invalid_records: InvalidRecordPolicy,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            title: "Scatterview".to_string(),
            points: PointStyleConfig::default(),
            margins: Margins::default(),
            zoom: ZoomBounds::default(),
            hover: HoverConfig::default(),
            features: FeatureFlags::default(),
            color_scheme: ColorScheme::default(),
            palette: Vec::new(),
            category_colors: HashMap::new(),
            columns: CsvColumns::default(),
            invalid_records: InvalidRecordPolicy::default(),
        }
    }
}

impl ScatterConfig {
    /// Check values that would otherwise fail later in less obvious places.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.zoom.min, self.zoom.max
            )));
        }
        if !(self.hover.radius_px.is_finite() && self.hover.radius_px >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hover radius must be a non-negative number, got {}",
                self.hover.radius_px
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "margins must be non-negative, got {m:?}"
            )));
        }
        Ok(())
    }

    /// The palette in effect: the explicit one, or the scheme's default.
    pub fn effective_palette(&self) -> Vec<Rgba> {
        if self.palette.is_empty() {
            self.color_scheme.category_palette()
        } else {
            self.palette.clone()
        }
    }

    /// Color table for `dataset` under this configuration.
    pub fn color_table(&self, dataset: &Dataset) -> ColorTable {
        ColorTable::for_dataset(dataset, &self.effective_palette(), &self.category_colors)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let cfg: ScatterConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save this configuration as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
