// File: crates/perfchart-core/src/config.rs
// Summary: Immutable chart configuration and output target, with serde-backed defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Points per inch; all layout happens in points.
pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f32,
    pub height: f32,
}

impl FigureSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size in points.
    pub fn points(&self) -> (f32, f32) {
        (self.width * POINTS_PER_INCH, self.height * POINTS_PER_INCH)
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(8.0, 5.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendLocation {
    /// Corner of the plot area covering the fewest data points.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// Cosmetic options for one chart. Built once and passed by reference to `render`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub figure_size: FigureSize,
    pub theme: Theme,
    pub font_family: String,
    pub font_size: f32,
    pub title: Option<String>,
    pub y_label: String,
    pub x_label: Option<String>,
    pub legend: bool,
    pub legend_location: LegendLocation,
    /// Hide the top and right spines.
    pub despine: bool,
    /// Also hide the left and bottom spines.
    pub despine_left_bottom: bool,
    pub vertical_grid: bool,
    /// `None` follows the theme's default.
    pub horizontal_grid: Option<bool>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            figure_size: FigureSize::default(),
            theme: Theme::whitegrid(),
            font_family: "Times New Roman".to_string(),
            font_size: 13.0,
            title: None,
            y_label: String::new(),
            x_label: None,
            legend: true,
            legend_location: LegendLocation::Best,
            despine: true,
            despine_left_bottom: true,
            vertical_grid: false,
            horizontal_grid: None,
        }
    }
}

impl ChartConfig {
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn show_horizontal_grid(&self) -> bool {
        self.horizontal_grid.unwrap_or(self.theme.grid_by_default)
    }

    pub fn show_vertical_grid(&self) -> bool {
        self.vertical_grid
    }
}

fn default_dpi() -> f32 {
    1500.0
}

fn default_pad_inches() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}

/// Where and how a chart is persisted. The format follows the path's extension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputTarget {
    pub path: PathBuf,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default = "default_true")]
    pub transparent: bool,
    #[serde(default = "default_true")]
    pub tight_bbox: bool,
    #[serde(default = "default_pad_inches")]
    pub pad_inches: f32,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dpi: default_dpi(),
            transparent: true,
            tight_bbox: true,
            pad_inches: default_pad_inches(),
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_tight_bbox(mut self, tight: bool) -> Self {
        self.tight_bbox = tight;
        self
    }
}
