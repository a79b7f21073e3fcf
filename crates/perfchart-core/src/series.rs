// File: crates/perfchart-core/src/series.rs
// Summary: Series specifications (what to plot) and resolved series (what was plotted).
// Notes:
// - A `SeriesSpec` names its inputs; `Series` holds the paired values after
//   resolution against a `Dataset`, so drawing never touches the dataset.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::dataset::Dataset;
use crate::error::{ChartError, Result};
use crate::style::{LineStyle, Marker, SeriesStyle};

/// Where a coordinate sequence comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Column(String),
    Values(Vec<f64>),
}

impl Source {
    pub fn resolve<'a>(&'a self, dataset: &'a Dataset) -> Result<&'a [f64]> {
        match self {
            Source::Column(name) => dataset.column(name),
            Source::Values(v) => Ok(v.as_slice()),
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::Column(name.to_string())
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::Column(name)
    }
}

impl From<Vec<f64>> for Source {
    fn from(values: Vec<f64>) -> Self {
        Source::Values(values)
    }
}

fn default_line_width() -> f32 {
    1.5
}

/// One series to draw: x and y sources, label and look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub x: Source,
    pub y: Source,
    #[serde(default)]
    pub label: String,
    /// Falls back to the theme palette when absent.
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub style: SeriesStyle,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
}

impl SeriesSpec {
    /// A solid line series with the default width.
    pub fn line(x: impl Into<Source>, y: impl Into<Source>, label: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            label: label.into(),
            color: None,
            style: SeriesStyle::line(),
            line_width: default_line_width(),
        }
    }

    pub fn scatter(
        x: impl Into<Source>,
        y: impl Into<Source>,
        label: impl Into<String>,
        marker: Marker,
    ) -> Self {
        Self {
            style: SeriesStyle::scatter(marker),
            ..Self::line(x, y, label)
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.style = SeriesStyle::Line { style };
        self
    }

    /// Pair up x and y values. `fallback_color` applies when `color` is unset.
    pub fn resolve(&self, dataset: &Dataset, fallback_color: Color) -> Result<Series> {
        let xs = self.x.resolve(dataset)?;
        let ys = self.y.resolve(dataset)?;
        if xs.len() != ys.len() {
            return Err(ChartError::ShapeMismatch {
                label: self.label.clone(),
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        Ok(Series {
            label: self.label.clone(),
            color: self.color.unwrap_or(fallback_color),
            style: self.style,
            line_width: self.line_width,
            data_xy: xs.iter().copied().zip(ys.iter().copied()).collect(),
        })
    }
}

/// A resolved series, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Color,
    pub style: SeriesStyle,
    pub line_width: f32,
    pub data_xy: Vec<(f64, f64)>,
}

impl Series {
    /// Points whose coordinates are both finite.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.data_xy
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Runs of consecutive finite points; a NaN or infinity ends a run.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        let mut cur = Vec::new();
        for &(x, y) in &self.data_xy {
            if x.is_finite() && y.is_finite() {
                cur.push((x, y));
            } else if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        }
        if !cur.is_empty() {
            out.push(cur);
        }
        out
    }
}
