// File: crates/perfchart-core/src/style.rs
// Summary: Line styles and scatter markers, addressable by their matplotlib-style codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    pub fn code(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::Dotted => ":",
            LineStyle::DashDot => "-.",
        }
    }

    /// On/off dash lengths in points for a stroke of `width`, or `None` for solid.
    /// Proportions follow matplotlib's scaled dash patterns.
    pub fn dash_pattern(&self, width: f32) -> Option<Vec<f32>> {
        let w = width.max(0.5);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(vec![3.7 * w, 1.6 * w]),
            LineStyle::Dotted => Some(vec![w, 1.65 * w]),
            LineStyle::DashDot => Some(vec![6.4 * w, 1.6 * w, w, 1.6 * w]),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marker {
    Point,
    #[default]
    Circle,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    Star,
    Plus,
    Cross,
    HLine,
    VLine,
    TriDown,
    TriUp,
    TriLeft,
    TriRight,
}

impl Marker {
    pub fn code(&self) -> &'static str {
        match self {
            Marker::Point => ".",
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::Diamond => "D",
            Marker::TriangleUp => "^",
            Marker::TriangleDown => "v",
            Marker::Star => "*",
            Marker::Plus => "+",
            Marker::Cross => "x",
            Marker::HLine => "_",
            Marker::VLine => "|",
            Marker::TriDown => "1",
            Marker::TriUp => "2",
            Marker::TriLeft => "3",
            Marker::TriRight => "4",
        }
    }

    /// Stroke-only markers: drawn with the series line width and no fill.
    pub fn is_stroked(&self) -> bool {
        matches!(
            self,
            Marker::Plus
                | Marker::Cross
                | Marker::HLine
                | Marker::VLine
                | Marker::TriDown
                | Marker::TriUp
                | Marker::TriLeft
                | Marker::TriRight
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError {
    kind: &'static str,
    code: String,
}

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.code)
    }
}

impl std::error::Error for ParseStyleError {}

impl FromStr for LineStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            other => Err(ParseStyleError { kind: "line style", code: other.to_string() }),
        }
    }
}

impl FromStr for Marker {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let m = match s.trim() {
            "." => Marker::Point,
            "o" => Marker::Circle,
            "s" => Marker::Square,
            "D" => Marker::Diamond,
            "^" => Marker::TriangleUp,
            "v" => Marker::TriangleDown,
            "*" => Marker::Star,
            "+" => Marker::Plus,
            "x" => Marker::Cross,
            "_" => Marker::HLine,
            "|" => Marker::VLine,
            "1" => Marker::TriDown,
            "2" => Marker::TriUp,
            "3" => Marker::TriLeft,
            "4" => Marker::TriRight,
            other => return Err(ParseStyleError { kind: "marker", code: other.to_string() }),
        };
        Ok(m)
    }
}

macro_rules! string_conversions {
    ($ty:ty) => {
        impl TryFrom<String> for $ty {
            type Error = ParseStyleError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.code().to_string()
            }
        }
    };
}

string_conversions!(LineStyle);
string_conversions!(Marker);

/// Default scatter marker size in points (matplotlib's `lines.markersize`).
pub const DEFAULT_MARKER_SIZE: f32 = 6.0;

fn default_marker_size() -> f32 {
    DEFAULT_MARKER_SIZE
}

/// How a series is drawn: a connected line or a set of markers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SeriesStyle {
    Line {
        #[serde(default)]
        style: LineStyle,
    },
    Scatter {
        #[serde(default)]
        marker: Marker,
        #[serde(default = "default_marker_size")]
        size: f32,
    },
}

impl SeriesStyle {
    pub fn line() -> Self {
        SeriesStyle::Line { style: LineStyle::Solid }
    }

    pub fn scatter(marker: Marker) -> Self {
        SeriesStyle::Scatter { marker, size: DEFAULT_MARKER_SIZE }
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, SeriesStyle::Scatter { .. })
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        SeriesStyle::line()
    }
}
