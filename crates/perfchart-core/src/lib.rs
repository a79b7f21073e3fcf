// File: crates/perfchart-core/src/lib.rs
// Summary: Library entry point; loads column datasets, renders comparison charts and saves them.

pub mod axis;
pub mod backend;
pub mod chart;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod series;
pub mod style;
pub mod text;
pub mod theme;

pub use axis::Axis;
pub use backend::Format;
pub use chart::{render, save, Chart};
pub use color::Color;
pub use config::{ChartConfig, FigureSize, LegendLocation, OutputTarget};
pub use dataset::{load_dataset, Dataset};
pub use error::{ChartError, Result};
pub use scene::Scene;
pub use series::{Series, SeriesSpec, Source};
pub use style::{LineStyle, Marker, SeriesStyle};
pub use theme::Theme;
