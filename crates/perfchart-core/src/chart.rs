// File: crates/perfchart-core/src/chart.rs
// Summary: Chart object plus the render (dataset -> chart) and save (chart -> file) pipeline.

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::axis::Axis;
use crate::backend::{self, Format};
use crate::config::{ChartConfig, OutputTarget, POINTS_PER_INCH};
use crate::dataset::Dataset;
use crate::error::{ChartError, Result};
use crate::scene::{self, Scene};
use crate::series::{Series, SeriesSpec};

/// A fully resolved chart held in memory. Nothing is drawn until it is saved.
#[derive(Clone, Debug)]
pub struct Chart {
    config: ChartConfig,
    series: Vec<Series>,
    x_axis: Axis,
    y_axis: Axis,
}

/// Resolve every spec against `dataset` and fit the axes.
///
/// All specs are resolved before the chart exists, so a missing column or a
/// length mismatch in any spec yields an error and no chart at all.
pub fn render(dataset: &Dataset, specs: &[SeriesSpec], config: &ChartConfig) -> Result<Chart> {
    let palette = &config.theme.palette;
    let series = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| spec.resolve(dataset, palette[i % palette.len()]))
        .collect::<Result<Vec<_>>>()?;

    for s in &series {
        debug!("series '{}': {} points", s.label, s.data_xy.len());
    }

    let x_axis = Axis::autoscale(
        config.x_label.clone(),
        series.iter().flat_map(|s| s.finite_points().map(|(x, _)| x)),
    );
    let y_label = Some(config.y_label.clone()).filter(|l| !l.is_empty());
    let y_axis = Axis::autoscale(
        y_label,
        series.iter().flat_map(|s| s.finite_points().map(|(_, y)| y)),
    );

    info!("rendered chart with {} series", series.len());
    Ok(Chart {
        config: config.clone(),
        series,
        x_axis,
        y_axis,
    })
}

/// Persist `chart` to `target`; see [`Chart::save`].
pub fn save(chart: &Chart, target: &OutputTarget) -> Result<()> {
    chart.save(target)
}

impl Chart {
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Resolved series in draw order; later entries paint over earlier ones.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend entries in draw order. Unlabeled series are left out.
    pub fn legend_labels(&self) -> Vec<&str> {
        if !self.config.legend {
            return Vec::new();
        }
        self.series
            .iter()
            .map(|s| s.label.as_str())
            .filter(|l| !l.is_empty())
            .collect()
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Lay the chart out as a display list.
    pub fn scene(&self, transparent: bool) -> Scene {
        scene::build(self, transparent)
    }

    /// Encode to the format named by the target's extension, entirely in memory.
    pub fn encode(&self, target: &OutputTarget) -> Result<Vec<u8>> {
        let format = Format::from_path(&target.path).ok_or_else(|| {
            ChartError::io_write(
                &target.path,
                "unsupported output format (expected .eps, .ps, .svg, .pdf or .png)",
            )
        })?;
        let scene = self.scene(target.transparent);
        let page = scene.page(target.tight_bbox, target.pad_inches * POINTS_PER_INCH);
        debug!(
            "encoding {:?} page {:.1}x{:.1} pt at {} dpi",
            format,
            page.width(),
            page.height(),
            target.dpi
        );
        backend::encode(&scene, page, format, target.dpi)
            .map_err(|reason| ChartError::io_write(&target.path, reason))
    }

    /// Encode, then replace the destination file in one rename.
    /// A failed save leaves any existing file untouched.
    pub fn save(&self, target: &OutputTarget) -> Result<()> {
        let bytes = self.encode(target)?;
        write_atomic(&target.path, &bytes)?;
        info!("wrote {} ({} bytes)", target.path.display(), bytes.len());
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ChartError::io_write(path, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ChartError::io_write(path, e))?;
    tmp.persist(path)
        .map_err(|e| ChartError::io_write(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_columns(vec![
            ("a".into(), vec![1.0, 2.0, 3.0]),
            ("b".into(), vec![4.0, 5.0, 6.0]),
        ])
        .unwrap()
    }

    #[test]
    fn palette_fills_missing_colors_by_index() {
        let specs = vec![
            SeriesSpec::line("a", "b", "first"),
            SeriesSpec::line("b", "a", "second"),
        ];
        let config = ChartConfig::default();
        let chart = render(&dataset(), &specs, &config).unwrap();
        assert_eq!(chart.series()[0].color, config.theme.palette[0]);
        assert_eq!(chart.series()[1].color, config.theme.palette[1]);
    }

    #[test]
    fn axes_cover_data_with_labels_from_config() {
        let config = ChartConfig::default()
            .with_y_label("Probabilidade (%)")
            .with_x_label("t");
        let chart = render(&dataset(), &[SeriesSpec::line("a", "b", "s")], &config).unwrap();
        assert!(chart.x_axis().min < 1.0 && chart.x_axis().max > 3.0);
        assert!(chart.y_axis().min < 4.0 && chart.y_axis().max > 6.0);
        assert_eq!(chart.y_axis().label.as_deref(), Some("Probabilidade (%)"));
        assert_eq!(chart.x_axis().label.as_deref(), Some("t"));
    }

    #[test]
    fn empty_y_label_means_no_label() {
        let chart = render(&dataset(), &[], &ChartConfig::default()).unwrap();
        assert!(chart.y_axis().label.is_none());
        assert!(chart.series().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected_before_writing() {
        let chart = render(&dataset(), &[SeriesSpec::line("a", "b", "s")], &ChartConfig::default())
            .unwrap();
        let err = chart.encode(&OutputTarget::new("chart.gif")).unwrap_err();
        assert!(matches!(err, ChartError::IoWrite { .. }), "{err}");
        let err = chart.encode(&OutputTarget::new("chart")).unwrap_err();
        assert!(matches!(err, ChartError::IoWrite { .. }), "{err}");
    }
}
