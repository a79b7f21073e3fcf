// File: crates/perfchart-core/src/backend/mod.rs
// Summary: Output encoders; picks one from the file extension and paints a `Scene` with it.

pub mod eps;
pub mod skia;

use std::path::Path;

use log::warn;

use crate::geometry::Rect;
use crate::scene::Scene;

/// Raster output above this resolution gets a memory warning.
const LARGE_RASTER_DPI: f32 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Eps,
    Svg,
    Pdf,
    Png,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "eps" | "ps" => Some(Format::Eps),
            "svg" => Some(Format::Svg),
            "pdf" => Some(Format::Pdf),
            "png" => Some(Format::Png),
            _ => None,
        }
    }
}

/// Encode the `page` region of `scene`. Errors carry a human-readable reason.
pub fn encode(scene: &Scene, page: Rect, format: Format, dpi: f32) -> Result<Vec<u8>, String> {
    match format {
        Format::Eps => eps::encode(scene, page, dpi).map_err(|e| format!("EPS encoding failed: {e}")),
        Format::Svg => skia::encode_svg(scene, page),
        Format::Pdf => skia::encode_pdf(scene, page),
        Format::Png => {
            if dpi > LARGE_RASTER_DPI {
                warn!(
                    "rasterizing {:.0}x{:.0} pt at {dpi} dpi; this needs a large pixel buffer",
                    page.width(),
                    page.height()
                );
            }
            skia::encode_png(scene, page, dpi)
        }
    }
}
