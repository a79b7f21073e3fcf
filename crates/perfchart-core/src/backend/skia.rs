// File: crates/perfchart-core/src/backend/skia.rs
// Summary: Skia painter for scenes, with PNG (CPU raster), SVG and PDF encoders.

use log::debug;
use skia_safe as skia;

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::scene::{PathShape, Scene, Shape, Stroke, TextShape};
use crate::text::Align;

const SERIF_FALLBACKS: [&str; 4] = ["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"];

fn sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn sk_point(p: Point) -> skia::Point {
    skia::Point::new(p.x, p.y)
}

fn sk_rect(r: &Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

/// Requested family first, then common serif faces, then whatever the host provides.
fn resolve_typeface(family: &str) -> Option<skia::Typeface> {
    let mgr = skia::FontMgr::new();
    std::iter::once(family)
        .chain(SERIF_FALLBACKS)
        .find_map(|f| mgr.match_family_style(f, skia::FontStyle::normal()))
        .or_else(|| mgr.legacy_make_typeface(None::<&str>, skia::FontStyle::normal()))
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(color));
    paint
}

fn stroke_paint(s: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(s.width);
    paint.set_stroke_join(skia::paint::Join::Round);
    paint.set_stroke_cap(skia::paint::Cap::Butt);
    paint.set_color(sk_color(s.color));
    if let Some(dash) = &s.dash {
        paint.set_path_effect(skia::PathEffect::dash(dash, 0.0));
    }
    paint
}

fn draw_path(canvas: &skia::Canvas, p: &PathShape) {
    let mut path = skia::Path::new();
    for sp in &p.subpaths {
        let Some((first, rest)) = sp.split_first() else { continue };
        path.move_to(sk_point(*first));
        for pt in rest {
            path.line_to(sk_point(*pt));
        }
        if p.closed {
            path.close();
        }
    }
    if let Some(fill) = p.fill {
        canvas.draw_path(&path, &fill_paint(fill));
    }
    if let Some(stroke) = &p.stroke {
        canvas.draw_path(&path, &stroke_paint(stroke));
    }
}

fn draw_text(canvas: &skia::Canvas, typeface: Option<&skia::Typeface>, t: &TextShape) {
    if t.text.is_empty() {
        return;
    }
    let font = match typeface {
        Some(tf) => skia::Font::from_typeface(tf.clone(), t.size),
        None => {
            let mut font = skia::Font::default();
            font.set_size(t.size);
            font
        }
    };
    let paint = fill_paint(t.color);
    let (width, _) = font.measure_str(&t.text, Some(&paint));
    let dx = match t.align {
        Align::Left => 0.0,
        Align::Center => -width / 2.0,
        Align::Right => -width,
    };
    if t.vertical {
        canvas.save();
        canvas.translate((t.at.x, t.at.y));
        canvas.rotate(-90.0, None);
        canvas.draw_str(&t.text, (dx, 0.0), &font, &paint);
        canvas.restore();
    } else {
        canvas.draw_str(&t.text, (t.at.x + dx, t.at.y), &font, &paint);
    }
}

/// Paint the `page` region of `scene` onto `canvas`, `scale` device units per point.
pub fn paint_scene(canvas: &skia::Canvas, scene: &Scene, page: &Rect, scale: f32) {
    let typeface = resolve_typeface(&scene.font_family);
    if typeface.is_none() {
        debug!("no typeface found for '{}', using skia default", scene.font_family);
    }

    canvas.save();
    canvas.scale((scale, scale));
    canvas.translate((-page.left, -page.top));
    if let Some(bg) = scene.background {
        canvas.draw_rect(sk_rect(page), &fill_paint(bg));
    }
    for shape in &scene.shapes {
        match shape {
            Shape::Fill { rect, color } => {
                canvas.draw_rect(sk_rect(rect), &fill_paint(*color));
            }
            Shape::Path(p) => draw_path(canvas, p),
            Shape::Text(t) => draw_text(canvas, typeface.as_ref(), t),
        }
    }
    canvas.restore();
}

/// Rasterize at `dpi`; transparent areas stay transparent in the PNG.
pub fn encode_png(scene: &Scene, page: Rect, dpi: f32) -> Result<Vec<u8>, String> {
    let scale = dpi / crate::config::POINTS_PER_INCH;
    let w = (page.width() * scale).round().max(1.0) as i32;
    let h = (page.height() * scale).round().max(1.0) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| format!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::TRANSPARENT);
    paint_scene(canvas, scene, &page, scale);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| "encode PNG failed".to_string())?;
    Ok(data.as_bytes().to_vec())
}

pub fn encode_svg(scene: &Scene, page: Rect) -> Result<Vec<u8>, String> {
    let bounds = skia::Rect::from_wh(page.width(), page.height());
    let canvas = skia::svg::Canvas::new(bounds, None);
    paint_scene(&canvas, scene, &page, 1.0);
    let data = canvas.end();
    Ok(data.as_bytes().to_vec())
}

pub fn encode_pdf(scene: &Scene, page: Rect) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    {
        let document = skia::pdf::new_document(&mut out, None);
        let mut on_page = document.begin_page((page.width(), page.height()), None);
        paint_scene(on_page.canvas(), scene, &page, 1.0);
        on_page.end_page().close();
    }
    if out.is_empty() {
        return Err("PDF document is empty".to_string());
    }
    Ok(out)
}
