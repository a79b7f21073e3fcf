// File: crates/perfchart-core/src/scene.rs
// Summary: Backend-independent display list laid out from a `Chart`, in points.
// Notes:
// - Shapes are stored in paint order: grid, series (input order), spines,
//   ticks and labels, legend.
// - Every backend paints the same `Scene`, so EPS, SVG, PDF and PNG agree on layout.

use crate::axis::{linspace, Axis};
use crate::chart::Chart;
use crate::color::Color;
use crate::config::{ChartConfig, LegendLocation};
use crate::geometry::{Point, Rect};
use crate::series::Series;
use crate::style::{Marker, SeriesStyle};
use crate::text::{self, Align, ASCENT, DESCENT};
use crate::theme::Theme;

/// Subplot placement as fractions of the figure (left, top, right, bottom).
const PLOT_BOX: (f32, f32, f32, f32) = (0.125, 0.12, 0.9, 0.89);
/// Gap between tick (or axis line) and tick label, in points.
const TICK_PAD: f32 = 3.5;
/// Gap between tick labels and axis label, in points.
const LABEL_PAD: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// On/off lengths in points; `None` is solid.
    pub dash: Option<Vec<f32>>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathShape {
    pub subpaths: Vec<Vec<Point>>,
    pub closed: bool,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A single run of text anchored on its baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub at: Point,
    pub size: f32,
    pub color: Color,
    pub align: Align,
    /// Rotated 90 degrees counter-clockwise (reads bottom to top).
    pub vertical: bool,
}

impl TextShape {
    pub fn bounds(&self) -> Rect {
        let w = text::text_width(&self.text, self.size);
        let o = self.align.start_offset(w);
        let (asc, desc) = (ASCENT * self.size, DESCENT * self.size);
        if self.vertical {
            Rect::from_ltrb(self.at.x - asc, self.at.y - o - w, self.at.x + desc, self.at.y - o)
        } else {
            Rect::from_ltrb(self.at.x + o, self.at.y - asc, self.at.x + o + w, self.at.y + desc)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Fill { rect: Rect, color: Color },
    Path(PathShape),
    Text(TextShape),
}

impl Shape {
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::Fill { rect, .. } => Some(*rect),
            Shape::Path(p) => {
                let half = p.stroke.as_ref().map_or(0.0, |s| s.width / 2.0);
                Rect::bounding(p.subpaths.iter().flatten().copied()).map(|r| r.outset(half))
            }
            Shape::Text(t) if t.text.is_empty() => None,
            Shape::Text(t) => Some(t.bounds()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Figure background; `None` when transparent.
    pub background: Option<Color>,
    pub font_family: String,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Union of all painted shapes, excluding the figure background.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .filter_map(Shape::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// The region that becomes the output page.
    pub fn page(&self, tight: bool, pad: f32) -> Rect {
        let full = Rect::from_ltwh(0.0, 0.0, self.width, self.height);
        if !tight {
            return full;
        }
        self.bounds().map_or(full, |b| b.outset(pad))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }
}

/// Maps data coordinates into the plot rectangle.
struct Frame<'a> {
    plot: Rect,
    x: &'a Axis,
    y: &'a Axis,
}

impl Frame<'_> {
    fn to_screen(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.plot.left + self.x.fraction(x) as f32 * self.plot.width(),
            self.plot.bottom - self.y.fraction(y) as f32 * self.plot.height(),
        )
    }
}

pub fn build(chart: &Chart, transparent: bool) -> Scene {
    let config = chart.config();
    let theme = &config.theme;
    let (w, h) = config.figure_size.points();
    let (l, t, r, b) = PLOT_BOX;
    let frame = Frame {
        plot: Rect::from_ltrb(l * w, t * h, r * w, b * h),
        x: chart.x_axis(),
        y: chart.y_axis(),
    };
    let mut shapes = Vec::new();

    if !transparent {
        shapes.push(Shape::Fill { rect: frame.plot, color: theme.axes_background });
    }
    push_grid(&mut shapes, &frame, config);

    for s in chart.series() {
        shapes.push(series_shape(s, &frame));
    }

    push_spines(&mut shapes, &frame, config);
    push_ticks_and_labels(&mut shapes, &frame, config);

    if config.legend {
        push_legend(&mut shapes, &frame, chart.series(), config);
    }

    Scene {
        width: w,
        height: h,
        background: (!transparent).then_some(theme.figure_background),
        font_family: config.font_family.clone(),
        shapes,
    }
}

fn line(a: Point, b: Point, stroke: Stroke) -> Shape {
    Shape::Path(PathShape {
        subpaths: vec![vec![a, b]],
        closed: false,
        fill: None,
        stroke: Some(stroke),
    })
}

fn push_grid(shapes: &mut Vec<Shape>, f: &Frame, config: &ChartConfig) {
    let theme = &config.theme;
    let stroke = Stroke::solid(theme.grid, theme.grid_width);
    if config.show_horizontal_grid() {
        for v in f.y.ticks() {
            let p = f.to_screen(f.x.min, v);
            shapes.push(line(
                Point::new(f.plot.left, p.y),
                Point::new(f.plot.right, p.y),
                stroke.clone(),
            ));
        }
    }
    if config.show_vertical_grid() {
        for v in f.x.ticks() {
            let p = f.to_screen(v, f.y.min);
            shapes.push(line(
                Point::new(p.x, f.plot.top),
                Point::new(p.x, f.plot.bottom),
                stroke.clone(),
            ));
        }
    }
}

fn series_shape(s: &Series, f: &Frame) -> Shape {
    match s.style {
        SeriesStyle::Line { style } => Shape::Path(PathShape {
            subpaths: s
                .segments()
                .into_iter()
                .map(|seg| seg.into_iter().map(|(x, y)| f.to_screen(x, y)).collect())
                .collect(),
            closed: false,
            fill: None,
            stroke: Some(Stroke {
                color: s.color,
                width: s.line_width,
                dash: style.dash_pattern(s.line_width),
            }),
        }),
        SeriesStyle::Scatter { marker, size } => {
            let centers: Vec<Point> = s.finite_points().map(|(x, y)| f.to_screen(x, y)).collect();
            marker_shape(marker, size, &centers, s.color, s.line_width)
        }
    }
}

/// All markers of one series as a single path.
pub fn marker_shape(marker: Marker, size: f32, centers: &[Point], color: Color, width: f32) -> Shape {
    let subpaths = centers
        .iter()
        .flat_map(|&c| marker_outline(marker, c, size / 2.0))
        .collect();
    if marker.is_stroked() {
        Shape::Path(PathShape {
            subpaths,
            closed: false,
            fill: None,
            stroke: Some(Stroke::solid(color, width)),
        })
    } else {
        Shape::Path(PathShape { subpaths, closed: true, fill: Some(color), stroke: None })
    }
}

fn polygon(c: Point, radii: &[f32], start_deg: f32) -> Vec<Point> {
    let n = radii.len();
    linspace(0.0, 360.0, n + 1)
        .into_iter()
        .take(n)
        .zip(radii)
        .map(|(deg, &r)| {
            let a = (start_deg + deg as f32).to_radians();
            Point::new(c.x + r * a.cos(), c.y - r * a.sin())
        })
        .collect()
}

fn spokes(c: Point, r: f32, degrees: &[f32]) -> Vec<Vec<Point>> {
    degrees
        .iter()
        .map(|d| {
            let a = d.to_radians();
            vec![c, Point::new(c.x + r * a.cos(), c.y - r * a.sin())]
        })
        .collect()
}

/// Outline of one marker centered at `c` with radius `r`, as subpaths.
fn marker_outline(marker: Marker, c: Point, r: f32) -> Vec<Vec<Point>> {
    match marker {
        Marker::Point => vec![polygon(c, &[r * 0.5; 12], 0.0)],
        Marker::Circle => vec![polygon(c, &[r; 24], 0.0)],
        Marker::Square => vec![polygon(c, &[r * 1.1; 4], 45.0)],
        Marker::Diamond => vec![polygon(c, &[r * 0.75, r, r * 0.75, r], 0.0)],
        Marker::TriangleUp => vec![polygon(c, &[r; 3], 90.0)],
        Marker::TriangleDown => vec![polygon(c, &[r; 3], 270.0)],
        Marker::Star => {
            let radii: Vec<f32> = (0..10).map(|i| if i % 2 == 0 { r } else { r * 0.4 }).collect();
            vec![polygon(c, &radii, 90.0)]
        }
        Marker::Plus => spokes(c, r, &[0.0, 90.0, 180.0, 270.0]),
        Marker::Cross => spokes(c, r, &[45.0, 135.0, 225.0, 315.0]),
        Marker::HLine => spokes(c, r, &[0.0, 180.0]),
        Marker::VLine => spokes(c, r, &[90.0, 270.0]),
        Marker::TriDown => spokes(c, r, &[270.0, 30.0, 150.0]),
        Marker::TriUp => spokes(c, r, &[90.0, 210.0, 330.0]),
        Marker::TriLeft => spokes(c, r, &[180.0, 300.0, 60.0]),
        Marker::TriRight => spokes(c, r, &[0.0, 120.0, 240.0]),
    }
}

fn push_spines(shapes: &mut Vec<Shape>, f: &Frame, config: &ChartConfig) {
    let theme = &config.theme;
    let stroke = Stroke::solid(theme.spine, theme.spine_width);
    let p = f.plot;
    let (tl, tr) = (Point::new(p.left, p.top), Point::new(p.right, p.top));
    let (bl, br) = (Point::new(p.left, p.bottom), Point::new(p.right, p.bottom));
    if !config.despine_left_bottom {
        shapes.push(line(tl, bl, stroke.clone()));
        shapes.push(line(bl, br, stroke.clone()));
    }
    if !config.despine {
        shapes.push(line(tl, tr, stroke.clone()));
        shapes.push(line(tr, br, stroke));
    }
}

fn push_ticks_and_labels(shapes: &mut Vec<Shape>, f: &Frame, config: &ChartConfig) {
    let theme = &config.theme;
    let fs = config.font_size;
    let tick = theme.tick_length;
    let pad = tick + TICK_PAD;
    let label_shape = |s: String, at: Point, size: f32, align: Align, vertical: bool| {
        Shape::Text(TextShape { text: s, at, size, color: theme.text, align, vertical })
    };

    let mut widest_y = 0.0f32;
    for (v, label) in f.y.tick_labels() {
        let y = f.to_screen(f.x.min, v).y;
        if tick > 0.0 {
            shapes.push(line(
                Point::new(f.plot.left - tick, y),
                Point::new(f.plot.left, y),
                Stroke::solid(theme.spine, theme.spine_width),
            ));
        }
        widest_y = widest_y.max(text::text_width(&label, fs));
        let at = Point::new(f.plot.left - pad, y + ASCENT * fs / 2.0);
        shapes.push(label_shape(label, at, fs, Align::Right, false));
    }

    for (v, label) in f.x.tick_labels() {
        let x = f.to_screen(v, f.y.min).x;
        if tick > 0.0 {
            shapes.push(line(
                Point::new(x, f.plot.bottom),
                Point::new(x, f.plot.bottom + tick),
                Stroke::solid(theme.spine, theme.spine_width),
            ));
        }
        let at = Point::new(x, f.plot.bottom + pad + ASCENT * fs);
        shapes.push(label_shape(label, at, fs, Align::Center, false));
    }

    let mid = Point::new(
        (f.plot.left + f.plot.right) / 2.0,
        (f.plot.top + f.plot.bottom) / 2.0,
    );
    if let Some(label) = f.y.label.as_ref().filter(|s| !s.is_empty()) {
        let x = f.plot.left - pad - widest_y - LABEL_PAD - DESCENT * fs;
        shapes.push(label_shape(label.clone(), Point::new(x, mid.y), fs, Align::Center, true));
    }
    if let Some(label) = f.x.label.as_ref().filter(|s| !s.is_empty()) {
        let y = f.plot.bottom + pad + (ASCENT + DESCENT) * fs + LABEL_PAD + ASCENT * fs;
        shapes.push(label_shape(label.clone(), Point::new(mid.x, y), fs, Align::Center, false));
    }
    if let Some(title) = config.title.as_ref().filter(|s| !s.is_empty()) {
        let at = Point::new(mid.x, f.plot.top - 6.0 - DESCENT * fs * 1.2);
        shapes.push(label_shape(title.clone(), at, fs * 1.2, Align::Center, false));
    }
}

/// Legend box size for the given labels, in points.
fn legend_size(labels: &[&str], fs: f32) -> (f32, f32) {
    let n = labels.len() as f32;
    let widest = labels
        .iter()
        .map(|l| text::text_width(l, fs))
        .fold(0.0f32, f32::max);
    let row = (ASCENT + DESCENT) * fs;
    let width = 2.0 * 0.4 * fs + 2.0 * fs + 0.8 * fs + widest;
    let height = 2.0 * 0.4 * fs + n * row + (n - 1.0).max(0.0) * 0.5 * fs;
    (width, height)
}

fn legend_rect(loc: LegendLocation, plot: Rect, size: (f32, f32), inset: f32) -> Rect {
    let (w, h) = size;
    let left = plot.left + inset;
    let right = plot.right - inset - w;
    let top = plot.top + inset;
    let bottom = plot.bottom - inset - h;
    match loc {
        LegendLocation::UpperRight | LegendLocation::Best => Rect::from_ltwh(right, top, w, h),
        LegendLocation::UpperLeft => Rect::from_ltwh(left, top, w, h),
        LegendLocation::LowerLeft => Rect::from_ltwh(left, bottom, w, h),
        LegendLocation::LowerRight => Rect::from_ltwh(right, bottom, w, h),
    }
}

/// Corner whose legend box covers the fewest data points; earlier candidates win ties.
pub fn best_location(points: &[Point], plot: Rect, size: (f32, f32), inset: f32) -> LegendLocation {
    const CANDIDATES: [LegendLocation; 4] = [
        LegendLocation::UpperRight,
        LegendLocation::UpperLeft,
        LegendLocation::LowerLeft,
        LegendLocation::LowerRight,
    ];
    let mut best = (usize::MAX, LegendLocation::UpperRight);
    for loc in CANDIDATES {
        let rect = legend_rect(loc, plot, size, inset);
        let covered = points.iter().filter(|p| rect.contains(**p)).count();
        if covered < best.0 {
            best = (covered, loc);
        }
    }
    best.1
}

fn push_legend(shapes: &mut Vec<Shape>, f: &Frame, series: &[Series], config: &ChartConfig) {
    let entries: Vec<&Series> = series.iter().filter(|s| !s.label.is_empty()).collect();
    if entries.is_empty() {
        return;
    }
    let theme: &Theme = &config.theme;
    let fs = config.font_size;
    let labels: Vec<&str> = entries.iter().map(|s| s.label.as_str()).collect();
    let size = legend_size(&labels, fs);
    let inset = 0.5 * fs;

    let loc = match config.legend_location {
        LegendLocation::Best => {
            let points: Vec<Point> = series
                .iter()
                .flat_map(|s| s.finite_points())
                .map(|(x, y)| f.to_screen(x, y))
                .collect();
            best_location(&points, f.plot, size, inset)
        }
        other => other,
    };
    let frame = legend_rect(loc, f.plot, size, inset);

    let corners = vec![
        Point::new(frame.left, frame.top),
        Point::new(frame.right, frame.top),
        Point::new(frame.right, frame.bottom),
        Point::new(frame.left, frame.bottom),
    ];
    shapes.push(Shape::Path(PathShape {
        subpaths: vec![corners],
        closed: true,
        fill: Some(theme.legend_background),
        stroke: Some(Stroke::solid(theme.legend_edge, 0.8)),
    }));

    let row = (ASCENT + DESCENT) * fs;
    let handle_left = frame.left + 0.4 * fs;
    let handle_right = handle_left + 2.0 * fs;
    for (i, s) in entries.iter().enumerate() {
        let row_top = frame.top + 0.4 * fs + i as f32 * (row + 0.5 * fs);
        let mid_y = row_top + row / 2.0;
        match s.style {
            SeriesStyle::Line { style } => shapes.push(line(
                Point::new(handle_left, mid_y),
                Point::new(handle_right, mid_y),
                Stroke { color: s.color, width: s.line_width, dash: style.dash_pattern(s.line_width) },
            )),
            SeriesStyle::Scatter { marker, size } => {
                let center = Point::new((handle_left + handle_right) / 2.0, mid_y);
                shapes.push(marker_shape(marker, size, &[center], s.color, s.line_width));
            }
        }
        shapes.push(Shape::Text(TextShape {
            text: s.label.clone(),
            at: Point::new(handle_right + 0.8 * fs, row_top + ASCENT * fs),
            size: fs,
            color: theme.text,
            align: Align::Left,
            vertical: false,
        }));
    }
}
