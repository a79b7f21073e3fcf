// File: crates/perfchart-core/tests/snapshot.rs
// Purpose: EPS golden snapshots.
// Behavior:
// - `check_snapshot` compares encoded bytes against tests/__snapshots__/<name>.
// - UPDATE_SNAPSHOTS=1 rewrites the golden file instead of comparing.
// - A missing golden file is a failure; goldens are committed with the tests.

use std::path::PathBuf;

use perfchart_core::backend::eps;
use perfchart_core::geometry::{Point, Rect};
use perfchart_core::scene::{PathShape, Scene, Shape, Stroke, TextShape};
use perfchart_core::text::Align;
use perfchart_core::{render, ChartConfig, Color, Dataset, Marker, OutputTarget, SeriesSpec};

fn blessing() -> bool {
    std::env::var("UPDATE_SNAPSHOTS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn check_snapshot(name: &str, bytes: &[u8]) {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if blessing() {
        std::fs::create_dir_all(path.parent().unwrap()).expect("create snapshots dir");
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    let want = std::fs::read(&path).unwrap_or_else(|e| {
        panic!("missing snapshot {} ({e}); run with UPDATE_SNAPSHOTS=1 to bless", path.display())
    });
    // Compare as text so a mismatch prints a readable diff of PostScript lines.
    assert_eq!(
        String::from_utf8_lossy(bytes),
        String::from_utf8_lossy(&want),
        "EPS output differs from snapshot {}",
        path.display()
    );
}

fn text(s: &str, at: Point, align: Align, vertical: bool) -> Shape {
    Shape::Text(TextShape {
        text: s.into(),
        at,
        size: 10.0,
        color: Color::BLACK,
        align,
        vertical,
    })
}

/// One of every shape kind, with coordinates chosen so every number prints exactly.
fn sample_scene() -> Scene {
    Scene {
        width: 100.0,
        height: 50.0,
        background: None,
        font_family: "Times New Roman".into(),
        shapes: vec![
            Shape::Fill {
                rect: Rect::from_ltrb(10.0, 10.0, 20.0, 20.0),
                color: Color::rgb(0xFF, 0x63, 0x47),
            },
            Shape::Path(PathShape {
                subpaths: vec![vec![Point::new(0.0, 25.0), Point::new(50.0, 0.0), Point::new(100.0, 25.0)]],
                closed: false,
                fill: None,
                stroke: Some(Stroke { color: Color::BLACK, width: 1.5, dash: Some(vec![3.0, 1.5]) }),
            }),
            Shape::Path(PathShape {
                subpaths: vec![vec![Point::new(40.0, 40.0), Point::new(45.0, 45.0), Point::new(35.0, 45.0)]],
                closed: true,
                fill: Some(Color::rgba(0, 0, 255, 128)),
                stroke: None,
            }),
            text("Tempo (s)", Point::new(50.0, 48.0), Align::Center, false),
            text("ótimo", Point::new(5.0, 25.0), Align::Left, true),
        ],
    }
}

#[test]
fn golden_scene_eps() {
    let page = Rect::from_ltwh(0.0, 0.0, 100.0, 50.0);
    let bytes = eps::encode(&sample_scene(), page, 300.0).expect("encode eps");
    check_snapshot("scene_basic.eps", &bytes);
}

#[test]
fn chart_eps_is_stable_across_renders() {
    let ds = Dataset::from_columns(vec![
        ("GRASPT3".into(), vec![0.4, 0.9, 1.3, 2.2, 3.0]),
        ("TST3".into(), vec![0.2, 0.5, 1.1, 1.8, 2.4]),
        ("x".into(), vec![10.0, 30.0, 50.0, 70.0, 90.0]),
    ])
    .unwrap();
    let specs = vec![
        SeriesSpec::scatter("GRASPT3", "x", "GRASP", Marker::HLine).with_line_width(0.7),
        SeriesSpec::line("TST3", "x", "TS").with_line_width(1.0),
    ];
    let config = ChartConfig::default()
        .with_y_label("Probabilidade (%)")
        .with_x_label("Tempo para o sub-ótimo (s)");
    let target = OutputTarget::new("ttt.eps");

    // A fresh render of the same inputs must encode to the same bytes.
    let first = render(&ds, &specs, &config).unwrap().encode(&target).unwrap();
    let second = render(&ds, &specs, &config).unwrap().encode(&target).unwrap();
    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("(Tempo para o sub-\\363timo \\(s\\))"));
}
