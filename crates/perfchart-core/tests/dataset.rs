// File: crates/perfchart-core/tests/dataset.rs
// Purpose: load_dataset contract: shape matches the file, CSV round trip, row-indexed parse errors.

use std::io::Write;

use perfchart_core::{load_dataset, ChartError, Dataset};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).expect("create input");
    f.write_all(contents.as_bytes()).expect("write input");
    path
}

#[test]
fn shape_matches_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "pp.csv",
        "GRASP,TS,GA,Probabilidade\n1.5,2.0,3.25,10\n2.5,3.0,4.0,20\n3.5,4.5,5.0,30\n",
    );
    let ds = load_dataset(&path).expect("load");
    assert_eq!(ds.n_cols(), 4);
    assert_eq!(ds.n_rows(), 3);
    assert_eq!(ds.column_names(), ["GRASP", "TS", "GA", "Probabilidade"]);
    assert_eq!(ds.column("GA").unwrap(), &[3.25, 4.0, 5.0]);
}

#[test]
fn write_then_reload_keeps_values() {
    let original = Dataset::from_columns(vec![
        ("x".into(), vec![0.1, 1e-9, 123456.789, -4.0]),
        ("GRASPT3".into(), vec![1.0 / 3.0, 2.0, 0.0, f64::MAX]),
    ])
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.csv");
    let file = std::fs::File::create(&path).unwrap();
    original.write_csv(file).expect("write csv");

    let reloaded = load_dataset(&path).expect("reload");
    assert_eq!(reloaded, original);
}

#[test]
fn wrong_field_count_names_the_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "a,b\n1,2\n3,4\n5\n7,8\n");
    match load_dataset(&path) {
        Err(ChartError::Parse { row, column, .. }) => {
            assert_eq!(row, 3);
            assert!(column.is_none());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn non_numeric_value_names_row_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "a,b\n1,2\n3,oops\n");
    let err = load_dataset(&path).unwrap_err();
    match &err {
        ChartError::Parse { row, column, .. } => {
            assert_eq!(*row, 2);
            assert_eq!(column.as_deref(), Some("b"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("row 2"), "{err}");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ChartError::Read { .. }), "{err}");
}
