// File: crates/perfchart-core/src/dataset.rs
// Summary: Numeric column table loaded from a CSV file with a header row.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{ChartError, Result};

/// Ordered named columns of equal length. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Load a comma-separated file whose first row names the columns.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ChartError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ds = Dataset::from_reader(file)?;
    debug!(
        "loaded {}: {} columns x {} rows",
        path.display(),
        ds.n_cols(),
        ds.n_rows()
    );
    Ok(ds)
}

impl Dataset {
    /// Build from in-memory columns. All columns must share one length.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let expected = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        if let Some((name, v)) = columns.iter().find(|(_, v)| v.len() != expected) {
            return Err(ChartError::ShapeMismatch {
                label: name.clone(),
                x_len: expected,
                y_len: v.len(),
            });
        }
        let (names, columns) = columns.into_iter().unzip();
        Ok(Self { names, columns })
    }

    /// Parse CSV text from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = rdr
            .headers()
            .map_err(|e| ChartError::parse(0, None, e.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();
        if names.is_empty() || names.iter().all(String::is_empty) {
            return Err(ChartError::parse(0, None, "missing header row"));
        }

        let mut columns = vec![Vec::new(); names.len()];
        for (i, rec) in rdr.records().enumerate() {
            let row = i + 1;
            let rec = rec.map_err(|e| ChartError::parse(row, None, e.to_string()))?;
            if rec.len() != names.len() {
                return Err(ChartError::parse(
                    row,
                    None,
                    format!("expected {} fields, found {}", names.len(), rec.len()),
                ));
            }
            for ((field, name), col) in rec.iter().zip(&names).zip(columns.iter_mut()) {
                let v = field.parse::<f64>().map_err(|e| {
                    ChartError::parse(row, Some(name), format!("'{field}' is not a number ({e})"))
                })?;
                col.push(v);
            }
        }

        Ok(Self { names, columns })
    }

    /// Write back as CSV (header + rows). Floats use shortest round-trip formatting.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let to_err = |e: &dyn std::fmt::Display| ChartError::IoWrite {
            path: "<csv writer>".into(),
            reason: e.to_string(),
        };
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.names).map_err(|e| to_err(&e))?;
        for row in 0..self.n_rows() {
            wtr.write_record(self.columns.iter().map(|c| c[row].to_string()))
                .map_err(|e| to_err(&e))?;
        }
        wtr.flush().map_err(|e| to_err(&e))?;
        Ok(())
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Values of a column. The first column with a matching name wins.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| ChartError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_values() {
        let csv = "GRASP,TS,Probabilidade\n1.5,2.0,10\n 3 , 4e1 ,20\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.column_names(), &["GRASP", "TS", "Probabilidade"]);
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.column("TS").unwrap(), &[2.0, 40.0]);
        assert_eq!(ds.column("Probabilidade").unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn header_only_gives_empty_columns() {
        let ds = Dataset::from_reader("a,b\n".as_bytes()).unwrap();
        assert_eq!(ds.n_cols(), 2);
        assert_eq!(ds.n_rows(), 0);
    }

    #[test]
    fn empty_input_is_a_header_error() {
        let err = Dataset::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::Parse { row: 0, .. }), "{err}");
    }

    #[test]
    fn non_numeric_field_names_row_and_column() {
        let csv = "a,b\n1,2\n3,oops\n";
        match Dataset::from_reader(csv.as_bytes()).unwrap_err() {
            ChartError::Parse { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column.as_deref(), Some("b"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_field_is_not_a_number() {
        let err = Dataset::from_reader("a,b\n1,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::Parse { row: 1, .. }));
    }

    #[test]
    fn missing_column_is_reported() {
        let ds = Dataset::from_reader("a\n1\n".as_bytes()).unwrap();
        assert!(matches!(
            ds.column("GA"),
            Err(ChartError::ColumnNotFound { column }) if column == "GA"
        ));
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let err = Dataset::from_columns(vec![
            ("x".into(), vec![1.0, 2.0]),
            ("y".into(), vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, ChartError::ShapeMismatch { .. }));
    }
}
