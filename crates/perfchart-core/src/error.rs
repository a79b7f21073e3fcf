// File: crates/perfchart-core/src/error.rs
// Summary: Error taxonomy for loading, rendering and saving charts.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The input file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or non-numeric data. `row` is the 1-based data row (0 is the header).
    #[error("parse error at row {row}{}: {message}", column_suffix(.column))]
    Parse {
        row: usize,
        column: Option<String>,
        message: String,
    },

    /// A series references a column the dataset does not have.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Paired x/y sequences differ in length.
    #[error("series '{label}': x has {x_len} values but y has {y_len}")]
    ShapeMismatch {
        label: String,
        x_len: usize,
        y_len: usize,
    },

    /// Destination cannot be written or its extension names no supported format.
    #[error("cannot write {}: {reason}", .path.display())]
    IoWrite { path: PathBuf, reason: String },
}

impl ChartError {
    pub(crate) fn parse(row: usize, column: Option<&str>, message: impl Into<String>) -> Self {
        ChartError::Parse {
            row,
            column: column.map(str::to_owned),
            message: message.into(),
        }
    }

    pub(crate) fn io_write(path: &Path, reason: impl ToString) -> Self {
        ChartError::IoWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

fn column_suffix(column: &Option<String>) -> String {
    match column {
        Some(name) => format!(", column '{name}'"),
        None => String::new(),
    }
}
