use std::path::PathBuf;

use arrow::error::ArrowError;
use thiserror::Error;

/// Failure while loading, pruning, or previewing one dataset.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("Missing column(s): {}", columns.join(", "))]
    MissingColumn { columns: Vec<String> },
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    Shape {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Failed to render preview: {0}")]
    Render(#[from] ArrowError),
}

impl TableError {
    /// Short name of the error kind, used in run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            TableError::FileNotFound { .. } => "FileNotFound",
            TableError::Parse { .. } => "ParseError",
            TableError::MissingColumn { .. } => "MissingColumn",
            TableError::Shape { .. } => "ShapeError",
            TableError::Render(_) => "RenderError",
        }
    }
}
