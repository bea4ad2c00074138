/// Data layer: core types, loading, pruning, and preview.
///
/// Architecture:
/// ```text
///  <base_dir>/<name>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prune    │  drop / keep named columns (all-or-nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ preview   │  last N rows → text grid
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod preview;
pub mod prune;

pub use error::TableError;
pub use loader::{CsvOptions, dataset_path, load_table, read_csv};
pub use model::{Column, DType, Table, Value};
pub use preview::{DEFAULT_PREVIEW_ROWS, render_tail};
