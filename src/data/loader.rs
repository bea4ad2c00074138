use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use super::TableError;
use super::model::{Column, Table, Value};

/// Cell contents treated as a missing value, matching the usual dataframe readers.
const NA_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#NA", "#N/A N/A",
];

/// Reader settings shared by every dataset of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Path of a logical dataset: `<base_dir>/<name>.csv`.
pub fn dataset_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(format!("{name}.csv"))
}

/// Load the dataset `name` from `base_dir` with default reader settings.
pub fn load_table(base_dir: &Path, name: &str) -> Result<Table, TableError> {
    read_csv(&dataset_path(base_dir, name), &CsvOptions::default())
}

/// Read a delimited file into a [`Table`].
///
/// The first row provides the column names; every following row must have
/// the same number of fields. Cell types are inferred from content.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<Table, TableError> {
    if !path.is_file() {
        return Err(TableError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!("Reading {}", path.display());

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;

    let raw_headers = reader.headers().map_err(|e| parse_error(path, e))?.clone();
    if raw_headers.is_empty() {
        return Err(TableError::Parse {
            path: path.to_path_buf(),
            reason: "no columns to parse from file".to_string(),
        });
    }
    let headers = normalize_headers(&raw_headers);

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(|e| parse_error(path, e))?;
        for (col_idx, value) in record.iter().enumerate() {
            cells[col_idx].push(parse_cell(value));
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    let table = Table::new(columns)?;

    info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        table.len(),
        table.width()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_error(path: &Path, err: csv::Error) -> TableError {
    if err.is_io_error() {
        debug!("Cannot open {}: {err}", path.display());
        TableError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        parse_error(path, err)
    }
}

fn parse_error(path: &Path, err: csv::Error) -> TableError {
    TableError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Give blank headers a positional name and make repeated headers distinct.
///
/// `""` at index 14 becomes `Unnamed: 14`; a second `G` becomes `G.1`.
fn normalize_headers(raw: &StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                header.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while used.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

fn parse_cell(s: &str) -> Value {
    if NA_VALUES.contains(&s) {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    match s {
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    if is_iso_date(s) {
        return Value::Date(s.to_string());
    }
    Value::String(s.to_string())
}

/// `YYYY-MM-DD` naming a real calendar day.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
