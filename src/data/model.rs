use std::collections::HashSet;
use std::fmt;

use super::TableError;

// ---------------------------------------------------------------------------
// Value – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date (`YYYY-MM-DD`) kept as text.
    Date(String),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, used when a column is rendered as floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DType – the inferred type of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int,
    Float,
    Bool,
    Date,
    Str,
    /// Every cell is missing.
    Null,
}

impl DType {
    /// Infer the column type from its non-null cells.
    ///
    /// Integers mixed with floats widen to `Float`; any other mix is `Str`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> DType {
        let mut dtype = DType::Null;
        for value in values {
            let cell = match value {
                Value::Null => continue,
                Value::Integer(_) => DType::Int,
                Value::Float(_) => DType::Float,
                Value::Bool(_) => DType::Bool,
                Value::Date(_) => DType::Date,
                Value::String(_) => DType::Str,
            };
            dtype = match (dtype, cell) {
                (DType::Null, c) => c,
                (a, b) if a == b => a,
                (DType::Int, DType::Float) | (DType::Float, DType::Int) => DType::Float,
                _ => return DType::Str,
            };
        }
        dtype
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int => "int64",
            DType::Float => "float64",
            DType::Bool => "bool",
            DType::Date => "date",
            DType::Str => "object",
            DType::Null => "null",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// One named column with its cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<Value>,
}

impl Column {
    /// Build a column and infer its dtype from the values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = DType::infer(&values);
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered set of named columns sharing one row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns. All columns must have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(TableError::Shape {
                column: bad.name.clone(),
                expected: n_rows,
                found: bad.len(),
            });
        }
        Ok(Table { columns, n_rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// The last `n` rows as a new table (all rows if `n >= len`).
    pub fn tail(&self, n: usize) -> Table {
        let start = self.n_rows.saturating_sub(n);
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                dtype: c.dtype,
                values: c.values[start..].to_vec(),
            })
            .collect();
        Table {
            columns,
            n_rows: self.n_rows - start,
        }
    }

    /// Names from `names` that are not columns of this table, in request order.
    pub(crate) fn missing_columns<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.has_column(name) && seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| Value::Integer(*v)).collect()
    }

    #[test]
    fn infer_widens_int_and_float() {
        let values = vec![Value::Integer(1), Value::Null, Value::Float(2.5)];
        assert_eq!(DType::infer(&values), DType::Float);
    }

    #[test]
    fn infer_mixed_text_is_object() {
        let values = vec![Value::Integer(1), Value::String("x".into())];
        assert_eq!(DType::infer(&values), DType::Str);
        assert_eq!(DType::infer(&[Value::Null, Value::Null]), DType::Null);
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", ints(&[1, 2])),
            Column::new("b", ints(&[1])),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::Shape { ref column, .. } if column == "b"));
    }

    #[test]
    fn tail_keeps_last_rows() {
        let table = Table::new(vec![Column::new("a", ints(&[1, 2, 3, 4]))]).unwrap();
        let tail = table.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.column("a").unwrap().values, ints(&[3, 4]));
        assert_eq!(table.tail(10).len(), 4);
    }

    #[test]
    fn missing_columns_reports_each_once() {
        let table = Table::new(vec![Column::new("a", ints(&[1]))]).unwrap();
        assert_eq!(table.missing_columns(&["a", "x", "x", "y"]), vec!["x", "y"]);
    }
}
