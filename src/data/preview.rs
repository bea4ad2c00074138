use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::pretty::pretty_format_batches;

use super::TableError;
use super::model::{Column, DType, Table, Value};

/// Number of trailing rows shown when nothing else is configured.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Render the last `rows` rows of `table` as a text grid followed by a
/// `[R rows x C columns]` footer describing the full table.
pub fn render_tail(table: &Table, rows: usize) -> Result<String, TableError> {
    let tail = table.tail(rows);
    let mut out = String::new();
    if tail.width() > 0 {
        let batch = to_record_batch(&tail)?;
        let grid = pretty_format_batches(&[batch])?;
        out.push_str(&format!("{grid}\n"));
    }
    out.push_str(&format!("[{} rows x {} columns]\n", table.len(), table.width()));
    Ok(out)
}

/// Convert a table into a single Arrow record batch.
///
/// Each column maps onto the Arrow type of its inferred dtype; `object`,
/// date, and all-missing columns become nullable strings.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch, TableError> {
    let mut fields = Vec::with_capacity(table.width());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.width());
    for column in table.columns() {
        let array = column_to_array(column);
        fields.push(Field::new(&column.name, array.data_type().clone(), true));
        arrays.push(array);
    }
    let schema = Arc::new(Schema::new(fields));
    let options = RecordBatchOptions::new().with_row_count(Some(table.len()));
    Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
}

fn column_to_array(column: &Column) -> ArrayRef {
    let values = &column.values;
    match column.dtype {
        DType::Int => Arc::new(Int64Array::from_iter(values.iter().map(|v| match v {
            Value::Integer(i) => Some(*i),
            _ => None,
        }))),
        DType::Float => Arc::new(Float64Array::from_iter(values.iter().map(Value::as_f64))),
        DType::Bool => Arc::new(BooleanArray::from_iter(values.iter().map(|v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        }))),
        DType::Date | DType::Str | DType::Null => Arc::new(StringArray::from_iter(
            values
                .iter()
                .map(|v| if v.is_null() { None } else { Some(v.to_string()) }),
        )),
    }
}
