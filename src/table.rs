use crate::error::{DashboardError, Result};
use arrow::{
    array::{ArrayRef, AsArray, Int32Array, StringArray},
    datatypes::{Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Position of `name` in the batch, or a schema error naming the column.
pub fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(name)
        .map_err(|_| DashboardError::Schema(format!("missing required column `{}`", name)))
}

pub fn has_column(batch: &RecordBatch, name: &str) -> bool {
    batch.schema().index_of(name).is_ok()
}

/// Borrow a `Utf8` column by name.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let idx = column_index(batch, name)?;
    batch
        .column(idx)
        .as_string_opt::<i32>()
        .ok_or_else(|| DashboardError::Schema(format!("column `{}` is not text", name)))
}

/// Borrow an `Int32` column by name.
pub fn int32_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int32Array> {
    let idx = column_index(batch, name)?;
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<Int32Array>()
        .ok_or_else(|| DashboardError::Schema(format!("column `{}` is not int32", name)))
}

/// Swap the column called `name` for `array`, typed by `field`.
pub fn replace_column(
    batch: &RecordBatch,
    name: &str,
    field: Field,
    array: ArrayRef,
) -> Result<RecordBatch> {
    let idx = column_index(batch, name)?;
    let mut fields: Vec<FieldRef> = batch.schema().fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();
    fields[idx] = Arc::new(field);
    columns[idx] = array;
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Add a column at the end, or overwrite one that already carries the name.
pub fn append_column(batch: &RecordBatch, field: Field, array: ArrayRef) -> Result<RecordBatch> {
    if has_column(batch, field.name()) {
        let name = field.name().clone();
        return replace_column(batch, &name, field, array);
    }
    let mut fields: Vec<FieldRef> = batch.schema().fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();
    fields.push(Arc::new(field));
    columns.push(array);
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}
