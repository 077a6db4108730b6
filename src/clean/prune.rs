use crate::{error::Result, table::column_index};
use arrow::{
    array::Array,
    compute::{filter_record_batch, is_not_null},
    record_batch::RecordBatch,
};
use tracing::debug;

/// Whether more than `threshold_percent` of the column's slots are null.
/// A column with no rows is never sparse.
pub fn is_sparse(column: &dyn Array, threshold_percent: usize) -> bool {
    // integer comparison keeps 7 of 10 at exactly 70%
    column.null_count() * 100 > column.len() * threshold_percent
}

/// Drop every column whose null percentage exceeds `threshold_percent`.
pub fn drop_sparse_columns(batch: &RecordBatch, threshold_percent: usize) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut keep = Vec::with_capacity(batch.num_columns());
    for (idx, field) in schema.fields().iter().enumerate() {
        let column = batch.column(idx);
        if is_sparse(column.as_ref(), threshold_percent) {
            debug!(
                column = %field.name(),
                nulls = column.null_count(),
                rows = column.len(),
                "dropping sparse column"
            );
            continue;
        }
        keep.push(idx);
    }
    Ok(batch.project(&keep)?)
}

/// Drop every row whose `name` value is null.
pub fn drop_missing(batch: &RecordBatch, name: &str) -> Result<RecordBatch> {
    let idx = column_index(batch, name)?;
    let column = batch.column(idx);
    if column.null_count() == 0 {
        return Ok(batch.clone());
    }
    let mask = is_not_null(column.as_ref())?;
    let kept = filter_record_batch(batch, &mask)?;
    debug!(
        column = name,
        dropped = batch.num_rows() - kept.num_rows(),
        "dropped rows with missing values"
    );
    Ok(kept)
}
