use crate::{error::Result, table};
use arrow::{
    array::{Array, ArrayRef, StringArray},
    datatypes::{DataType, Field},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::debug;

/// Lowercase, then strip surrounding whitespace.
pub fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Backfill nulls in each named text column with `""` and mark the column
/// non-nullable. Every name must exist.
pub fn fill_missing_text(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let mut out = batch.clone();
    for name in names {
        let column = table::string_column(&out, name)?;
        debug!(column = name, filled = column.null_count(), "backfilling text");
        let filled = StringArray::from_iter_values(column.iter().map(Option::unwrap_or_default));
        let field = Field::new(*name, DataType::Utf8, false);
        out = table::replace_column(&out, name, field, Arc::new(filled) as ArrayRef)?;
    }
    Ok(out)
}

/// Apply [`normalize_key`] to each named column that exists. Nulls stay null;
/// absent columns are skipped.
pub fn normalize_key_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let mut out = batch.clone();
    for name in names {
        if !table::has_column(&out, name) {
            continue;
        }
        let column = table::string_column(&out, name)?;
        let normalized: StringArray = column.iter().map(|v| v.map(normalize_key)).collect();
        let field = Field::new(*name, DataType::Utf8, true);
        out = table::replace_column(&out, name, field, Arc::new(normalized) as ArrayRef)?;
    }
    Ok(out)
}
