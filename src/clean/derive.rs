use crate::{
    columns::{ABSTRACT, ABSTRACT_WORD_COUNT, PUBLISH_TIME, PUBLISH_YEAR},
    error::{DashboardError, Result},
    table,
};
use arrow::{
    array::{ArrayRef, AsArray, Int32Builder, Int64Array},
    datatypes::{DataType, Field, TimestampMillisecondType},
    record_batch::RecordBatch,
};
use chrono::{DateTime, Datelike};
use std::sync::Arc;

/// Append `publish_year`, the calendar year of the parsed `publish_time`.
pub fn add_publish_year(batch: &RecordBatch) -> Result<RecordBatch> {
    let idx = table::column_index(batch, PUBLISH_TIME)?;
    let times = batch
        .column(idx)
        .as_primitive_opt::<TimestampMillisecondType>()
        .ok_or_else(|| {
            DashboardError::Schema(format!("column `{}` is not a timestamp", PUBLISH_TIME))
        })?;

    let mut years = Int32Builder::with_capacity(times.len());
    for ts in times.iter() {
        years.append_option(ts.and_then(DateTime::from_timestamp_millis).map(|dt| dt.year()));
    }
    let field = Field::new(PUBLISH_YEAR, DataType::Int32, true);
    table::append_column(batch, field, Arc::new(years.finish()) as ArrayRef)
}

/// Number of whitespace-separated tokens in `text`.
///
/// The count is taken over whatever text is stored. A missing abstract has
/// already been backfilled with `""` and counts 0, but an abstract stored as
/// the literal text `nan` counts as one word.
pub fn word_count(text: &str) -> i64 {
    text.split_whitespace().count() as i64
}

/// Append `abstract_word_count`.
pub fn add_abstract_word_count(batch: &RecordBatch) -> Result<RecordBatch> {
    let abstracts = table::string_column(batch, ABSTRACT)?;
    let counts: Int64Array = abstracts
        .iter()
        .map(|text| word_count(text.unwrap_or_default()))
        .map(Some)
        .collect();
    let field = Field::new(ABSTRACT_WORD_COUNT, DataType::Int64, false);
    table::append_column(batch, field, Arc::new(counts) as ArrayRef)
}
