// src/clean/mod.rs
pub mod date_parser;
pub mod derive;
pub mod prune;
pub mod trimming;

use crate::{
    columns::{self, ABSTRACT, PUBLISH_TIME, TITLE},
    config::NULL_PERCENT_THRESHOLD,
    error::{DashboardError, Result},
    table,
};
use arrow::{
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::info;

/// Schema of a cleaned table built from a file with no columns at all.
pub fn empty_cleaned_schema() -> Schema {
    Schema::new(vec![
        Field::new(TITLE, DataType::Utf8, false),
        Field::new(ABSTRACT, DataType::Utf8, false),
        Field::new(
            PUBLISH_TIME,
            DataType::Timestamp(TimeUnit::Millisecond, None),
            true,
        ),
        Field::new(columns::PUBLISH_YEAR, DataType::Int32, true),
        Field::new(columns::ABSTRACT_WORD_COUNT, DataType::Int64, false),
    ])
}

/// Turn the raw table into the cleaned table:
///
/// 1. drop columns that are more than 70% null
/// 2. backfill missing `title`/`abstract` with `""`
/// 3. drop rows with no `publish_time`
/// 4. parse `publish_time`, dropping rows that fail to parse
/// 5. derive `publish_year`
/// 6. derive `abstract_word_count`
/// 7. lowercase and trim `journal` and the source column
///
/// A raw table that has columns but lacks `title`, `abstract` or
/// `publish_time` after step 1 is a schema error.
#[tracing::instrument(
    level = "info",
    skip(raw),
    fields(rows = raw.num_rows(), columns = raw.num_columns())
)]
pub fn clean(raw: &RecordBatch) -> Result<RecordBatch> {
    if raw.num_columns() == 0 {
        info!("raw table has no columns; nothing to clean");
        return Ok(RecordBatch::new_empty(Arc::new(empty_cleaned_schema())));
    }

    let batch = prune::drop_sparse_columns(raw, NULL_PERCENT_THRESHOLD)?;
    require_columns(&batch)?;
    let batch = trimming::fill_missing_text(&batch, &[TITLE, ABSTRACT])?;
    let batch = prune::drop_missing(&batch, PUBLISH_TIME)?;
    let batch = date_parser::convert_publish_time(&batch)?;
    let batch = prune::drop_missing(&batch, PUBLISH_TIME)?;
    let batch = derive::add_publish_year(&batch)?;
    let batch = derive::add_abstract_word_count(&batch)?;
    let batch = trimming::normalize_key_columns(&batch, &columns::NORMALIZED)?;

    info!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        dropped_rows = raw.num_rows() - batch.num_rows(),
        "cleaned table"
    );
    Ok(batch)
}

fn require_columns(batch: &RecordBatch) -> Result<()> {
    for name in columns::REQUIRED {
        if !table::has_column(batch, name) {
            return Err(DashboardError::Schema(format!(
                "required column `{}` is missing or more than {}% empty",
                name, NULL_PERCENT_THRESHOLD
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ABSTRACT_WORD_COUNT, JOURNAL, PUBLISH_YEAR, SOURCE, SOURCE_X};
    use crate::load::load_raw_table;
    use crate::test_support::{csv_fixture, init_test_logging, raw_batch, two_paper_batch, SAMPLE_CSV};
    use anyhow::Result;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::{Int64Type, TimestampMillisecondType};
    use chrono::{DateTime, Datelike};

    #[test]
    fn two_paper_scenario() -> Result<()> {
        init_test_logging();
        let cleaned = clean(&two_paper_batch())?;

        assert_eq!(cleaned.num_rows(), 1);
        assert_eq!(table::int32_column(&cleaned, PUBLISH_YEAR)?.value(0), 2020);
        assert_eq!(table::string_column(&cleaned, JOURNAL)?.value(0), "nature");
        assert_eq!(table::string_column(&cleaned, SOURCE)?.value(0), "pmc");
        assert_eq!(table::string_column(&cleaned, TITLE)?.value(0), "A Study of X");
        Ok(())
    }

    #[test]
    fn empty_raw_table_cleans_to_empty() -> Result<()> {
        let header_only = raw_batch(&[
            (TITLE, vec![]),
            (ABSTRACT, vec![]),
            (PUBLISH_TIME, vec![]),
            (JOURNAL, vec![]),
            (SOURCE, vec![]),
        ]);
        let cleaned = clean(&header_only)?;
        assert_eq!(cleaned.num_rows(), 0);
        assert!(table::has_column(&cleaned, PUBLISH_YEAR));

        let no_columns = RecordBatch::new_empty(Arc::new(Schema::empty()));
        let cleaned = clean(&no_columns)?;
        assert_eq!(cleaned.num_rows(), 0);
        assert_eq!(cleaned.schema().as_ref(), &empty_cleaned_schema());
        Ok(())
    }

    #[test]
    fn missing_publish_time_column_is_fatal() {
        let batch = raw_batch(&[(TITLE, vec![Some("a")]), (ABSTRACT, vec![Some("b")])]);
        let err = clean(&batch).unwrap_err();
        assert!(matches!(err, DashboardError::Schema(msg) if msg.contains(PUBLISH_TIME)));
    }

    #[test]
    fn pruned_required_column_is_fatal() {
        let batch = raw_batch(&[
            (TITLE, vec![None, None, None, None]),
            (ABSTRACT, vec![Some("a"), Some("b"), Some("c"), Some("d")]),
            (PUBLISH_TIME, vec![Some("2020"), Some("2020"), Some("2021"), Some("2021")]),
        ]);
        assert!(matches!(clean(&batch), Err(DashboardError::Schema(_))));
    }

    #[test]
    fn cleaned_invariants_hold_on_sample_file() -> Result<()> {
        let tmp = csv_fixture(SAMPLE_CSV);
        let raw = load_raw_table(tmp.path())?;
        let cleaned = clean(&raw)?;

        // a6 has an unparseable date, a7 none at all
        assert_eq!(cleaned.num_rows(), 5);
        // mag_id is entirely empty
        assert!(!table::has_column(&cleaned, "mag_id"));
        assert!(table::has_column(&cleaned, "cord_uid"));

        let titles = table::string_column(&cleaned, TITLE)?;
        let abstracts = table::string_column(&cleaned, ABSTRACT)?;
        assert_eq!(titles.null_count(), 0);
        assert_eq!(abstracts.null_count(), 0);

        let idx = table::column_index(&cleaned, PUBLISH_TIME)?;
        let times = cleaned.column(idx).as_primitive::<TimestampMillisecondType>();
        let years = table::int32_column(&cleaned, PUBLISH_YEAR)?;
        assert_eq!(times.null_count(), 0);
        for row in 0..cleaned.num_rows() {
            let dt = DateTime::from_timestamp_millis(times.value(row)).unwrap();
            assert_eq!(dt.year(), years.value(row));
        }

        let idx = table::column_index(&cleaned, ABSTRACT_WORD_COUNT)?;
        let counts = cleaned.column(idx).as_primitive::<Int64Type>();
        // a2's abstract was empty in the file
        assert_eq!(counts.value(1), 0);
        assert_eq!(counts.value(2), 5);

        let journals = table::string_column(&cleaned, JOURNAL)?;
        assert_eq!(journals.value(1), "the lancet");
        let sources = table::string_column(&cleaned, SOURCE_X)?;
        assert_eq!(sources.value(1), "medline");
        Ok(())
    }

    #[test]
    fn non_critical_nulls_survive() -> Result<()> {
        let batch = raw_batch(&[
            (TITLE, vec![Some("a"), Some("b")]),
            (ABSTRACT, vec![Some("x"), Some("y")]),
            (PUBLISH_TIME, vec![Some("2020"), Some("2021")]),
            (JOURNAL, vec![Some("BMJ"), None]),
        ]);
        let cleaned = clean(&batch)?;
        let journals = table::string_column(&cleaned, JOURNAL)?;
        assert_eq!(cleaned.num_rows(), 2);
        assert!(journals.is_null(1));
        Ok(())
    }
}
