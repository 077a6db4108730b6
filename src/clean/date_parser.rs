use crate::{columns::PUBLISH_TIME, error::Result, table};
use arrow::{
    array::{Array, ArrayRef, TimestampMillisecondBuilder},
    datatypes::{DataType, Field, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::debug;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%b %d %Y"];

/// Parse a publication timestamp in any of the shapes the metadata uses.
///
/// Bare years and year-months resolve to the first day of the period.
/// Offsets are dropped in favour of the wall-clock time they annotate.
pub fn parse_publish_time(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    parse_partial_date(s)
}

/// `YYYY` or `YYYY-MM`.
fn parse_partial_date(s: &str) -> Option<NaiveDateTime> {
    let (year_str, month_str) = match s.split_once('-') {
        Some((y, m)) => (y, Some(m)),
        None => (s, None),
    };
    if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_str.parse().ok()?;
    let month: u32 = match month_str {
        Some(m) if (1..=2).contains(&m.len()) && m.chars().all(|c| c.is_ascii_digit()) => {
            m.parse().ok()?
        }
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// Replace the text `publish_time` column with millisecond timestamps.
/// Values that fail to parse become null, exactly like absent ones.
pub fn convert_publish_time(batch: &RecordBatch) -> Result<RecordBatch> {
    let raw = table::string_column(batch, PUBLISH_TIME)?;
    let mut builder = TimestampMillisecondBuilder::with_capacity(raw.len());
    let mut unparsed = 0usize;
    for value in raw.iter() {
        let ts = value.and_then(|s| {
            let parsed = parse_publish_time(s);
            if parsed.is_none() {
                unparsed += 1;
            }
            parsed
        });
        builder.append_option(ts.map(|dt| dt.and_utc().timestamp_millis()));
    }
    if unparsed > 0 {
        debug!(unparsed, "publish_time values did not parse");
    }
    let field = Field::new(
        PUBLISH_TIME,
        DataType::Timestamp(TimeUnit::Millisecond, None),
        true,
    );
    let column = Arc::new(builder.finish()) as ArrayRef;
    table::replace_column(batch, PUBLISH_TIME, field, column)
}
