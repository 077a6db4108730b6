// src/load/mod.rs
use crate::error::{DashboardError, Result};
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use regex::Regex;
use std::{
    fs,
    io::{self, Cursor},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info};

/// Rows decoded per Arrow batch before they are stitched back together.
const BATCH_SIZE: usize = 8192;

/// Field values read as missing. An empty field is always missing too.
/// Matching is exact: `" nan "` stays text.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn null_regex() -> Result<Regex> {
    let alternatives: Vec<String> = NULL_TOKENS.iter().map(|t| regex::escape(t)).collect();
    let pattern = format!("^(?:|{})$", alternatives.join("|"));
    Regex::new(&pattern).map_err(|e| DashboardError::Schema(format!("null pattern: {}", e)))
}

/// Read the delimited file at `path` into a single raw table.
///
/// Every column comes back as nullable `Utf8`; typing is left to the cleaning
/// pipeline. A missing file is reported as [`DashboardError::FileNotFound`] so
/// callers can tell a misplaced dataset from a corrupt one.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_raw_table<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let path = path.as_ref();
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DashboardError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(DashboardError::Load {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };
    debug!(bytes = data.len(), "read dataset");

    let nulls = null_regex()?;
    let batch = parse_raw_table(data, nulls).map_err(|e| DashboardError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "loaded raw table"
    );
    Ok(batch)
}

/// Parse CSV bytes with a header row. A file with no header at all yields a
/// table with no columns.
fn parse_raw_table(data: Vec<u8>, nulls: Regex) -> std::result::Result<RecordBatch, ArrowError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    }

    // Only the header matters here; every column is read as text.
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(data.as_slice()), Some(0))?;
    let fields: Vec<Field> = header
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_null_regex(nulls)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(data))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    concat_batches(&schema, &batches)
}
