use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{io::Write, sync::Arc};
use tempfile::NamedTempFile;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cordscope=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Build a raw (all `Utf8`, nullable) table from named columns.
pub fn raw_batch(columns: &[(&str, Vec<Option<&str>>)]) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, values)| Arc::new(StringArray::from(values.clone())) as ArrayRef)
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("valid test batch")
}

/// The two-row table used throughout the cleaning tests.
pub fn two_paper_batch() -> RecordBatch {
    raw_batch(&[
        ("title", vec![Some("A Study of X"), Some("Another Report")]),
        ("abstract", vec![Some(""), Some("short text")]),
        ("publish_time", vec![Some("2020-03-01"), None]),
        ("journal", vec![Some("Nature"), Some("nature")]),
        ("source", vec![Some("PMC"), Some("PMC")]),
    ])
}

/// Write `content` to a temp file that lives as long as the handle.
pub fn csv_fixture(content: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp file");
    tmp.write_all(content.as_bytes()).expect("write fixture");
    tmp.flush().expect("flush fixture");
    tmp
}

/// A small metadata file spanning three years and a few journals.
pub const SAMPLE_CSV: &str = "\
cord_uid,title,abstract,publish_time,journal,source_x,mag_id
a1,Viral Spread in Cities,Cities see fast spread,2019-12-30,The Lancet,PMC,
a2,A Review of Masks,,2020-01-15, the lancet ,Medline,
a3,Masks and Spread,masks reduce spread a lot,2020-04-02,BMJ,PMC,
a4,,no title here,2020,bmj,WHO,
a5,Vaccine Trials Begin,trial phase one,2021-02-11,Nature,PMC,
a6,Broken Date,ignored,not a date,Nature,PMC,
a7,Missing Date,ignored,,Nature,PMC,
";
