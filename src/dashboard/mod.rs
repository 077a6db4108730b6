// src/dashboard/mod.rs
pub mod command;
pub mod text;

use crate::{
    aggregate::{self, KeyCount, StopwordSet, WordFrequencies, YearCount},
    clean::clean,
    config::DashboardConfig,
    error::Result,
    filter::{filter_by_year, year_bounds, YearRange},
    load::load_raw_table,
};
use arrow::{json::ArrayWriter, record_batch::RecordBatch};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Everything the presentation layer draws for one year-range selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Slider bounds; `None` when the cleaned table is empty.
    pub bounds: Option<YearRange>,
    /// The range actually applied: clamped to `bounds` when the request
    /// overlaps them, otherwise the request itself (matching no rows).
    pub selected: Option<YearRange>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    /// First rows of the filtered table, one JSON object per row.
    pub preview: Vec<Map<String, Value>>,
    pub yearly_counts: Vec<YearCount>,
    pub top_journals: Vec<KeyCount>,
    pub top_sources: Vec<KeyCount>,
    pub title_words: WordFrequencies,
    #[serde(skip)]
    pub preview_batch: RecordBatch,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.filtered_rows == 0
    }
}

/// The application object. It owns the cleaned table, which is loaded and
/// cleaned on first use and then reused by every render.
pub struct Dashboard {
    config: DashboardConfig,
    stopwords: StopwordSet,
    cleaned: OnceCell<RecordBatch>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            stopwords: StopwordSet::default(),
            cleaned: OnceCell::new(),
        }
    }

    /// Start from an already-cleaned table; nothing is read from disk.
    pub fn with_cleaned(config: DashboardConfig, cleaned: RecordBatch) -> Self {
        Self {
            config,
            stopwords: StopwordSet::default(),
            cleaned: OnceCell::with_value(cleaned),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cleaned.get().is_some()
    }

    /// The cleaned table, loading and cleaning the dataset on the first call.
    /// A failed load leaves the cache empty.
    pub fn cleaned(&self) -> Result<&RecordBatch> {
        self.cleaned.get_or_try_init(|| {
            info!(path = %self.config.data_path.display(), "loading dataset");
            let raw = load_raw_table(&self.config.data_path)?;
            clean(&raw)
        })
    }

    /// Slider bounds: the observed min and max `publish_year`.
    pub fn year_bounds(&self) -> Result<Option<YearRange>> {
        year_bounds(self.cleaned()?)
    }

    /// Recompute every output for `range` (the full range when `None`).
    pub fn render(&self, range: Option<YearRange>) -> Result<DashboardView> {
        let cleaned = self.cleaned()?;
        let bounds = year_bounds(cleaned)?;
        let (selected, filtered) = match bounds {
            Some(bounds) => match range.map_or(Some(bounds), |r| r.clamp_to(bounds)) {
                Some(selected) => (Some(selected), filter_by_year(cleaned, selected)?),
                None => (range, cleaned.slice(0, 0)),
            },
            None => (None, cleaned.clone()),
        };
        debug!(
            selected = ?selected,
            rows = filtered.num_rows(),
            "filtered cleaned table"
        );

        let preview_batch = filtered.slice(0, filtered.num_rows().min(self.config.preview_rows));
        Ok(DashboardView {
            bounds,
            selected,
            total_rows: cleaned.num_rows(),
            filtered_rows: filtered.num_rows(),
            preview: batch_to_json_rows(&preview_batch)?,
            yearly_counts: aggregate::yearly_counts(&filtered)?,
            top_journals: aggregate::top_journals(&filtered, self.config.top_n)?,
            top_sources: aggregate::top_sources(&filtered, self.config.top_n)?,
            title_words: aggregate::title_word_frequencies(
                &filtered,
                &self.stopwords,
                self.config.max_words,
            )?,
            preview_batch,
        })
    }
}

fn batch_to_json_rows(batch: &RecordBatch) -> Result<Vec<Map<String, Value>>> {
    if batch.num_rows() == 0 {
        return Ok(Vec::new());
    }
    let mut writer = ArrayWriter::new(Vec::new());
    writer.write(batch)?;
    writer.finish()?;
    Ok(serde_json::from_slice(&writer.into_inner())?)
}
