use super::DashboardView;
use crate::{aggregate::KeyCount, error::Result};
use arrow::{
    array::{ArrayRef, AsArray, StringArray},
    datatypes::DataType,
    record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};
use std::{fmt::Write, sync::Arc};

pub const TITLE: &str = "CORD-19 Data Explorer";
pub const SUBTITLE: &str = "Simple exploration of COVID-19 research papers";
pub const NO_DATA_FOR_FILTERING: &str = "No data available for filtering.";
pub const NO_DATA_AFTER_FILTERING: &str = "No data to display after filtering.";
pub const NO_TITLES: &str = "No titles available to generate a word cloud.";

/// Widest bar in any chart, in characters.
const BAR_WIDTH: usize = 40;
/// Preview cells longer than this are cut with an ellipsis.
const CELL_WIDTH: usize = 48;
/// Words shown in the text rendition of the cloud.
const CLOUD_WORDS: usize = 30;

/// Plain-text rendition of a view, section by section in dashboard order.
pub fn render_text(view: &DashboardView) -> Result<String> {
    let mut out = String::new();
    heading(&mut out, TITLE, '=');
    line(&mut out, SUBTITLE);
    line(&mut out, "");

    match (view.bounds, view.selected) {
        (Some(bounds), Some(selected)) => line(
            &mut out,
            &format!(
                "Publication years {} (available {}), {} of {} papers",
                selected, bounds, view.filtered_rows, view.total_rows
            ),
        ),
        _ => line(&mut out, NO_DATA_FOR_FILTERING),
    }
    line(&mut out, "");

    heading(&mut out, "Sample Data", '-');
    let preview = pretty_format_batches(&[truncate_cells(&view.preview_batch)?])?;
    line(&mut out, &preview.to_string());
    line(&mut out, "");

    if view.is_empty() {
        line(&mut out, NO_DATA_AFTER_FILTERING);
        return Ok(out);
    }

    heading(&mut out, "Publications Over Time", '-');
    let years: Vec<(String, usize)> = view
        .yearly_counts
        .iter()
        .map(|yc| (yc.year.to_string(), yc.count))
        .collect();
    bar_chart(&mut out, &years);
    line(&mut out, "");

    heading(&mut out, "Top Publishing Journals", '-');
    bar_chart(&mut out, &keyed(&view.top_journals));
    line(&mut out, "");

    heading(&mut out, "Word Cloud of Paper Titles", '-');
    if view.title_words.is_empty() {
        line(&mut out, NO_TITLES);
    } else {
        let cloud: Vec<String> = view
            .title_words
            .words()
            .iter()
            .take(CLOUD_WORDS)
            .map(|w| format!("{}({})", w.word, w.count))
            .collect();
        line(&mut out, &cloud.join(" "));
    }
    line(&mut out, "");

    heading(&mut out, "Distribution of Paper Counts by Source", '-');
    bar_chart(&mut out, &keyed(&view.top_sources));
    Ok(out)
}

fn line(out: &mut String, text: &str) {
    let _ = writeln!(out, "{}", text);
}

fn heading(out: &mut String, text: &str, underline: char) {
    line(out, text);
    line(out, &underline.to_string().repeat(text.chars().count()));
}

fn keyed(counts: &[KeyCount]) -> Vec<(String, usize)> {
    counts.iter().map(|kc| (kc.key.clone(), kc.count)).collect()
}

/// Horizontal bars scaled to the largest count; any non-zero count gets at
/// least one mark.
fn bar_chart(out: &mut String, rows: &[(String, usize)]) {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let top = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    for (label, count) in rows {
        let len = if top == 0 {
            0
        } else {
            (count * BAR_WIDTH / top).max(usize::from(*count > 0))
        };
        let _ = writeln!(
            out,
            "{:<width$} | {} {}",
            label,
            "#".repeat(len),
            count,
            width = label_width
        );
    }
}

/// Shorten long text cells so the preview table stays readable.
fn truncate_cells(batch: &RecordBatch) -> Result<RecordBatch> {
    if batch.num_columns() == 0 {
        return Ok(batch.clone());
    }
    let columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| match col.data_type() {
            DataType::Utf8 => {
                let strings = col.as_string::<i32>();
                let cut: StringArray = strings.iter().map(|v| v.map(truncate)).collect();
                Arc::new(cut) as ArrayRef
            }
            _ => col.clone(),
        })
        .collect();
    // nulls stay null, so the schema still fits
    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= CELL_WIDTH {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}
