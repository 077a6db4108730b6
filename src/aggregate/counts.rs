use crate::{
    columns::{JOURNAL, PUBLISH_YEAR, SOURCE, SOURCE_X},
    error::Result,
    table,
};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Papers published in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Papers sharing one grouping key (a journal or a source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Row counts per `publish_year`, ascending by year.
pub fn yearly_counts(filtered: &RecordBatch) -> Result<Vec<YearCount>> {
    if filtered.num_rows() == 0 {
        return Ok(Vec::new());
    }
    let years = table::int32_column(filtered, PUBLISH_YEAR)?;
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years.iter().flatten() {
        *counts.entry(year).or_default() += 1;
    }
    Ok(counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect())
}

/// The `n` most frequent non-null values of `column`, most frequent first.
/// Equal counts are ordered by key. An absent column yields nothing.
pub fn top_counts(filtered: &RecordBatch, column: &str, n: usize) -> Result<Vec<KeyCount>> {
    if !table::has_column(filtered, column) {
        debug!(column, "no such column; skipping counts");
        return Ok(Vec::new());
    }
    let values = table::string_column(filtered, column)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    ranked.truncate(n);
    Ok(ranked)
}

pub fn top_journals(filtered: &RecordBatch, n: usize) -> Result<Vec<KeyCount>> {
    top_counts(filtered, JOURNAL, n)
}

/// Counts over `source`, falling back to `source_x` when that is what the
/// file calls it.
pub fn top_sources(filtered: &RecordBatch, n: usize) -> Result<Vec<KeyCount>> {
    top_counts(filtered, source_column(filtered), n)
}

fn source_column(batch: &RecordBatch) -> &'static str {
    if !table::has_column(batch, SOURCE) && table::has_column(batch, SOURCE_X) {
        SOURCE_X
    } else {
        SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean;
    use crate::test_support::raw_batch;
    use anyhow::Result;

    fn papers(journals: &[Option<&str>]) -> Result<RecordBatch> {
        let n = journals.len();
        let years = ["2019", "2020", "2020", "2021"];
        let batch = raw_batch(&[
            ("title", vec![Some("t"); n]),
            ("abstract", vec![Some(""); n]),
            (
                "publish_time",
                (0..n).map(|i| Some(years[i % years.len()])).collect(),
            ),
            ("journal", journals.to_vec()),
            ("source_x", vec![Some("PMC"); n]),
        ]);
        Ok(clean(&batch)?)
    }

    #[test]
    fn yearly_counts_are_sorted_by_year() -> Result<()> {
        let cleaned = papers(&[Some("a"); 6])?;
        assert_eq!(
            yearly_counts(&cleaned)?,
            vec![
                YearCount { year: 2019, count: 2 },
                YearCount { year: 2020, count: 3 },
                YearCount { year: 2021, count: 1 },
            ]
        );
        Ok(())
    }

    #[test]
    fn top_counts_merge_case_variants_and_skip_nulls() -> Result<()> {
        let cleaned = papers(&[
            Some("Nature"),
            Some(" nature "),
            Some("BMJ"),
            None,
            Some("NATURE"),
        ])?;
        assert_eq!(
            top_journals(&cleaned, 10)?,
            vec![
                KeyCount { key: "nature".into(), count: 3 },
                KeyCount { key: "bmj".into(), count: 1 },
            ]
        );
        Ok(())
    }

    #[test]
    fn top_counts_cap_and_order() -> Result<()> {
        let names: Vec<String> = (0..15).map(|i| format!("journal {:02}", i)).collect();
        let mut journals: Vec<Option<&str>> = Vec::new();
        for (i, name) in names.iter().enumerate() {
            // journal 00 appears once, journal 14 fifteen times
            journals.extend(std::iter::repeat(Some(name.as_str())).take(i + 1));
        }
        let cleaned = papers(&journals)?;
        let top = top_journals(&cleaned, 10)?;

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, "journal 14");
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        Ok(())
    }

    #[test]
    fn sources_fall_back_to_source_x() -> Result<()> {
        let cleaned = papers(&[Some("a"), Some("b")])?;
        assert_eq!(
            top_sources(&cleaned, 10)?,
            vec![KeyCount { key: "pmc".into(), count: 2 }]
        );
        Ok(())
    }

    #[test]
    fn absent_column_and_empty_table_yield_nothing() -> Result<()> {
        let cleaned = papers(&[])?;
        assert!(yearly_counts(&cleaned)?.is_empty());
        assert!(top_journals(&cleaned, 10)?.is_empty());
        assert!(top_counts(&cleaned, "no_such_column", 10)?.is_empty());
        Ok(())
    }
}
