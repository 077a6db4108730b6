use super::stopwords::StopwordSet;
use crate::{columns::TITLE, error::Result, table};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::collections::HashMap;

/// One word of the cloud. `weight` is the count relative to the most
/// frequent word, which the rasterizer uses for font size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
    pub weight: f64,
}

/// Word frequencies over the titles of a filtered table, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordFrequencies {
    words: Vec<WordCount>,
}

impl WordFrequencies {
    /// Rank `counts` by count (ties by word), keep the top `max_words` and
    /// weight them against the leader.
    pub fn from_counts(counts: HashMap<String, usize>, max_words: usize) -> Self {
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_words);

        let top = ranked.first().map(|(_, c)| *c).unwrap_or(0);
        let words = ranked
            .into_iter()
            .map(|(word, count)| WordCount {
                weight: count as f64 / top as f64,
                word,
                count,
            })
            .collect();
        Self { words }
    }

    /// True when there is nothing to draw; the view shows a placeholder instead.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> &[WordCount] {
        &self.words
    }

    pub fn count_of(&self, word: &str) -> Option<usize> {
        self.words.iter().find(|w| w.word == word).map(|w| w.count)
    }
}

/// All non-null titles joined by single spaces.
pub fn concat_titles(filtered: &RecordBatch) -> Result<String> {
    if filtered.num_rows() == 0 {
        return Ok(String::new());
    }
    let titles = table::string_column(filtered, TITLE)?;
    Ok(titles.iter().flatten().collect::<Vec<_>>().join(" "))
}

/// Lowercased whitespace tokens of `text` minus stopwords, counted.
pub fn count_words(text: &str, stopwords: &StopwordSet) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in text.split_whitespace() {
        let token = token.to_lowercase();
        if stopwords.is_stopword(&token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Frequencies for the title word cloud of `filtered`.
pub fn title_word_frequencies(
    filtered: &RecordBatch,
    stopwords: &StopwordSet,
    max_words: usize,
) -> Result<WordFrequencies> {
    let all_titles = concat_titles(filtered)?;
    if all_titles.trim().is_empty() {
        return Ok(WordFrequencies::default());
    }
    Ok(WordFrequencies::from_counts(
        count_words(&all_titles, stopwords),
        max_words,
    ))
}
