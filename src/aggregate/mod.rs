// src/aggregate/mod.rs
pub mod counts;
pub mod stopwords;
pub mod words;

pub use counts::{top_counts, top_journals, top_sources, yearly_counts, KeyCount, YearCount};
pub use stopwords::{StopwordSet, TITLE_STOPWORDS};
pub use words::{title_word_frequencies, WordCount, WordFrequencies};
