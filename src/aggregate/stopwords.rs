//! Terms left out of the title word cloud.
//!
//! The built-in list mixes ordinary English function words with terms that
//! appear in nearly every paper of a coronavirus corpus and would otherwise
//! dominate the cloud.

use std::collections::HashSet;

/// The built-in title stopwords, all lowercase.
pub const TITLE_STOPWORDS: [&str; 37] = [
    "the", "of", "and", "in", "a", "to", "for", "on", "with", "from", "as", "by", "at", "an",
    "is", "that", "this", "are", "be", "was", "have", "it", "its", "or", "new", "study",
    "report", "case", "review", "paper", "research", "covid", "sars", "cov", "2", "virus",
    "disease",
];

/// A set of lowercase tokens excluded from word-frequency analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_list(&TITLE_STOPWORDS)
    }
}

impl StopwordSet {
    /// Build a set from a custom list; entries are lowercased.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Whether `token`, once lowercased, is in the set.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_has_every_term_once() {
        let set = StopwordSet::default();
        assert_eq!(set.len(), TITLE_STOPWORDS.len());
        assert!(TITLE_STOPWORDS.iter().all(|w| set.is_stopword(w)));
    }

    #[test]
    fn lookup_is_on_the_lowercased_form() {
        let set = StopwordSet::default();
        assert!(set.is_stopword("COVID"));
        assert!(set.is_stopword("Sars"));
        assert!(!set.is_stopword("covid-19"));
        assert!(!set.is_stopword("sars-cov-2"));
        assert!(!StopwordSet::from_list(&["virus"]).is_stopword("the"));
    }
}
