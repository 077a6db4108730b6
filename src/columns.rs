// Column names shared by the loader, the cleaning steps and the aggregators.

pub const TITLE: &str = "title";
pub const ABSTRACT: &str = "abstract";
pub const PUBLISH_TIME: &str = "publish_time";
pub const JOURNAL: &str = "journal";
pub const SOURCE: &str = "source";
/// What the CORD-19 metadata file actually calls the source column.
pub const SOURCE_X: &str = "source_x";

pub const PUBLISH_YEAR: &str = "publish_year";
pub const ABSTRACT_WORD_COUNT: &str = "abstract_word_count";

/// Cleaning cannot proceed without these.
pub const REQUIRED: [&str; 3] = [TITLE, ABSTRACT, PUBLISH_TIME];

/// Grouping keys that get lowercased and trimmed.
pub const NORMALIZED: [&str; 3] = [JOURNAL, SOURCE, SOURCE_X];
