use std::path::PathBuf;

/// Dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "metadata.csv";

/// Columns with more than this percentage of missing values are dropped.
pub const NULL_PERCENT_THRESHOLD: usize = 70;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Word-cloud rasterizers cap the layout at this many words.
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Fixed settings for a dashboard run. There are no flags or env overrides;
/// tests build their own instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub top_n: usize,
    pub preview_rows: usize,
    pub max_words: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            top_n: DEFAULT_TOP_N,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl DashboardConfig {
    /// Same defaults, different dataset.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }
}
