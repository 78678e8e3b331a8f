use serde::Serialize;

use super::stats::ScanStats;

/// One line of a ranked list: a folder key or a file path with its byte total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub path: String,
    pub bytes: u64,
}

impl RankedEntry {
    pub fn new(path: impl Into<String>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Everything one scan produced. All lists are sorted largest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub stats: ScanStats,

    /// Largest first-level folders under the root
    pub top_dirs_level1: Vec<RankedEntry>,

    /// Largest second-level prefixes under the root
    pub top_dirs_level2: Vec<RankedEntry>,

    /// Largest individual files, by absolute path
    pub top_files: Vec<RankedEntry>,
}
