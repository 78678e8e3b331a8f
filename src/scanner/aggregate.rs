use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use super::result::RankedEntry;

/// Folder totals keyed by the first one and two components of a path
/// relative to the scan root.
#[derive(Debug, Default)]
pub struct DirAggregator {
    level1: HashMap<String, u64>,
    level2: HashMap<String, u64>,
    at_root: u64,
}

impl DirAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file's size under its prefixes.
    ///
    /// A file directly in the root has no folder to be counted under: it only
    /// adds to [`bytes_at_root`](Self::bytes_at_root).
    pub fn record(&mut self, relative_path: &Path, size: u64) {
        let mut parts = relative_path.components().filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        });

        let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
            self.at_root += size;
            return;
        };

        let level1 = first.to_string_lossy().into_owned();
        let level2 = PathBuf::from(first).join(second).to_string_lossy().into_owned();

        *self.level1.entry(level1).or_insert(0) += size;
        *self.level2.entry(level2).or_insert(0) += size;
    }

    pub fn bytes_at_root(&self) -> u64 {
        self.at_root
    }

    pub fn top_level1(&self, k: usize) -> Vec<RankedEntry> {
        top_k(&self.level1, k)
    }

    pub fn top_level2(&self, k: usize) -> Vec<RankedEntry> {
        top_k(&self.level2, k)
    }
}

// Largest first; equal totals ordered by key so output is stable across runs.
fn top_k(totals: &HashMap<String, u64>, k: usize) -> Vec<RankedEntry> {
    if k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &u64)> = totals.iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(k)
        .map(|(key, bytes)| RankedEntry::new(key.clone(), *bytes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: &[&str]) -> String {
        parts.iter().collect::<PathBuf>().to_string_lossy().into_owned()
    }

    #[test]
    fn test_root_level_file_excluded() {
        let mut agg = DirAggregator::new();
        agg.record(Path::new("a.txt"), 100);

        assert_eq!(agg.bytes_at_root(), 100);
        assert!(agg.top_level1(10).is_empty());
        assert!(agg.top_level2(10).is_empty());
    }

    #[test]
    fn test_one_level_deep_file() {
        let mut agg = DirAggregator::new();
        agg.record(Path::new("sub/b.txt"), 500);

        assert_eq!(agg.top_level1(10), vec![RankedEntry::new("sub", 500)]);
        assert_eq!(
            agg.top_level2(10),
            vec![RankedEntry::new(key(&["sub", "b.txt"]), 500)]
        );
        assert_eq!(agg.bytes_at_root(), 0);
    }

    #[test]
    fn test_deep_files_accumulate_under_prefixes() {
        let mut agg = DirAggregator::new();
        agg.record(Path::new("cache/chrome/data/1.bin"), 10);
        agg.record(Path::new("cache/chrome/data/2.bin"), 20);
        agg.record(Path::new("cache/firefox/x.bin"), 5);
        agg.record(Path::new("logs/app/today.log"), 7);

        assert_eq!(
            agg.top_level1(10),
            vec![RankedEntry::new("cache", 35), RankedEntry::new("logs", 7)]
        );
        assert_eq!(
            agg.top_level2(10),
            vec![
                RankedEntry::new(key(&["cache", "chrome"]), 30),
                RankedEntry::new(key(&["logs", "app"]), 7),
                RankedEntry::new(key(&["cache", "firefox"]), 5),
            ]
        );
    }

    #[test]
    fn test_level1_sum_plus_root_equals_total() {
        let mut agg = DirAggregator::new();
        let files = [("top.bin", 3u64), ("a/x", 4), ("a/b/y", 5), ("c/d/e/z", 6)];
        for (path, size) in files {
            agg.record(Path::new(path), size);
        }

        let level1: u64 = agg.top_level1(usize::MAX).iter().map(|e| e.bytes).sum();
        let total: u64 = files.iter().map(|(_, s)| s).sum();
        assert_eq!(level1 + agg.bytes_at_root(), total);
    }

    #[test]
    fn test_ties_ordered_by_key() {
        let mut agg = DirAggregator::new();
        agg.record(Path::new("zeta/f"), 50);
        agg.record(Path::new("alpha/f"), 50);
        agg.record(Path::new("mid/f"), 50);

        let names: Vec<_> = agg.top_level1(10).into_iter().map(|e| e.path).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_top_k_truncates_and_zero_disables() {
        let mut agg = DirAggregator::new();
        for (i, dir) in ["a", "b", "c", "d"].iter().enumerate() {
            agg.record(&Path::new(dir).join("f"), (i as u64 + 1) * 10);
        }

        let top = agg.top_level1(2);
        assert_eq!(top, vec![RankedEntry::new("d", 40), RankedEntry::new("c", 30)]);
        assert!(agg.top_level1(0).is_empty());
    }

    #[test]
    fn test_zero_byte_file_creates_key() {
        let mut agg = DirAggregator::new();
        agg.record(Path::new("empty/f"), 0);
        assert_eq!(agg.top_level1(1), vec![RankedEntry::new("empty", 0)]);
    }
}
