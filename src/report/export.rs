use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::bytes_to_gb;
use crate::error::{AuditError, Result};
use crate::scanner::{RankedEntry, ScanResult};

const HEADER: [&str; 5] = ["root", "level", "path", "bytes", "gb"];

// Spreadsheet apps need the BOM to pick UTF-8 for non-ASCII paths.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Serialize)]
struct TopDirRow<'a> {
    root: &'a str,
    level: u8,
    path: &'a str,
    bytes: u64,
    gb: f64,
}

/// Write one `;`-separated row per ranked folder, level 1 before level 2
/// for each root.
pub fn write_top_dirs_csv(results: &[ScanResult], path: &Path) -> Result<()> {
    let csv_err = |e| AuditError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = BufWriter::new(File::create(path).map_err(|e| AuditError::Io {
        path: path.to_path_buf(),
        source: e,
    })?);
    file.write_all(UTF8_BOM).map_err(|e| AuditError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HEADER).map_err(csv_err)?;

    for result in results {
        let root = result.stats.root.to_string_lossy();
        let levels: [(u8, &[RankedEntry]); 2] =
            [(1, &result.top_dirs_level1), (2, &result.top_dirs_level2)];

        for (level, entries) in levels {
            for entry in entries {
                writer
                    .serialize(TopDirRow {
                        root: &root,
                        level,
                        path: &entry.path,
                        bytes: entry.bytes,
                        gb: round3(bytes_to_gb(entry.bytes)),
                    })
                    .map_err(csv_err)?;
            }
        }
    }

    writer.flush().map_err(|e| AuditError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{DepthLimit, ScanStats};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn result(root: &str, level1: Vec<RankedEntry>, level2: Vec<RankedEntry>) -> ScanResult {
        ScanResult {
            stats: ScanStats::new(PathBuf::from(root), DepthLimit::Unlimited),
            top_dirs_level1: level1,
            top_dirs_level2: level2,
            top_files: vec![],
        }
    }

    fn read_back(path: &Path) -> String {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap()
    }

    #[test]
    fn test_csv_rows_per_level_and_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.csv");
        let gib = 1024 * 1024 * 1024;

        let results = vec![
            result(
                "/data",
                vec![RankedEntry::new("cache", 2 * gib), RankedEntry::new("logs", 1024)],
                vec![RankedEntry::new("cache/chrome", 3 * gib / 2)],
            ),
            result("/tmp", vec![RankedEntry::new("build", 0)], vec![]),
        ];

        write_top_dirs_csv(&results, &path).unwrap();

        let text = read_back(&path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "root;level;path;bytes;gb",
                "/data;1;cache;2147483648;2.0",
                "/data;1;logs;1024;0.0",
                "/data;2;cache/chrome;1610612736;1.5",
                "/tmp;1;build;0;0.0",
            ]
        );
    }

    #[test]
    fn test_csv_header_only_without_results() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_top_dirs_csv(&[], &path).unwrap();

        assert_eq!(read_back(&path).trim_end(), "root;level;path;bytes;gb");
    }

    #[test]
    fn test_csv_quotes_delimiter_in_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quoted.csv");

        let results = vec![result("/d", vec![RankedEntry::new("a;b", 5)], vec![])];
        write_top_dirs_csv(&results, &path).unwrap();

        assert!(read_back(&path).contains("/d;1;\"a;b\";5;0.0"));
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(1.9996), 2.0);
    }
}
