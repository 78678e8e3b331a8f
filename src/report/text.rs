use std::fmt::Write;
use std::path::Path;

use super::bytes_to_gb;
use crate::scanner::{RankedEntry, ScanResult};
use crate::system::DriveInfo;

const NAME_WIDTH: usize = 45;
const RULE_WIDTH: usize = 70;

/// Size in binary gigabytes with two decimals, e.g. `1.50 GB`.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes_to_gb(bytes))
}

/// Line printed for a root that does not exist.
pub fn render_skipped(root: &Path) -> String {
    format!("[skip] Not found: {}", root.display())
}

/// Drive table shown before the scans.
pub fn render_drives(drives: &[DriveInfo]) -> String {
    let mut output = String::from("=== Drives ===\n");

    for drive in drives {
        let mount = drive.mount_point.display();
        match &drive.error {
            Some(err) => {
                let _ = writeln!(output, "{}  (error reading usage: {})", mount, err);
            }
            None => {
                let _ = writeln!(
                    output,
                    "{}  Total: {} | Used: {} | Free: {}",
                    mount,
                    drive.total_human(),
                    drive.used_human(),
                    drive.free_human()
                );
            }
        }
    }

    output
}

/// Full console block for one scanned root.
pub fn render_result(result: &ScanResult) -> String {
    let stats = &result.stats;
    let mut output = String::new();

    let _ = writeln!(
        output,
        "=== Scanning: {} (depth={}) ===",
        stats.root.display(),
        stats.depth.as_signed()
    );
    let _ = writeln!(
        output,
        "Scanned dirs={}, files={}, total={}, denied={}, errors={}, skipped_reparse={}, time={}s",
        stats.dirs_scanned,
        stats.files_scanned,
        format_gb(stats.bytes_total),
        stats.denied,
        stats.errors,
        stats.skipped_reparse,
        stats.elapsed_sec
    );

    push_folders(&mut output, "Top folders (level 1)", &result.top_dirs_level1);
    push_folders(&mut output, "Top folders (level 2)", &result.top_dirs_level2);

    let _ = writeln!(output, "\n--- Top files ---");
    if result.top_files.is_empty() {
        output.push_str("  (none)\n");
    }
    for file in &result.top_files {
        let _ = writeln!(output, "{:>10}  {}", format_gb(file.bytes), file.path);
    }

    let _ = writeln!(output, "\n{}", "=".repeat(RULE_WIDTH));
    output
}

fn push_folders(output: &mut String, title: &str, entries: &[RankedEntry]) {
    let _ = writeln!(output, "\n--- {} ---", title);
    if entries.is_empty() {
        output.push_str("  (none)\n");
    }
    for entry in entries {
        let _ = writeln!(
            output,
            "{:<width$} {}",
            entry.path,
            format_gb(entry.bytes),
            width = NAME_WIDTH
        );
    }
}
