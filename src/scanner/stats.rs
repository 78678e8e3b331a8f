use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use super::request::DepthLimit;

/// Running counters of one scan.
///
/// Owned by the traversal loop while the scan runs and handed to the caller
/// inside the result afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanStats {
    /// Absolute scan root
    pub root: PathBuf,

    /// Requested depth (-1 = unlimited when serialized)
    pub depth: DepthLimit,

    /// Regular files sized and counted
    pub files_scanned: u64,

    /// Directories popped for enumeration, root included
    pub dirs_scanned: u64,

    /// Sum of all file sizes counted
    pub bytes_total: u64,

    /// Part of `bytes_total` from files directly inside the root
    pub bytes_at_root: u64,

    /// Failures other than permission denial (vanished entries, I/O faults)
    pub errors: u64,

    /// Entries or directories the current user may not read
    pub denied: u64,

    /// Junctions and mount points that were not followed
    pub skipped_reparse: u64,

    /// Wall time of the scan in seconds, rounded to hundredths
    pub elapsed_sec: f64,
}

impl ScanStats {
    pub fn new(root: PathBuf, depth: DepthLimit) -> Self {
        Self {
            root,
            depth,
            files_scanned: 0,
            dirs_scanned: 0,
            bytes_total: 0,
            bytes_at_root: 0,
            errors: 0,
            denied: 0,
            skipped_reparse: 0,
            elapsed_sec: 0.0,
        }
    }

    /// Count a failed I/O operation under `denied` or `errors`.
    pub fn record_failure(&mut self, err: &io::Error) {
        if err.kind() == io::ErrorKind::PermissionDenied {
            self.denied += 1;
        } else {
            self.errors += 1;
        }
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_sec = (elapsed.as_secs_f64() * 100.0).round() / 100.0;
    }

    /// Denied and failed entries relative to everything that was looked at.
    ///
    /// Callers use this to decide whether a scan had too little coverage to
    /// be trusted.
    pub fn failure_ratio(&self) -> f64 {
        let failed = self.denied + self.errors;
        let seen = failed + self.files_scanned + self.dirs_scanned + self.skipped_reparse;
        if seen == 0 {
            0.0
        } else {
            failed as f64 / seen as f64
        }
    }
}
