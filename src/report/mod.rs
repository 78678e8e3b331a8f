//! Everything a scan run hands to the user: console text, the JSON report
//! and the CSV export of top folders.

mod export;
mod json;
mod text;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{AuditError, Result};
use crate::scanner::ScanResult;
use crate::system::DriveInfo;

pub use export::write_top_dirs_csv;
pub use json::write_json_report;
pub use text::{format_gb, render_drives, render_result, render_skipped};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bytes expressed in binary gigabytes.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// One run over any number of roots.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Local time the report was assembled, ISO-8601 to the second
    pub generated_at: String,
    pub is_admin: bool,
    pub drives: Vec<DriveInfo>,
    pub results: Vec<ScanResult>,
    #[serde(skip)]
    stamp: String,
}

impl ScanReport {
    pub fn new(results: Vec<ScanResult>, drives: Vec<DriveInfo>, is_admin: bool) -> Self {
        Self::at(Local::now(), results, drives, is_admin)
    }

    pub fn at(
        generated: DateTime<Local>,
        results: Vec<ScanResult>,
        drives: Vec<DriveInfo>,
        is_admin: bool,
    ) -> Self {
        Self {
            generated_at: generated.format("%Y-%m-%dT%H:%M:%S").to_string(),
            is_admin,
            drives,
            results,
            stamp: generated.format("%Y%m%d_%H%M%S").to_string(),
        }
    }

    /// Common file name prefix: `scan_report_<YYYYMMDD_HHMMSS>`.
    pub fn base_name(&self) -> String {
        format!("scan_report_{}", self.stamp)
    }
}

/// Paths of the report files that were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReports {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl WrittenReports {
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.csv.is_none()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.json.iter().chain(self.csv.iter())
    }
}

/// Write the selected report files into `outdir`, creating it if needed.
pub fn write_reports(
    report: &ScanReport,
    outdir: &Path,
    json: bool,
    csv: bool,
) -> Result<WrittenReports> {
    let mut written = WrittenReports::default();
    if !json && !csv {
        return Ok(written);
    }

    std::fs::create_dir_all(outdir).map_err(|e| AuditError::Io {
        path: outdir.to_path_buf(),
        source: e,
    })?;

    let base = outdir.join(report.base_name());

    if json {
        let path = base.with_extension("json");
        write_json_report(report, &path)?;
        written.json = Some(path);
    }

    if csv {
        let path = outdir.join(format!("{}_topdirs.csv", report.base_name()));
        write_top_dirs_csv(&report.results, &path)?;
        written.csv = Some(path);
    }

    Ok(written)
}
