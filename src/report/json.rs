use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ScanReport;
use crate::error::{AuditError, Result};

/// Write the report as pretty-printed JSON.
pub fn write_json_report(report: &ScanReport, path: &Path) -> Result<()> {
    let io_err = |e| AuditError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| AuditError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}
