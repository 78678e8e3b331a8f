mod aggregate;
mod fs;
mod request;
mod result;
mod stats;
mod top_files;
mod traverser;

pub use aggregate::DirAggregator;
pub use fs::{is_reparse_point, DirEntries, EntryKind, FileSystem, LocalFileSystem};
pub use request::{DepthLimit, ScanRequest};
pub use result::{RankedEntry, ScanResult};
pub use stats::ScanStats;
pub use top_files::TopFiles;
pub use traverser::{scan, scan_with};
