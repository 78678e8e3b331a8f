use std::path::{Path, PathBuf};
use std::time::Instant;

use super::aggregate::DirAggregator;
use super::fs::{EntryKind, FileSystem, LocalFileSystem};
use super::request::ScanRequest;
use super::result::ScanResult;
use super::stats::ScanStats;
use super::top_files::TopFiles;

/// Scan the real filesystem under `request.root()`.
pub fn scan(request: &ScanRequest) -> ScanResult {
    scan_with(&LocalFileSystem, request)
}

/// Walk the tree below the request root and fold it into a [`ScanResult`].
///
/// The walk uses an explicit work list, so deep trees never grow the call
/// stack. Links and reparse points are never entered, directories deeper than
/// the depth limit are counted but not expanded, and every I/O failure is
/// counted in the stats instead of stopping the scan. An unreadable root
/// still produces a result.
pub fn scan_with<F: FileSystem + ?Sized>(fs: &F, request: &ScanRequest) -> ScanResult {
    let started = Instant::now();
    let root = request.root();

    tracing::info!(root = %root.display(), depth = %request.depth(), "Scanning root");

    let mut walk = Walk {
        root,
        stats: ScanStats::new(root.to_path_buf(), request.depth()),
        dirs: DirAggregator::new(),
        files: TopFiles::new(request.top_files()),
    };

    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        walk.expand(fs, request, &dir, &mut pending);
    }

    let Walk {
        mut stats,
        dirs,
        files,
        ..
    } = walk;
    stats.bytes_at_root = dirs.bytes_at_root();
    stats.finish(started.elapsed());

    tracing::info!(
        root = %root.display(),
        files = stats.files_scanned,
        dirs = stats.dirs_scanned,
        bytes = stats.bytes_total,
        denied = stats.denied,
        errors = stats.errors,
        skipped_reparse = stats.skipped_reparse,
        elapsed_sec = stats.elapsed_sec,
        "Scan finished"
    );

    ScanResult {
        top_dirs_level1: dirs.top_level1(request.top_dirs()),
        top_dirs_level2: dirs.top_level2(request.top_dirs()),
        top_files: files.into_snapshot(),
        stats,
    }
}

struct Walk<'a> {
    root: &'a Path,
    stats: ScanStats,
    dirs: DirAggregator,
    files: TopFiles,
}

impl Walk<'_> {
    fn expand<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        request: &ScanRequest,
        dir: &Path,
        pending: &mut Vec<PathBuf>,
    ) {
        self.stats.dirs_scanned += 1;

        let entries = match fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(path = %dir.display(), error = %err, "Cannot read directory");
                self.stats.record_failure(&err);
                return;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    tracing::trace!(path = %dir.display(), error = %err, "Cannot read directory entry");
                    self.stats.record_failure(&err);
                    continue;
                }
            };

            let kind = match fs.inspect(&path) {
                Ok(kind) => kind,
                Err(err) => {
                    tracing::trace!(path = %path.display(), error = %err, "Cannot inspect entry");
                    self.stats.record_failure(&err);
                    continue;
                }
            };

            match kind {
                EntryKind::Symlink | EntryKind::Other => {}
                EntryKind::ReparsePoint => {
                    tracing::trace!(path = %path.display(), "Skipping reparse point");
                    self.stats.skipped_reparse += 1;
                }
                EntryKind::Directory => {
                    if request.depth().allows(self.relative_depth(&path)) {
                        pending.push(path);
                    }
                }
                EntryKind::File { size } => self.add_file(path, size),
            }
        }
    }

    fn add_file(&mut self, path: PathBuf, size: u64) {
        self.stats.files_scanned += 1;
        self.stats.bytes_total += size;

        // Children are always built by joining onto the root, so this only
        // falls back if a provider hands out foreign paths.
        let relative = path.strip_prefix(self.root).unwrap_or(&path);
        self.dirs.record(relative, size);

        self.files.offer(size, path.to_string_lossy().into_owned());
    }

    fn relative_depth(&self, path: &Path) -> usize {
        path.strip_prefix(self.root)
            .map(|rel| rel.components().count())
            .unwrap_or(usize::MAX)
    }
}
