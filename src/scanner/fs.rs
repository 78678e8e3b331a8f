//! Filesystem access used by the traverser.
//!
//! The traverser only needs to list a directory and to classify one entry.
//! Keeping that behind [`FileSystem`] lets tests drive it with trees that
//! are awkward to build on a real disk (junction loops, unreadable roots,
//! entries vanishing mid-scan).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Symbolic link, never followed
    Symlink,
    /// Junction, mount point or other redirection, never followed
    ReparsePoint,
    Directory,
    File { size: u64 },
    /// Sockets, FIFOs, devices
    Other,
}

/// Iterator over the paths of one directory's children.
pub type DirEntries<'a> = Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a>;

/// Metadata provider for the traverser.
pub trait FileSystem {
    /// List the direct children of `dir`.
    fn read_dir(&self, dir: &Path) -> io::Result<DirEntries<'_>>;

    /// Classify `path` without following links.
    fn inspect(&self, path: &Path) -> io::Result<EntryKind>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<DirEntries<'_>> {
        let entries = fs::read_dir(dir)?;
        Ok(Box::new(entries.map(|entry| entry.map(|e| e.path()))))
    }

    fn inspect(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = fs::symlink_metadata(path)?;
        if let Some(kind) = redirection(path, &metadata) {
            return Ok(kind);
        }

        let file_type = metadata.file_type();
        if file_type.is_dir() {
            Ok(EntryKind::Directory)
        } else if file_type.is_file() {
            Ok(EntryKind::File {
                size: metadata.len(),
            })
        } else {
            Ok(EntryKind::Other)
        }
    }
}

/// True when `path` redirects somewhere other than a plain symlink does.
///
/// On Windows this is any reparse point whose tag is not a symbolic link
/// (junctions, volume mount points, cloud placeholders). On Unix it is a
/// directory sitting on a different device than its parent, i.e. a mount point.
pub fn is_reparse_point(path: &Path, metadata: &fs::Metadata) -> bool {
    redirection(path, metadata) == Some(EntryKind::ReparsePoint)
}

#[cfg(windows)]
const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x0400;
#[cfg(windows)]
const IO_REPARSE_TAG_SYMLINK: u32 = 0xA000_000C;

/// Classify an entry that must not be entered, or `None` for a regular one.
#[cfg(windows)]
fn redirection(path: &Path, metadata: &fs::Metadata) -> Option<EntryKind> {
    use std::os::windows::fs::MetadataExt;

    // std reports junctions as symlinks too, so the tag decides
    if metadata.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT == 0 {
        return None;
    }
    match reparse_tag(path) {
        Some(IO_REPARSE_TAG_SYMLINK) => Some(EntryKind::Symlink),
        _ => Some(EntryKind::ReparsePoint),
    }
}

/// Reparse tag of `path` itself, read from its directory listing record.
#[cfg(windows)]
fn reparse_tag(path: &Path) -> Option<u32> {
    use std::mem::MaybeUninit;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
    use windows_sys::Win32::Storage::FileSystem::{FindClose, FindFirstFileW, WIN32_FIND_DATAW};

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut data = MaybeUninit::<WIN32_FIND_DATAW>::uninit();
    // SAFETY: `wide` is NUL-terminated and `data` is a valid out pointer
    let handle = unsafe { FindFirstFileW(wide.as_ptr(), data.as_mut_ptr()) };
    if handle == INVALID_HANDLE_VALUE {
        return None;
    }
    // SAFETY: the search succeeded, so `data` is filled and `handle` is open
    let data = unsafe { data.assume_init() };
    unsafe { FindClose(handle) };

    Some(data.dwReserved0)
}

#[cfg(unix)]
fn redirection(path: &Path, metadata: &fs::Metadata) -> Option<EntryKind> {
    use std::os::unix::fs::MetadataExt;

    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        return Some(EntryKind::Symlink);
    }
    if !file_type.is_dir() {
        return None;
    }
    match path.parent().map(fs::symlink_metadata) {
        Some(Ok(parent)) if parent.dev() != metadata.dev() => Some(EntryKind::ReparsePoint),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn redirection(_path: &Path, metadata: &fs::Metadata) -> Option<EntryKind> {
    metadata.file_type().is_symlink().then_some(EntryKind::Symlink)
}
