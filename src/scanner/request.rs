use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// How far below the scan root directories are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimit {
    /// Expand every directory reached.
    Unlimited,
    /// Expand directories at most this many components below the root.
    Levels(usize),
}

impl DepthLimit {
    /// Map a signed depth where any negative value means unlimited.
    pub fn from_signed(depth: i64) -> Self {
        match usize::try_from(depth) {
            Ok(levels) => DepthLimit::Levels(levels),
            Err(_) => DepthLimit::Unlimited,
        }
    }

    /// Whether a directory `relative_depth` components below root may be expanded.
    pub fn allows(&self, relative_depth: usize) -> bool {
        match self {
            DepthLimit::Unlimited => true,
            DepthLimit::Levels(max) => relative_depth <= *max,
        }
    }

    /// Signed form used in reports: -1 for unlimited.
    pub fn as_signed(&self) -> i64 {
        match self {
            DepthLimit::Unlimited => -1,
            DepthLimit::Levels(levels) => i64::try_from(*levels).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Unlimited => write!(f, "unlimited"),
            DepthLimit::Levels(levels) => write!(f, "{}", levels),
        }
    }
}

impl Serialize for DepthLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_signed())
    }
}

/// A single validated scan invocation.
///
/// Built once per root and consumed by the traverser; there is no way to
/// change it after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    root: PathBuf,
    depth: DepthLimit,
    top_dirs: usize,
    top_files: usize,
}

impl ScanRequest {
    /// Validate raw parameters into a request.
    ///
    /// A negative `depth` means unlimited descent. Negative `top_dirs` or
    /// `top_files` are rejected before any traversal happens; zero disables
    /// the corresponding ranked list. A relative root is resolved against the
    /// current directory, without following links or checking existence.
    pub fn new(root: impl AsRef<Path>, depth: i64, top_dirs: i64, top_files: i64) -> Result<Self> {
        let top_dirs = non_negative("top_dirs", top_dirs)?;
        let top_files = non_negative("top_files", top_files)?;

        let root = root.as_ref();
        let root = std::path::absolute(root).map_err(|e| crate::error::AuditError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            root,
            depth: DepthLimit::from_signed(depth),
            top_dirs,
            top_files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn depth(&self) -> DepthLimit {
        self.depth
    }

    pub fn top_dirs(&self) -> usize {
        self.top_dirs
    }

    pub fn top_files(&self) -> usize {
        self.top_files
    }
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| ConfigError::Invalid(format!("{} must not be negative (got {})", name, value)).into())
}
