//! Host facts recorded in the report header.

mod drives;

pub use drives::{list_drives, parse_mounts, DriveInfo, MountPoint};

/// Whether the process runs with administrative rights.
///
/// Unprivileged scans of system folders tend to end with a high `denied`
/// count, so the report records this next to the results.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}
