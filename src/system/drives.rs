use std::path::PathBuf;

use serde::Serialize;

/// Capacity of one mounted filesystem, as shown in the report header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriveInfo {
    /// Mount point path (e.g., "/", "/home")
    pub mount_point: PathBuf,

    /// Device name (e.g., "/dev/sda1")
    pub device: String,

    /// Filesystem type (e.g., "ext4")
    pub fs_type: String,

    /// Total capacity in bytes
    pub total: u64,

    /// Used space in bytes
    pub used: u64,

    /// Free space in bytes
    pub free: u64,

    /// Why the capacity could not be read, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DriveInfo {
    /// Capacity in binary units for the console table, e.g. `1 GiB`
    pub fn total_human(&self) -> String {
        humansize::format_size(self.total, humansize::BINARY)
    }

    pub fn used_human(&self) -> String {
        humansize::format_size(self.used, humansize::BINARY)
    }

    pub fn free_human(&self) -> String {
        humansize::format_size(self.free, humansize::BINARY)
    }
}

/// Information about a mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub device: String,
    pub path: PathBuf,
    pub fs_type: String,
}

/// List real filesystems with their capacity.
///
/// A mount whose capacity cannot be read still gets a row, with `error` set.
/// Platforms without a mount table yield an empty list.
pub fn list_drives() -> Vec<DriveInfo> {
    let mounts = match mount_points() {
        Ok(mounts) => mounts,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read mount table");
            return Vec::new();
        }
    };

    mounts
        .into_iter()
        .map(|mount| match capacity(&mount) {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(mount = %mount.path.display(), error = %e, "Failed to read capacity");
                DriveInfo {
                    mount_point: mount.path,
                    device: mount.device,
                    fs_type: mount.fs_type,
                    total: 0,
                    used: 0,
                    free: 0,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

#[cfg(target_os = "linux")]
fn mount_points() -> std::io::Result<Vec<MountPoint>> {
    let content = std::fs::read_to_string("/proc/mounts")?;
    Ok(parse_mounts(&content))
}

#[cfg(not(target_os = "linux"))]
fn mount_points() -> std::io::Result<Vec<MountPoint>> {
    Ok(Vec::new())
}

#[cfg(unix)]
fn capacity(mount: &MountPoint) -> std::io::Result<DriveInfo> {
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(&mount.path).map_err(std::io::Error::from)?;

    let block_size = stat.fragment_size() as u64;
    let total = stat.blocks() as u64 * block_size;
    let free = stat.blocks_free() as u64 * block_size;

    Ok(DriveInfo {
        mount_point: mount.path.clone(),
        device: mount.device.clone(),
        fs_type: mount.fs_type.clone(),
        total,
        used: total.saturating_sub(free),
        free,
        error: None,
    })
}

#[cfg(not(unix))]
fn capacity(mount: &MountPoint) -> std::io::Result<DriveInfo> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("capacity not available for {}", mount.path.display()),
    ))
}

/// Parse `/proc/mounts` content, keeping only real filesystems.
pub fn parse_mounts(content: &str) -> Vec<MountPoint> {
    let mut mounts = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 3 {
            continue;
        }

        let device = parts[0];
        let mount_point = parts[1];
        let fs_type = parts[2];

        if is_virtual_filesystem(fs_type, device, mount_point) {
            continue;
        }

        mounts.push(MountPoint {
            device: device.to_string(),
            path: PathBuf::from(unescape_mount_path(mount_point)),
            fs_type: fs_type.to_string(),
        });
    }

    mounts
}

// /proc/mounts encodes space, tab, newline and backslash as octal escapes
fn unescape_mount_path(raw: &str) -> String {
    raw.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}

/// Check if a filesystem type is virtual (not real disk)
fn is_virtual_filesystem(fs_type: &str, device: &str, mount_point: &str) -> bool {
    const VIRTUAL_FS: &[&str] = &[
        "proc",
        "sysfs",
        "devtmpfs",
        "devpts",
        "tmpfs",
        "securityfs",
        "cgroup",
        "cgroup2",
        "pstore",
        "debugfs",
        "hugetlbfs",
        "mqueue",
        "fusectl",
        "configfs",
        "binfmt_misc",
        "autofs",
        "efivarfs",
        "tracefs",
        "bpf",
        "overlay",
        "squashfs",
        "nsfs",
        "ramfs",
    ];

    if VIRTUAL_FS.contains(&fs_type) {
        return true;
    }

    if mount_point.starts_with("/snap/") || mount_point.starts_with("/var/lib/docker/") {
        return true;
    }

    // Virtual devices have no path; network mounts look like host:/export
    !device.starts_with('/') && device != "none" && !device.contains(':')
}
