use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// File name looked up under the user config directory.
const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "disk-auditor";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Roots to scan when none are given on the command line (empty = built-in defaults)
    pub roots: Vec<PathBuf>,
    /// Relative depth to expand; negative = unlimited
    pub depth: i64,
    /// Number of largest folders to report per level
    pub top_dirs: i64,
    /// Number of largest files to report
    pub top_files: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for report files (default: `out` next to the executable)
    pub outdir: Option<PathBuf>,
    /// Write the JSON report
    pub write_json: bool,
    /// Write the CSV export of top folders
    pub write_csv: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: vec![],
            depth: 6,
            top_dirs: 25,
            top_files: 30,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            outdir: None,
            write_json: true,
            write_csv: true,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// `<config_dir>/disk-auditor/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.top_dirs < 0 {
            return Err(ConfigError::Invalid(format!(
                "scan.top_dirs must not be negative (got {})",
                self.scan.top_dirs
            ))
            .into());
        }
        if self.scan.top_files < 0 {
            return Err(ConfigError::Invalid(format!(
                "scan.top_files must not be negative (got {})",
                self.scan.top_files
            ))
            .into());
        }
        Ok(())
    }
}

/// Locations derived once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding the running executable (or the working directory)
    pub app_root: PathBuf,
}

impl AppPaths {
    /// Resolve the application root from the running executable, falling
    /// back to the current directory.
    pub fn discover() -> Self {
        let app_root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { app_root }
    }

    pub fn default_report_dir(&self) -> PathBuf {
        self.app_root.join("out")
    }
}

/// Roots used when neither the command line nor the config name any.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = [dirs::cache_dir(), dirs::data_local_dir()]
        .into_iter()
        .flatten()
        .collect();
    roots.push(std::env::temp_dir());
    roots.dedup();
    roots
}

/// Expand `~`, `$VAR`, `${VAR}` and `%VAR%` in a root path.
///
/// Unset variables are left as written, so the root later shows up as not found.
pub fn expand_root(root: &Path) -> PathBuf {
    match root.to_str() {
        Some(text) => expand_path(text, |name| std::env::var(name).ok(), dirs::home_dir()),
        None => root.to_path_buf(),
    }
}

fn expand_path(
    text: &str,
    lookup: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> PathBuf {
    let expanded = expand_vars(text, lookup);

    if let (Some(rest), Some(home)) = (expanded.strip_prefix('~'), home) {
        if rest.is_empty() || rest.starts_with(['/', '\\']) {
            let rest = rest.trim_start_matches(['/', '\\']);
            return if rest.is_empty() { home } else { home.join(rest) };
        }
    }
    PathBuf::from(expanded)
}

fn expand_vars(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(['$', '%']) {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match variable_at(tail).and_then(|(name, len)| lookup(name).map(|value| (value, len))) {
            Some((value, len)) => {
                output.push_str(&value);
                rest = &tail[len..];
            }
            None => {
                output.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Variable name referenced at the start of `tail` and the length of the reference.
fn variable_at(tail: &str) -> Option<(&str, usize)> {
    let is_name = |c: char| c.is_ascii_alphanumeric() || c == '_';

    if let Some(body) = tail.strip_prefix("${") {
        let end = body.find('}')?;
        return Some((&body[..end], end + 3));
    }
    if let Some(body) = tail.strip_prefix('%') {
        let end = body.find('%')?;
        let name = &body[..end];
        return (!name.is_empty() && name.chars().all(is_name)).then_some((name, end + 2));
    }

    let body = tail.strip_prefix('$')?;
    let end = body.find(|c: char| !is_name(c)).unwrap_or(body.len());
    (end > 0).then_some((&body[..end], end + 1))
}
