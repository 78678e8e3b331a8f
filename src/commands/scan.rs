//! Scan command implementation

use std::path::PathBuf;

use crate::cli::ScanArgs;
use crate::config::{default_roots, expand_root, AppPaths, Config};
use crate::error::{AuditError, Result};
use crate::report::{self, ScanReport};
use crate::scanner::{self, ScanRequest};
use crate::system;

/// Share of denied/failed entries above which a root is flagged as poorly covered.
const LOW_COVERAGE_RATIO: f64 = 0.5;

/// Parameters after merging command-line flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub roots: Vec<PathBuf>,
    pub depth: i64,
    pub top_dirs: i64,
    pub top_files: i64,
    /// `None` when no report files should be written
    pub outdir: Option<PathBuf>,
}

impl ScanPlan {
    pub fn resolve(args: &ScanArgs, config: &Config, paths: &AppPaths) -> Self {
        let roots = if !args.roots.is_empty() {
            args.roots.clone()
        } else if !config.scan.roots.is_empty() {
            config.scan.roots.clone()
        } else {
            default_roots()
        };
        let roots = roots.iter().map(|root| expand_root(root)).collect();

        let outdir = if args.no_report {
            None
        } else {
            Some(
                args.outdir
                    .clone()
                    .or_else(|| config.report.outdir.clone())
                    .unwrap_or_else(|| paths.default_report_dir()),
            )
        };

        Self {
            roots,
            depth: args.depth.unwrap_or(config.scan.depth),
            top_dirs: args.top.unwrap_or(config.scan.top_dirs),
            top_files: args.files.unwrap_or(config.scan.top_files),
            outdir,
        }
    }

    /// Validate every root into a request before anything is scanned.
    pub fn requests(&self) -> Result<Vec<ScanRequest>> {
        self.roots
            .iter()
            .map(|root| ScanRequest::new(root, self.depth, self.top_dirs, self.top_files))
            .collect()
    }
}

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, paths: &AppPaths) -> Result<()> {
    let plan = ScanPlan::resolve(&args, config, paths);
    let requests = plan.requests()?;

    tracing::debug!(?plan, "Resolved scan plan");

    let drives = system::list_drives();
    if !args.json {
        println!("{}", report::render_drives(&drives));
    }

    let mut results = Vec::with_capacity(requests.len());
    for request in &requests {
        if !request.root().exists() {
            let line = report::render_skipped(request.root());
            if args.json {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
            continue;
        }

        let result = scanner::scan(request);

        if result.stats.failure_ratio() > LOW_COVERAGE_RATIO {
            tracing::warn!(
                root = %request.root().display(),
                denied = result.stats.denied,
                errors = result.stats.errors,
                "Most entries could not be read; results are incomplete"
            );
        }
        if !args.json {
            println!("{}", report::render_result(&result));
        }
        results.push(result);
    }

    let scan_report = ScanReport::new(results, drives, system::is_elevated());

    if args.json {
        let json = serde_json::to_string_pretty(&scan_report).map_err(|e| AuditError::Json {
            path: PathBuf::from("<stdout>"),
            source: e,
        })?;
        println!("{}", json);
    }

    if let Some(outdir) = &plan.outdir {
        let written = report::write_reports(
            &scan_report,
            outdir,
            config.report.write_json,
            config.report.write_csv,
        )?;

        if !written.is_empty() {
            let mut lines = String::from("Saved:");
            for path in written.paths() {
                lines.push_str(&format!("\n- {}", path.display()));
            }
            if args.json {
                eprintln!("{}", lines);
            } else {
                println!("{}", lines);
            }
        }
    }

    Ok(())
}
