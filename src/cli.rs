use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Disk Auditor - find the largest folders and files under a set of roots
#[derive(Parser, Debug)]
#[command(name = "disk-auditor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "DISK_AUDITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides -v)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan roots for the largest folders and files
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Roots to scan (default: configured roots, else cache, local data and temp dirs)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Relative depth to expand; negative means unlimited (can be slow)
    #[arg(short = 'd', long, value_name = "N", allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Number of largest folders to report per level
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Number of largest files to report
    #[arg(short = 'f', long, value_name = "N", allow_negative_numbers = true)]
    pub files: Option<i64>,

    /// Directory for report files
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Print the JSON report to stdout instead of text
    #[arg(long)]
    pub json: bool,

    /// Don't write report files
    #[arg(long)]
    pub no_report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_scan_command() {
        let cli = Cli::parse_from(["disk-auditor", "scan", "/home", "/var/tmp"]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(
                    args.roots,
                    vec![PathBuf::from("/home"), PathBuf::from("/var/tmp")]
                );
                assert_eq!(args.depth, None);
                assert!(!args.json);
                assert!(!args.no_report);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_scan_without_roots() {
        let cli = Cli::parse_from(["disk-auditor", "scan"]);
        match cli.command {
            Command::Scan(args) => assert!(args.roots.is_empty()),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_negative_depth() {
        let cli = Cli::parse_from(["disk-auditor", "scan", "-d", "-1", "/home"]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.depth, Some(-1));
                assert_eq!(args.roots, vec![PathBuf::from("/home")]);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_limits_and_flags() {
        let cli = Cli::parse_from([
            "disk-auditor",
            "scan",
            "--top",
            "5",
            "--files",
            "7",
            "--outdir",
            "/tmp/out",
            "--json",
            "--no-report",
        ]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.top, Some(5));
                assert_eq!(args.files, Some(7));
                assert_eq!(args.outdir, Some(PathBuf::from("/tmp/out")));
                assert!(args.json);
                assert!(args.no_report);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["disk-auditor", "-vv", "scan"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["disk-auditor", "completions", "bash"]);
        assert!(matches!(cli.command, Command::Completions(_)));
    }
}
