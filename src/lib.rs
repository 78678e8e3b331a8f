//! Disk Auditor - finds what is filling up a disk
//!
//! This crate provides functionality for:
//! - Bounded-depth scanning of directory trees that never follows links,
//!   junctions or mount points and never aborts on unreadable entries
//! - Ranking the largest first- and second-level folders and the largest files
//!   in memory proportional to the requested list sizes
//! - JSON and CSV reports of a scan run

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod system;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuditError, Result};
pub use scanner::{scan, ScanRequest, ScanResult};
