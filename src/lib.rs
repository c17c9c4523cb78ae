//! projscan - static project audit.
//!
//! Walks a project tree, counts files by type, applies a small set of
//! textual heuristics to PHP and JavaScript sources, checks for well-known
//! project files and test files, and reduces everything to a 0-100 health
//! score with prioritized recommendations.
//!
//! # Architecture
//!
//! The pipeline is strictly sequential and single-pass:
//!
//! - `scan`: recursive directory walk and per-extension file counts
//! - `detect`: rule sets for PHP and JavaScript, config and test checks
//! - `score`: additive penalty model
//! - `report`: terminal and JSON output, recommendations
//! - `audit`: runs the steps above in order
//! - `config`: optional YAML configuration
//!
//! Rules only look at raw text. There is no parsing, so comment handling is
//! a same-line approximation and rules relying on it are marked heuristic.

pub mod audit;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;
pub mod scan;
pub mod score;

pub use audit::{run_audit, AuditReport, Auditor};
pub use config::AuditConfig;
pub use detect::{Category, ConfigPresence, DetectionResult, Issue, TestInventory};
pub use scan::{scan, FileStats, ScanError, Scanner};
pub use score::HealthScore;
