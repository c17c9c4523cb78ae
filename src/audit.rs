//! Full audit pipeline: scan, detect, check config, check tests, score.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::AuditConfig;
use crate::detect::{
    check_config, check_tests, client, server, ConfigPresence, DetectionResult, Detector,
    RuleContext, Runner, TestInventory,
};
use crate::scan::{FileStats, ScanError, Scanner};
use crate::score::{self, HealthScore};

/// Everything one audit run computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub root: PathBuf,
    pub stats: FileStats,
    /// PHP issues
    pub server: DetectionResult,
    /// JavaScript issues
    pub client: DetectionResult,
    pub config: ConfigPresence,
    pub tests: TestInventory,
    pub score: HealthScore,
}

/// Runs the audit against one project root.
pub struct Auditor {
    root: PathBuf,
    config: AuditConfig,
    threshold: Option<i32>,
}

impl Auditor {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: AuditConfig::default(),
            threshold: None,
        }
    }

    pub fn config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Minimum score; below it the report is marked as failed.
    pub fn threshold(mut self, threshold: Option<i32>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run every step in order. Only structural failures (an unusable root
    /// or an unlistable directory) are returned as errors.
    pub fn run(&self) -> Result<AuditReport, ScanError> {
        let scanner = Scanner::new(&self.root).excluded_dirs(&self.config.excluded_dirs);

        let stats = scanner.count_files()?;

        let runner = Runner::new(&self.root)
            .context(RuleContext::new(self.config.unused_identifiers.clone()));
        let server = detect_with(&scanner, &runner, &server::detector())?;
        let client = detect_with(&scanner, &runner, &client::detector())?;

        let config = check_config(&self.root);
        let tests = check_tests(&scanner)?;

        let score = match self.threshold {
            Some(t) => score::calculate_with_threshold(&server, &client, &config, &tests, t),
            None => score::calculate(&server, &client, &config, &tests),
        };

        tracing::debug!(
            "audit of {} finished: {} PHP issue(s), {} JS issue(s), score {}",
            self.root.display(),
            server.len(),
            client.len(),
            score.score
        );

        Ok(AuditReport {
            root: self.root.clone(),
            stats,
            server,
            client,
            config,
            tests,
            score,
        })
    }
}

fn detect_with(
    scanner: &Scanner,
    runner: &Runner,
    detector: &Detector,
) -> Result<DetectionResult, ScanError> {
    let files = scanner.scan(detector.suffix)?;
    Ok(runner.run(detector, &files))
}

/// Audit `root` with the given configuration.
pub fn run_audit<P: AsRef<Path>>(root: P, config: &AuditConfig) -> Result<AuditReport, ScanError> {
    Auditor::new(root).config(config.clone()).run()
}
