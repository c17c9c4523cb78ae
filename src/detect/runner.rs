//! Detection runner that applies a detector's rules to a set of files.

use std::path::{Path, PathBuf};

use super::rules::{Detector, RuleContext};
use super::{DetectionResult, Issue, SkippedFile};

/// Executes a detector against files under an audit root.
pub struct Runner {
    base_dir: PathBuf,
    context: RuleContext,
}

impl Runner {
    /// Create a new detection runner.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            context: RuleContext::default(),
        }
    }

    /// Set the inputs passed to every rule.
    pub fn context(mut self, context: RuleContext) -> Self {
        self.context = context;
        self
    }

    /// Run every rule of `detector` against each file, in file order.
    ///
    /// A file that cannot be read is logged and recorded as skipped; it
    /// never aborts the run.
    pub fn run<P: AsRef<Path>>(&self, detector: &Detector, files: &[P]) -> DetectionResult {
        let mut result = DetectionResult::new();

        for file in files {
            let file = file.as_ref();
            let relative = self.relative_path(file);

            let content = match std::fs::read(file) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", file.display(), e);
                    result.skipped.push(SkippedFile {
                        file: relative,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            result.scanned += 1;

            for rule in &detector.rules {
                if let Some(description) = rule.evaluate(&content, &self.context) {
                    tracing::debug!("{} rule {} matched {}", detector.name, rule.id, file.display());
                    result.add_issue(Issue {
                        file: relative.clone(),
                        category: rule.category,
                        rule: rule.id.to_string(),
                        description,
                        confidence: rule.confidence,
                    });
                }
            }
        }

        result
    }

    fn relative_path(&self, file: &Path) -> PathBuf {
        file.strip_prefix(&self.base_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file.to_path_buf())
    }
}
