//! Core types for detection results.

use serde::Serialize;
use std::path::PathBuf;

/// What kind of concern an issue raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Quality,
    Performance,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Security => write!(f, "security"),
            Category::Quality => write!(f, "quality"),
            Category::Performance => write!(f, "performance"),
        }
    }
}

/// How much a rule's match can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The textual condition is exactly what the rule reports.
    Exact,
    /// The rule relies on approximate comment or call-site detection.
    Heuristic,
}

/// A single detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Path relative to the audit root.
    pub file: PathBuf,
    pub category: Category,
    pub rule: String,
    pub description: String,
    pub confidence: Confidence,
}

/// A file that could not be read and contributed no issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: PathBuf,
    pub reason: String,
}

/// Results of running one detector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub issues: Vec<Issue>,
    pub skipped: Vec<SkippedFile>,
    /// Number of files read successfully
    pub scanned: usize,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of a single category, in detection order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category(category).count()
    }
}
