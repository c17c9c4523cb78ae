//! Project health scoring.
//!
//! Starts at 100 and subtracts fixed penalties; the result is clamped at 0.
//! Penalties are not normalized by project size.

use serde::Serialize;

use crate::detect::{ConfigFile, ConfigPresence, DetectionResult, TestInventory};

/// Point deductions.
pub mod points {
    pub const SERVER_ISSUE: i32 = 2; // per PHP issue
    pub const CLIENT_ISSUE: i32 = 1; // per JS issue
    pub const MISSING_DOCKER_COMPOSE: i32 = 5;
    pub const MISSING_PACKAGE_JSON: i32 = 5;
    pub const MISSING_README: i32 = 3;
    pub const MISSING_JEST_CONFIG: i32 = 3;
    pub const NO_TESTS: i32 = 5;
}

/// Starting score before deductions.
pub const MAX_SCORE: i32 = 100;

/// Verdict thresholds (inclusive lower bounds).
pub mod verdicts {
    pub const EXCELLENT_MIN: i32 = 90;
    pub const GOOD_MIN: i32 = 70;
}

/// Qualitative reading of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Verdict {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= verdicts::EXCELLENT_MIN => Verdict::Excellent,
            s if s >= verdicts::GOOD_MIN => Verdict::Good,
            _ => Verdict::NeedsImprovement,
        }
    }
}

/// One applied deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Penalty {
    pub reason: String,
    pub points: i32,
}

/// The calculated health score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    /// Score from 0-100, higher = healthier
    pub score: i32,
    /// Score before clamping at 0
    pub raw: i32,
    pub verdict: Verdict,
    /// Deductions in the order they were applied
    pub penalties: Vec<Penalty>,
    /// Minimum acceptable score, if one was requested
    pub threshold: Option<i32>,
    /// Whether the score meets the threshold (always true without one)
    pub passed: bool,
}

impl HealthScore {
    /// Sum of all deductions.
    pub fn total_penalty(&self) -> i32 {
        self.penalties.iter().map(|p| p.points).sum()
    }
}

/// Calculate the health score.
///
/// File statistics are reported alongside but never enter the formula.
pub fn calculate(
    server: &DetectionResult,
    client: &DetectionResult,
    config: &ConfigPresence,
    tests: &TestInventory,
) -> HealthScore {
    let mut penalties = Vec::new();

    let mut add = |reason: String, points: i32| {
        if points > 0 {
            penalties.push(Penalty { reason, points });
        }
    };

    add(
        format!("{} PHP issue(s)", server.len()),
        server.len() as i32 * points::SERVER_ISSUE,
    );
    add(
        format!("{} JS issue(s)", client.len()),
        client.len() as i32 * points::CLIENT_ISSUE,
    );

    let missing = [
        (ConfigFile::DockerCompose, points::MISSING_DOCKER_COMPOSE),
        (ConfigFile::PackageJson, points::MISSING_PACKAGE_JSON),
        (ConfigFile::Readme, points::MISSING_README),
        (ConfigFile::JestConfig, points::MISSING_JEST_CONFIG),
    ];
    for (file, pts) in missing {
        if !config.is_present(file) {
            add(format!("{} missing", file.path()), pts);
        }
    }

    if tests.total == 0 {
        add("no test files".to_string(), points::NO_TESTS);
    }

    let raw = MAX_SCORE - penalties.iter().map(|p| p.points).sum::<i32>();
    let score = raw.max(0);

    HealthScore {
        score,
        raw,
        verdict: Verdict::from_score(score),
        penalties,
        threshold: None,
        passed: true,
    }
}

/// Calculate the health score and compare it to a minimum.
pub fn calculate_with_threshold(
    server: &DetectionResult,
    client: &DetectionResult,
    config: &ConfigPresence,
    tests: &TestInventory,
    threshold: i32,
) -> HealthScore {
    let mut health = calculate(server, client, config, tests);
    health.threshold = Some(threshold);
    health.passed = health.score >= threshold;
    health
}
