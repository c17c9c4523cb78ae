//! Output formatting for audit results.
//!
//! Supports two output formats:
//! - Pretty: emoji-annotated terminal report for humans
//! - JSON: the full audit aggregate plus recommendations

use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::audit::AuditReport;
use crate::detect::{Category, ConfigFile, DetectionResult, Issue};
use crate::scan::FileCategory;
use crate::score::{HealthScore, Verdict};

// =============================================================================
// Recommendations
// =============================================================================

/// One prioritized follow-up, derived from already computed results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the list
    pub priority: usize,
    pub icon: &'static str,
    pub title: &'static str,
    /// Issues backing this recommendation, if any
    pub issues: Vec<Issue>,
}

/// Build the recommendation list for a report.
///
/// This only filters what the audit already found; nothing is recomputed.
pub fn recommendations(report: &AuditReport) -> Vec<Recommendation> {
    let mut recs: Vec<(&'static str, &'static str, Vec<Issue>)> = Vec::new();

    if !report.server.is_empty() {
        recs.push((
            "🔒",
            "Fix PHP security issues",
            report.server.by_category(Category::Security).cloned().collect(),
        ));
    }

    if !report.client.is_empty() {
        recs.push((
            "⚡",
            "Optimize JavaScript performance",
            report
                .client
                .by_category(Category::Performance)
                .cloned()
                .collect(),
        ));
    }

    if report.tests.total == 0 {
        recs.push(("🧪", "Add unit and integration tests", Vec::new()));
    }

    if !report.config.is_present(ConfigFile::JestConfig) {
        recs.push(("📚", "Configure Jest for the test suite", Vec::new()));
    }

    if !report.config.is_present(ConfigFile::Readme) {
        recs.push(("📚", "Create a README.md", Vec::new()));
    }

    recs.into_iter()
        .enumerate()
        .map(|(i, (icon, title, issues))| Recommendation {
            priority: i + 1,
            icon,
            title,
            issues,
        })
        .collect()
}

/// Render a path with `/` separators regardless of platform.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    #[serde(flatten)]
    report: &'a AuditReport,
    recommendations: Vec<Recommendation>,
}

/// Write the report as pretty-printed JSON.
pub fn write_json_to<W: Write>(out: &mut W, report: &AuditReport) -> anyhow::Result<()> {
    let json = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        report,
        recommendations: recommendations(report),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

/// Write the report as JSON to stdout.
pub fn write_json(report: &AuditReport) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json_to(&mut out, report)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write the human-readable report to stdout.
pub fn write_pretty(report: &AuditReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_pretty_to(&mut out, report)
}

/// Write the human-readable report.
pub fn write_pretty_to<W: Write>(out: &mut W, report: &AuditReport) -> io::Result<()> {
    writeln!(out, "{}", "🚀 PROJECT AUDIT".cyan().bold())?;
    writeln!(out, "================================")?;
    writeln!(out, "  {}{}", "Root: ".dimmed(), display_path(&report.root))?;

    writeln!(out)?;
    writeln!(out, "{}", "📁 FILE STRUCTURE".bold())?;
    for category in FileCategory::ALL {
        let count = report.stats.get(&category).copied().unwrap_or(0);
        writeln!(out, "  {}: {}", category.label(), count)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "🐘 PHP SCAN".bold())?;
    write_detection(out, "PHP", &report.server)?;

    writeln!(out)?;
    writeln!(out, "{}", "📱 JS SCAN".bold())?;
    write_detection(out, "JS", &report.client)?;

    writeln!(out)?;
    writeln!(out, "{}", "⚙️ CONFIGURATION".bold())?;
    for entry in &report.config.entries {
        if entry.present {
            writeln!(out, "  {}: ✅ {}", entry.path, "found".green())?;
        } else {
            writeln!(out, "  {}: ❌ {}", entry.path, "not found".red())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "🧪 TESTS".bold())?;
    writeln!(out, "  Unit tests: {}", report.tests.unit_tests)?;
    writeln!(out, "  Spec tests: {}", report.tests.spec_tests)?;
    writeln!(out, "  Total tests: {}", report.tests.total)?;

    writeln!(out)?;
    writeln!(out, "{}", "📊 FINAL SCORE".bold())?;
    write_score(out, &report.score)?;

    writeln!(out)?;
    writeln!(out, "{}", "🎯 CONCLUSION".bold())?;
    write_verdict(out, report.score.verdict)?;

    writeln!(out)?;
    writeln!(out, "{}", "🚀 PRIORITY RECOMMENDATIONS".bold())?;
    let recs = recommendations(report);
    if recs.is_empty() {
        writeln!(out, "  Nothing to do")?;
    }
    for rec in &recs {
        writeln!(out, "{}. {} {}", rec.priority, rec.icon, rec.title)?;
        for issue in &rec.issues {
            writeln!(
                out,
                "   - {}: {}",
                display_path(&issue.file),
                issue.description
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "🎉 AUDIT COMPLETE".bold())?;
    Ok(())
}

fn write_detection<W: Write>(out: &mut W, label: &str, result: &DetectionResult) -> io::Result<()> {
    writeln!(out, "  {} issues: {}", label, result.len())?;

    for issue in &result.issues {
        writeln!(
            out,
            "  {} {}: {} {}",
            severity_glyph(issue.category),
            display_path(&issue.file).blue(),
            issue.description,
            format!("[{}]", issue.category).dimmed()
        )?;
    }

    for skipped in &result.skipped {
        writeln!(
            out,
            "  {} {}: {}",
            "⏭".dimmed(),
            display_path(&skipped.file),
            format!("not read ({})", skipped.reason).dimmed()
        )?;
    }

    Ok(())
}

fn severity_glyph(category: Category) -> &'static str {
    match category {
        Category::Security => "❌",
        Category::Quality | Category::Performance => "⚠️",
    }
}

fn write_score<W: Write>(out: &mut W, score: &HealthScore) -> io::Result<()> {
    let value = score.score.to_string();
    let colored_value = match score.verdict {
        Verdict::Excellent => value.green().bold(),
        Verdict::Good => value.yellow(),
        Verdict::NeedsImprovement => value.red(),
    };
    writeln!(
        out,
        "  Score: {}/100 {}",
        colored_value,
        format!("(-{} points)", score.total_penalty()).dimmed()
    )?;

    for penalty in &score.penalties {
        writeln!(
            out,
            "    {}",
            format!("-{:<3} {}", penalty.points, penalty.reason).dimmed()
        )?;
    }

    if let Some(threshold) = score.threshold {
        let status = if score.passed {
            "PASSED".green()
        } else {
            "FAILED".red()
        };
        writeln!(out, "  {}  {}", format!("Minimum: {}", threshold).dimmed(), status)?;
    }

    Ok(())
}

fn write_verdict<W: Write>(out: &mut W, verdict: Verdict) -> io::Result<()> {
    match verdict {
        Verdict::Excellent => writeln!(
            out,
            "✅ {} - project in very good shape",
            "EXCELLENT".green().bold()
        ),
        Verdict::Good => writeln!(
            out,
            "✅ {} - project in good shape with room for improvement",
            "GOOD".green()
        ),
        Verdict::NeedsImprovement => writeln!(
            out,
            "❌ {} - project needs significant fixes",
            "NEEDS IMPROVEMENT".red()
        ),
    }
}
