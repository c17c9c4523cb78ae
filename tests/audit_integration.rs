//! Integration tests for the full audit pipeline.
//!
//! These tests run the audit against the fixture project under
//! `testdata/sample_project` and against temporary trees.

use std::path::{Path, PathBuf};

use projscan::audit::{run_audit, AuditReport};
use projscan::config::AuditConfig;
use projscan::detect::{Category, ConfigFile};
use projscan::report;
use projscan::scan::{self, FileCategory, ScanError};
use projscan::score::Verdict;
use tempfile::TempDir;

fn sample_project() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("sample_project")
}

fn run_sample() -> AuditReport {
    run_audit(sample_project(), &AuditConfig::default()).expect("audit should succeed")
}

fn issue_list(result: &projscan::DetectionResult) -> Vec<(String, String)> {
    result
        .issues
        .iter()
        .map(|i| (report::display_path(&i.file), i.rule.clone()))
        .collect()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_sample_file_stats() {
    let report = run_sample();

    assert_eq!(report.stats[&FileCategory::Php], 3);
    assert_eq!(report.stats[&FileCategory::Js], 5);
    assert_eq!(report.stats[&FileCategory::Sql], 1);
    assert_eq!(report.stats[&FileCategory::Markdown], 2);
    assert_eq!(report.stats[&FileCategory::PowerShell], 0);
    assert_eq!(report.stats[&FileCategory::Json], 1);
    assert_eq!(report.stats[&FileCategory::Yaml], 1);
}

#[test]
fn test_sample_php_issues_in_file_then_rule_order() {
    let report = run_sample();

    assert_eq!(
        issue_list(&report.server),
        vec![
            ("api/login.php".to_string(), "json-error-leak".to_string()),
            ("api/users.php".to_string(), "debug-output".to_string()),
            ("api/users.php".to_string(), "unparameterized-query".to_string()),
        ]
    );
    assert_eq!(report.server.scanned, 3);
    assert_eq!(report.server.count(Category::Security), 2);
}

#[test]
fn test_sample_js_issues() {
    let report = run_sample();

    assert_eq!(
        issue_list(&report.client),
        vec![
            ("src/app.js".to_string(), "console-log".to_string()),
            ("src/app.js".to_string(), "unused-variables".to_string()),
            ("src/hooks.js".to_string(), "effect-without-deps".to_string()),
        ]
    );
    assert!(report.client.issues[1].description.contains("duplicateUser"));
}

#[test]
fn test_sample_config_and_tests() {
    let report = run_sample();

    assert!(report.config.is_present(ConfigFile::DockerCompose));
    assert!(report.config.is_present(ConfigFile::PackageJson));
    assert!(report.config.is_present(ConfigFile::Readme));
    assert!(!report.config.is_present(ConfigFile::JestConfig));
    assert!(!report.config.is_present(ConfigFile::TailwindConfig));

    assert_eq!(report.tests.unit_tests, 1);
    assert_eq!(report.tests.spec_tests, 1);
    assert_eq!(report.tests.total, 2);
}

#[test]
fn test_sample_score() {
    let report = run_sample();

    // 3 PHP issues (6), 3 JS issues (3), jest.config.js missing (3)
    assert_eq!(report.score.score, 88);
    assert_eq!(report.score.verdict, Verdict::Good);
    assert!(report.score.passed);
}

#[test]
fn test_sample_recommendations() {
    let report = run_sample();
    let recs = report::recommendations(&report);

    let titles: Vec<_> = recs.iter().map(|r| r.title).collect();
    assert_eq!(
        titles,
        vec![
            "Fix PHP security issues",
            "Optimize JavaScript performance",
            "Configure Jest for the test suite",
        ]
    );

    let security: Vec<_> = recs[0]
        .issues
        .iter()
        .map(|i| report::display_path(&i.file))
        .collect();
    assert_eq!(security, vec!["api/login.php", "api/users.php"]);
    assert!(recs[1]
        .issues
        .iter()
        .all(|i| i.category == Category::Performance));
}

#[test]
fn test_audit_is_deterministic() {
    let first = run_sample();
    let second = run_sample();
    assert_eq!(first, second);
}

#[test]
fn test_hidden_and_dependency_dirs_are_skipped() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "index.php", "<?php echo 'ok';\n");
    write(temp.path(), ".git/hook.php", "<?php var_dump($x);\n");
    write(temp.path(), ".idea/tmp.php", "<?php var_dump($x);\n");
    write(temp.path(), "node_modules/pkg/index.js", "console.log(1);\n");
    write(temp.path(), "node_modules/pkg/index.test.js", "");

    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert_eq!(report.stats[&FileCategory::Php], 1);
    assert_eq!(report.stats[&FileCategory::Js], 0);
    assert!(report.server.is_empty());
    assert!(report.client.is_empty());
    assert_eq!(report.tests.total, 0);
}

#[test]
fn test_scan_from_dot_relative_root() {
    // A root given as "." must not be pruned as a hidden directory.
    let files = scan::scan(sample_project().join("."), ".php").unwrap();
    assert_eq!(files.len(), 3);
}

#[test]
fn test_var_dump_comment_toggle() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "debug.php", "<?php\nvar_dump($x);\n");

    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert_eq!(report.server.len(), 1);
    assert_eq!(report.server.issues[0].category, Category::Quality);

    write(temp.path(), "debug.php", "<?php\n// var_dump($x);\n");
    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert!(report.server.is_empty());
}

#[test]
fn test_prepare_toggles_query_rule() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "item.php",
        "<?php\n$id = $_GET['id'];\n$stmt = $pdo->prepare('SELECT 1');\n",
    );
    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert!(report.server.is_empty());

    write(temp.path(), "item.php", "<?php\n$id = $_GET['id'];\n");
    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert_eq!(report.server.len(), 1);
    assert_eq!(report.server.issues[0].rule, "unparameterized-query");
}

#[test]
fn test_perfect_project_scores_100() {
    let temp = TempDir::new().unwrap();
    for name in ["docker-compose.yml", "package.json", "README.md", "jest.config.js"] {
        write(temp.path(), name, "");
    }
    write(temp.path(), "src/sum.test.js", "test('sum', () => {});\n");

    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert_eq!(report.score.score, 100);
    assert_eq!(report.score.verdict, Verdict::Excellent);
    assert!(report::recommendations(&report).is_empty());
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();
    let err = run_audit(temp.path().join("missing"), &AuditConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_symlinked_source_is_audited() {
    let outside = TempDir::new().unwrap();
    write(outside.path(), "real.php", "<?php\nvar_dump($x);\n");

    let temp = TempDir::new().unwrap();
    std::os::unix::fs::symlink(outside.path().join("real.php"), temp.path().join("link.php"))
        .unwrap();

    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();
    assert_eq!(report.stats[&FileCategory::Php], 1);
    assert_eq!(issue_list(&report.server), vec![("link.php".to_string(), "debug-output".to_string())]);
}

#[cfg(unix)]
#[test]
fn test_unlistable_directory_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    write(temp.path(), "locked/a.php", "<?php\n");
    let locked = temp.path().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply when running as root.
    let readable = std::fs::read_dir(&locked).is_ok();
    let result = run_audit(temp.path(), &AuditConfig::default());

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    if !readable {
        assert!(matches!(result, Err(ScanError::Walk { .. })));
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.php", "<?php var_dump($a);\n");
    write(temp.path(), "b.php", "<?php var_dump($b);\n");
    let locked = temp.path().join("a.php");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    let readable = std::fs::read(&locked).is_ok();
    let report = run_audit(temp.path(), &AuditConfig::default()).unwrap();

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
    if !readable {
        assert_eq!(report.server.skipped.len(), 1);
        assert_eq!(report.server.issues.len(), 1);
        assert_eq!(report::display_path(&report.server.issues[0].file), "b.php");
    }
}
