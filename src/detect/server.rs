//! Rules for server-side PHP files.

use lazy_static::lazy_static;
use regex::Regex;

use super::comments::PHP_MARKERS;
use super::rules::{has_uncommented_match, Detector, Rule, RuleContext};
use super::{Category, Confidence};

lazy_static! {
    /// `echo json_encode(...)` with the rest of the line captured
    static ref JSON_ECHO: Regex = Regex::new(r"echo\s+json_encode\b(?P<rest>.*)").unwrap();

    /// Debug dump calls
    static ref DEBUG_DUMP: Regex = Regex::new(r"\b(?:var_dump|print_r)\b").unwrap();

    /// Raw request superglobal access
    static ref REQUEST_INPUT: Regex = Regex::new(r"\$_(?:GET|POST)\[").unwrap();
}

/// Tokens that must all appear after `echo json_encode` on the same line.
const ERROR_RESPONSE_TOKENS: &[&str] = &["success", "false", "error"];

/// Build the PHP detector.
pub fn detector() -> Detector {
    Detector {
        name: "PHP",
        suffix: ".php",
        rules: rules(),
    }
}

/// PHP rules in evaluation order.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "json-error-leak",
            category: Category::Security,
            description: "echo json_encode with success=false exposes error details",
            confidence: Confidence::Exact,
            check: check_json_error_leak,
        },
        Rule {
            id: "debug-output",
            category: Category::Quality,
            description: "debug output (var_dump/print_r) left in production code",
            confidence: Confidence::Heuristic,
            check: check_debug_output,
        },
        Rule {
            id: "unparameterized-query",
            category: Category::Security,
            description: "request input used without prepare/execute (possible SQL injection)",
            confidence: Confidence::Heuristic,
            check: check_unparameterized_query,
        },
    ]
}

fn check_json_error_leak(content: &str, _: &RuleContext) -> Option<String> {
    let leaks = content.lines().any(|line| {
        JSON_ECHO.captures_iter(line).any(|caps| {
            let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
            ERROR_RESPONSE_TOKENS.iter().all(|t| rest.contains(t))
        })
    });
    leaks.then(String::new)
}

fn check_debug_output(content: &str, _: &RuleContext) -> Option<String> {
    has_uncommented_match(content, &DEBUG_DUMP, PHP_MARKERS).then(String::new)
}

/// Whole-file check: any `prepare`/`execute` token anywhere counts as
/// parameterized, regardless of which query it belongs to.
fn check_unparameterized_query(content: &str, _: &RuleContext) -> Option<String> {
    let uses_input = REQUEST_INPUT.is_match(content);
    let parameterized = content.contains("prepare") || content.contains("execute");
    (uses_input && !parameterized).then(String::new)
}
