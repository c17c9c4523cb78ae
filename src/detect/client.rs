//! Rules for client-side JavaScript files.

use lazy_static::lazy_static;
use regex::Regex;

use super::comments::JS_MARKERS;
use super::rules::{has_uncommented_match, Detector, Rule, RuleContext};
use super::{Category, Confidence};

lazy_static! {
    static ref CONSOLE_LOG: Regex = Regex::new(r"\bconsole\.log\b").unwrap();

    /// `useEffect()` called with no arguments at all
    static ref EFFECT_NO_ARGS: Regex = Regex::new(r"\buseEffect\s*\(\s*\)").unwrap();

    static ref EFFECT_CALL: Regex = Regex::new(r"\buseEffect\s*\(").unwrap();
}

/// Build the JavaScript detector.
pub fn detector() -> Detector {
    Detector {
        name: "JS",
        suffix: ".js",
        rules: rules(),
    }
}

/// JavaScript rules in evaluation order.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "console-log",
            category: Category::Performance,
            description: "console.log left in production code",
            confidence: Confidence::Heuristic,
            check: check_console_log,
        },
        Rule {
            id: "unused-variables",
            category: Category::Quality,
            description: "unused variables detected",
            confidence: Confidence::Exact,
            check: check_unused_identifiers,
        },
        Rule {
            id: "effect-without-deps",
            category: Category::Performance,
            description: "useEffect without dependency array",
            confidence: Confidence::Heuristic,
            check: check_effect_without_deps,
        },
    ]
}

fn check_console_log(content: &str, _: &RuleContext) -> Option<String> {
    has_uncommented_match(content, &CONSOLE_LOG, JS_MARKERS).then(String::new)
}

fn check_unused_identifiers(content: &str, ctx: &RuleContext) -> Option<String> {
    let found: Vec<&str> = ctx
        .unused_identifiers
        .iter()
        .filter(|ident| !ident.is_empty() && content.contains(ident.as_str()))
        .map(String::as_str)
        .collect();

    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}

/// Whole-file check: one effect with a dependency array anywhere in the file
/// silences the rule for every zero-argument call.
fn check_effect_without_deps(content: &str, _: &RuleContext) -> Option<String> {
    let bare = EFFECT_NO_ARGS.is_match(content);
    (bare && !any_effect_has_deps(content)).then(String::new)
}

fn any_effect_has_deps(content: &str) -> bool {
    EFFECT_CALL
        .find_iter(content)
        .any(|m| call_has_array_arg(&content[m.end()..]))
}

/// `args` starts right after the opening paren of a `useEffect` call. True
/// when the first argument, or the argument after the first top-level comma,
/// is an array literal. Scanning stops at the call's closing paren.
fn call_has_array_arg(args: &str) -> bool {
    if args.trim_start().starts_with('[') {
        return true;
    }

    let mut depth = 0usize;
    let mut string_char: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in args.char_indices() {
        if let Some(quote) = string_char {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                string_char = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' | '`' => string_char = Some(ch),
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                return args[i + 1..].trim_start().starts_with('[');
            }
            _ => {}
        }
    }

    false
}
