//! Rule and detector definitions.

use regex::Regex;

use super::comments::is_commented;
use super::{Category, Confidence};

/// Inputs a rule may need besides the file text.
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    /// Identifier names reported by the unused-variable rule.
    pub unused_identifiers: Vec<String>,
}

impl RuleContext {
    pub fn new(unused_identifiers: Vec<String>) -> Self {
        Self { unused_identifiers }
    }
}

/// Check run against the full file text. Returns `Some(detail)` when the
/// rule fires; a non-empty detail is appended to the issue description.
pub type RuleCheck = fn(&str, &RuleContext) -> Option<String>;

/// A text predicate plus the issue it produces.
#[derive(Clone)]
pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub confidence: Confidence,
    pub check: RuleCheck,
}

impl Rule {
    /// Evaluate the rule and build the issue description if it fires.
    pub fn evaluate(&self, content: &str, ctx: &RuleContext) -> Option<String> {
        (self.check)(content, ctx).map(|detail| {
            if detail.is_empty() {
                self.description.to_string()
            } else {
                format!("{}: {}", self.description, detail)
            }
        })
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// An ordered rule set for one kind of source file.
#[derive(Debug, Clone)]
pub struct Detector {
    pub name: &'static str,
    /// Filename suffix of the files this detector reads.
    pub suffix: &'static str,
    pub rules: Vec<Rule>,
}

/// Whether `re` matches somewhere in `content` outside a same-line comment.
pub fn has_uncommented_match(content: &str, re: &Regex, markers: &[&str]) -> bool {
    content.lines().any(|line| {
        re.find_iter(line)
            .any(|m| !is_commented(line, m.start(), markers))
    })
}
