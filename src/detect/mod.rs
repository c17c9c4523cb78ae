//! Detection of issues in project source files.

pub mod client;
pub mod comments;
mod files;
mod rules;
mod runner;
pub mod server;
mod test_files;
mod types;

pub use files::{check_config, ConfigEntry, ConfigFile, ConfigPresence};
pub use rules::{has_uncommented_match, Detector, Rule, RuleCheck, RuleContext};
pub use runner::Runner;
pub use test_files::{check_tests, TestInventory, SPEC_TEST_SUFFIX, UNIT_TEST_SUFFIX};
pub use types::{Category, Confidence, DetectionResult, Issue, SkippedFile};
