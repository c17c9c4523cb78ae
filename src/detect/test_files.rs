//! Test file inventory.

use serde::Serialize;

use crate::scan::{ScanError, Scanner};

/// Suffix of unit test files.
pub const UNIT_TEST_SUFFIX: &str = ".test.js";
/// Suffix of spec test files.
pub const SPEC_TEST_SUFFIX: &str = ".spec.js";

/// Test file counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestInventory {
    pub unit_tests: usize,
    pub spec_tests: usize,
    pub total: usize,
}

impl TestInventory {
    pub fn new(unit_tests: usize, spec_tests: usize) -> Self {
        Self {
            unit_tests,
            spec_tests,
            total: unit_tests + spec_tests,
        }
    }
}

/// Count unit and spec test files reachable by `scanner`.
pub fn check_tests(scanner: &Scanner) -> Result<TestInventory, ScanError> {
    let unit = scanner.scan(UNIT_TEST_SUFFIX)?.len();
    let spec = scanner.scan(SPEC_TEST_SUFFIX)?.len();
    Ok(TestInventory::new(unit, spec))
}
