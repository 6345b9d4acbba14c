//! Reading the injected summary back from simulator output.

/// Pass/fail totals printed by a rewritten testbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Comparisons performed.
    pub total: u64,
    /// Comparisons that matched the reference model.
    pub passed: u64,
    /// Comparisons that did not.
    pub failed: u64,
}

impl SummaryCounts {
    /// Returns `true` if at least one comparison ran and none failed.
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.failed == 0
    }
}

/// Extracts the last printed summary from `output`.
///
/// Returns `None` unless both a `Passed:` and a `Failed:` count are present.
/// A missing `Total Tests:` line is taken as their sum.
pub fn parse_summary(output: &str) -> Option<SummaryCounts> {
    let mut total = None;
    let mut passed = None;
    let mut failed = None;
    for line in output.lines().map(str::trim) {
        if let Some(n) = count_after(line, "Total Tests:") {
            total = Some(n);
        } else if let Some(n) = count_after(line, "Passed:") {
            passed = Some(n);
        } else if let Some(n) = count_after(line, "Failed:") {
            failed = Some(n);
        }
    }
    let (passed, failed) = (passed?, failed?);
    Some(SummaryCounts {
        total: total.unwrap_or(passed + failed),
        passed,
        failed,
    })
}

fn count_after(line: &str, label: &str) -> Option<u64> {
    line.strip_prefix(label)?.trim().parse().ok()
}
