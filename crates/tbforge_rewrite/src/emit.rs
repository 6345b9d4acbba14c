//! Verilog text injected by the rewriter.

use serde_json::Value;

/// Extra indentation for lines nested one level deeper than their anchor.
const NEST: &str = "    ";

/// Pass counter declared at block entry.
pub const PASS_COUNTER: &str = "passed_tests";
/// Fail counter declared at block entry.
pub const FAIL_COUNTER: &str = "failed_tests";

/// Returns the leading whitespace of `line`.
pub fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Counter declarations emitted after the block-open line, at its indentation.
pub fn counter_declarations(indent: &str) -> Vec<String> {
    vec![
        format!("{indent}integer {PASS_COUNTER} = 0;"),
        format!("{indent}integer {FAIL_COUNTER} = 0;"),
        String::new(),
    ]
}

/// The delay statement emitted after each vector marker.
pub fn settle_delay(indent: &str, delay: u32) -> String {
    format!("{indent}#{delay}; // Wait for outputs to settle")
}

/// Renders an expected value as a Verilog literal.
///
/// Booleans become `1`/`0`; strings are taken as already-formed literals
/// such as `4'b1010`. Null, arrays and objects have no literal form and
/// yield `None`.
pub fn render_expected(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A pass/fail comparison of `signal` against `expected`.
pub fn comparison_block(indent: &str, signal: &str, expected: &str) -> Vec<String> {
    vec![
        format!("{indent}if ({signal} === {expected}) begin"),
        format!("{indent}{NEST}$display(\"  ✓ {signal} = %b (expected: {expected})\", {signal});"),
        format!("{indent}{NEST}{PASS_COUNTER} = {PASS_COUNTER} + 1;"),
        format!("{indent}end else begin"),
        format!("{indent}{NEST}$display(\"  ✗ {signal} = %b (expected: {expected})\", {signal});"),
        format!("{indent}{NEST}{FAIL_COUNTER} = {FAIL_COUNTER} + 1;"),
        format!("{indent}end"),
    ]
}

/// The summary emitted before the block-close line: a comment marker and
/// four displays (total, passed, failed, closing banner) between blank lines.
/// Lines take the close line's indentation.
pub fn summary_block(indent: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("{indent}// Test Summary"),
        format!(
            "{indent}$display(\"\\n========== Test Summary ==========\\nTotal Tests: %0d\", {PASS_COUNTER} + {FAIL_COUNTER});"
        ),
        format!("{indent}$display(\"Passed: %0d\", {PASS_COUNTER});"),
        format!("{indent}$display(\"Failed: %0d\", {FAIL_COUNTER});"),
        format!("{indent}$display(\"==================================\\n\");"),
        String::new(),
    ]
}
