//! The line-by-line testbench rewriter.

use tbforge_common::{signal_name, ModuleSignature, TestVector};
use tbforge_config::RewriteConfig;

use crate::emit::{
    comparison_block, counter_declarations, indentation, render_expected, settle_delay,
    summary_block,
};
use crate::state::{classify, LineKind, RewriteState};

/// Rewrites generated testbenches into self-checking ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestbenchRewriter {
    settle_delay: u32,
}

impl Default for TestbenchRewriter {
    fn default() -> Self {
        Self::new(&RewriteConfig::default())
    }
}

impl TestbenchRewriter {
    /// Creates a rewriter from the `[rewrite]` configuration.
    pub fn new(config: &RewriteConfig) -> Self {
        Self {
            settle_delay: config.settle_delay,
        }
    }

    /// Returns the settling delay inserted after each test-case marker.
    pub fn settle_delay(&self) -> u32 {
        self.settle_delay
    }

    /// Rewrites `body`, pairing the n-th test-case marker of each block with
    /// `vectors[n]`.
    ///
    /// Only outputs of `signature` that the vector's expected outputs name
    /// are compared. Vectors without expected outputs, and markers beyond
    /// the end of `vectors`, still get a settling delay. Text with no
    /// `initial begin` block comes back unchanged.
    pub fn rewrite(&self, body: &str, vectors: &[TestVector], signature: &ModuleSignature) -> String {
        let outputs: Vec<String> = signature
            .outputs
            .iter()
            .map(|decl| signal_name(decl))
            .filter(|name| !name.is_empty())
            .collect();

        let mut state = RewriteState::new();
        let mut out: Vec<String> = Vec::new();
        let mut markers = 0usize;
        let mut comparisons = 0usize;

        for line in body.split('\n') {
            match classify(line, state.phase()) {
                LineKind::BlockOpen => {
                    out.push(line.to_string());
                    out.extend(counter_declarations(indentation(line)));
                    state.enter_block();
                }
                LineKind::VectorMarker => {
                    let indent = indentation(line);
                    out.push(line.to_string());
                    out.push(settle_delay(indent, self.settle_delay));
                    let index = state.advance();
                    markers += 1;
                    let Some(expected) = vectors.get(index).and_then(TestVector::expected_outputs)
                    else {
                        continue;
                    };
                    for name in &outputs {
                        let Some(value) = expected.get(name) else {
                            continue;
                        };
                        match render_expected(value) {
                            Some(literal) => {
                                out.extend(comparison_block(indent, name, &literal));
                                comparisons += 1;
                            }
                            None => log::debug!(
                                "vector {index}: expected {name} = {value} has no Verilog literal; skipping comparison"
                            ),
                        }
                    }
                }
                LineKind::BlockClose => {
                    out.extend(summary_block(indentation(line)));
                    out.push(line.to_string());
                    state.leave_block();
                }
                LineKind::Other => out.push(line.to_string()),
            }
        }

        if markers != vectors.len() {
            log::debug!(
                "testbench has {markers} test-case marker(s) for {} vector(s)",
                vectors.len()
            );
        }
        log::debug!("injected {comparisons} output comparison(s)");
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use tbforge_common::{Golden, Stimulus};

    fn and_gate() -> ModuleSignature {
        ModuleSignature {
            name: "and_gate".to_string(),
            inputs: vec!["wire a".to_string(), "wire b".to_string()],
            outputs: vec!["wire y".to_string()],
        }
    }

    fn computed(outputs: Value) -> TestVector {
        let Value::Object(map) = outputs else {
            panic!("expected object");
        };
        TestVector::new(Stimulus::Named(Map::new())).with_golden(Golden::Computed(map))
    }

    const BODY: &str = "module tb;\n  initial begin\n    a = 0; b = 1;\n    $display(\"Test 1\");\n    a = 1; b = 1;\n    $display(\"Test 2\");\n  end\nendmodule";

    #[test]
    fn injects_counters_delays_comparisons_and_summary() {
        let vectors = vec![computed(json!({"y": 0})), computed(json!({"y": true}))];
        let out = TestbenchRewriter::default().rewrite(BODY, &vectors, &and_gate());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "  initial begin");
        assert_eq!(lines[2], "  integer passed_tests = 0;");
        assert_eq!(lines[3], "  integer failed_tests = 0;");
        assert_eq!(lines[4], "");
        assert_eq!(lines[6], "    $display(\"Test 1\");");
        assert_eq!(lines[7], "    #10; // Wait for outputs to settle");
        assert_eq!(lines[8], "    if (y === 0) begin");
        assert!(out.contains("if (y === 1) begin"));
        assert!(out.contains("(expected: 1)"));
        assert_eq!(out.matches("// Test Summary").count(), 1);
        assert!(out.ends_with("  end\nendmodule"));
    }

    #[test]
    fn k_markers_give_k_delays_and_one_summary() {
        for k in 0..5 {
            let mut body = String::from("initial begin\n");
            for i in 0..k {
                body.push_str(&format!("  $display(\"Test {i}\");\n"));
            }
            body.push_str("end\n");
            let vectors: Vec<_> = (0..k).map(|_| computed(json!({"y": 1}))).collect();
            let out = TestbenchRewriter::default().rewrite(&body, &vectors, &and_gate());
            assert_eq!(out.matches("Wait for outputs to settle").count(), k);
            assert_eq!(out.matches("// Test Summary").count(), 1);
            assert_eq!(out.matches("if (y === 1)").count(), k);
        }
    }

    #[test]
    fn no_block_is_a_no_op() {
        let body = "module tb;\n  $display(\"Test 1\");\n  end\nendmodule\n";
        let out = TestbenchRewriter::default().rewrite(body, &[computed(json!({"y": 1}))], &and_gate());
        assert_eq!(out, body);
    }

    #[test]
    fn markers_past_the_vectors_get_only_a_delay() {
        let body = "initial begin\n$display(\"Test 1\");\n$display(\"Test 2\");\nend";
        let out = TestbenchRewriter::default().rewrite(body, &[computed(json!({"y": 1}))], &and_gate());
        assert_eq!(out.matches("#10;").count(), 2);
        assert_eq!(out.matches("if (y").count(), 1);
    }

    #[test]
    fn failed_vector_still_consumes_a_marker() {
        let body = "initial begin\n$display(\"Test 1\");\n$display(\"Test 2\");\nend";
        let failed = TestVector::new(Stimulus::default()).with_golden(Golden::Failed("x".into()));
        let vectors = vec![failed, computed(json!({"y": 0}))];
        let out = TestbenchRewriter::default().rewrite(body, &vectors, &and_gate());
        let lines: Vec<&str> = out.lines().collect();
        let second = lines.iter().position(|l| *l == "$display(\"Test 2\");").unwrap();
        assert_eq!(lines[second - 1], "#10; // Wait for outputs to settle");
        assert_eq!(lines[second + 2], "if (y === 0) begin");
        assert_eq!(out.matches("if (y").count(), 1);
    }

    #[test]
    fn only_named_outputs_are_compared() {
        let signature = ModuleSignature {
            name: "adder".to_string(),
            inputs: vec![],
            outputs: vec!["wire [3:0] sum".to_string(), "reg carry".to_string()],
        };
        let body = "initial begin\n  $display(\"Test 1\");\nend";
        let vectors = vec![computed(json!({"sum": 9, "overflow": 1}))];
        let out = TestbenchRewriter::default().rewrite(body, &vectors, &signature);
        assert!(out.contains("if (sum === 9) begin"));
        assert!(!out.contains("carry"));
        assert!(!out.contains("overflow"));
    }

    #[test]
    fn non_scalar_expected_values_are_not_compared() {
        let signature = ModuleSignature {
            name: "pair".to_string(),
            inputs: vec![],
            outputs: vec!["wire y".to_string(), "wire z".to_string()],
        };
        let body = "initial begin\n  $display(\"Test 1\");\nend";
        let vectors = vec![computed(json!({"y": null, "z": [1, 0]}))];
        let out = TestbenchRewriter::default().rewrite(body, &vectors, &signature);
        assert!(!out.contains("if ("));
        assert!(!out.contains("null"));
        assert_eq!(out.matches("#10;").count(), 1);
    }

    #[test]
    fn cursor_resets_for_each_block() {
        let body = "initial begin\n$display(\"Test A\");\nend\ninitial begin\n$display(\"Test B\");\nend";
        let vectors = vec![computed(json!({"y": 1})), computed(json!({"y": 0}))];
        let out = TestbenchRewriter::default().rewrite(body, &vectors, &and_gate());
        assert_eq!(out.matches("if (y === 1)").count(), 2);
        assert_eq!(out.matches("if (y === 0)").count(), 0);
        assert_eq!(out.matches("// Test Summary").count(), 2);
    }

    #[test]
    fn configured_settle_delay() {
        let rewriter = TestbenchRewriter::new(&RewriteConfig { settle_delay: 3 });
        let out = rewriter.rewrite("initial begin\n$display(\"test\");\nend", &[], &and_gate());
        assert!(out.contains("#3; // Wait for outputs to settle"));
    }

    #[test]
    fn trailing_newline_is_preserved() {
        let out = TestbenchRewriter::default().rewrite("initial begin\nend\n", &[], &and_gate());
        assert!(out.ends_with("end\n"));
    }
}
