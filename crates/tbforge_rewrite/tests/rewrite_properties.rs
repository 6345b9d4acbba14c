use serde_json::{json, Value};
use tbforge_common::{Golden, ModuleSignature, Stimulus, TestVector};
use tbforge_rewrite::{parse_summary, TestbenchRewriter};

fn mux() -> ModuleSignature {
    ModuleSignature {
        name: "mux2to1".to_string(),
        inputs: vec!["wire a".into(), "wire b".into(), "wire sel".into()],
        outputs: vec!["reg y".into()],
    }
}

fn vector(inputs: Value, outputs: Value) -> TestVector {
    let (Value::Object(inputs), Value::Object(outputs)) = (inputs, outputs) else {
        panic!("expected objects");
    };
    TestVector::new(Stimulus::Named(inputs)).with_golden(Golden::Computed(outputs))
}

const MUX_TB: &str = r#"`timescale 1ns/1ps

module tb_mux2to1;
    reg a, b, sel;
    wire y;

    mux2to1 dut (.a(a), .b(b), .sel(sel), .y(y));

    initial begin
        $dumpfile("mux.vcd");
        $dumpvars(0, tb_mux2to1);

        a = 0; b = 1; sel = 0;
        $display("Test 1: sel=0 selects a");
        a = 0; b = 1; sel = 1;
        $display("Test 2: sel=1 selects b");
        a = 1; b = 0; sel = 0;
        $display("Test 3: sel=0 selects a");

        $finish;
    end
endmodule
"#;

#[test]
fn generated_mux_testbench() {
    let vectors = vec![
        vector(json!({"a": 0, "b": 1, "sel": 0}), json!({"y": 0})),
        vector(json!({"a": 0, "b": 1, "sel": 1}), json!({"y": 1})),
        vector(json!({"a": 1, "b": 0, "sel": 0}), json!({"y": 1})),
    ];
    let out = TestbenchRewriter::default().rewrite(MUX_TB, &vectors, &mux());

    assert_eq!(out.matches("#10; // Wait for outputs to settle").count(), 3);
    assert_eq!(out.matches("if (y === ").count(), 3);
    assert_eq!(out.matches("passed_tests = passed_tests + 1;").count(), 3);
    assert_eq!(out.matches("failed_tests = failed_tests + 1;").count(), 3);
    assert_eq!(out.matches("// Test Summary").count(), 1);
    assert!(out.contains("\n    integer passed_tests = 0;\n"));
    assert!(out.contains("\n    // Test Summary\n"));

    // Summary goes after $finish, before the closing `end`.
    let finish = out.find("$finish;").unwrap();
    let summary = out.find("// Test Summary").unwrap();
    let close = out.rfind("    end\nendmodule").unwrap();
    assert!(finish < summary && summary < close);
}

#[test]
fn rewrite_only_adds_lines() {
    let out = TestbenchRewriter::default().rewrite(MUX_TB, &[], &mux());
    let mut added = out.lines();
    for original in MUX_TB.lines() {
        assert!(added.any(|l| l == original), "line lost: {original:?}");
    }
}

#[test]
fn unrecognized_text_is_returned_unchanged() {
    for body in ["", "// nothing here", "module m; endmodule", "always @(posedge clk) begin\nend"] {
        assert_eq!(TestbenchRewriter::default().rewrite(body, &[], &mux()), body);
    }
}

#[test]
fn printed_summary_round_trips_through_parser() {
    let printed = "Test 1: sel=0 selects a\n  ✓ y = 0 (expected: 0)\n\n========== Test Summary ==========\nTotal Tests: 1\nPassed: 1\nFailed: 0\n==================================\n";
    let counts = parse_summary(printed).unwrap();
    assert!(counts.all_passed());
    assert_eq!(counts.total, 1);
}
