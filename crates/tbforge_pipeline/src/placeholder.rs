//! Fixed texts used when no text generator is available.

use tbforge_common::ModuleSignature;

/// A testbench skeleton for `signature`: the design instantiated with no
/// connections and an empty `initial` block.
pub fn placeholder_testbench(signature: &ModuleSignature) -> String {
    let mut text = String::from(
        "// Placeholder testbench: no text generator was available.\n`timescale 1ns/1ps\n\n",
    );
    if signature.name.is_empty() {
        text.push_str("module tb;\n");
    } else {
        text.push_str(&format!("module tb_{};\n", signature.name));
        text.push_str(&format!("    {} dut ();\n", signature.name));
    }
    text.push_str("\n    initial begin\n    end\nendmodule\n");
    text
}

/// A reference model whose entry point takes nothing and returns nothing, so
/// every vector it sees is recorded as producing no outputs.
pub fn placeholder_reference_model(entry_point: &str) -> String {
    format!(
        "// Placeholder reference model: no text generator was available.\nfn {entry_point}() {{\n    ()\n}}\n"
    )
}
