//! Line-oriented extraction of a module's name and port declarations.
//!
//! This is a best-effort scan over physical lines, not a parse. It assumes the
//! common one-declaration-per-line layout:
//!
//! ```verilog
//! module mux2to1 (
//!     input wire a,
//!     input wire b,
//!     input wire sel,
//!     output wire y
//! );
//! ```
//!
//! Port strings are stored verbatim (minus keyword and separators) and are
//! neither validated nor deduplicated.

use tbforge_common::ModuleSignature;

const MODULE_KEYWORD: &str = "module";
const INPUT_KEYWORD: &str = "input";
const OUTPUT_KEYWORD: &str = "output";

/// Extracts a [`ModuleSignature`] from HDL source text.
///
/// The first line starting with `module` names the module; later headers are
/// ignored. Every line, the header included, that contains `input` adds an
/// input entry; otherwise a line containing `output` adds an output entry.
/// Text with no header yields an empty name, and text with no port lines
/// yields empty port lists.
pub fn extract_signature(source: &str) -> ModuleSignature {
    let mut signature = ModuleSignature::default();
    let mut header_seen = false;

    for line in source.lines() {
        let line = line.trim();

        if !header_seen && is_module_header(line) {
            header_seen = true;
            signature.name = module_name(line);
        }

        if line.contains(INPUT_KEYWORD) {
            if let Some(decl) = port_declaration(line, INPUT_KEYWORD) {
                signature.inputs.push(decl);
            }
        } else if line.contains(OUTPUT_KEYWORD) {
            if let Some(decl) = port_declaration(line, OUTPUT_KEYWORD) {
                signature.outputs.push(decl);
            }
        }
    }

    signature
}

/// Returns `true` if the trimmed line begins with the `module` keyword.
fn is_module_header(line: &str) -> bool {
    line.strip_prefix(MODULE_KEYWORD).is_some_and(|rest| {
        rest.chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '(' || c == '#' || c == ';')
    })
}

/// Takes the token after `module`, cut at the port list or parameter list.
fn module_name(line: &str) -> String {
    let Some(token) = line.split_whitespace().nth(1) else {
        return String::new();
    };
    let end = token.find(['(', ';', '#']).unwrap_or(token.len());
    token[..end].to_string()
}

/// Strips the direction keyword and separators, returning what is left.
fn port_declaration(line: &str, keyword: &str) -> Option<String> {
    let decl = line.replace(keyword, "").replace([';', ','], "");
    let decl = decl.trim();
    (!decl.is_empty()).then(|| decl.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_mux() {
        let src = "module mux2to1 (\n    input wire a,\n    input wire b,\n    input wire sel,\n    output wire y\n);\n    assign y = sel ? b : a;\nendmodule";
        let sig = extract_signature(src);
        assert_eq!(sig.name, "mux2to1");
        assert_eq!(sig.inputs, vec!["wire a", "wire b", "wire sel"]);
        assert_eq!(sig.outputs, vec!["wire y"]);
    }

    #[test]
    fn widths_stay_embedded() {
        let src = "module adder4bit (\n    input wire [3:0] a,\n    input wire [3:0] b,\n    output wire [3:0] sum,\n    output wire carry\n);\nendmodule";
        let sig = extract_signature(src);
        assert_eq!(sig.name, "adder4bit");
        assert_eq!(sig.inputs, vec!["wire [3:0] a", "wire [3:0] b"]);
        assert_eq!(sig.outputs, vec!["wire [3:0] sum", "wire carry"]);
    }

    #[test]
    fn empty_source() {
        let sig = extract_signature("");
        assert_eq!(sig, ModuleSignature::default());
    }

    #[test]
    fn headerless_source_has_empty_name() {
        let sig = extract_signature("assign y = a & b;\nwire t;");
        assert_eq!(sig.name, "");
        assert!(sig.inputs.is_empty());
        assert!(sig.outputs.is_empty());
    }

    #[test]
    fn first_header_wins() {
        let src = "module first (input a);\nendmodule\nmodule second (output b);\nendmodule";
        let sig = extract_signature(src);
        assert_eq!(sig.name, "first");
        assert_eq!(sig.inputs.len(), 1);
        assert_eq!(sig.outputs.len(), 1);
    }

    #[test]
    fn header_line_is_also_scanned_for_ports() {
        let sig = extract_signature("module inv (input a, output y);");
        assert_eq!(sig.name, "inv");
        // Input has priority, so the whole header lands in `inputs` only.
        assert_eq!(sig.inputs.len(), 1);
        assert!(sig.outputs.is_empty());
    }

    #[test]
    fn line_with_both_keywords_goes_to_inputs() {
        let src = "module m (\n input a, output b\n);";
        let sig = extract_signature(src);
        assert_eq!(sig.inputs, vec!["a output b"]);
        assert!(sig.outputs.is_empty());
    }

    #[test]
    fn name_cut_at_paren_semicolon_and_hash() {
        assert_eq!(extract_signature("module foo(input a);").name, "foo");
        assert_eq!(extract_signature("module foo;").name, "foo");
        assert_eq!(extract_signature("module foo #(parameter W = 4) (").name, "foo");
        assert_eq!(extract_signature("module foo#(parameter W = 4) (").name, "foo");
    }

    #[test]
    fn module_prefix_identifiers_are_not_headers() {
        let sig = extract_signature("module_select = 1;\nmodule real_one (\n);");
        assert_eq!(sig.name, "real_one");
    }

    #[test]
    fn bare_keyword_line_is_dropped() {
        let src = "module m (\n    input\n    output ;\n);";
        let sig = extract_signature(src);
        assert!(sig.inputs.is_empty());
        assert!(sig.outputs.is_empty());
    }

    #[test]
    fn counts_match_keyword_lines() {
        let src = "module alu (\n  input [7:0] a,\n  input [7:0] b,\n  input [2:0] op,\n  input clk,\n  output reg [7:0] r,\n  output zero\n);\nendmodule";
        let sig = extract_signature(src);
        assert_eq!(sig.inputs.len(), 4);
        assert_eq!(sig.outputs.len(), 2);
    }
}
