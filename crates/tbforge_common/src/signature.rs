//! Structured summary of a hardware module's ports.

use serde::{Deserialize, Serialize};

/// The name and raw port declarations of an HDL module.
///
/// Port entries are kept verbatim as they appeared in the source (minus the
/// direction keyword and separators), so widths such as `wire [3:0] sum`
/// remain embedded. Use [`signal_name`] to isolate the bare signal name.
///
/// A signature extracted from text with no module header has an empty
/// `name` and empty port lists; it is never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSignature {
    /// The module name, or `""` when no header was found.
    pub name: String,
    /// Raw input port declarations in source order.
    pub inputs: Vec<String>,
    /// Raw output port declarations in source order.
    pub outputs: Vec<String>,
}

impl ModuleSignature {
    /// Returns `true` if no header and no ports were found.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.inputs.is_empty() && self.outputs.is_empty()
    }

    /// Returns the isolated signal names of all input ports.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().map(|decl| signal_name(decl)).collect()
    }

    /// Returns the isolated signal names of all output ports.
    pub fn output_names(&self) -> Vec<String> {
        self.outputs.iter().map(|decl| signal_name(decl)).collect()
    }
}

/// Isolates the bare signal name from a raw port declaration.
///
/// Bracketed width and array segments are removed, the final
/// whitespace-delimited token is taken after trimming characters that cannot
/// appear in a Verilog identifier. Returns `""` for a
/// declaration with no usable token.
///
/// ```
/// use tbforge_common::signal_name;
/// assert_eq!(signal_name("wire [3:0] sum"), "sum");
/// assert_eq!(signal_name("reg mem [0:7]"), "mem");
/// assert_eq!(signal_name("wire y)"), "y");
/// ```
pub fn signal_name(decl: &str) -> String {
    let mut unbracketed = String::with_capacity(decl.len());
    let mut depth = 0usize;
    for c in decl.chars() {
        match c {
            '[' => {
                depth += 1;
                unbracketed.push(' ');
            }
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => unbracketed.push(c),
            _ => {}
        }
    }

    unbracketed
        .split_whitespace()
        .map(|token| {
            token.trim_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        })
        .filter(|token| !token.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}
