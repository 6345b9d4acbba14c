//! `tbforge example`: run the pipeline on a built-in design.
//!
//! The design source is also written next to the artifacts so the result
//! can be simulated without any other files.

use std::path::PathBuf;

use crate::generate::{apply_overrides, load_settings, run_generation};
use crate::{ExampleArgs, ExampleDesign, GlobalArgs};

/// A built-in description/design pair.
pub struct Example {
    /// Module name, also the design's file stem.
    pub name: &'static str,
    /// Natural-language description.
    pub description: &'static str,
    /// Verilog source.
    pub source: &'static str,
}

const MUX: Example = Example {
    name: "mux2to1",
    description: "\
A 2-to-1 multiplexer (MUX).

The module takes two 1-bit input signals (a and b) and one 1-bit select signal (sel).

Functionality:
- Input 'a': First data input (1-bit)
- Input 'b': Second data input (1-bit)
- Input 'sel': Select signal (1-bit)
- Output 'y': Selected output (1-bit)

When sel is 0, the output y should be equal to input a.
When sel is 1, the output y should be equal to input b.

This is a combinational logic circuit with no state or memory.",
    source: "\
module mux2to1 (
    input wire a,
    input wire b,
    input wire sel,
    output wire y
);
    assign y = sel ? b : a;
endmodule
",
};

const ADDER: Example = Example {
    name: "adder4bit",
    description: "\
A simple 4-bit adder module.

The module takes two 4-bit input signals (a and b) and produces a 4-bit sum output and a 1-bit carry output.

Functionality:
- Input 'a': 4-bit unsigned number
- Input 'b': 4-bit unsigned number
- Output 'sum': 4-bit result of a + b (lower 4 bits)
- Output 'carry': 1-bit carry-out flag (set to 1 if result exceeds 15)

The adder performs unsigned addition of the two 4-bit inputs.
If the result is greater than 15 (0xF), the carry output should be set to 1.",
    source: "\
module adder4bit (
    input wire [3:0] a,
    input wire [3:0] b,
    output wire [3:0] sum,
    output wire carry
);
    wire [4:0] result;
    assign result = a + b;
    assign sum = result[3:0];
    assign carry = result[4];
endmodule
",
};

/// Returns the built-in example for `design`.
pub fn example(design: ExampleDesign) -> &'static Example {
    match design {
        ExampleDesign::Mux => &MUX,
        ExampleDesign::Adder => &ADDER,
    }
}

/// Runs the `tbforge example` command.
pub fn run(args: &ExampleArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let example = example(args.design);
    let config = apply_overrides(load_settings(global)?, &args.options)?;
    let output_dir = PathBuf::from(&config.pipeline.output_dir);

    std::fs::create_dir_all(&output_dir)?;
    let module_path = output_dir.join(format!(
        "{}.{}",
        example.name, config.pipeline.testbench_extension
    ));
    std::fs::write(&module_path, example.source)?;

    if !global.quiet {
        eprintln!("     Example {}", example.name);
        eprintln!("       Wrote {}", module_path.display());
    }

    run_generation(
        example.description,
        example.source,
        &module_path,
        &args.options,
        global,
    )
}
