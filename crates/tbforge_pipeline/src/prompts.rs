//! Prompts sent to the text generator.

use tbforge_common::ModuleSignature;

/// Marker preceding the testbench code in the testbench response.
pub const TESTBENCH_MARKER: &str = "TESTBENCH_CODE:";
/// Marker preceding the pattern list in the testbench response.
pub const PATTERNS_MARKER: &str = "TEST_PATTERNS:";

/// System prompt for the testbench request.
pub const TESTBENCH_SYSTEM_PROMPT: &str = "\
You are an expert in Verilog testbench generation.
Your task is to generate comprehensive test patterns for a given Verilog module.
Generate test patterns that cover:
1. All corner cases
2. Boundary values
3. Typical use cases
4. Edge cases
5. Random values for thorough testing";

/// System prompt for the reference-model request.
pub const REFERENCE_SYSTEM_PROMPT: &str = "\
You are an expert in hardware design and in the Rhai scripting language.
Your task is to write a Rhai function that implements exactly the behaviour
described in a natural-language specification.";

/// Builds the testbench request from the description and the design source.
pub fn testbench_prompt(description: &str, module_source: &str) -> String {
    format!(
        "Given the following Verilog module and its natural language description,
generate a comprehensive Verilog testbench that includes ALL relevant test patterns.

Natural Language Description:
{description}

Verilog Module Code:
{module_source}

Generate a Verilog testbench that:
1. Declares all necessary signals
2. Instantiates the module under test
3. Applies every test pattern inside a single `initial begin ... end` block
4. Uses $display to show the inputs of each test, one display per test,
   containing the word \"Test\" and the test number
5. Does NOT include expected outputs or assertions (they are added later)
6. Numbers each test case

Also provide the test patterns as a JSON array, in the same order as the
tests in the testbench. Each element is an object with the test number and
an \"inputs\" object mapping input port names to values, for example:
[{{\"test\": 1, \"inputs\": {{\"a\": 0, \"b\": 1}}}}]

Format your response as:
{TESTBENCH_MARKER}
```verilog
[testbench code here]
```

{PATTERNS_MARKER}
```json
[array of test patterns]
```
"
    )
}

/// Builds the reference-model request.
///
/// `entry_point` is the function name the runner will look up.
pub fn reference_prompt(
    description: &str,
    signature: &ModuleSignature,
    entry_point: &str,
) -> String {
    let inputs = signature.input_names().join(", ");
    let outputs = signature.output_names().join(", ");
    format!(
        "Given the following natural language description of a hardware module,
write a Rhai function that implements this functionality.

Natural Language Description:
{description}

Module Information:
- Module Name: {name}
- Inputs: {inputs}
- Outputs: {outputs}

Write a Rhai function named '{entry_point}' that:
1. Takes the input signals as parameters, named exactly as the inputs above
2. Computes the output signals using integer arithmetic and bit operations
3. Implements the exact functionality described
4. Handles all edge cases properly
5. Returns an object map with the output signal names as keys,
   for example #{{ y: a & b }}

Provide ONLY the Rhai code, no explanations.
Start with 'fn {entry_point}(' and include the complete implementation.
",
        name = signature.name,
    )
}
