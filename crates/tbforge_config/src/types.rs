//! Configuration types deserialized from `tbforge.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `tbforge.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Text-generation collaborator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Pipeline settings (output location, naming, file extension).
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Testbench rewriter settings.
    #[serde(default)]
    pub rewrite: RewriteConfig,
    /// Reference-model sandbox limits.
    #[serde(default)]
    pub sandbox: SandboxConfig,
    /// External simulator toolchain settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Settings for the language-model client.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// The API flavour spoken by the endpoint.
    pub provider: Provider,
    /// Model name sent with each request.
    pub model: String,
    /// Full URL of the chat-completions endpoint.
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling settings for the testbench request.
    pub testbench: SamplingConfig,
    /// Sampling settings for the reference-model request.
    pub reference: SamplingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: "gpt-4o".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
            testbench: SamplingConfig {
                temperature: 0.3,
                max_tokens: 4000,
            },
            reference: SamplingConfig {
                temperature: 0.2,
                max_tokens: 3000,
            },
        }
    }
}

/// Supported language-model API flavours.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI-compatible chat completions.
    #[default]
    OpenAi,
}

/// Sampling parameters for one kind of request.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// Pipeline settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory that receives the generated artifacts.
    pub output_dir: String,
    /// Module name used for the reference entry point when none was found.
    pub default_module_name: String,
    /// File extension for testbench artifacts.
    pub testbench_extension: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            default_module_name: "module".to_string(),
            testbench_extension: "v".to_string(),
        }
    }
}

/// Testbench rewriter settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Delay, in simulator time units, inserted after each test case display.
    pub settle_delay: u32,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self { settle_delay: 10 }
    }
}

/// Resource limits for the reference-model script engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Maximum operations per load or per vector evaluation (0 = unlimited).
    pub max_operations: u64,
    /// Maximum function call nesting.
    pub max_call_levels: usize,
    /// Maximum expression nesting depth.
    pub max_expr_depth: usize,
    /// Maximum string length in characters (0 = unlimited).
    pub max_string_size: usize,
    /// Maximum array length (0 = unlimited).
    pub max_array_size: usize,
    /// Maximum object-map size (0 = unlimited).
    pub max_map_size: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_string_size: 64 * 1024,
            max_array_size: 64 * 1024,
            max_map_size: 4096,
        }
    }
}

/// External simulator settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Compiler executable.
    pub compiler: String,
    /// Flags passed to the compiler before the output and sources.
    pub compile_flags: Vec<String>,
    /// Runtime executable that runs the compiled image.
    pub runtime: String,
    /// Wall-clock limit for each subprocess, in seconds.
    pub timeout_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            compiler: "iverilog".to_string(),
            compile_flags: vec!["-g2012".to_string()],
            runtime: "vvp".to_string(),
            timeout_secs: 120,
        }
    }
}
