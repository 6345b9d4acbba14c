//! The pipeline orchestrator.

use std::path::Path;

use tbforge_common::{ModuleSignature, TestVector};
use tbforge_config::{Config, SamplingConfig};
use tbforge_extract::{
    decode_patterns, extract_code_block, extract_script, extract_section, extract_signature,
    CodeBlockQuery,
};
use tbforge_golden::ReferenceModelRunner;
use tbforge_llm::{GenerationRequest, TextGenerator};
use tbforge_rewrite::TestbenchRewriter;

use crate::artifacts::{write_text, ArtifactPaths, ArtifactWriter};
use crate::error::PipelineError;
use crate::placeholder::{placeholder_reference_model, placeholder_testbench};
use crate::prompts::{
    reference_prompt, testbench_prompt, PATTERNS_MARKER, REFERENCE_SYSTEM_PROMPT,
    TESTBENCH_MARKER, TESTBENCH_SYSTEM_PROMPT,
};

const VERILOG_QUERY: CodeBlockQuery<'static> = CodeBlockQuery {
    language: "verilog",
    definition_keyword: "module ",
};

/// Outcome of running the reference model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenStatus {
    /// The model loaded and was evaluated over every vector.
    Computed {
        /// Vectors with expected outputs.
        succeeded: usize,
        /// Vectors the model failed on.
        failed: usize,
    },
    /// The model could not be loaded or had no entry point; no vector has
    /// expected outputs.
    Unavailable {
        /// Why the model was rejected.
        reason: String,
    },
}

impl GoldenStatus {
    fn from_vectors(vectors: &[TestVector]) -> Self {
        let succeeded = vectors
            .iter()
            .filter(|v| v.expected_outputs().is_some())
            .count();
        GoldenStatus::Computed {
            succeeded,
            failed: vectors.len() - succeeded,
        }
    }
}

/// Everything one run produced, before anything is written.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// The design's signature.
    pub signature: ModuleSignature,
    /// The testbench as generated (or the placeholder).
    pub initial_testbench: String,
    /// Number of test patterns decoded from the testbench response.
    pub pattern_count: usize,
    /// The reference-model script (or the placeholder).
    pub reference_model: String,
    /// The evaluated vectors; empty when the model was unavailable.
    pub vectors: Vec<TestVector>,
    /// How the reference model fared.
    pub golden: GoldenStatus,
    /// The self-checking testbench.
    pub final_testbench: String,
    /// Whether the text generator was used.
    pub generated: bool,
}

/// A completed run and where its artifacts were written.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The run's results.
    pub run: PipelineRun,
    /// The artifact locations.
    pub paths: ArtifactPaths,
}

/// Drives one text generator through the full pipeline.
pub struct Pipeline<G> {
    generator: G,
    config: Config,
}

impl<G: TextGenerator> Pipeline<G> {
    /// Creates a pipeline using `generator` and `config`.
    pub fn new(generator: G, config: Config) -> Self {
        Self { generator, config }
    }

    /// Returns the configuration the pipeline runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the pipeline and writes the four artifacts into `output_dir`.
    pub fn run(
        &self,
        description: &str,
        module_source: &str,
        output_dir: &Path,
    ) -> Result<PipelineOutput, PipelineError> {
        let writer = ArtifactWriter::new(output_dir, &self.config.pipeline.testbench_extension);
        writer.prepare()?;
        let paths = writer.paths();

        let run = self.execute(description, module_source);

        write_text(&paths.initial_testbench, &run.initial_testbench)?;
        write_text(&paths.reference_model, &run.reference_model)?;
        writer.write_vectors(&paths.vectors, &run.vectors)?;
        write_text(&paths.final_testbench, &run.final_testbench)?;

        Ok(PipelineOutput { run, paths })
    }

    /// Runs the pipeline in memory.
    ///
    /// Issues exactly two generator requests, testbench first, when the
    /// generator is available, and none otherwise.
    pub fn execute(&self, description: &str, module_source: &str) -> PipelineRun {
        let generated = self.generator.is_available();
        if !generated {
            log::warn!("text generator is not available; using placeholders");
        }

        let signature = extract_signature(module_source);
        if signature.name.is_empty() {
            log::warn!("no module header found in the design source");
        }

        let (initial_testbench, patterns) = if generated {
            self.generate_testbench(description, module_source)
        } else {
            (placeholder_testbench(&signature), Vec::new())
        };
        let pattern_count = patterns.len();
        log::info!(
            "testbench has {pattern_count} test pattern(s) for module '{}'",
            signature.name
        );

        let runner = ReferenceModelRunner::new(
            self.config.sandbox.clone(),
            &self.config.pipeline.default_module_name,
        );
        let entry_point = runner.entry_point_name(&signature);
        let reference_model = if generated {
            self.generate_reference_model(description, &signature, &entry_point)
        } else {
            placeholder_reference_model(&entry_point)
        };

        let (vectors, golden) = match runner.try_run(&reference_model, &patterns, &signature) {
            Ok(vectors) => {
                let status = GoldenStatus::from_vectors(&vectors);
                (vectors, status)
            }
            Err(e) => {
                log::error!("{e}; the testbench will carry no comparisons");
                (
                    Vec::new(),
                    GoldenStatus::Unavailable {
                        reason: e.to_string(),
                    },
                )
            }
        };

        let rewriter = TestbenchRewriter::new(&self.config.rewrite);
        let final_testbench = rewriter.rewrite(&initial_testbench, &vectors, &signature);

        PipelineRun {
            signature,
            initial_testbench,
            pattern_count,
            reference_model,
            vectors,
            golden,
            final_testbench,
            generated,
        }
    }

    fn generate_testbench(&self, description: &str, module_source: &str) -> (String, Vec<TestVector>) {
        let prompt = testbench_prompt(description, module_source);
        let response = self.ask(
            &prompt,
            TESTBENCH_SYSTEM_PROMPT,
            &self.config.generator.testbench,
        );

        let mut testbench = extract_section(&response, TESTBENCH_MARKER, "```verilog", "```");
        if testbench.is_empty() {
            log::warn!("response has no {TESTBENCH_MARKER} section; falling back to the first code block");
            testbench = extract_code_block(&response, &VERILOG_QUERY);
        }

        let patterns_json = extract_section(&response, PATTERNS_MARKER, "```json", "```");
        if patterns_json.is_empty() {
            log::warn!("response has no {PATTERNS_MARKER} section");
        }
        let patterns = decode_patterns(&patterns_json).unwrap_or_else(|e| {
            log::warn!("could not decode test patterns: {e}");
            Vec::new()
        });
        (testbench, patterns)
    }

    fn generate_reference_model(
        &self,
        description: &str,
        signature: &ModuleSignature,
        entry_point: &str,
    ) -> String {
        let prompt = reference_prompt(description, signature, entry_point);
        let response = self.ask(
            &prompt,
            REFERENCE_SYSTEM_PROMPT,
            &self.config.generator.reference,
        );
        extract_script(&response)
    }

    /// Sends one request; a failure is logged and reads as an empty reply.
    fn ask(&self, prompt: &str, system_prompt: &str, sampling: &SamplingConfig) -> String {
        let request = GenerationRequest {
            prompt,
            system_prompt: Some(system_prompt),
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };
        self.generator.generate(&request).unwrap_or_else(|e| {
            log::error!("text generation failed: {e}");
            String::new()
        })
    }
}
