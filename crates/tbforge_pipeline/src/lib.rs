//! The testbench generation pipeline.
//!
//! One run asks the text generator for a testbench and its test patterns,
//! extracts the design's signature, asks for a reference model, evaluates
//! the model over the patterns and rewrites the testbench into a
//! self-checking one. Four artifacts are written to the output directory.
//! When no generator is available, fixed placeholders stand in for both
//! generated texts and the run still completes.

#![warn(missing_docs)]

pub mod artifacts;
pub mod error;
pub mod pipeline;
pub mod placeholder;
pub mod prompts;

pub use artifacts::{ArtifactPaths, ArtifactWriter};
pub use error::PipelineError;
pub use pipeline::{GoldenStatus, Pipeline, PipelineOutput, PipelineRun};
