//! Writing run artifacts to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tbforge_common::TestVector;

use crate::error::PipelineError;

/// Base name of the testbench as generated.
pub const INITIAL_TESTBENCH: &str = "testbench_initial";
/// File name of the reference-model script.
pub const REFERENCE_MODEL_FILE: &str = "golden_model.rhai";
/// File name of the evaluated test vectors.
pub const VECTORS_FILE: &str = "test_patterns_with_golden.json";
/// Base name of the self-checking testbench.
pub const FINAL_TESTBENCH: &str = "testbench_final";

/// Where the four artifacts of a run were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The testbench as generated.
    pub initial_testbench: PathBuf,
    /// The reference-model script.
    pub reference_model: PathBuf,
    /// The evaluated test vectors.
    pub vectors: PathBuf,
    /// The self-checking testbench.
    pub final_testbench: PathBuf,
}

/// Writes artifacts into one directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    extension: String,
}

impl ArtifactWriter {
    /// Creates a writer for `dir`, naming testbenches with `extension`.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the paths the artifacts are written to.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            initial_testbench: self
                .dir
                .join(format!("{INITIAL_TESTBENCH}.{}", self.extension)),
            reference_model: self.dir.join(REFERENCE_MODEL_FILE),
            vectors: self.dir.join(VECTORS_FILE),
            final_testbench: self.dir.join(format!("{FINAL_TESTBENCH}.{}", self.extension)),
        }
    }

    /// Creates the output directory if needed.
    pub fn prepare(&self) -> Result<(), PipelineError> {
        fs::create_dir_all(&self.dir).map_err(|source| PipelineError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Writes the test vectors as a pretty-printed JSON array.
    pub fn write_vectors(&self, path: &Path, vectors: &[TestVector]) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(vectors)?;
        write_text(path, &json)
    }
}

/// Writes `text` to `path`.
pub fn write_text(path: &Path, text: &str) -> Result<(), PipelineError> {
    fs::write(path, text).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
