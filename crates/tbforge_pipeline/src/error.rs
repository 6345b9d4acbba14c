//! Error types for the pipeline.

use std::path::PathBuf;

/// Errors that stop a pipeline run.
///
/// Everything upstream of the artifact writer degrades instead of failing,
/// so only output I/O appears here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        /// The directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The test vectors could not be serialized.
    #[error("cannot serialize test vectors: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_display() {
        let e = PipelineError::CreateDir {
            path: PathBuf::from("/ro/out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(e.to_string(), "cannot create output directory /ro/out: denied");
    }

    #[test]
    fn write_display() {
        let e = PipelineError::Write {
            path: PathBuf::from("out/testbench_final.v"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(e.to_string(), "cannot write out/testbench_final.v: disk full");
    }
}
