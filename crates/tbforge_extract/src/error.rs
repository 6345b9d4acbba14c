//! Error types for test-pattern decoding.

/// Errors that can occur when decoding a model-supplied pattern list.
///
/// Text extraction itself never fails; only turning the extracted JSON into
/// test vectors can. Callers log these and continue with no vectors.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern section is not valid JSON.
    #[error("test patterns are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The pattern section is valid JSON but not an array.
    #[error("test patterns must be a JSON array, found {found}")]
    NotAnArray {
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// An element of the array is not an object.
    #[error("test pattern {index} must be a JSON object, found {found}")]
    NotAnObject {
        /// Zero-based position of the offending element.
        index: usize,
        /// The JSON type that was found instead.
        found: &'static str,
    },
}
