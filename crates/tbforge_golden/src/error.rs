//! Error types for reference-model loading and evaluation.

/// Errors that can occur while loading or evaluating a reference model.
///
/// [`Compile`](Self::Compile), [`Load`](Self::Load) and
/// [`MissingEntryPoint`](Self::MissingEntryPoint) close the gate for the
/// whole run. Every other variant is recorded on the single vector it
/// happened on.
#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    /// The script does not parse.
    #[error("reference model failed to compile: {reason}")]
    Compile {
        /// The engine's parse error.
        reason: String,
    },

    /// The script's top-level statements raised an error.
    #[error("reference model failed to load: {reason}")]
    Load {
        /// The engine's runtime error.
        reason: String,
    },

    /// The script defines no function with the expected name.
    #[error("reference model defines no function '{name}'")]
    MissingEntryPoint {
        /// The entry point that was looked up.
        name: String,
    },

    /// A named stimulus lacks a value for one of the entry point's parameters.
    #[error("missing input '{name}'")]
    MissingInput {
        /// The parameter with no value.
        name: String,
    },

    /// A named stimulus carries a value no parameter accepts.
    #[error("unexpected input '{name}'")]
    UnexpectedInput {
        /// The input with no matching parameter.
        name: String,
    },

    /// A positional stimulus has the wrong number of values.
    #[error("entry point takes {expected} argument(s) but {actual} were given")]
    ArgumentCount {
        /// The entry point's parameter count.
        expected: usize,
        /// The number of values supplied.
        actual: usize,
    },

    /// A value could not cross between JSON and the script engine.
    #[error("value conversion failed: {reason}")]
    Conversion {
        /// Description of the conversion failure.
        reason: String,
    },

    /// The entry point raised an error or exceeded a sandbox limit.
    #[error("reference model raised: {reason}")]
    Evaluation {
        /// The engine's runtime error.
        reason: String,
    },

    /// The entry point returned nothing.
    #[error("reference model produced no outputs")]
    NoOutputs,

    /// The entry point returned something other than an object map.
    #[error("reference model returned {type_name}, expected an object map of outputs")]
    NotAMap {
        /// The script type name of the returned value.
        type_name: String,
    },
}

impl GoldenError {
    /// Returns `true` if this error closes the gate for the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GoldenError::Compile { .. }
                | GoldenError::Load { .. }
                | GoldenError::MissingEntryPoint { .. }
        )
    }
}
