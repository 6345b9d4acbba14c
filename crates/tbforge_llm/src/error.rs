//! Error types for text generation.

/// Errors that can occur while asking a collaborator for text.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No credentials are configured, so no request was sent.
    #[error("text generator is not configured (no API key)")]
    Unavailable,

    /// The HTTP client could not be built or the request could not be sent.
    #[error("request to {endpoint} failed: {reason}")]
    Transport {
        /// The endpoint that was contacted.
        endpoint: String,
        /// The underlying transport error.
        reason: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The response body was not a chat-completions reply.
    #[error("could not decode response: {reason}")]
    Decode {
        /// The decoding error.
        reason: String,
    },

    /// The reply carried no choices.
    #[error("response contained no choices")]
    NoChoices,
}
