//! The text-generation contract.

use crate::error::GeneratorError;

/// One prompt plus its sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRequest<'a> {
    /// The user prompt.
    pub prompt: &'a str,
    /// An optional system prompt sent ahead of the user prompt.
    pub system_prompt: Option<&'a str>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// A prompt-in, text-out collaborator.
pub trait TextGenerator {
    /// Returns `true` if [`generate`](Self::generate) can be expected to
    /// reach a model.
    fn is_available(&self) -> bool;

    /// Produces a completion for `request`.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        (**self).generate(request)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        (**self).generate(request)
    }
}

/// A generator with no model behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn is_available(&self) -> bool {
        false
    }

    fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }
}
