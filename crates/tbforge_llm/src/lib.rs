//! Text generation for the testbench pipeline.
//!
//! The pipeline only needs prompt-in, text-out plus an availability flag,
//! which is the [`TextGenerator`] trait. [`ChatClient`] speaks the
//! OpenAI-compatible chat-completions protocol over blocking HTTP;
//! [`OfflineGenerator`] is never available and drives the placeholder path.

#![warn(missing_docs)]

pub mod chat;
pub mod error;
pub mod generator;

pub use chat::ChatClient;
pub use error::GeneratorError;
pub use generator::{GenerationRequest, OfflineGenerator, TextGenerator};
