//! Deterministic text-to-structure extraction.
//!
//! Turns unstructured text into the structures the rest of the pipeline
//! works with: a [`ModuleSignature`](tbforge_common::ModuleSignature) from
//! HDL source, delimited sections and fenced code blocks from model
//! responses, and [`TestVector`](tbforge_common::TestVector)s from a JSON
//! pattern list. None of the text extractors fail; a miss yields an empty
//! or best-effort string.

#![warn(missing_docs)]

pub mod code_block;
pub mod error;
pub mod patterns;
pub mod section;
pub mod signature;

pub use code_block::{extract_code_block, extract_script, CodeBlockQuery};
pub use error::PatternError;
pub use patterns::{decode_patterns, named_stimulus};
pub use section::extract_section;
pub use signature::extract_signature;
