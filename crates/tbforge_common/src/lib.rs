//! Shared foundational types used across the tbforge testbench pipeline.
//!
//! This crate provides the structured module signature produced from HDL
//! source text and the test-vector record that flows from pattern decoding,
//! through the reference model, into the testbench rewriter.

#![warn(missing_docs)]

pub mod signature;
pub mod vector;

pub use signature::{signal_name, ModuleSignature};
pub use vector::{Golden, Stimulus, TestVector};
