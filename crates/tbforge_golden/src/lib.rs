//! Reference ("golden") model evaluation.
//!
//! A reference model is a small Rhai script defining a function named
//! `<module>_golden` that takes the module's inputs and returns an object map
//! keyed by output name:
//!
//! ```rhai
//! fn and_gate_golden(a, b) {
//!     #{ y: a & b }
//! }
//! ```
//!
//! The [`ReferenceModelRunner`] compiles and loads the script in a fresh
//! sandboxed engine, resolves the entry point, and evaluates it once per
//! [`TestVector`](tbforge_common::TestVector). Loading and resolution are an
//! all-or-nothing gate; evaluation failures are recorded per vector.

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod runner;
pub mod sandbox;

pub use error::GoldenError;
pub use runner::{EntryPoint, ReferenceModel, ReferenceModelRunner, REFERENCE_SUFFIX};
pub use sandbox::build_engine;
