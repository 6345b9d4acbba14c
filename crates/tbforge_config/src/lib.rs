//! Parsing and validation of `tbforge.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`Config`] covering the text generator, the pipeline,
//! the testbench rewriter, the reference-model sandbox and the simulator.
//! Every section has defaults, so an absent file is equivalent to an empty one.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, validate_config, CONFIG_FILE};
pub use resolve::resolve_api_key;
pub use types::*;
