//! stateflat: control-flow flattening for state-machine lowering.
//!
//! The pass itself lives in two workspace crates, re-exported here:
//! - [`ir`]: the structured statement tree and the flattened block model
//! - [`flatten`]: the flattening engine, its options and the output verifier
//!
//! This package adds the `stateflat` command-line driver and its tracing setup.

pub use stateflat_flatten as flatten;
pub use stateflat_ir as ir;

pub use stateflat_flatten::{FlattenError, FlattenOptions, flatten_body, verify_blocks};
pub use stateflat_ir::{Block, LabeledBlock, Statement};

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

// Command-line driver
pub mod cli;
