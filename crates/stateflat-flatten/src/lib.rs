//! Control-flow flattening for state-machine lowering.
//!
//! Rewrites a structured statement body that contains labels into a list of
//! flat `LabeledBlock`s. Each block ends in an explicit jump, return or throw,
//! so a later pass can emit them as cases of a label-indexed dispatch loop.
//!
//! ```ignore
//! let blocks = flatten_body(&body, &FlattenOptions::default())?;
//! verify_blocks(&blocks, DEFAULT_EXIT_LABEL)?;
//! ```

pub mod continuation;
pub use continuation::{Continuation, Frame};

pub mod error;
pub use error::FlattenError;

pub mod options;
pub use options::{DEFAULT_ANONYMOUS_PREFIX, DEFAULT_EXIT_LABEL, FlattenOptions};

// Per-run bookkeeping
pub mod labels;
pub mod scheduler;

pub mod localize;

pub mod engine;
pub use engine::{Flattener, flatten_body};

pub mod verify;
pub use verify::{VerifyError, verify_blocks};
