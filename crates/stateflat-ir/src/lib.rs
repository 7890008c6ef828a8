//! Statement IR for the stateflat compiler pass.
//!
//! This crate provides the data model shared by the flattener and its callers:
//! - Structured statement trees (`Statement`, `Block`, `Expression`)
//! - The flattened output unit (`LabeledBlock`)
//! - Read-only tree queries (labels, named jumps, reachability)
//! - A debug printer

pub mod ir;
pub use ir::{Block, Expression, LabeledBlock, Statement, StatementKind, SwitchCase};

// Tree queries used by the flattener and the output verifier
pub mod analysis;
pub use analysis::is_fallthrough_reachable;

pub mod printer;
pub use printer::Printer;
