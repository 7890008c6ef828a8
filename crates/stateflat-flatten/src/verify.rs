//! Structural checks on a flattened block list.
//!
//! A block list is well formed when every block name is unique, no block can
//! run off its end, and every `Goto` lands on a produced block or the exit
//! label. The CLI runs these checks on request; tests use them as an oracle.

use rustc_hash::FxHashSet;
use stateflat_ir::analysis::goto_targets;
use stateflat_ir::{LabeledBlock, is_fallthrough_reachable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("block `{name}` is produced more than once")]
    DuplicateBlock { name: String },

    #[error("block `{name}` can fall off its end")]
    OpenEnded { name: String },

    #[error("block `{from}` jumps to `{target}`, which is neither a block nor the exit label")]
    DanglingGoto { from: String, target: String },
}

/// Check `blocks` and report the first violation found.
pub fn verify_blocks(blocks: &[LabeledBlock], exit_label: &str) -> Result<(), VerifyError> {
    let mut names = FxHashSet::default();
    for block in blocks {
        if !names.insert(block.name.as_str()) {
            return Err(VerifyError::DuplicateBlock {
                name: block.name.clone(),
            });
        }
    }

    for block in blocks {
        if is_fallthrough_reachable(&block.statements) {
            return Err(VerifyError::OpenEnded {
                name: block.name.clone(),
            });
        }
        if let Some(target) = goto_targets(&block.statements)
            .into_iter()
            .find(|target| *target != exit_label && !names.contains(target))
        {
            return Err(VerifyError::DanglingGoto {
                from: block.name.clone(),
                target: target.to_string(),
            });
        }
    }

    tracing::trace!(blocks = blocks.len(), "verified block list");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/verify.rs"]
mod tests;
