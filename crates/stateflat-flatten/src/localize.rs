//! Break/continue localization for inlined loop bodies.
//!
//! When a loop is flattened, its body stops being a loop: `break` and
//! `continue` that belong to it must become explicit jumps. Only the jumps of
//! the loop being flattened are rewritten. Nested loops, switches and functions
//! bind their own `break`/`continue`, so the walk never enters them.

use crate::error::FlattenError;
use stateflat_ir::{Block, Statement, StatementKind};

/// Statement kinds that own their `break`/`continue` targets.
const DO_NOT_ENTER: [StatementKind; 5] = [
    StatementKind::For,
    StatementKind::While,
    StatementKind::DoWhile,
    StatementKind::Switch,
    StatementKind::Function,
];

/// Jump targets for the loop whose body is being rewritten.
#[derive(Debug, Clone, Copy)]
pub struct LoopTargets<'a> {
    /// `None` leaves `break` untouched.
    pub break_to: Option<&'a str>,
    pub continue_to: &'a str,
}

/// Rewrite `body`, replacing the loop's own `break`/`continue` with `Goto`.
pub fn localize_jumps(body: &Block, targets: LoopTargets<'_>) -> Result<Block, FlattenError> {
    body.iter()
        .map(|statement| rewrite(statement, targets))
        .collect::<Result<Vec<_>, _>>()
        .map(Block::from)
}

/// Whether `body` has a `break` that belongs to the enclosing loop.
pub fn contains_break(body: &Block) -> bool {
    fn walk(statement: &Statement) -> bool {
        if DO_NOT_ENTER.contains(&statement.kind()) {
            return false;
        }
        matches!(statement, Statement::Break { .. }) || statement.children().into_iter().any(walk)
    }
    body.iter().any(walk)
}

fn rewrite(statement: &Statement, targets: LoopTargets<'_>) -> Result<Statement, FlattenError> {
    if DO_NOT_ENTER.contains(&statement.kind()) {
        return Ok(statement.clone());
    }
    let rewritten = match statement {
        Statement::Break { label: Some(label) } => {
            return Err(FlattenError::NamedJump {
                keyword: StatementKind::Break,
                label: label.clone(),
            });
        }
        Statement::Continue { label: Some(label) } => {
            return Err(FlattenError::NamedJump {
                keyword: StatementKind::Continue,
                label: label.clone(),
            });
        }
        Statement::Break { label: None } => match targets.break_to {
            Some(target) => Statement::goto(target),
            None => statement.clone(),
        },
        Statement::Continue { label: None } => Statement::goto(targets.continue_to),
        Statement::Block { body } => Statement::Block {
            body: localize_jumps(body, targets)?,
        },
        Statement::If {
            test,
            then_branch,
            else_branch,
        } => Statement::If {
            test: test.clone(),
            then_branch: localize_jumps(then_branch, targets)?,
            else_branch: else_branch
                .as_ref()
                .map(|branch| localize_jumps(branch, targets))
                .transpose()?,
        },
        Statement::Labeled { label, body } => Statement::Labeled {
            label: label.clone(),
            body: Box::new(rewrite(body, targets)?),
        },
        _ => statement.clone(),
    };
    Ok(rewritten)
}

#[cfg(test)]
#[path = "../tests/localize.rs"]
mod tests;
