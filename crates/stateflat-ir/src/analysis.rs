//! Read-only queries over statement trees.
//!
//! Everything here stops at nested function bodies: labels and jumps inside a
//! function belong to that function, not to the body being flattened.

use crate::ir::{Statement, StatementKind};

/// Whether `statement` is, or contains, a labeled statement.
pub fn contains_labels(statement: &Statement) -> bool {
    matches!(statement, Statement::Labeled { .. })
        || statement.children().into_iter().any(contains_labels)
}

/// First label declared in `statement` or its descendants, in source order.
pub fn first_label(statement: &Statement) -> Option<&str> {
    if let Statement::Labeled { label, .. } = statement {
        return Some(label);
    }
    statement.children().into_iter().find_map(first_label)
}

/// Every label declared in `statements`, in source order.
pub fn collect_labels(statements: &[Statement]) -> Vec<&str> {
    fn walk<'a>(statement: &'a Statement, out: &mut Vec<&'a str>) {
        if let Statement::Labeled { label, .. } = statement {
            out.push(label);
        }
        for child in statement.children() {
            walk(child, out);
        }
    }

    let mut labels = Vec::new();
    for statement in statements {
        walk(statement, &mut labels);
    }
    labels
}

/// First `break label` / `continue label` in `statement`, as `(keyword, label)`.
pub fn find_named_jump(statement: &Statement) -> Option<(StatementKind, &str)> {
    match statement {
        Statement::Break { label: Some(label) } => Some((StatementKind::Break, label)),
        Statement::Continue { label: Some(label) } => Some((StatementKind::Continue, label)),
        _ => statement.children().into_iter().find_map(find_named_jump),
    }
}

/// Targets of every `Goto` in `statements`, including those nested in branches.
pub fn goto_targets(statements: &[Statement]) -> Vec<&str> {
    fn walk<'a>(statement: &'a Statement, out: &mut Vec<&'a str>) {
        if let Statement::Goto { target } = statement {
            out.push(target);
        }
        for child in statement.children() {
            walk(child, out);
        }
    }

    let mut targets = Vec::new();
    for statement in statements {
        walk(statement, &mut targets);
    }
    targets
}

/// Whether control can run off the end of `statements`.
///
/// The end is unreachable only when the last statement is a `Return`, `Throw`
/// or `Goto`, or an `if` with both branches present and both unreachable at
/// their end. A trailing block is checked on its contents. Empty sequences and
/// empty blocks are reachable.
pub fn is_fallthrough_reachable(statements: &[Statement]) -> bool {
    let Some(last) = statements.last() else {
        return true;
    };
    match last {
        Statement::Return { .. } | Statement::Throw { .. } | Statement::Goto { .. } => false,
        Statement::Block { body } => is_fallthrough_reachable(body),
        Statement::If {
            then_branch,
            else_branch,
            ..
        } => match else_branch {
            Some(else_branch) => {
                is_fallthrough_reachable(then_branch) || is_fallthrough_reachable(else_branch)
            }
            None => true,
        },
        _ => true,
    }
}

#[cfg(test)]
#[path = "../tests/analysis.rs"]
mod tests;
