//! Flattening engine.
//!
//! Turns a structured statement body into an ordered list of `LabeledBlock`s,
//! each ending in an explicit `Goto`, `Return` or `Throw`.
//!
//! # Algorithm
//!
//! The engine runs a work queue of pending blocks. Each pending block is a
//! name plus a [`Continuation`]: a persistent stack of resume frames. Taking a
//! task, the engine pops frames and copies statements into the block's output
//! until it meets something that must start a new block:
//!
//! - A labeled statement whose label is not yet bound. The rest of the
//!   continuation is queued under that label and the current block ends with
//!   a jump to it. When the queued task runs, the label is bound, so the same
//!   statement is simply unwrapped (the *merge* case).
//! - A loop that contains labels. A loop is only inlined when it is the first
//!   thing in a block, since that block then doubles as the loop's re-entry
//!   point.
//!
//! Statements without labels anywhere inside them are copied verbatim, loops
//! included. Label-containing blocks are spliced into the continuation, and
//! label-containing `if`/`while`/`do`/`for` go to the construct handlers in
//! `engine_constructs.rs`.
//!
//! ```text
//! while (c) { a(); L: b(); }      $sm0: if (!c) goto $sm1;
//! d();                                  a();
//!                                       goto L;
//!                                 L:    b();
//!                                       goto $sm0;
//!                                 $sm1: d();
//!                                       goto $exit;
//! ```
//!
//! A `Flattener` holds the label registry and the name counter for exactly one
//! body. `run` consumes it.

#[path = "engine_constructs.rs"]
mod engine_constructs;

use crate::continuation::{Continuation, Frame};
use crate::error::FlattenError;
use crate::labels::AnonymousNames;
use crate::options::FlattenOptions;
use crate::scheduler::Scheduler;
use rustc_hash::FxHashSet;
use stateflat_ir::analysis::{collect_labels, contains_labels, find_named_jump, first_label};
use stateflat_ir::{Block, LabeledBlock, Statement, is_fallthrough_reachable};

/// What the engine does after a construct handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Keep appending to the current block.
    Continue,
    /// The handler closed the current block.
    Stop,
}

pub struct Flattener {
    options: FlattenOptions,
    scheduler: Scheduler,
    names: AnonymousNames,
}

impl Flattener {
    pub fn new(options: FlattenOptions) -> Self {
        let names = AnonymousNames::new(options.anonymous_prefix.clone());
        Self {
            options,
            scheduler: Scheduler::new(),
            names,
        }
    }

    /// Flatten `body` into labeled blocks. The first block is the entry point.
    pub fn run(mut self, body: &Block) -> Result<Vec<LabeledBlock>, FlattenError> {
        self.options.validate()?;
        self.check_input_labels(body)?;

        let _span = tracing::debug_span!("flatten", statements = body.len()).entered();

        let entry = self.names.fresh();
        let exit = self.options.exit_label.clone();
        if body.is_empty() {
            // Nothing to schedule; the entry block only leaves.
            return Ok(vec![LabeledBlock::new(entry, vec![Statement::goto(exit)])]);
        }
        self.scheduler
            .enqueue(Continuation::from_block(body), entry, exit)?;

        let mut blocks = Vec::new();
        while let Some(task) = self.scheduler.next_task() {
            tracing::debug!(
                name = %task.name,
                fall_through = %task.fall_through,
                "flattening block"
            );
            let statements = self.flatten(
                task.continuation,
                &task.fall_through,
                Some(task.name.as_str()),
            )?;
            tracing::debug!(
                name = %task.name,
                statements = statements.len(),
                pending = self.scheduler.pending(),
                "finished block"
            );
            blocks.push(LabeledBlock::new(task.name, statements));
        }

        tracing::debug!(
            blocks = blocks.len(),
            registered = self.scheduler.registered(),
            anonymous = self.names.minted(),
            "flatten complete"
        );
        Ok(blocks)
    }

    /// Input labels must be unique and must not collide with the exit label
    /// or minted names.
    fn check_input_labels(&self, body: &Block) -> Result<(), FlattenError> {
        let mut seen = FxHashSet::default();
        for label in collect_labels(body) {
            if self.options.is_reserved(label) {
                return Err(FlattenError::ReservedLabel {
                    label: label.to_string(),
                });
            }
            if !seen.insert(label) {
                return Err(FlattenError::RepeatedLabel {
                    label: label.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Flatten `continuation` into one statement list.
    ///
    /// `block_name` is the name of the block being produced when this is the
    /// top level of a task. Sub-flattenings (`if` branches, loop bodies) pass
    /// `None`: their output is spliced into another block and cannot serve as a
    /// loop's re-entry point.
    fn flatten(
        &mut self,
        mut continuation: Continuation,
        fall_through: &str,
        block_name: Option<&str>,
    ) -> Result<Vec<Statement>, FlattenError> {
        let mut output = Vec::new();

        while let Some((frame, rest)) = continuation.pop() {
            continuation = rest;
            let Some(mut statement) = frame.statement() else {
                continue;
            };

            if let Statement::Labeled { label, body } = statement {
                if !self.scheduler.is_registered(label) {
                    tracing::trace!(label = %label, "label starts a new block");
                    self.scheduler.enqueue(
                        continuation.push(frame.clone()),
                        label.clone(),
                        fall_through.to_string(),
                    )?;
                    if is_fallthrough_reachable(&output) {
                        output.push(Statement::goto(label.as_str()));
                    }
                    return Ok(output);
                }
                if matches!(body.as_ref(), Statement::Labeled { .. }) {
                    // `A: B: stmt` - give `B` its own frame so it is checked too.
                    let inner = Frame {
                        block: Block::new(vec![body.as_ref().clone()]),
                        index: 0,
                        after_for_init: frame.after_for_init,
                    };
                    continuation = continuation.push_following(&frame).push(inner);
                    continue;
                }
                statement = body.as_ref();
            }

            if !contains_labels(statement) {
                if let Some((keyword, label)) = find_named_jump(statement) {
                    return Err(FlattenError::NamedJump {
                        keyword,
                        label: label.to_string(),
                    });
                }
                output.push(statement.clone());
                continuation = continuation.push_following(&frame);
                continue;
            }

            let flow = match statement {
                Statement::Block { body } => {
                    continuation = continuation
                        .push_following(&frame)
                        .push(Frame::new(body.clone(), 0));
                    continue;
                }
                Statement::If {
                    test,
                    then_branch,
                    else_branch,
                } => self.handle_if(
                    test,
                    then_branch,
                    else_branch.as_ref(),
                    &frame,
                    &continuation,
                    fall_through,
                    &mut output,
                )?,
                Statement::While { condition, body } => self.handle_while(
                    condition,
                    body,
                    &frame,
                    &continuation,
                    fall_through,
                    block_name,
                    &mut output,
                )?,
                Statement::DoWhile { body, condition } => self.handle_do_while(
                    body,
                    condition,
                    &frame,
                    &continuation,
                    fall_through,
                    block_name,
                    &mut output,
                )?,
                Statement::For {
                    init,
                    condition,
                    iterator,
                    body,
                } => self.handle_for(
                    init,
                    condition.as_ref(),
                    iterator.as_ref(),
                    body,
                    &frame,
                    &continuation,
                    fall_through,
                    block_name,
                    &mut output,
                )?,
                Statement::Switch { .. } => {
                    let label = first_label(statement).unwrap_or_default().to_string();
                    return Err(FlattenError::LabelInSwitch { label });
                }
                other => {
                    return Err(FlattenError::UnhandledLabeledStatement { kind: other.kind() });
                }
            };

            match flow {
                Flow::Stop => return Ok(output),
                Flow::Continue => continuation = continuation.push_following(&frame),
            }
        }

        if is_fallthrough_reachable(&output) {
            output.push(Statement::goto(fall_through));
        }
        Ok(output)
    }
}

/// Flatten `body` with a fresh `Flattener`.
pub fn flatten_body(
    body: &Block,
    options: &FlattenOptions,
) -> Result<Vec<LabeledBlock>, FlattenError> {
    Flattener::new(options.clone()).run(body)
}

#[cfg(test)]
#[path = "../tests/engine.rs"]
mod tests;
