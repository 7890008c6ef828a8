//! Construct handlers for the flattening engine.
//!
//! Each handler splices one label-containing `if`/`while`/`do`/`for` into the
//! current block and schedules whatever has to become a block of its own.
//! All of them get the construct's frame, the continuation after it, the
//! current fall-through label and the output so far, and report whether the
//! engine may keep appending to the current block.

use super::*;
use crate::localize::{LoopTargets, contains_break, localize_jumps};
use stateflat_ir::Expression;

/// Where control goes once a construct finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AfterLabel {
    /// Minted for this construct; "everything after" must be scheduled under it.
    Fresh(String),
    /// The label of the labeled statement that follows.
    Next(String),
    /// Nothing follows; reuse the enclosing fall-through.
    FallThrough(String),
}

impl AfterLabel {
    fn name(&self) -> &str {
        match self {
            Self::Fresh(name) | Self::Next(name) | Self::FallThrough(name) => name,
        }
    }
}

impl Flattener {
    /// Label for the code following the construct at `frame`.
    fn label_after(&mut self, frame: &Frame, rest: &Continuation, fall_through: &str) -> AfterLabel {
        let after = rest.push_following(frame);
        match after.peek().and_then(Frame::statement) {
            Some(Statement::Labeled { label, .. }) => AfterLabel::Next(label.clone()),
            Some(_) => AfterLabel::Fresh(self.names.fresh()),
            None => AfterLabel::FallThrough(fall_through.to_string()),
        }
    }

    /// Schedule the code after the construct at `frame` under `after`, unless
    /// someone else already owns that label.
    fn schedule_after(
        &mut self,
        after: &AfterLabel,
        frame: &Frame,
        rest: &Continuation,
        fall_through: &str,
    ) -> Result<(), FlattenError> {
        match after {
            AfterLabel::Fresh(name) => self.scheduler.enqueue(
                rest.push_following(frame),
                name.clone(),
                fall_through.to_string(),
            ),
            AfterLabel::Next(name) if !self.scheduler.is_registered(name) => {
                self.scheduler.enqueue(
                    rest.push_following(frame),
                    name.clone(),
                    fall_through.to_string(),
                )
            }
            AfterLabel::Next(_) | AfterLabel::FallThrough(_) => Ok(()),
        }
    }

    /// End the current block with a jump to a new block that starts at the
    /// loop in `frame`.
    fn split_before_loop(
        &mut self,
        resume_at: Frame,
        rest: &Continuation,
        fall_through: &str,
        output: &mut Vec<Statement>,
    ) -> Result<Flow, FlattenError> {
        let loop_top = self.names.fresh();
        tracing::trace!(loop_top = %loop_top, "loop moved to its own block");
        self.scheduler.enqueue(
            rest.push(resume_at),
            loop_top.clone(),
            fall_through.to_string(),
        )?;
        output.push(Statement::goto(loop_top));
        Ok(Flow::Stop)
    }

    pub(super) fn handle_if(
        &mut self,
        test: &Expression,
        then_branch: &Block,
        else_branch: Option<&Block>,
        frame: &Frame,
        rest: &Continuation,
        fall_through: &str,
        output: &mut Vec<Statement>,
    ) -> Result<Flow, FlattenError> {
        let after = self.label_after(frame, rest, fall_through);
        tracing::trace!(after = ?after, "flattening if");

        let then_flat = self.flatten(Continuation::from_block(then_branch), after.name(), None)?;
        let else_flat = else_branch
            .map(|branch| self.flatten(Continuation::from_block(branch), after.name(), None))
            .transpose()?;
        let has_else = else_flat.is_some();

        output.push(Statement::If {
            test: test.clone(),
            then_branch: Block::from(then_flat),
            else_branch: else_flat.map(Block::from),
        });
        if !has_else {
            output.push(Statement::goto(after.name()));
        }

        if let AfterLabel::Fresh(name) = after {
            self.scheduler.enqueue(
                rest.push_following(frame),
                name,
                fall_through.to_string(),
            )?;
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    pub(super) fn handle_while(
        &mut self,
        condition: &Expression,
        body: &Block,
        frame: &Frame,
        rest: &Continuation,
        fall_through: &str,
        block_name: Option<&str>,
        output: &mut Vec<Statement>,
    ) -> Result<Flow, FlattenError> {
        let loop_name = match block_name {
            Some(name) if output.is_empty() => name,
            _ => return self.split_before_loop(frame.clone(), rest, fall_through, output),
        };

        let after = self.label_after(frame, rest, fall_through);
        tracing::trace!(loop_name = %loop_name, after = ?after, "inlining while loop");
        output.push(Statement::if_then(
            Expression::not(condition.clone()),
            vec![Statement::goto(after.name())],
        ));

        let body = localize_jumps(
            body,
            LoopTargets {
                break_to: Some(after.name()),
                continue_to: loop_name,
            },
        )?;
        let flat = self.flatten(Continuation::from_block(&body), loop_name, None)?;
        output.extend(flat);

        self.schedule_after(&after, frame, rest, fall_through)?;
        Ok(Flow::Stop)
    }

    pub(super) fn handle_do_while(
        &mut self,
        body: &Block,
        condition: &Expression,
        frame: &Frame,
        rest: &Continuation,
        fall_through: &str,
        block_name: Option<&str>,
        output: &mut Vec<Statement>,
    ) -> Result<Flow, FlattenError> {
        let loop_name = match block_name {
            Some(name) if output.is_empty() => name,
            _ => return self.split_before_loop(frame.clone(), rest, fall_through, output),
        };

        let condition_label = self.names.fresh();
        let check = Block::new(vec![Statement::if_then(
            condition.clone(),
            vec![Statement::goto(loop_name)],
        )]);

        if !contains_break(body) {
            // Nothing jumps past the loop, so the code after it runs inline
            // behind the condition check.
            tracing::trace!(
                loop_name = %loop_name,
                condition_label = %condition_label,
                "inlining do-while loop"
            );
            let flat = self.flatten_do_while_body(body, None, &condition_label)?;
            output.extend(flat);
            self.scheduler.enqueue(
                rest.push_following(frame).push(Frame::new(check, 0)),
                condition_label,
                fall_through.to_string(),
            )?;
            return Ok(Flow::Stop);
        }

        let after = self.label_after(frame, rest, fall_through);
        tracing::trace!(
            loop_name = %loop_name,
            condition_label = %condition_label,
            after = ?after,
            "inlining do-while loop with break"
        );
        let flat = self.flatten_do_while_body(body, Some(after.name()), &condition_label)?;
        output.extend(flat);

        self.schedule_after(&after, frame, rest, fall_through)?;
        self.scheduler.enqueue(
            Continuation::from_block(&check),
            condition_label,
            after.name().to_string(),
        )?;
        Ok(Flow::Stop)
    }

    fn flatten_do_while_body(
        &mut self,
        body: &Block,
        break_to: Option<&str>,
        condition_label: &str,
    ) -> Result<Vec<Statement>, FlattenError> {
        let body = localize_jumps(
            body,
            LoopTargets {
                break_to,
                continue_to: condition_label,
            },
        )?;
        self.flatten(Continuation::from_block(&body), condition_label, None)
    }

    pub(super) fn handle_for(
        &mut self,
        init: &Statement,
        condition: Option<&Expression>,
        iterator: Option<&Expression>,
        body: &Block,
        frame: &Frame,
        rest: &Continuation,
        fall_through: &str,
        block_name: Option<&str>,
        output: &mut Vec<Statement>,
    ) -> Result<Flow, FlattenError> {
        if contains_labels(init) {
            return Err(FlattenError::UnhandledLabeledStatement { kind: init.kind() });
        }
        let init_pending = !matches!(init, Statement::Empty) && !frame.after_for_init;

        let loop_name = match block_name {
            Some(name) if output.is_empty() && !init_pending => name,
            _ => {
                if init_pending {
                    output.push(init.clone());
                }
                return self.split_before_loop(
                    frame.with_for_init_consumed(),
                    rest,
                    fall_through,
                    output,
                );
            }
        };

        let iterator_label = match iterator {
            Some(_) => self.names.fresh(),
            None => loop_name.to_string(),
        };
        let after = self.label_after(frame, rest, fall_through);
        tracing::trace!(
            loop_name = %loop_name,
            iterator_label = %iterator_label,
            after = ?after,
            "inlining for loop"
        );

        if let Some(condition) = condition {
            output.push(Statement::if_then(
                Expression::not(condition.clone()),
                vec![Statement::goto(after.name())],
            ));
        }

        let body = localize_jumps(
            body,
            LoopTargets {
                break_to: Some(after.name()),
                continue_to: &iterator_label,
            },
        )?;
        let flat = self.flatten(Continuation::from_block(&body), &iterator_label, None)?;
        output.extend(flat);

        if let Some(iterator) = iterator {
            let step = Block::new(vec![
                Statement::expr(iterator.clone()),
                Statement::goto(loop_name),
            ]);
            self.scheduler.enqueue(
                Continuation::from_block(&step),
                iterator_label,
                loop_name.to_string(),
            )?;
        }

        self.schedule_after(&after, frame, rest, fall_through)?;
        Ok(Flow::Stop)
    }
}
