//! FIFO queue of blocks still to be flattened.

use crate::continuation::Continuation;
use crate::error::FlattenError;
use crate::labels::LabelRegistry;
use std::collections::VecDeque;

/// A block that has a name but no statements yet.
#[derive(Debug)]
pub struct PendingTask {
    /// Where to start flattening.
    pub continuation: Continuation,
    /// Name of the block this task produces.
    pub name: String,
    /// Where control goes when the continuation runs out.
    pub fall_through: String,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<PendingTask>,
    labels: LabelRegistry,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `continuation` and queue it.
    ///
    /// The name is registered even when the continuation is empty; such a task
    /// has nothing to flatten and is dropped.
    pub fn enqueue(
        &mut self,
        continuation: Continuation,
        name: String,
        fall_through: String,
    ) -> Result<(), FlattenError> {
        if !self.labels.try_register(&name) {
            return Err(FlattenError::DuplicateLabel { label: name });
        }
        if continuation.is_empty() {
            tracing::trace!(name = %name, "dropping empty task");
            return Ok(());
        }
        tracing::trace!(
            name = %name,
            fall_through = %fall_through,
            depth = continuation.len(),
            "scheduled block"
        );
        self.queue.push_back(PendingTask {
            continuation,
            name,
            fall_through,
        });
        Ok(())
    }

    pub fn next_task(&mut self) -> Option<PendingTask> {
        self.queue.pop_front()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.labels.is_registered(name)
    }

    /// Number of tasks waiting to be flattened.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of block names bound so far, including dropped tasks.
    pub fn registered(&self) -> usize {
        self.labels.registered_count()
    }
}

#[cfg(test)]
#[path = "../tests/scheduler.rs"]
mod tests;
