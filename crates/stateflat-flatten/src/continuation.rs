//! Persistent continuation stack.
//!
//! A [`Continuation`] encodes "what remains to execute" as a stack of resume
//! frames, innermost first. It replaces the native call stack a recursive
//! tree walk would use, so a partially consumed position can be captured,
//! queued, and resumed later.
//!
//! The stack is an immutable singly-linked list. `push` and `pop` return new
//! handles and never touch the nodes they share with other handles, so a
//! construct handler can queue one continuation and keep working on another
//! derived from the same tail.

use stateflat_ir::{Block, Statement};
use std::fmt;
use std::rc::Rc;

/// A resume point: the statement at `index` in `block`, and everything after it.
#[derive(Debug, Clone)]
pub struct Frame {
    pub block: Block,
    pub index: usize,
    /// Set when the `for` loop at `index` has already run its initializer.
    pub after_for_init: bool,
}

impl Frame {
    pub const fn new(block: Block, index: usize) -> Self {
        Self {
            block,
            index,
            after_for_init: false,
        }
    }

    pub fn statement(&self) -> Option<&Statement> {
        self.block.get(self.index)
    }

    /// The frame for the statement after this one in the same block, if any.
    pub fn following(&self) -> Option<Self> {
        (self.index + 1 < self.block.len()).then(|| Self::new(self.block.clone(), self.index + 1))
    }

    /// The same position, with the `for` initializer marked as consumed.
    pub fn with_for_init_consumed(&self) -> Self {
        Self {
            block: self.block.clone(),
            index: self.index,
            after_for_init: true,
        }
    }
}

struct Node {
    frame: Frame,
    next: Continuation,
}

#[derive(Clone, Default)]
pub struct Continuation {
    head: Option<Rc<Node>>,
}

impl Continuation {
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// A continuation that runs `block` from its first statement.
    pub fn from_block(block: &Block) -> Self {
        Self::new().push(Frame::new(block.clone(), 0))
    }

    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn peek(&self) -> Option<&Frame> {
        self.head.as_deref().map(|node| &node.frame)
    }

    /// Push `frame` on top. A frame past the end of its block resumes nothing
    /// and is not pushed.
    #[must_use]
    pub fn push(&self, frame: Frame) -> Self {
        if frame.index >= frame.block.len() {
            return self.clone();
        }
        Self {
            head: Some(Rc::new(Node {
                frame,
                next: self.clone(),
            })),
        }
    }

    /// Push the frame following `frame` in its block, when there is one.
    #[must_use]
    pub fn push_following(&self, frame: &Frame) -> Self {
        match frame.following() {
            Some(next) => self.push(next),
            None => self.clone(),
        }
    }

    /// Split into the top frame and the rest.
    pub fn pop(&self) -> Option<(Frame, Self)> {
        self.head
            .as_deref()
            .map(|node| (node.frame.clone(), node.next.clone()))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            node: self.head.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

pub struct Iter<'a> {
    node: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<&'a Frame> {
        let node = self.node?;
        self.node = node.next.head.as_deref();
        Some(&node.frame)
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|frame| (frame.index, frame.block.len())))
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/continuation.rs"]
mod tests;
