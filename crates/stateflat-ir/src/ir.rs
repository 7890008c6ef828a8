//! Statement IR for the flattening pass.
//!
//! This module defines the tree-structured statement model that upstream phases
//! hand to the flattener, and the flat `LabeledBlock` model it hands back.
//!
//! # Architecture
//!
//! Statements are immutable values. Nested statement lists are stored in a
//! [`Block`], a reference-counted slice, so the flattener can keep cheap handles
//! to a partially consumed block (a "resume point") without copying it.
//!
//! Expressions are carried through verbatim. The flattener only ever builds one
//! new expression shape itself: the logical negation of a loop condition.
//!
//! Both models serialize to JSON with an internal `kind` tag:
//!
//! ```json
//! { "kind": "while", "condition": { "kind": "identifier", "name": "x" }, "body": [] }
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Deref;
use std::rc::Rc;

// =========================================================================
// Expressions
// =========================================================================

/// Expression node. Opaque to the flattener apart from negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expression {
    /// Identifier: `foo`
    Identifier { name: String },

    /// Numeric literal kept in source form: `42`, `0x1f`
    Number { value: String },

    /// String literal: `"hello"`
    String { value: String },

    /// Boolean literal
    Boolean { value: bool },

    /// `null`
    Null,

    /// Prefix unary expression: `!x`, `-x`
    Unary {
        operator: String,
        operand: Box<Self>,
    },

    /// Binary expression: `left op right`
    Binary {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// Assignment: `target = value`
    Assign { target: Box<Self>, value: Box<Self> },

    /// Call expression: `callee(args)`
    Call {
        callee: Box<Self>,
        #[serde(default)]
        arguments: Vec<Self>,
    },

    /// Property access: `object.property`
    Member { object: Box<Self>, property: String },

    /// Function expression. The body is never looked into.
    Function {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        params: Vec<String>,
        body: Block,
    },
}

impl Expression {
    /// Create an identifier
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// Create a numeric literal
    pub fn number(value: impl Into<String>) -> Self {
        Self::Number {
            value: value.into(),
        }
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    /// Create a call expression
    pub fn call(callee: Self, arguments: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// Create a binary expression
    pub fn binary(left: Self, operator: impl Into<String>, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
        }
    }

    /// Create an assignment
    pub fn assign(target: Self, value: Self) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// Create a property access
    pub fn member(object: Self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Logical negation: `!operand`
    pub fn not(operand: Self) -> Self {
        Self::Unary {
            operator: "!".to_string(),
            operand: Box::new(operand),
        }
    }
}

// =========================================================================
// Blocks
// =========================================================================

/// An ordered, shared, immutable statement list.
///
/// Cloning a `Block` bumps a reference count; the statements are never copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(Rc<[Statement]>);

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self(Rc::from(statements))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn statements(&self) -> &[Statement] {
        &self.0
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Block {
    type Target = [Statement];

    fn deref(&self) -> &[Statement] {
        &self.0
    }
}

impl From<Vec<Statement>> for Block {
    fn from(statements: Vec<Statement>) -> Self {
        Self::new(statements)
    }
}

impl FromIterator<Statement> for Block {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =========================================================================
// Statements
// =========================================================================

/// Statement node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Statement {
    /// Nested block: `{ statements }`
    Block { body: Block },

    /// `if (test) { then } else { else }`
    If {
        test: Expression,
        then_branch: Block,
        #[serde(default)]
        else_branch: Option<Block>,
    },

    /// `while (condition) { body }`
    While { condition: Expression, body: Block },

    /// `do { body } while (condition)`
    DoWhile { body: Block, condition: Expression },

    /// `for (init; condition; iterator) { body }`
    ///
    /// A missing initializer is `Empty`.
    For {
        #[serde(default = "empty_statement")]
        init: Box<Self>,
        #[serde(default)]
        condition: Option<Expression>,
        #[serde(default)]
        iterator: Option<Expression>,
        body: Block,
    },

    /// `label: statement`
    Labeled { label: String, body: Box<Self> },

    /// `break;` or `break label;`
    Break {
        #[serde(default)]
        label: Option<String>,
    },

    /// `continue;` or `continue label;`
    Continue {
        #[serde(default)]
        label: Option<String>,
    },

    /// Unconditional jump to the block named `target`
    Goto { target: String },

    /// `return;` or `return value;`
    Return {
        #[serde(default)]
        value: Option<Expression>,
    },

    /// `throw value;`
    Throw { value: Expression },

    /// `expression;`
    Expression { expression: Expression },

    /// `;`
    Empty,

    /// `switch (discriminant) { cases }`
    Switch {
        discriminant: Expression,
        cases: Vec<SwitchCase>,
    },

    /// Nested function declaration. Opaque: nothing inside it is flattened.
    Function {
        name: String,
        #[serde(default)]
        params: Vec<String>,
        body: Block,
    },
}

fn empty_statement() -> Box<Statement> {
    Box::new(Statement::Empty)
}

/// One `case` (or `default` when `test` is `None`) of a switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub test: Option<Expression>,
    pub body: Block,
}

/// Fieldless discriminant of [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Block,
    If,
    While,
    DoWhile,
    For,
    Labeled,
    Break,
    Continue,
    Goto,
    Return,
    Throw,
    Expression,
    Empty,
    Switch,
    Function,
}

impl StatementKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::If => "if",
            Self::While => "while",
            Self::DoWhile => "do-while",
            Self::For => "for",
            Self::Labeled => "labeled",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Goto => "goto",
            Self::Return => "return",
            Self::Throw => "throw",
            Self::Expression => "expression",
            Self::Empty => "empty",
            Self::Switch => "switch",
            Self::Function => "function",
        }
    }
}

impl Statement {
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Block { .. } => StatementKind::Block,
            Self::If { .. } => StatementKind::If,
            Self::While { .. } => StatementKind::While,
            Self::DoWhile { .. } => StatementKind::DoWhile,
            Self::For { .. } => StatementKind::For,
            Self::Labeled { .. } => StatementKind::Labeled,
            Self::Break { .. } => StatementKind::Break,
            Self::Continue { .. } => StatementKind::Continue,
            Self::Goto { .. } => StatementKind::Goto,
            Self::Return { .. } => StatementKind::Return,
            Self::Throw { .. } => StatementKind::Throw,
            Self::Expression { .. } => StatementKind::Expression,
            Self::Empty => StatementKind::Empty,
            Self::Switch { .. } => StatementKind::Switch,
            Self::Function { .. } => StatementKind::Function,
        }
    }

    /// Direct child statements, in source order.
    ///
    /// Function bodies are opaque to every analysis in this crate, so a
    /// `Function` has no children here.
    pub fn children(&self) -> SmallVec<[&Self; 4]> {
        let mut children = SmallVec::new();
        match self {
            Self::Block { body } => children.extend(body.iter()),
            Self::If {
                then_branch,
                else_branch,
                ..
            } => {
                children.extend(then_branch.iter());
                if let Some(else_branch) = else_branch {
                    children.extend(else_branch.iter());
                }
            }
            Self::While { body, .. } | Self::DoWhile { body, .. } => children.extend(body.iter()),
            Self::For { init, body, .. } => {
                children.push(init.as_ref());
                children.extend(body.iter());
            }
            Self::Labeled { body, .. } => children.push(body.as_ref()),
            Self::Switch { cases, .. } => {
                for case in cases {
                    children.extend(case.body.iter());
                }
            }
            Self::Break { .. }
            | Self::Continue { .. }
            | Self::Goto { .. }
            | Self::Return { .. }
            | Self::Throw { .. }
            | Self::Expression { .. }
            | Self::Empty
            | Self::Function { .. } => {}
        }
        children
    }

    // =====================================================================
    // Builder helpers
    // =====================================================================

    /// Create a nested block
    pub fn block(statements: Vec<Self>) -> Self {
        Self::Block {
            body: Block::new(statements),
        }
    }

    /// Create an `if` without an `else`
    pub fn if_then(test: Expression, then_branch: Vec<Self>) -> Self {
        Self::If {
            test,
            then_branch: Block::new(then_branch),
            else_branch: None,
        }
    }

    /// Create an `if` with an `else`
    pub fn if_else(test: Expression, then_branch: Vec<Self>, else_branch: Vec<Self>) -> Self {
        Self::If {
            test,
            then_branch: Block::new(then_branch),
            else_branch: Some(Block::new(else_branch)),
        }
    }

    /// Create a `while` loop
    pub fn while_loop(condition: Expression, body: Vec<Self>) -> Self {
        Self::While {
            condition,
            body: Block::new(body),
        }
    }

    /// Create a `do`-`while` loop
    pub fn do_while(body: Vec<Self>, condition: Expression) -> Self {
        Self::DoWhile {
            body: Block::new(body),
            condition,
        }
    }

    /// Create a `for` loop. Pass `Statement::Empty` for a missing initializer.
    pub fn for_loop(
        init: Self,
        condition: Option<Expression>,
        iterator: Option<Expression>,
        body: Vec<Self>,
    ) -> Self {
        Self::For {
            init: Box::new(init),
            condition,
            iterator,
            body: Block::new(body),
        }
    }

    /// Create a labeled statement
    pub fn labeled(label: impl Into<String>, body: Self) -> Self {
        Self::Labeled {
            label: label.into(),
            body: Box::new(body),
        }
    }

    /// Create an unlabeled `break`
    pub const fn break_loop() -> Self {
        Self::Break { label: None }
    }

    /// Create an unlabeled `continue`
    pub const fn continue_loop() -> Self {
        Self::Continue { label: None }
    }

    /// Create a jump to the block named `target`
    pub fn goto(target: impl Into<String>) -> Self {
        Self::Goto {
            target: target.into(),
        }
    }

    /// Create a return statement
    pub const fn ret(value: Option<Expression>) -> Self {
        Self::Return { value }
    }

    /// Create a throw statement
    pub const fn throw(value: Expression) -> Self {
        Self::Throw { value }
    }

    /// Create an expression statement
    pub const fn expr(expression: Expression) -> Self {
        Self::Expression { expression }
    }
}

// =========================================================================
// Flattened output
// =========================================================================

/// One addressable unit of flattened output.
///
/// The statement list is flat: nested blocks only appear as the branches of
/// an `if` or inside label-free loops, and the list ends in a `Goto`,
/// `Return` or `Throw` (or an `if` whose branches all do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledBlock {
    pub name: String,
    pub statements: Vec<Statement>,
}

impl LabeledBlock {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            statements,
        }
    }
}

#[cfg(test)]
#[path = "../tests/ir.rs"]
mod tests;
