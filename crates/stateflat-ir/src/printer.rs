//! Debug printer for statement trees and flattened blocks.
//!
//! Produces a C-like pseudo-syntax for logs, test failure messages and the
//! CLI's `--format text` output. This is a diagnostic view, not an emitter:
//! `goto` is printed as-is and no target-language rules are applied.

use crate::ir::{Block, Expression, LabeledBlock, Statement};
use std::fmt::Write;

const INDENT: &str = "    ";

pub struct Printer {
    output: String,
    indent_level: u32,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(256),
            indent_level: 0,
        }
    }

    /// Print a single statement (and its children) with no leading indent.
    pub fn emit_to_string(statement: &Statement) -> String {
        let mut printer = Self::new();
        printer.emit_statement(statement);
        let trimmed = printer.output.trim_end().len();
        printer.output.truncate(trimmed);
        printer.output
    }

    /// Print a list of flattened blocks, one `name:` header per block.
    pub fn print_blocks(blocks: &[LabeledBlock]) -> String {
        let mut printer = Self::new();
        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                printer.output.push('\n');
            }
            printer.output.push_str(&block.name);
            printer.output.push_str(":\n");
            printer.indent_level += 1;
            for statement in &block.statements {
                printer.emit_statement(statement);
            }
            printer.indent_level -= 1;
        }
        printer.output
    }

    pub fn expression_to_string(expression: &Expression) -> String {
        let mut out = String::new();
        write_expression(&mut out, expression);
        out
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    fn line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn emit_body(&mut self, body: &Block) {
        self.indent_level += 1;
        for statement in body.iter() {
            self.emit_statement(statement);
        }
        self.indent_level -= 1;
    }

    fn emit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Block { body } => {
                self.line("{");
                self.emit_body(body);
                self.line("}");
            }
            Statement::If {
                test,
                then_branch,
                else_branch,
            } => {
                self.line(&format!("if ({}) {{", Self::expression_to_string(test)));
                self.emit_body(then_branch);
                if let Some(else_branch) = else_branch {
                    self.line("} else {");
                    self.emit_body(else_branch);
                }
                self.line("}");
            }
            Statement::While { condition, body } => {
                self.line(&format!(
                    "while ({}) {{",
                    Self::expression_to_string(condition)
                ));
                self.emit_body(body);
                self.line("}");
            }
            Statement::DoWhile { body, condition } => {
                self.line("do {");
                self.emit_body(body);
                self.line(&format!(
                    "}} while ({});",
                    Self::expression_to_string(condition)
                ));
            }
            Statement::For {
                init,
                condition,
                iterator,
                body,
            } => {
                let init = Self::emit_to_string(init);
                let init = init.trim_end_matches(';');
                let condition = condition
                    .as_ref()
                    .map(Self::expression_to_string)
                    .unwrap_or_default();
                let iterator = iterator
                    .as_ref()
                    .map(Self::expression_to_string)
                    .unwrap_or_default();
                self.line(&format!("for ({init}; {condition}; {iterator}) {{"));
                self.emit_body(body);
                self.line("}");
            }
            Statement::Labeled { label, body } => {
                self.line(&format!("{label}:"));
                self.emit_statement(body);
            }
            Statement::Break { label } => match label {
                Some(label) => self.line(&format!("break {label};")),
                None => self.line("break;"),
            },
            Statement::Continue { label } => match label {
                Some(label) => self.line(&format!("continue {label};")),
                None => self.line("continue;"),
            },
            Statement::Goto { target } => self.line(&format!("goto {target};")),
            Statement::Return { value } => match value {
                Some(value) => self.line(&format!("return {};", Self::expression_to_string(value))),
                None => self.line("return;"),
            },
            Statement::Throw { value } => {
                self.line(&format!("throw {};", Self::expression_to_string(value)));
            }
            Statement::Expression { expression } => {
                self.line(&format!("{};", Self::expression_to_string(expression)));
            }
            Statement::Empty => self.line(";"),
            Statement::Switch {
                discriminant,
                cases,
            } => {
                self.line(&format!(
                    "switch ({}) {{",
                    Self::expression_to_string(discriminant)
                ));
                for case in cases {
                    match &case.test {
                        Some(test) => {
                            self.line(&format!("case {}:", Self::expression_to_string(test)));
                        }
                        None => self.line("default:"),
                    }
                    self.emit_body(&case.body);
                }
                self.line("}");
            }
            Statement::Function { name, params, body } => {
                self.line(&format!("function {name}({}) {{", params.join(", ")));
                self.emit_body(body);
                self.line("}");
            }
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

fn needs_parens(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Binary { .. } | Expression::Assign { .. } | Expression::Function { .. }
    )
}

fn write_operand(out: &mut String, expression: &Expression) {
    if needs_parens(expression) {
        out.push('(');
        write_expression(out, expression);
        out.push(')');
    } else {
        write_expression(out, expression);
    }
}

fn write_expression(out: &mut String, expression: &Expression) {
    match expression {
        Expression::Identifier { name } => out.push_str(name),
        Expression::Number { value } => out.push_str(value),
        Expression::String { value } => {
            let _ = write!(out, "{value:?}");
        }
        Expression::Boolean { value } => {
            let _ = write!(out, "{value}");
        }
        Expression::Null => out.push_str("null"),
        Expression::Unary { operator, operand } => {
            out.push_str(operator);
            write_operand(out, operand);
        }
        Expression::Binary {
            left,
            operator,
            right,
        } => {
            write_operand(out, left);
            let _ = write!(out, " {operator} ");
            write_operand(out, right);
        }
        Expression::Assign { target, value } => {
            write_expression(out, target);
            out.push_str(" = ");
            write_expression(out, value);
        }
        Expression::Call { callee, arguments } => {
            write_operand(out, callee);
            out.push('(');
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_expression(out, argument);
            }
            out.push(')');
        }
        Expression::Member { object, property } => {
            write_operand(out, object);
            out.push('.');
            out.push_str(property);
        }
        Expression::Function { name, params, .. } => {
            let _ = write!(
                out,
                "function {}({}) {{ ... }}",
                name.as_deref().unwrap_or(""),
                params.join(", ")
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/printer.rs"]
mod tests;
