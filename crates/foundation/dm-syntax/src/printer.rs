//! JavaScript source rendering

use crate::expr::{Expr, Literal, LogicalOp};
use crate::module::{Module, Stmt, StmtKind};
use std::fmt::{self, Display, Formatter, Write};

impl Display for Literal {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(formatter, "null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Integer(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::String(value) => write_quoted(formatter, value),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value } => write!(formatter, "{value}"),
            Self::Identifier { name } => write!(formatter, "{name}"),
            Self::Call { callee, arguments } => {
                write_operand(formatter, callee)?;
                formatter.write_char('(')?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{argument}")?;
                }
                formatter.write_char(')')
            }
            Self::Member { object, property } => {
                write_operand(formatter, object)?;
                write!(formatter, ".{property}")
            }
            Self::Logical {
                operator,
                left,
                right,
            } => {
                write_logical_side(formatter, left, *operator, false)?;
                write!(formatter, " {} ", operator.as_str())?;
                write_logical_side(formatter, right, *operator, true)
            }
            Self::Paren { expression } => write!(formatter, "({expression})"),
            Self::Object { properties } => {
                if properties.is_empty() {
                    return formatter.write_str("{}");
                }
                formatter.write_str("{ ")?;
                for (index, property) in properties.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    if is_plain_key(&property.key) {
                        formatter.write_str(&property.key)?;
                    } else {
                        write_quoted(formatter, &property.key)?;
                    }
                    write!(formatter, ": {}", property.value)?;
                }
                formatter.write_str(" }")
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expression { expression } => write!(formatter, "{expression};"),
            StmtKind::Const { declarations } => {
                formatter.write_str("const ")?;
                for (index, declarator) in declarations.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{} = {}", declarator.name, declarator.init)?;
                }
                formatter.write_char(';')
            }
            StmtKind::Import { specifiers, source } => {
                formatter.write_str("import { ")?;
                for (index, specifier) in specifiers.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    formatter.write_str(&specifier.imported)?;
                    if let Some(local) = &specifier.local
                        && local != &specifier.imported
                    {
                        write!(formatter, " as {local}")?;
                    }
                }
                formatter.write_str(" } from ")?;
                write_quoted(formatter, source)?;
                formatter.write_char(';')
            }
        }
    }
}

impl Display for Module {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.body() {
            writeln!(formatter, "{stmt}")?;
        }
        Ok(())
    }
}

/// Callee and member objects bind tighter than any logical operator
fn write_operand(formatter: &mut Formatter<'_>, expr: &Expr) -> fmt::Result {
    if matches!(expr, Expr::Logical { .. } | Expr::Object { .. }) {
        write!(formatter, "({expr})")
    } else {
        write!(formatter, "{expr}")
    }
}

/// Logical chains are left-associative; a right operand of equal
/// precedence has to keep its grouping.
fn write_logical_side(
    formatter: &mut Formatter<'_>,
    side: &Expr,
    parent: LogicalOp,
    is_right: bool,
) -> fmt::Result {
    let needs_parens = match side {
        Expr::Logical { operator, .. } => {
            operator.precedence() < parent.precedence()
                || (is_right && operator.precedence() == parent.precedence())
        }
        _ => false,
    };
    if needs_parens {
        write!(formatter, "({side})")
    } else {
        write!(formatter, "{side}")
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|rest| rest.is_ascii_alphanumeric() || rest == '_' || rest == '$')
}

fn write_quoted(formatter: &mut Formatter<'_>, text: &str) -> fmt::Result {
    formatter.write_char('"')?;
    for character in text.chars() {
        match character {
            '"' => formatter.write_str("\\\"")?,
            '\\' => formatter.write_str("\\\\")?,
            '\n' => formatter.write_str("\\n")?,
            '\r' => formatter.write_str("\\r")?,
            '\t' => formatter.write_str("\\t")?,
            control if control.is_control() => {
                write!(formatter, "\\u{:04x}", u32::from(control))?;
            }
            other => formatter.write_char(other)?,
        }
    }
    formatter.write_char('"')
}
