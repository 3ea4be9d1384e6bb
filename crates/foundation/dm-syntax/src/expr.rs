//! Expression nodes
//!
//! Arguments and rewritten call sites are represented as a tagged variant so
//! that consumers match on [`Expr::Identifier`] instead of probing node shapes.

use serde::{Deserialize, Serialize};

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expr {
    /// Literal value
    Literal {
        /// The literal
        value: Literal,
    },
    /// Bare identifier reference
    Identifier {
        /// Referenced name
        name: String,
    },
    /// Function call
    Call {
        /// Callee expression
        callee: Box<Expr>,
        /// Arguments in source order
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    /// Static member access (`object.property`)
    Member {
        /// Object expression
        object: Box<Expr>,
        /// Property name
        property: String,
    },
    /// Short-circuit logical operation
    Logical {
        /// Operator
        operator: LogicalOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// Explicit grouping
    Paren {
        /// Grouped expression
        expression: Box<Expr>,
    },
    /// Object literal
    Object {
        /// Properties in source order
        #[serde(default)]
        properties: Vec<Property>,
    },
}

/// Literal kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Null literal
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Integer(i64),
    /// Float literal
    Float(f64),
    /// String literal
    String(String),
}

/// Logical operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Logical AND
    #[serde(rename = "&&")]
    And,
    /// Logical OR
    #[serde(rename = "||")]
    Or,
}

impl LogicalOp {
    /// Source spelling of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::And => 2,
            Self::Or => 1,
        }
    }
}

/// Key/value pair of an object literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property key
    pub key: String,
    /// Property value
    pub value: Expr,
}

impl Property {
    /// Creates a property
    pub fn new(key: impl Into<String>, value: Expr) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Expr {
    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::String(value.into()),
        }
    }

    /// Integer literal
    pub fn integer(value: i64) -> Self {
        Self::Literal {
            value: Literal::Integer(value),
        }
    }

    /// Identifier reference
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// `object.property`
    pub fn member(object: Self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// `callee(arguments...)`
    pub fn call(callee: Self, arguments: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `left <operator> right`
    pub fn logical(operator: LogicalOp, left: Self, right: Self) -> Self {
        Self::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left && right`
    pub fn and(left: Self, right: Self) -> Self {
        Self::logical(LogicalOp::And, left, right)
    }

    /// `(expression)`
    pub fn paren(expression: Self) -> Self {
        Self::Paren {
            expression: Box::new(expression),
        }
    }

    /// Object literal from its properties
    pub fn object(properties: Vec<Property>) -> Self {
        Self::Object { properties }
    }

    /// Whether this node is a bare identifier reference
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }

    /// Name of a bare identifier reference
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Text of a string literal
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Self::Literal {
                value: Literal::String(text),
            } => Some(text),
            _ => None,
        }
    }

    /// Properties of an object literal
    pub fn as_object(&self) -> Option<&[Property]> {
        match self {
            Self::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Callee name and arguments when this is a call to a bare identifier
    pub fn as_named_call(&self) -> Option<(&str, &[Self])> {
        match self {
            Self::Call { callee, arguments } => {
                callee.as_identifier().map(|name| (name, arguments.as_slice()))
            }
            _ => None,
        }
    }
}
