//! Syntax tree handed over by the host compiler
//!
//! This crate models the subset of a JavaScript module that macro expansion
//! reads and writes: expression statements, `const` declarations and named
//! imports. Parsing is the host's job; trees arrive already built (or
//! deserialized from JSON) and leave through [`Module`]'s `Display` impl.

mod expr;
mod module;
mod printer;

pub use expr::{Expr, Literal, LogicalOp, Property};
pub use module::{
    CallSite, Declarator, ExpressionSites, ImportSpecifier, Module, Stmt, StmtId, StmtKind,
};
