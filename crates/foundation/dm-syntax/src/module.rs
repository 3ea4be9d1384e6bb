//! Statements and the module that owns them

use crate::expr::Expr;
use dm_span::Span;
use la_arena::{Arena, Idx};
use serde::{Deserialize, Serialize};

/// Statement ID within a [`Module`]
pub type StmtId = Idx<Stmt>;

/// Top-level statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    /// The kind of statement
    #[serde(flatten)]
    pub kind: StmtKind,
    /// Source location, if the host tracked one
    #[serde(default, skip_serializing_if = "is_unknown")]
    pub span: Span,
}

fn is_unknown(span: &Span) -> bool {
    !span.is_known()
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StmtKind {
    /// Expression evaluated for its side effects
    Expression {
        /// The expression
        expression: Expr,
    },
    /// `const` declaration
    Const {
        /// Declarators in source order
        declarations: Vec<Declarator>,
    },
    /// `import { .. } from "source"`
    Import {
        /// Named specifiers
        #[serde(default)]
        specifiers: Vec<ImportSpecifier>,
        /// Module specifier string
        source: String,
    },
}

/// Single `name = init` binding of a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    /// Bound name
    pub name: String,
    /// Initializer
    pub init: Expr,
}

/// Named import specifier (`imported as local`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    /// Name exported by the source module
    pub imported: String,
    /// Local alias, when different from `imported`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl ImportSpecifier {
    /// Specifier without an alias
    pub fn new(imported: impl Into<String>) -> Self {
        Self {
            imported: imported.into(),
            local: None,
        }
    }

    /// Specifier bound under `local`
    pub fn aliased(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            imported: imported.into(),
            local: Some(local.into()),
        }
    }

    /// Name the specifier binds in the importing module
    pub fn local_name(&self) -> &str {
        self.local.as_deref().unwrap_or(&self.imported)
    }
}

impl Stmt {
    /// Statement without location information
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    /// Attaches a source location
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Expression statement
    pub fn expression(expression: Expr) -> Self {
        Self::new(StmtKind::Expression { expression })
    }

    /// `const name = init;`
    pub fn constant(name: impl Into<String>, init: Expr) -> Self {
        Self::new(StmtKind::Const {
            declarations: vec![Declarator {
                name: name.into(),
                init,
            }],
        })
    }

    /// `import { specifiers } from "source";`
    pub fn import(specifiers: Vec<ImportSpecifier>, source: impl Into<String>) -> Self {
        Self::new(StmtKind::Import {
            specifiers,
            source: source.into(),
        })
    }
}

/// Handle to an expression statement whose expression may be rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite(StmtId);

impl CallSite {
    /// Wraps a statement ID
    pub fn new(stmt: StmtId) -> Self {
        Self(stmt)
    }

    /// The statement this site points at
    pub fn stmt(self) -> StmtId {
        self.0
    }
}

/// Host capability for rewriting located call sites in place
pub trait ExpressionSites {
    /// Replaces the expression of the statement at `site` with `expression`
    fn replace_with(&mut self, site: CallSite, expression: Expr);
}

/// A compilation unit: statement storage plus the ordered body
///
/// Statements are never freed from the arena; removing a statement only
/// drops it from the body, so outstanding [`StmtId`]s and [`CallSite`]s
/// stay valid across edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ModuleRepr", into = "ModuleRepr")]
pub struct Module {
    stmts: Arena<Stmt>,
    body: Vec<StmtId>,
}

#[derive(Serialize, Deserialize)]
struct ModuleRepr {
    #[serde(default)]
    body: Vec<Stmt>,
}

impl From<ModuleRepr> for Module {
    fn from(repr: ModuleRepr) -> Self {
        repr.body.into_iter().collect()
    }
}

impl From<Module> for ModuleRepr {
    fn from(module: Module) -> Self {
        Self {
            body: module.body().cloned().collect(),
        }
    }
}

impl FromIterator<Stmt> for Module {
    fn from_iter<I: IntoIterator<Item = Stmt>>(iter: I) -> Self {
        let mut module = Self::new();
        for stmt in iter {
            module.push(stmt);
        }
        module
    }
}

impl Module {
    /// Creates an empty module
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement to the body
    pub fn push(&mut self, stmt: Stmt) -> StmtId {
        let id = self.stmts.alloc(stmt);
        self.body.push(id);
        id
    }

    /// Inserts a statement at `position` in the body (clamped to the end)
    pub fn insert(&mut self, position: usize, stmt: Stmt) -> StmtId {
        let id = self.stmts.alloc(stmt);
        self.body.insert(position.min(self.body.len()), id);
        id
    }

    /// Removes a statement from the body; returns whether it was present
    pub fn remove(&mut self, id: StmtId) -> bool {
        let before = self.body.len();
        self.body.retain(|&stmt| stmt != id);
        self.body.len() != before
    }

    /// Replaces `id` in the body with `replacements`, keeping their order
    ///
    /// Returns the IDs of the inserted statements, or an empty list when
    /// `id` is not part of the body.
    pub fn splice(&mut self, id: StmtId, replacements: Vec<Stmt>) -> Vec<StmtId> {
        let Some(position) = self.body.iter().position(|&stmt| stmt == id) else {
            return Vec::new();
        };
        let ids: Vec<StmtId> = replacements
            .into_iter()
            .map(|stmt| self.stmts.alloc(stmt))
            .collect();
        let tail = self.body.split_off(position + 1);
        self.body.truncate(position);
        self.body.extend(ids.iter().copied());
        self.body.extend(tail);
        ids
    }

    /// Looks up a statement by ID
    pub fn get(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    /// Statement IDs in body order
    pub fn ids(&self) -> &[StmtId] {
        &self.body
    }

    /// Statements in body order
    pub fn body(&self) -> impl Iterator<Item = &Stmt> {
        self.body.iter().map(|&id| &self.stmts[id])
    }

    /// Number of statements in the body
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl ExpressionSites for Module {
    fn replace_with(&mut self, site: CallSite, expression: Expr) {
        self.stmts[site.stmt()].kind = StmtKind::Expression { expression };
    }
}
