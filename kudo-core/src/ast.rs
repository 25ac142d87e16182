//! AST node model.
//!
//! Three closed tagged-union families (expressions, statements, items)
//! whose nodes live in a single [`AstArena`] owned by the compilation
//! unit. Nodes are immutable once built, hold no parent links, and are
//! released in bulk when the arena drops; node types therefore carry
//! only `Copy` data and arena references.

use bumpalo::Bump;

use crate::span::Span;

/// A written type annotation, before semantic resolution.
///
/// `Infer` is the `:=` form: the final type comes from the initializer.
/// It deliberately has no counterpart in [`crate::types::TypeKind`], so
/// an unresolved placeholder can never masquerade as a real type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeExpr<'ast> {
    Infer,
    Named { name: &'ast str, span: Span },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDeclKind {
    Let,
    Var,
}

/// What a declaration binds. Only the identifier form is exercised
/// today; destructuring patterns are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'ast> {
    Ident(&'ast str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarDecl<'ast> {
    pub kind: VarDeclKind,
    pub is_uninit: bool,
    pub is_const: bool,
    pub binding: Binding<'ast>,
    pub ty: TypeExpr<'ast>,
    pub init: &'ast Expr<'ast>,
}

/// Function parameter. Parsed into the tree but not yet consumed by
/// checking or emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'ast> {
    pub name: &'ast str,
    pub ty: TypeExpr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDef<'ast> {
    pub is_extern: bool,
    pub is_decl: bool,
    pub name: &'ast str,
    pub name_span: Span,
    pub linkage_name: &'ast str,
    pub params: &'ast [Param<'ast>],
    pub body: Option<&'ast Expr<'ast>>,
    pub return_type: TypeExpr<'ast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind<'ast> {
    IntLiteral(i64),
    Identifier(&'ast str),
    /// Ordered sequence of statements. Blocks do not themselves
    /// produce a value.
    Block(&'ast [&'ast Stmt<'ast>]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr<'ast> {
    pub kind: ExprKind<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind<'ast> {
    VarDecl(VarDecl<'ast>),
    Expr(&'ast Expr<'ast>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stmt<'ast> {
    pub kind: StmtKind<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind<'ast> {
    Function(FuncDef<'ast>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'ast> {
    pub kind: ItemKind<'ast>,
    pub span: Span,
}

/// Bump arena owning every node and interned string of one unit.
///
/// The factory methods are pure constructors with no validation:
/// callers supply already-typed fields, so malformed nodes are
/// impossible by construction.
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> AstArena {
        AstArena { bump: Bump::new() }
    }

    /// Copy a string into the arena.
    pub fn alloc_str<'ast>(&'ast self, text: &str) -> &'ast str {
        self.bump.alloc_str(text)
    }

    pub fn int_literal<'ast>(&'ast self, value: i64, span: Span) -> &'ast Expr<'ast> {
        self.bump.alloc(Expr {
            kind: ExprKind::IntLiteral(value),
            span,
        })
    }

    pub fn identifier<'ast>(&'ast self, name: &str, span: Span) -> &'ast Expr<'ast> {
        let name = self.alloc_str(name);
        self.bump.alloc(Expr {
            kind: ExprKind::Identifier(name),
            span,
        })
    }

    pub fn block<'ast>(
        &'ast self,
        statements: &[&'ast Stmt<'ast>],
        span: Span,
    ) -> &'ast Expr<'ast> {
        let statements = self.bump.alloc_slice_copy(statements);
        self.bump.alloc(Expr {
            kind: ExprKind::Block(statements),
            span,
        })
    }

    pub fn var_decl<'ast>(&'ast self, decl: VarDecl<'ast>, span: Span) -> &'ast Stmt<'ast> {
        self.bump.alloc(Stmt {
            kind: StmtKind::VarDecl(decl),
            span,
        })
    }

    pub fn expr_stmt<'ast>(&'ast self, expr: &'ast Expr<'ast>, span: Span) -> &'ast Stmt<'ast> {
        self.bump.alloc(Stmt {
            kind: StmtKind::Expr(expr),
            span,
        })
    }

    pub fn func_def<'ast>(&'ast self, def: FuncDef<'ast>, span: Span) -> &'ast Item<'ast> {
        self.bump.alloc(Item {
            kind: ItemKind::Function(def),
            span,
        })
    }
}

impl Default for AstArena {
    fn default() -> Self {
        AstArena::new()
    }
}
