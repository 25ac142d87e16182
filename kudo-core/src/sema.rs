//! Semantic analysis: two-pass name/type resolution with inline C
//! emission.
//!
//! Pass 1 registers every top-level function signature so forward
//! references stay resolvable once calls are checked. Pass 2 walks each
//! function, type-checks it, and streams C text into the unit's
//! [`CodeSink`] as it goes.
//!
//! Error handling is two-tier: user errors the checker can work around
//! ([`Diagnostic`]) are collected while checking continues; missing
//! language coverage ([`CoreError`]) aborts the unit. A unit with any
//! diagnostic is a failed compilation even though code text may have
//! been produced for inspection.

use std::fmt::Write as _;

use crate::ast::{Binding, Expr, ExprKind, FuncDef, Item, ItemKind, Stmt, StmtKind, TypeExpr, VarDecl};
use crate::diagnostic::Diagnostic;
use crate::emit::CodeSink;
use crate::error::CoreError;
use crate::span::Span;
use crate::symbols::{FunctionInfo, FunctionTable, SymbolInfo, SymbolKind, SymbolTable};
use crate::types::{Type, TypeTable};

/// Outcome of checking a program: the accumulated C text and every
/// recoverable diagnostic, in source order.
#[derive(Debug)]
pub struct Analysis {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// True iff checking finished with an empty diagnostics list.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check a program and emit C for it.
pub fn check_program<'ast>(items: &[&'ast Item<'ast>]) -> Result<Analysis, CoreError> {
    let mut sema = Sema::new();
    sema.run_first_pass(items);
    sema.run_second_pass(items)?;

    let Sema {
        diagnostics, out, ..
    } = sema;
    Ok(Analysis {
        code: out.finish(),
        diagnostics,
    })
}

/// Result of checking one expression: its generated text and resolved
/// type. Blocks have no type of their own, so `ty` is optional.
struct ExprResult {
    code: String,
    ty: Option<Type>,
}

struct Sema<'ast> {
    types: TypeTable,
    functions: FunctionTable<'ast>,
    symbols: SymbolTable<'ast>,
    diagnostics: Vec<Diagnostic>,
    out: CodeSink,
}

impl<'ast> Sema<'ast> {
    fn new() -> Sema<'ast> {
        Sema {
            types: TypeTable::with_builtins(),
            functions: FunctionTable::new(),
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            out: CodeSink::new(),
        }
    }

    /// Pass 1: register signatures in declaration order. No checking
    /// happens here.
    fn run_first_pass(&mut self, items: &[&'ast Item<'ast>]) {
        for &item in items {
            match &item.kind {
                ItemKind::Function(def) => self.functions.register(FunctionInfo {
                    name: def.name,
                    linkage_name: def.linkage_name,
                    display_name: def.name,
                    params: def.params,
                    return_type: def.return_type,
                }),
            }
        }
    }

    /// Pass 2: check each function body and emit its C text.
    fn run_second_pass(&mut self, items: &[&'ast Item<'ast>]) -> Result<(), CoreError> {
        for &item in items {
            match &item.kind {
                ItemKind::Function(def) => {
                    debug_assert!(
                        self.functions.lookup(def.name).is_some(),
                        "pass 1 must have registered '{}'",
                        def.name
                    );
                    self.check_function(def)?;
                }
            }
        }
        Ok(())
    }

    fn check_function(&mut self, func: &FuncDef<'ast>) -> Result<(), CoreError> {
        if func.is_extern {
            self.out.emit("extern ");
        }

        let final_ty = self.resolve_return_type(func)?;
        self.out.emit_type(&final_ty);
        self.out.emit(" ");
        self.out.emit(func.name);
        // Parameters are parsed but not emitted yet.
        self.out.emit(" ()\n");

        if func.is_decl {
            self.out.emit(";");
            return Ok(());
        }

        self.out.emit("{");
        if let Some(body) = func.body {
            let body_code = self.check_expr(body)?;
            self.out.emit(&body_code.code);
        }
        self.out.emit("\n}\n");
        Ok(())
    }

    /// Resolve a function's return type. A function named `main`
    /// always returns `int`, overriding any written type; the C
    /// backend requires it.
    fn resolve_return_type(&mut self, func: &FuncDef<'ast>) -> Result<Type, CoreError> {
        let mut final_ty = match func.return_type {
            TypeExpr::Named { name, .. } => {
                Some(self.lookup_type(name)?)
            }
            TypeExpr::Infer => None,
        };

        if func.name == "main" {
            final_ty = self.types.lookup("int").cloned();
        }

        final_ty.ok_or(CoreError::UnresolvedInference {
            line: func.name_span.line,
            column: func.name_span.col_start,
        })
    }

    fn check_stmt(&mut self, stmt: &'ast Stmt<'ast>) -> Result<Option<String>, CoreError> {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.check_var_decl(decl, stmt.span),
            StmtKind::Expr(_) => Err(CoreError::Unimplemented {
                construct: "expression statements",
            }),
        }
    }

    /// Check a declaration, emit `\n\t<type> <name> = <init>;`, and
    /// register the binding. On a type mismatch the statement
    /// contributes no text and checking continues.
    fn check_var_decl(
        &mut self,
        decl: &VarDecl<'ast>,
        span: Span,
    ) -> Result<Option<String>, CoreError> {
        let init = self.check_expr(decl.init)?;

        let final_ty = match decl.ty {
            TypeExpr::Infer => {
                let Some(init_ty) = init.ty else {
                    return Err(CoreError::UnresolvedInference {
                        line: decl.init.span.line,
                        column: decl.init.span.col_start,
                    });
                };
                // Resolve through the table so the registered type is
                // the canonical interned one.
                self.lookup_type(&init_ty.name)?
            }
            TypeExpr::Named { name, .. } => {
                let declared = self.lookup_type(name)?;
                match init.ty {
                    Some(ref init_ty) if declared.matches(init_ty) => declared,
                    Some(init_ty) => {
                        self.diagnostics.push(Diagnostic::invalid_type(
                            init_ty.name,
                            declared.name,
                            decl.init.span,
                        ));
                        return Ok(None);
                    }
                    None => {
                        return Err(CoreError::UnresolvedInference {
                            line: decl.init.span.line,
                            column: decl.init.span.col_start,
                        });
                    }
                }
            }
        };

        let Binding::Ident(name) = decl.binding;
        let mut code = String::new();
        write!(code, "\n\t{} {} = {};", final_ty.repr, name, init.code)
            .expect("writing to a String cannot fail");

        self.symbols.define(SymbolInfo {
            name,
            span,
            ty: final_ty,
            kind: SymbolKind::Variable,
        });
        Ok(Some(code))
    }

    fn check_expr(&mut self, expr: &'ast Expr<'ast>) -> Result<ExprResult, CoreError> {
        match expr.kind {
            ExprKind::Block(stmts) => {
                let mut code = String::new();
                for &stmt in stmts {
                    if let Some(stmt_code) = self.check_stmt(stmt)? {
                        code.push_str(&stmt_code);
                    }
                }
                Ok(ExprResult { code, ty: None })
            }
            ExprKind::IntLiteral(value) => Ok(ExprResult {
                code: value.to_string(),
                ty: self.types.lookup("int").cloned(),
            }),
            ExprKind::Identifier(name) => {
                let code = name.to_string();
                match self.symbols.lookup(name) {
                    None => {
                        // Fall back to int so one missing declaration
                        // does not cascade into unrelated errors.
                        self.diagnostics
                            .push(Diagnostic::undeclared_variable(name, expr.span));
                        Ok(ExprResult {
                            code,
                            ty: self.types.lookup("int").cloned(),
                        })
                    }
                    Some(sym) => {
                        let ty = self.types.lookup(&sym.ty.name).cloned();
                        Ok(ExprResult { code, ty })
                    }
                }
            }
        }
    }

    fn lookup_type(&self, name: &str) -> Result<Type, CoreError> {
        self.types
            .lookup(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownType {
                name: name.to_string(),
            })
    }
}
