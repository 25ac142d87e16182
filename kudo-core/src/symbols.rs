//! Symbol and function tables used during checking.

use indexmap::IndexMap;

use crate::ast::{Param, TypeExpr};
use crate::span::Span;
use crate::types::Type;

/// What a symbol names. Functions will be added once calls are checked
/// through the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
}

/// Everything the checker records about one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo<'ast> {
    pub name: &'ast str,
    pub span: Span,
    pub ty: Type,
    pub kind: SymbolKind,
}

/// Flat, global name → binding table.
///
/// There is no block scoping: defining a name again silently replaces
/// the earlier binding (last write wins).
#[derive(Debug, Default)]
pub struct SymbolTable<'ast> {
    entries: IndexMap<&'ast str, SymbolInfo<'ast>>,
}

impl<'ast> SymbolTable<'ast> {
    pub fn new() -> SymbolTable<'ast> {
        SymbolTable {
            entries: IndexMap::new(),
        }
    }

    pub fn define(&mut self, sym: SymbolInfo<'ast>) {
        self.entries.insert(sym.name, sym);
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolInfo<'ast>> {
        self.entries.get(name)
    }
}

/// Signature information registered during pass 1, so pass 2 can
/// resolve forward references between functions once calls exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionInfo<'ast> {
    pub name: &'ast str,
    pub linkage_name: &'ast str,
    pub display_name: &'ast str,
    pub params: &'ast [Param<'ast>],
    pub return_type: TypeExpr<'ast>,
}

/// Name → signature table populated in declaration order.
#[derive(Debug, Default)]
pub struct FunctionTable<'ast> {
    entries: IndexMap<&'ast str, FunctionInfo<'ast>>,
}

impl<'ast> FunctionTable<'ast> {
    pub fn new() -> FunctionTable<'ast> {
        FunctionTable {
            entries: IndexMap::new(),
        }
    }

    pub fn register(&mut self, info: FunctionInfo<'ast>) {
        self.entries.insert(info.name, info);
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionInfo<'ast>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{FileId, Span};
    use crate::types::{Type, TypeKind};

    fn span() -> Span {
        Span::new(FileId::MAIN, 1, 1, 1)
    }

    fn int() -> Type {
        Type::new(TypeKind::Int, "int", "int")
    }

    #[test]
    fn redefinition_overwrites_the_earlier_binding() {
        let mut table = SymbolTable::new();
        table.define(SymbolInfo {
            name: "x",
            span: span(),
            ty: int(),
            kind: SymbolKind::Variable,
        });
        table.define(SymbolInfo {
            name: "x",
            span: Span::new(FileId::MAIN, 2, 1, 1),
            ty: Type::new(TypeKind::CString, "cstr", "const char*"),
            kind: SymbolKind::Variable,
        });

        let sym = table.lookup("x").expect("x is bound");
        assert_eq!(sym.ty.kind, TypeKind::CString);
        assert_eq!(sym.span.line, 2);
    }

    #[test]
    fn functions_register_by_name() {
        let mut table = FunctionTable::new();
        table.register(FunctionInfo {
            name: "main",
            linkage_name: "main",
            display_name: "main",
            params: &[],
            return_type: TypeExpr::Infer,
        });
        assert_eq!(table.len(), 1);
        assert!(table.lookup("main").is_some());
        assert!(table.lookup("other").is_none());
    }
}
