//! Semantic types and the interned type table.
//!
//! A [`Type`] pairs a surface-syntax name with the C text the emitter
//! writes for it. Types are interned by name in a [`TypeTable`]; the
//! checker always resolves through the table so the type it hands out
//! is the canonical interned one.

use indexmap::IndexMap;

/// Kind tag of a resolvable type.
///
/// The surface form `:=` ("infer from the initializer") never reaches
/// this enum; it is represented as [`crate::ast::TypeExpr::Infer`] and
/// resolved away before a `Type` exists. User-defined kinds are a
/// planned extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Int,
    CString,
    None,
}

/// A named type together with its C backend representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub name: String,
    pub repr: String,
}

impl Type {
    pub fn new(kind: TypeKind, name: impl Into<String>, repr: impl Into<String>) -> Type {
        Type {
            kind,
            name: name.into(),
            repr: repr.into(),
        }
    }

    /// Two types match iff their kind tags are equal. Structural
    /// comparison beyond the tag is a future extension.
    pub fn matches(&self, other: &Type) -> bool {
        self.kind == other.kind
    }
}

/// Name-keyed table of known types, insertion-ordered.
///
/// Seeded with the built-ins and read-only afterwards; user-defined
/// types will be inserted here once the language grows them.
#[derive(Debug)]
pub struct TypeTable {
    entries: IndexMap<String, Type>,
}

impl TypeTable {
    pub fn with_builtins() -> TypeTable {
        let mut entries = IndexMap::new();
        for ty in [
            Type::new(TypeKind::Int, "int", "int"),
            Type::new(TypeKind::CString, "cstr", "const char*"),
            Type::new(TypeKind::None, "none", "void"),
        ] {
            entries.insert(ty.name.clone(), ty);
        }
        TypeTable { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.entries.get(name)
    }
}
