//! User-facing diagnostics.
//!
//! Diagnostics are the recoverable tier of error reporting: they are
//! collected in order while checking continues, and a compilation with
//! any diagnostic is a failure even if output text was produced.
//! Internal "not yet supported" failures live in [`crate::error`]
//! instead.

use crate::span::Span;

/// How severe a diagnostic is. Only errors exist today; the enum is
/// kept so warnings can be added without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

/// The structured payload of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A byte the lexer does not recognize.
    InvalidCharacter { ch: char },
    /// An identifier used before any declaration bound it.
    UndeclaredVariable { name: String },
    /// An initializer whose type does not match the written type.
    InvalidType { found: String, expected: String },
}

/// A single located diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub span: Span,
}

impl Diagnostic {
    pub fn invalid_character(ch: char, span: Span) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::InvalidCharacter { ch },
            severity: Severity::Error,
            span,
        }
    }

    pub fn undeclared_variable(name: impl Into<String>, span: Span) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::UndeclaredVariable { name: name.into() },
            severity: Severity::Error,
            span,
        }
    }

    pub fn invalid_type(
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::InvalidType {
                found: found.into(),
                expected: expected.into(),
            },
            severity: Severity::Error,
            span,
        }
    }

    /// Stable code for each diagnostic kind.
    pub fn code(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::InvalidCharacter { .. } => "E0001",
            DiagnosticKind::UndeclaredVariable { .. } => "E0002",
            DiagnosticKind::InvalidType { .. } => "E0003",
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::InvalidCharacter { ch } => {
                format!("invalid character '{ch}'")
            }
            DiagnosticKind::UndeclaredVariable { name } => {
                format!("use of undeclared variable '{name}'")
            }
            DiagnosticKind::InvalidType { found, expected } => {
                format!("mismatched types: expected '{expected}', found '{found}'")
            }
        }
    }

    /// Render as `path:line:col: error[CODE]: message`.
    ///
    /// Presentation beyond this (color, source excerpts) belongs to the
    /// driver, not the core.
    pub fn render(&self, path: &str) -> String {
        format!(
            "{path}:{}:{}: error[{}]: {}",
            self.span.line,
            self.span.col_start,
            self.code(),
            self.message()
        )
    }
}
