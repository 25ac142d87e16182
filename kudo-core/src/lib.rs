//! Core compiler pipeline for the kudo language.
//!
//! The pipeline is:
//!
//!   source .kudo
//!     -> lexer   (tokens)
//!     -> parser  (arena-owned AST items)
//!     -> sema    (two-pass type check + inline C emission)
//!
//! Higher-level tools (the CLI and anything after it) should depend on
//! this crate rather than reimplementing the pipeline. A compilation is
//! successful only when it produced code *and* an empty diagnostics
//! list; generated text alongside diagnostics exists for inspection
//! only.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod diagnostic;
pub mod error;
pub mod span;

// ---------------------------------------------------------------------
// Front-end: lexing and parsing
// ---------------------------------------------------------------------

pub mod ast;
pub mod lexer;
pub mod parser;

// ---------------------------------------------------------------------
// Semantic analysis and emission
// ---------------------------------------------------------------------

pub mod emit;
pub mod sema;
pub mod symbols;
pub mod types;

// ---------------------------------------------------------------------
// Compilation-unit orchestration
// ---------------------------------------------------------------------

pub mod compile;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use compile::{Compilation, compile_to_c};
pub use diagnostic::Diagnostic;
pub use error::CoreError;
pub use span::FileId;
