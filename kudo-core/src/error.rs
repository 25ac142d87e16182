//! Fatal compilation errors.
//!
//! These represent missing language coverage or malformed input that has
//! no well-defined fallback, so the current unit is aborted. User errors
//! the checker can recover from are [`crate::diagnostic::Diagnostic`]s.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported lexeme '{lexeme}' at {line}:{column}")]
    UnsupportedLexeme {
        lexeme: char,
        line: u32,
        column: u32,
    },
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        message: String,
        line: u32,
        column: u32,
    },
    #[error("unknown type '{name}'")]
    UnknownType { name: String },
    #[error("cannot infer a type at {line}:{column}: initializer has no known type")]
    UnresolvedInference { line: u32, column: u32 },
    #[error("{construct} is not supported yet")]
    Unimplemented { construct: &'static str },
}
