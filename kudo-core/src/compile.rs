//! Compilation-unit orchestration: lex → parse → check/emit.
//!
//! Each phase runs to completion before the next begins; the pipeline
//! is single-threaded and keeps everything in memory. One [`AstArena`]
//! owns the unit's nodes and strings and is released in bulk when this
//! function returns.

use crate::ast::AstArena;
use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::lexer::lex;
use crate::parser::parse;
use crate::sema::check_program;
use crate::span::FileId;

/// Result of compiling one unit.
///
/// `code` may be non-empty even when diagnostics were reported, so a
/// partially checked program can still be inspected; callers must
/// treat any non-empty diagnostics list as failure and not use the
/// code as output.
#[derive(Debug)]
pub struct Compilation {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compile kudo source text to C.
///
/// Lexical errors gate the pipeline: if scanning reports any invalid
/// character, the unit stops before parsing and returns those
/// diagnostics with no code. Fatal conditions (unsupported constructs,
/// unknown types, failed inference) surface as [`CoreError`]s.
pub fn compile_to_c(file: FileId, source: &str) -> Result<Compilation, CoreError> {
    let lexed = lex(file, source)?;
    if !lexed.is_ok() {
        return Ok(Compilation {
            code: String::new(),
            diagnostics: lexed.diagnostics,
        });
    }

    let arena = AstArena::new();
    let items = parse(&arena, &lexed.tokens)?;
    let analysis = check_program(&items)?;

    Ok(Compilation {
        code: analysis.code,
        diagnostics: analysis.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn compiles_a_minimal_program() {
        let unit = compile_to_c(FileId::MAIN, "func main() { let x := 5; }")
            .expect("compile should succeed");
        assert!(unit.is_ok());
        assert_eq!(unit.code, "int main ()\n{\n\tint x = 5;\n}\n");
    }

    #[test]
    fn compiles_declarations_and_definitions_in_order() {
        let source = "func exit() -> none;\nfunc main() { let x : int = 1; }";
        let unit = compile_to_c(FileId::MAIN, source).expect("compile should succeed");
        assert!(unit.is_ok());
        assert_eq!(
            unit.code,
            "void exit ()\n;int main ()\n{\n\tint x = 1;\n}\n"
        );
    }

    #[test]
    fn lexical_failure_stops_before_parsing() {
        // '$' is not a kudo character; the stray 'func' after it would
        // also be a parse error, which must never be reached.
        let unit = compile_to_c(FileId::MAIN, "$ func").expect("lexing is fail-soft");
        assert!(!unit.is_ok());
        assert!(unit.code.is_empty());
        assert!(matches!(
            unit.diagnostics[0].kind,
            DiagnosticKind::InvalidCharacter { ch: '$' }
        ));
    }

    #[test]
    fn reports_every_invalid_character_in_one_run() {
        let unit = compile_to_c(FileId::MAIN, "@ #").expect("lexing is fail-soft");
        assert_eq!(unit.diagnostics.len(), 2);
    }

    #[test]
    fn type_mismatch_surfaces_as_a_diagnostic() {
        let unit = compile_to_c(FileId::MAIN, "func main() { let s : cstr = 5; }")
            .expect("compile should succeed");
        assert!(!unit.is_ok());
        assert_eq!(unit.diagnostics.len(), 1);
        assert!(matches!(
            &unit.diagnostics[0].kind,
            DiagnosticKind::InvalidType { found, expected }
                if found == "int" && expected == "cstr"
        ));
    }

    #[test]
    fn undeclared_variable_surfaces_as_a_diagnostic() {
        let unit = compile_to_c(FileId::MAIN, "func main() { let x : int = y; }")
            .expect("compile should succeed");
        assert!(!unit.is_ok());
        assert!(matches!(
            &unit.diagnostics[0].kind,
            DiagnosticKind::UndeclaredVariable { name } if name == "y"
        ));
        // The identifier still reaches the generated text.
        assert!(unit.code.contains("\n\tint x = y;"));
    }

    #[test]
    fn expression_statements_are_fatal() {
        let err = compile_to_c(FileId::MAIN, "func main() { 5; }").unwrap_err();
        assert!(matches!(err, CoreError::Unimplemented { .. }));
    }

    #[test]
    fn bare_minus_is_fatal() {
        let err = compile_to_c(FileId::MAIN, "func main() { let x := -1; }").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLexeme { .. }));
    }

    #[test]
    fn unknown_written_types_are_fatal() {
        let err = compile_to_c(FileId::MAIN, "func main() { let x : float = 1; }").unwrap_err();
        assert!(matches!(err, CoreError::UnknownType { name } if name == "float"));
    }
}
