//! Lexer for kudo source text.
//!
//! Scans raw bytes into a span-annotated token stream. The lexer is
//! fail-soft at the character level: an unrecognized byte is reported as
//! a diagnostic and scanning continues, so one run collects every
//! lexical error. The unit-level gate (refusing to parse a stream with
//! lexical errors) is the driver's decision, see [`crate::compile`].

use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::span::{FileId, Span};

/// Kind of a token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Special
    Eof,

    // Identifiers and literals
    Ident,
    IntLiteral,

    // Keywords
    Func,
    Let,
    Var,
    Int,
    Cstr,
    None,

    // Punctuation
    Colon,   // :
    ColonEq, // :=
    Arrow,   // ->
    Semi,    // ;
    Eq,      // =
    LParen,  // (
    RParen,  // )
    LBrace,  // {
    RBrace,  // }
}

/// A single token with its kind, span, and exact lexeme.
///
/// `text` borrows from the source string; for keyword tokens it is the
/// canonical spelling (which, with exact matching, is also the scanned
/// text). The `Eof` token carries the placeholder text `"<eof>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src str,
}

/// Result of lexing a source file.
#[derive(Debug)]
pub struct LexResult<'src> {
    pub tokens: Vec<Token<'src>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LexResult<'_> {
    /// True when no lexical error was recorded. A not-ok stream still
    /// contains every token that could be scanned.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Lex a source string into tokens.
///
/// Produces one token per lexeme plus a single trailing [`TokenKind::Eof`].
/// Unrecognized bytes become [`Diagnostic`]s and scanning continues; a
/// bare `-` (no `->`) has no token kind yet and aborts with
/// [`CoreError::UnsupportedLexeme`].
pub fn lex<'src>(file: FileId, source: &'src str) -> Result<LexResult<'src>, CoreError> {
    let mut lexer = Lexer {
        file,
        source,
        bytes: source.as_bytes(),
        len: source.len(),
        cursor: 0,
        line: 1,
        column: 1,
        diagnostics: Vec::new(),
    };
    lexer.run()
}

struct Lexer<'src> {
    file: FileId,
    source: &'src str,
    bytes: &'src [u8],
    len: usize,
    cursor: usize,
    line: u32,
    column: u32,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    fn run(&mut self) -> Result<LexResult<'src>, CoreError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
                continue;
            }

            if is_ident_start(ch) {
                tokens.push(self.ident_or_keyword());
                continue;
            }

            if ch.is_ascii_digit() {
                tokens.push(self.number());
                continue;
            }

            let start = self.cursor;
            let (line, col) = (self.line, self.column);
            match ch {
                b':' => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        tokens.push(self.token(TokenKind::ColonEq, start, line, col));
                    } else {
                        tokens.push(self.token(TokenKind::Colon, start, line, col));
                    }
                }
                b'-' => {
                    self.advance();
                    if self.peek() == Some(b'>') {
                        self.advance();
                        tokens.push(self.token(TokenKind::Arrow, start, line, col));
                    } else {
                        // '-' on its own is not part of the language yet.
                        return Err(CoreError::UnsupportedLexeme {
                            lexeme: '-',
                            line,
                            column: col,
                        });
                    }
                }
                b';' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::Semi, start, line, col));
                }
                b'=' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::Eq, start, line, col));
                }
                b'(' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::LParen, start, line, col));
                }
                b')' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::RParen, start, line, col));
                }
                b'{' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::LBrace, start, line, col));
                }
                b'}' => {
                    self.advance();
                    tokens.push(self.token(TokenKind::RBrace, start, line, col));
                }
                other => {
                    let span = Span::new(self.file, line, col, col);
                    self.diagnostics
                        .push(Diagnostic::invalid_character(other as char, span));
                    self.advance();
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.file, self.line, self.column, self.column),
            text: "<eof>",
        });

        Ok(LexResult {
            tokens,
            diagnostics: std::mem::take(&mut self.diagnostics),
        })
    }

    fn ident_or_keyword(&mut self) -> Token<'src> {
        let start = self.cursor;
        let (line, col) = (self.line, self.column);
        while let Some(ch) = self.peek() {
            if is_ident_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.cursor];
        let kind = match text {
            "func" => TokenKind::Func,
            "let" => TokenKind::Let,
            "var" => TokenKind::Var,
            "int" => TokenKind::Int,
            "cstr" => TokenKind::Cstr,
            "none" => TokenKind::None,
            _ => TokenKind::Ident,
        };

        Token {
            kind,
            span: Span::new(self.file, line, col, self.column - 1),
            text,
        }
    }

    fn number(&mut self) -> Token<'src> {
        let start = self.cursor;
        let (line, col) = (self.line, self.column);
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        Token {
            kind: TokenKind::IntLiteral,
            span: Span::new(self.file, line, col, self.column - 1),
            text: &self.source[start..self.cursor],
        }
    }

    fn token(&self, kind: TokenKind, start: usize, line: u32, col: u32) -> Token<'src> {
        Token {
            kind,
            span: Span::new(self.file, line, col, self.column - 1),
            text: &self.source[start..self.cursor],
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            if ch == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.cursor += 1;
        }
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn lex_ok(source: &str) -> LexResult<'_> {
        lex(FileId::MAIN, source).expect("lex should not hit a fatal error")
    }

    #[test]
    fn keywords_match_exactly() {
        let cases = [
            ("func", TokenKind::Func),
            ("let", TokenKind::Let),
            ("var", TokenKind::Var),
            ("int", TokenKind::Int),
            ("cstr", TokenKind::Cstr),
            ("none", TokenKind::None),
        ];
        for (text, kind) in cases {
            let result = lex_ok(text);
            assert_eq!(result.tokens.len(), 2, "keyword plus eof for {text}");
            assert_eq!(result.tokens[0].kind, kind);
            assert_eq!(result.tokens[0].text, text);
        }
    }

    #[test]
    fn keyword_matching_is_not_prefix_based() {
        let result = lex_ok("function");
        assert_eq!(result.tokens[0].kind, TokenKind::Ident);
        assert_eq!(result.tokens[0].text, "function");
    }

    #[test]
    fn colon_eq_is_one_token() {
        let result = lex_ok(":=");
        assert_eq!(result.tokens[0].kind, TokenKind::ColonEq);
        assert_eq!(result.tokens.len(), 2);
    }

    #[test]
    fn lone_colon_does_not_consume_the_next_character() {
        let result = lex_ok(":x");
        assert_eq!(result.tokens[0].kind, TokenKind::Colon);
        assert_eq!(result.tokens[1].kind, TokenKind::Ident);
        assert_eq!(result.tokens[1].text, "x");
    }

    #[test]
    fn arrow_is_one_token() {
        let result = lex_ok("->");
        assert_eq!(result.tokens[0].kind, TokenKind::Arrow);
    }

    #[test]
    fn bare_minus_is_a_fatal_error() {
        let err = lex(FileId::MAIN, "let x = -1;").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLexeme { lexeme: '-', .. }));
    }

    #[test]
    fn invalid_character_is_reported_but_scanning_continues() {
        let result = lex_ok("let x := 1 @ let y := 2;");
        assert!(!result.is_ok());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(matches!(
            result.diagnostics[0].kind,
            DiagnosticKind::InvalidCharacter { ch: '@' }
        ));

        let lets = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Let)
            .count();
        assert_eq!(lets, 2, "both declarations should still be tokenized");
    }

    #[test]
    fn token_text_round_trips_through_spans() {
        let source = "func main() { let x := 42; }";
        let result = lex_ok(source);
        for token in &result.tokens {
            if token.kind == TokenKind::Eof {
                continue;
            }
            let span = token.span;
            assert_eq!(span.line, 1);
            let slice = &source[(span.col_start - 1) as usize..span.col_end as usize];
            assert_eq!(token.text, slice);
        }
    }

    #[test]
    fn spans_are_monotonic() {
        let source = "func main() {\n\tlet x := 1;\n\tlet y : int = x;\n}";
        let result = lex_ok(source);
        for pair in result.tokens.windows(2) {
            let (prev, next) = (&pair[0].span, &pair[1].span);
            assert!(
                next.line > prev.line
                    || (next.line == prev.line && next.col_start > prev.col_end),
                "token at {}:{} starts before the previous one ends",
                next.line,
                next.col_start
            );
        }
    }

    #[test]
    fn newline_resets_the_column() {
        let result = lex_ok("func\nmain");
        assert_eq!(result.tokens[0].span.line, 1);
        assert_eq!(result.tokens[1].span.line, 2);
        assert_eq!(result.tokens[1].span.col_start, 1);
    }

    #[test]
    fn exactly_one_trailing_eof() {
        let result = lex_ok("let x := 1;");
        let eofs: Vec<_> = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eof)
            .collect();
        assert_eq!(eofs.len(), 1);
        assert_eq!(result.tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(result.tokens.last().unwrap().text, "<eof>");
    }

    #[test]
    fn eof_span_carries_the_final_cursor_position() {
        let result = lex_ok("let");
        let eof = result.tokens.last().unwrap();
        assert_eq!(eof.span.line, 1);
        assert_eq!(eof.span.col_start, 4);
        assert_eq!(eof.span.col_end, 4);
    }
}
