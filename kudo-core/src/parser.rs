//! Parser: token stream → arena-owned items.
//!
//! Recursive descent with a position cursor over the token slice. The
//! grammar is the one implied by the token vocabulary:
//!
//! ```text
//! program := item* Eof
//! item    := "func" Ident "(" ")" ("->" type)? (block | ";")
//! type    := "int" | "cstr" | "none" | Ident
//! block   := "{" stmt* "}"
//! stmt    := ("let" | "var") Ident (":" type)? ("=" | ":=") expr ";"
//!          | expr ";"
//! expr    := IntLiteral | Ident
//! ```
//!
//! The parser only establishes structure; all semantic validation is
//! the checker's job.

use crate::ast::{AstArena, Binding, Expr, FuncDef, Item, Stmt, TypeExpr, VarDecl, VarDeclKind};
use crate::error::CoreError;
use crate::lexer::{Token, TokenKind};

/// Parse a token stream into top-level items allocated in `arena`.
///
/// The stream must end with a single `Eof` token, as produced by
/// [`crate::lexer::lex`].
pub fn parse<'ast>(
    arena: &'ast AstArena,
    tokens: &[Token<'_>],
) -> Result<Vec<&'ast Item<'ast>>, CoreError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut parser = Parser {
        arena,
        tokens,
        position: 0,
    };
    parser.program()
}

struct Parser<'a, 'ast, 'src> {
    arena: &'ast AstArena,
    tokens: &'a [Token<'src>],
    position: usize,
}

impl<'a, 'ast, 'src> Parser<'a, 'ast, 'src> {
    fn program(&mut self) -> Result<Vec<&'ast Item<'ast>>, CoreError> {
        let mut items = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            items.push(self.function()?);
        }
        Ok(items)
    }

    fn function(&mut self) -> Result<&'ast Item<'ast>, CoreError> {
        let func_tok = self.expect(TokenKind::Func, "expected 'func'")?;
        let name_tok = self.expect(TokenKind::Ident, "expected a function name")?;
        self.expect(TokenKind::LParen, "expected '('")?;
        self.expect(TokenKind::RParen, "expected ')'")?;

        let return_type = if self.eat(TokenKind::Arrow) {
            self.type_expr()?
        } else {
            TypeExpr::Infer
        };

        let (is_decl, body) = if self.peek().kind == TokenKind::LBrace {
            (false, Some(self.block()?))
        } else {
            self.expect(TokenKind::Semi, "expected a body or ';'")?;
            (true, None)
        };

        let name = self.arena.alloc_str(name_tok.text);
        Ok(self.arena.func_def(
            FuncDef {
                is_extern: false,
                is_decl,
                name,
                name_span: name_tok.span,
                linkage_name: name,
                params: &[],
                body,
                return_type,
            },
            func_tok.span,
        ))
    }

    fn type_expr(&mut self) -> Result<TypeExpr<'ast>, CoreError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Int | TokenKind::Cstr | TokenKind::None | TokenKind::Ident => {
                Ok(TypeExpr::Named {
                    name: self.arena.alloc_str(tok.text),
                    span: tok.span,
                })
            }
            _ => Err(error_at(&tok, "expected a type")),
        }
    }

    fn block(&mut self) -> Result<&'ast Expr<'ast>, CoreError> {
        let open = self.expect(TokenKind::LBrace, "expected '{'")?;
        let mut statements = Vec::new();
        while self.peek().kind != TokenKind::RBrace {
            if self.peek().kind == TokenKind::Eof {
                return Err(error_at(self.peek(), "expected '}'"));
            }
            statements.push(self.statement()?);
        }
        self.expect(TokenKind::RBrace, "expected '}'")?;
        Ok(self.arena.block(&statements, open.span))
    }

    fn statement(&mut self) -> Result<&'ast Stmt<'ast>, CoreError> {
        match self.peek().kind {
            TokenKind::Let | TokenKind::Var => self.var_decl(),
            TokenKind::IntLiteral | TokenKind::Ident => {
                let expr = self.atom()?;
                self.expect(TokenKind::Semi, "expected ';'")?;
                Ok(self.arena.expr_stmt(expr, expr.span))
            }
            _ => Err(error_at(self.peek(), "expected a statement")),
        }
    }

    fn var_decl(&mut self) -> Result<&'ast Stmt<'ast>, CoreError> {
        let kw = self.advance();
        let kind = match kw.kind {
            TokenKind::Let => VarDeclKind::Let,
            _ => VarDeclKind::Var,
        };

        let name_tok = self.expect(TokenKind::Ident, "expected a variable name")?;

        let ty = if self.eat(TokenKind::Colon) {
            let ty = self.type_expr()?;
            self.expect(TokenKind::Eq, "expected '='")?;
            ty
        } else if self.eat(TokenKind::ColonEq) || self.eat(TokenKind::Eq) {
            TypeExpr::Infer
        } else {
            return Err(error_at(self.peek(), "expected ':', ':=' or '='"));
        };

        let init = self.atom()?;
        self.expect(TokenKind::Semi, "expected ';'")?;

        Ok(self.arena.var_decl(
            VarDecl {
                kind,
                is_uninit: false,
                is_const: false,
                binding: Binding::Ident(self.arena.alloc_str(name_tok.text)),
                ty,
                init,
            },
            kw.span,
        ))
    }

    fn atom(&mut self) -> Result<&'ast Expr<'ast>, CoreError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::IntLiteral => {
                let value = tok
                    .text
                    .parse::<i64>()
                    .map_err(|_| error_at(&tok, "integer literal out of range"))?;
                Ok(self.arena.int_literal(value, tok.span))
            }
            TokenKind::Ident => Ok(self.arena.identifier(tok.text, tok.span)),
            _ => Err(error_at(&tok, "expected an expression")),
        }
    }

    fn peek(&self) -> &Token<'src> {
        // The stream always ends with Eof, so the cursor never runs
        // past the slice.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token<'src> {
        let tok = *self.peek();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token<'src>, CoreError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(error_at(self.peek(), message))
        }
    }
}

fn error_at(token: &Token<'_>, message: &str) -> CoreError {
    CoreError::ParseError {
        message: format!("{message}, found '{}'", token.text),
        line: token.span.line,
        column: token.span.col_start,
    }
}
