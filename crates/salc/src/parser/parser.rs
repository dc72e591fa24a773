//! Recursive descent parser for SAL
//!
//! Grammar:
//!
//! ```text
//! program  := line*
//! line     := INT IDENT '=' expr
//! expr     := INT | IDENT | IDENT '(' arg-list? ')'
//! arg-list := expr (',' expr)*
//! ```
//!
//! Whitespace is insignificant; the leading line number of each binding
//! delimits lines.

use crate::ast::{Expr, ExprKind, Line, Program};
use crate::common::{CompileError, CompileResult, Span};
use crate::lexer::{Lexer, Token, TokenKind};
use string_interner::DefaultStringInterner;

/// Recursive descent parser for SAL
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    names: DefaultStringInterner,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            names: DefaultStringInterner::new(),
        })
    }

    /// Parse a complete program
    ///
    /// Consumes the parser; the identifier table moves into the returned
    /// [`Program`].
    pub fn parse(mut self) -> CompileResult<Program> {
        let mut lines = Vec::new();

        while !self.at_end() {
            lines.push(self.parse_line()?);
        }

        Ok(Program::new(lines, self.names))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, Span)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier(text) => Ok((text, token.span)),
            other => Err(CompileError::parser(
                format!("expected identifier, found {}", other),
                token.span,
            )),
        }
    }

    fn expect_integer(&mut self) -> CompileResult<(String, Span)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::IntLiteral(text) => Ok((text, token.span)),
            other => Err(CompileError::parser(
                format!("expected integer, found {}", other),
                token.span,
            )),
        }
    }

    // =========================================================================
    // Lines
    // =========================================================================

    fn parse_line(&mut self) -> CompileResult<Line> {
        let (number_text, number_span) = self.expect_integer()?;
        let line_number = number_text.parse::<u32>().map_err(|_| {
            CompileError::parser(
                format!("invalid line number '{}'", number_text),
                number_span,
            )
        })?;

        let (ident_text, _) = self.expect_identifier()?;
        let identifier = self.names.get_or_intern(&ident_text);

        self.expect(TokenKind::Eq)?;

        let expr = self.parse_expr()?;
        let span = number_span.merge(expr.span);

        Ok(Line {
            line_number,
            identifier,
            expr,
            span,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) -> CompileResult<Expr> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::IntLiteral(text) => {
                let value = text.parse::<i64>().map_err(|_| {
                    CompileError::parser(
                        format!("integer '{}' out of range", text),
                        token.span,
                    )
                })?;
                Ok(Expr::new(ExprKind::Integer(value), token.span))
            }

            TokenKind::Identifier(text) => {
                let name = self.names.get_or_intern(&text);
                if self.check(&TokenKind::LParen) {
                    self.advance()?;
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if !self.match_token(&TokenKind::Comma)? {
                                break;
                            }
                        }
                    }
                    let rparen = self.expect(TokenKind::RParen)?;
                    Ok(Expr::new(
                        ExprKind::Function { callee: name, args },
                        token.span.merge(rparen.span),
                    ))
                } else {
                    Ok(Expr::new(ExprKind::Variable(name), token.span))
                }
            }

            other => Err(CompileError::parser(
                format!("expected expression, found {}", other),
                token.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_parse_integer_line() {
        let program = parse("1 x = 42");

        assert_eq!(program.lines.len(), 1);
        let line = &program.lines[0];
        assert_eq!(line.line_number, 1);
        assert_eq!(program.name(line.identifier), "x");
        assert!(matches!(line.expr.kind, ExprKind::Integer(42)));
    }

    #[test]
    fn test_parse_bare_alias_line() {
        let program = parse("1 x = 3  2 w = x");

        assert_eq!(program.lines.len(), 2);
        let line = &program.lines[1];
        assert_eq!(line.line_number, 2);
        if let ExprKind::Variable(name) = line.expr.kind {
            assert_eq!(program.name(name), "x");
        } else {
            panic!("expected variable reference");
        }
    }

    #[test]
    fn test_parse_function_application() {
        let program = parse("5 y = add(x, 7)");

        let line = &program.lines[0];
        if let ExprKind::Function { callee, args } = &line.expr.kind {
            assert_eq!(program.name(*callee), "add");
            assert_eq!(args.len(), 2);
            assert!(matches!(args[0].kind, ExprKind::Variable(_)));
            assert!(matches!(args[1].kind, ExprKind::Integer(7)));
        } else {
            panic!("expected function application");
        }
    }

    #[test]
    fn test_parse_nested_arguments() {
        let program = parse("2 z = mul(neg(x), add(y, 1))");

        let line = &program.lines[0];
        if let ExprKind::Function { args, .. } = &line.expr.kind {
            assert_eq!(args.len(), 2);
            assert!(matches!(&args[0].kind, ExprKind::Function { args: inner, .. } if inner.len() == 1));
            assert!(matches!(&args[1].kind, ExprKind::Function { args: inner, .. } if inner.len() == 2));
        } else {
            panic!("expected function application");
        }
    }

    #[test]
    fn test_parse_empty_argument_list() {
        let program = parse("1 x = now()");

        let line = &program.lines[0];
        if let ExprKind::Function { args, .. } = &line.expr.kind {
            assert!(args.is_empty());
        } else {
            panic!("expected function application");
        }
    }

    #[test]
    fn test_parse_multiple_lines_with_comments() {
        let source = "\
# a small program
1 x = 3
2 y = add(x, 7)   # uses x
3 w = y
";
        let program = parse(source);
        assert_eq!(program.lines.len(), 3);
        assert_eq!(program.lines[2].line_number, 3);
    }

    #[test]
    fn test_negative_line_number_rejected() {
        let result = Parser::new("-1 x = 3").unwrap().parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_equals_rejected() {
        let result = Parser::new("1 x 3").unwrap().parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_unclosed_argument_list_rejected() {
        let result = Parser::new("1 y = f(x").unwrap().parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_identifiers_interned_once() {
        let program = parse("1 x = 3  2 y = f(x)");

        let bound = program.lines[0].identifier;
        if let ExprKind::Function { args, .. } = &program.lines[1].expr.kind {
            if let ExprKind::Variable(used) = args[0].kind {
                assert_eq!(bound, used);
                return;
            }
        }
        panic!("expected f(x) application");
    }
}
