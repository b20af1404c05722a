//! Expression grammar, lowest precedence first:
//! `||`, `&&`, comparisons (non-associative), `+ -`, `*`, unary `-`, primary.

use cairn_ir::{BinaryOp, Block, Expr, ExprId, ExprKind, SelectClause, Span, Stmt, StmtKind};
use cairn_lexer::Token;

use crate::{ErrorContext, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc(Expr::new(kind, span))
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.arena[left].span.merge(self.arena[right].span);
        self.alloc(ExprKind::Binary { op, left, right }, span)
    }

    pub(crate) fn parse_expr(&mut self) -> PResult<ExprId> {
        self.nested(Self::parse_or)
            .map_err(|e| e.in_context(ErrorContext::Expression))
    }

    fn parse_or(&mut self) -> PResult<ExprId> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = self.binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<ExprId> {
        let mut left = self.parse_comparison()?;
        while self.cursor.eat(&Token::AndAnd) {
            let right = self.parse_comparison()?;
            left = self.binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> PResult<ExprId> {
        let left = self.parse_sum()?;
        let op = match self.cursor.peek() {
            Some(Token::EqEq) => BinaryOp::Eq,
            Some(Token::NotEq) => BinaryOp::NotEq,
            Some(Token::Lt) => BinaryOp::Lt,
            Some(Token::LtEq) => BinaryOp::LtEq,
            Some(Token::Gt) => BinaryOp::Gt,
            Some(Token::GtEq) => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.cursor.advance();
        let right = self.parse_sum()?;
        Ok(self.binary(op, left, right))
    }

    fn parse_sum(&mut self) -> PResult<ExprId> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.cursor.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_term()?;
            left = self.binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> PResult<ExprId> {
        let mut left = self.parse_unary()?;
        while self.cursor.eat(&Token::Star) {
            let right = self.parse_unary()?;
            left = self.binary(BinaryOp::Mul, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<ExprId> {
        if self.cursor.check(&Token::Minus) {
            let start = self.cursor.current_span();
            self.cursor.advance();
            let operand = self.nested(Self::parse_unary)?;
            let span = start.merge(self.arena[operand].span);
            return Ok(self.alloc(ExprKind::Neg(operand), span));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> PResult<ExprId> {
        let span = self.cursor.current_span();
        let kind = match self.cursor.peek() {
            Some(Token::Int(value)) => ExprKind::Int(*value),
            Some(Token::Str(text)) => ExprKind::Str(self.interner.intern(text)),
            Some(Token::True) => ExprKind::Bool(true),
            Some(Token::False) => ExprKind::Bool(false),
            Some(Token::Underscore) => ExprKind::Placeholder,
            Some(Token::LParen) => return self.parse_paren(),
            Some(Token::Select) => return self.parse_select(),
            Some(Token::Ident(name)) => {
                if name == "Context" && self.cursor.peek_nth(1) == Some(&Token::DoubleColon) {
                    return self.parse_new_context();
                }
                if self.cursor.peek_nth(1) == Some(&Token::LParen) {
                    return self.parse_call();
                }
                ExprKind::Ident(self.interner.intern(name))
            }
            Some(other) => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression {
                        found: other.to_string(),
                    },
                    span,
                ))
            }
            None => return Err(self.cursor.unexpected("an expression")),
        };
        self.cursor.advance();
        Ok(self.alloc(kind, span))
    }

    /// `()` or a parenthesized expression.
    fn parse_paren(&mut self) -> PResult<ExprId> {
        let open = self.cursor.expect(&Token::LParen)?;
        if self.cursor.check(&Token::RParen) {
            let close = self.cursor.expect(&Token::RParen)?;
            return Ok(self.alloc(ExprKind::Unit, open.merge(close)));
        }
        let inner = self.parse_expr()?;
        if !self.cursor.eat(&Token::RParen) {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDelimiter {
                    delimiter: '(',
                    open,
                },
                self.cursor.current_span(),
            ));
        }
        Ok(inner)
    }

    /// `Context::new()`
    fn parse_new_context(&mut self) -> PResult<ExprId> {
        let (_, start) = self.cursor.expect_ident("`Context`")?;
        self.cursor.expect(&Token::DoubleColon)?;
        let (word, span) = self.cursor.expect_ident("`new`")?;
        if word != "new" {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: "`new`".to_string(),
                    found: format!("identifier `{word}`"),
                },
                span,
            ));
        }
        self.cursor.expect(&Token::LParen)?;
        let close = self.cursor.expect(&Token::RParen)?;
        Ok(self.alloc(ExprKind::NewContext, start.merge(close)))
    }

    /// `name(arg, ...)`
    fn parse_call(&mut self) -> PResult<ExprId> {
        let (name, start) = self.cursor.expect_ident("a function name")?;
        let func = self.interner.intern(name);
        let open = self.cursor.expect(&Token::LParen)?;
        let mut args = Vec::new();
        loop {
            match self.cursor.peek() {
                Some(Token::RParen) => break,
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter {
                            delimiter: '(',
                            open,
                        },
                        self.cursor.current_span(),
                    ))
                }
                Some(_) => args.push(self.parse_expr()?),
            }
            if !self.cursor.eat(&Token::Comma) {
                break;
            }
        }
        let close = self.cursor.expect(&Token::RParen)?;
        Ok(self.alloc(ExprKind::Call { func, args }, start.merge(close)))
    }

    /// `select { tool(args) as name => handler, ... }`
    fn parse_select(&mut self) -> PResult<ExprId> {
        let start = self.cursor.expect(&Token::Select)?;
        let open = self.cursor.expect(&Token::LBrace)?;
        let mut clauses = Vec::new();
        loop {
            match self.cursor.peek() {
                Some(Token::RBrace) => break,
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedDelimiter {
                            delimiter: '{',
                            open,
                        },
                        self.cursor.current_span(),
                    ))
                }
                Some(_) => {}
            }
            let (clause, braced) = self
                .nested(Self::parse_select_clause)
                .map_err(|e| e.in_context(ErrorContext::SelectClause))?;
            clauses.push(clause);
            // A comma is optional after a braced handler.
            if !self.cursor.eat(&Token::Comma)
                && !braced
                && !self.cursor.check(&Token::RBrace)
            {
                return Err(self.cursor.unexpected("`,` or `}`"));
            }
        }
        let close = self.cursor.expect(&Token::RBrace)?;
        if clauses.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSelectClause,
                start.merge(close),
            ));
        }
        Ok(self.alloc(ExprKind::Select(clauses), start.merge(close)))
    }

    /// One arm; the flag reports whether the handler was a braced block.
    fn parse_select_clause(&mut self) -> PResult<(SelectClause, bool)> {
        let start = self.cursor.current_span();
        let is_call = matches!(self.cursor.peek(), Some(Token::Ident(_)))
            && self.cursor.peek_nth(1) == Some(&Token::LParen);
        if !is_call {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSelectClause,
                start,
            ));
        }
        let call = self.parse_call()?;
        self.cursor.expect(&Token::As)?;
        let (binding, _) = self.cursor.expect_ident("a result name")?;
        let binding = self.interner.intern(binding);
        self.cursor.expect(&Token::FatArrow)?;

        let braced = self.cursor.check(&Token::LBrace);
        let handler = if braced {
            self.parse_block()?
        } else {
            let expr = self.parse_expr()?;
            let span = self.arena[expr].span;
            Block {
                stmts: vec![Stmt {
                    kind: StmtKind::Expr(expr),
                    span,
                }],
                span,
            }
        };
        let clause = SelectClause {
            call,
            binding,
            span: start.merge(self.cursor.previous_span()),
            handler,
        };
        Ok((clause, braced))
    }
}
