use cairn_ir::{Block, Stmt, StmtKind};
use cairn_lexer::Token;

use crate::{ErrorContext, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.nested(|p| {
            let open = p
                .cursor
                .expect(&Token::LBrace)
                .map_err(|e| e.in_context(ErrorContext::Block))?;
            let mut stmts = Vec::new();
            loop {
                match p.cursor.peek() {
                    Some(Token::RBrace) => break,
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnclosedDelimiter {
                                delimiter: '{',
                                open,
                            },
                            p.cursor.current_span(),
                        ))
                    }
                    // Stray separators and documentation lines inside bodies.
                    Some(Token::Semi | Token::Doc(_)) => {
                        p.cursor.advance();
                    }
                    Some(_) => stmts.push(p.parse_stmt()?),
                }
            }
            let close = p.cursor.expect(&Token::RBrace)?;
            Ok(Block {
                stmts,
                span: open.merge(close),
            })
        })
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.peek() {
            Some(Token::Let) => self.parse_let(),
            Some(Token::If) => self.parse_if(),
            Some(Token::While) => self.parse_while(),
            Some(Token::Return) => self.parse_return(),
            Some(Token::Ident(_)) if matches!(self.cursor.peek_nth(1), Some(Token::Assign)) => {
                self.parse_assign()
            }
            _ => self.parse_expr_stmt(),
        }
        .map_err(|e| e.in_context(ErrorContext::Statement))?;
        let end = self.cursor.previous_span();
        self.cursor.eat(&Token::Semi);
        Ok(Stmt {
            kind,
            span: start.merge(end),
        })
    }

    fn parse_let(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(&Token::Let)?;
        let (name, _) = self.cursor.expect_ident("a variable name")?;
        let name = self.interner.intern(name);
        let ty = if self.cursor.eat(&Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.cursor.expect(&Token::Assign)?;
        let init = self.parse_expr()?;
        Ok(StmtKind::Let { name, ty, init })
    }

    fn parse_assign(&mut self) -> PResult<StmtKind> {
        let (name, _) = self.cursor.expect_ident("a variable name")?;
        let name = self.interner.intern(name);
        self.cursor.expect(&Token::Assign)?;
        let value = self.parse_expr()?;
        Ok(StmtKind::Assign { name, value })
    }

    fn parse_if(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(&Token::If)?;
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_block = if self.cursor.eat(&Token::Else) {
            if self.cursor.check(&Token::If) {
                // `else if` desugars to an else block holding one `if`.
                let inner_start = self.cursor.current_span();
                let kind = self.nested(Self::parse_if)?;
                let span = inner_start.merge(self.cursor.previous_span());
                Some(Block {
                    stmts: vec![Stmt { kind, span }],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(&Token::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(StmtKind::While { cond, body })
    }

    fn parse_return(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(&Token::Return)?;
        let value = match self.cursor.peek() {
            None | Some(Token::RBrace | Token::Semi) => None,
            Some(_) => Some(self.parse_expr()?),
        };
        Ok(StmtKind::Return(value))
    }

    /// `expr` or `expr!`.
    fn parse_expr_stmt(&mut self) -> PResult<StmtKind> {
        let expr = self.parse_expr()?;
        if self.cursor.eat(&Token::Bang) {
            Ok(StmtKind::Inject(expr))
        } else {
            Ok(StmtKind::Expr(expr))
        }
    }
}
