//! Token cursor with lookahead.

use std::mem::discriminant;

use cairn_ir::Span;
use cairn_lexer::{SpannedToken, Token};

use crate::{PResult, ParseError, ParseErrorKind};

pub(crate) struct Cursor<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [SpannedToken]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.peek_nth(0)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    /// Span of the current token, or an empty span just past the last token.
    pub(crate) fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(t) => t.span,
            None => self.eof_span(),
        }
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    fn eof_span(&self) -> Span {
        let end = self.tokens.last().map_or(0, |t| t.span.end);
        Span::new(end, end)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a SpannedToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Whether the current token has the same variant as `expected`.
    /// Payloads are ignored.
    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.peek()
            .is_some_and(|t| discriminant(t) == discriminant(expected))
    }

    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `expected` or report what was found instead.
    pub(crate) fn expect(&mut self, expected: &Token) -> PResult<Span> {
        if self.check(expected) {
            let span = self.current_span();
            self.pos += 1;
            Ok(span)
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Consume an identifier and return its text.
    pub(crate) fn expect_ident(&mut self, what: &str) -> PResult<(&'a str, Span)> {
        match self.tokens.get(self.pos) {
            Some(SpannedToken {
                token: Token::Ident(name),
                span,
            }) => {
                self.pos += 1;
                Ok((name.as_str(), *span))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Error describing the current token as unexpected.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let kind = match self.peek() {
            Some(found) => ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            None => ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
        };
        ParseError::new(kind, self.current_span())
    }
}
