use cairn_ir::{ExternFn, Function, Param, Type};
use cairn_lexer::Token;

use super::Item;
use crate::{ErrorContext, PResult, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_item(&mut self) -> PResult<Item> {
        let doc = self.parse_doc();
        match self.cursor.peek() {
            Some(Token::Fn) => self
                .parse_function(doc)
                .map(Item::Function)
                .map_err(|e| e.in_context(ErrorContext::FunctionDef)),
            Some(Token::Extern) => self
                .parse_extern(doc)
                .map(Item::Extern)
                .map_err(|e| e.in_context(ErrorContext::ExternDecl)),
            _ => Err(self.cursor.unexpected("`fn` or `extern fn`")),
        }
    }

    /// Consecutive `#` lines, joined with newlines.
    fn parse_doc(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        while let Some(Token::Doc(line)) = self.cursor.peek() {
            lines.push(line.as_str());
            self.cursor.advance();
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    fn parse_function(&mut self, doc: Option<String>) -> PResult<Function> {
        let start = self.cursor.expect(&Token::Fn)?;
        let (name, _) = self.cursor.expect_ident("a function name")?;
        let name = self.interner.intern(name);
        let params = self.parse_params()?;
        let ret = self.parse_return_type()?;
        let body = self.parse_block()?;
        Ok(Function {
            name,
            params,
            ret,
            span: start.merge(body.span),
            body,
            doc,
        })
    }

    fn parse_extern(&mut self, doc: Option<String>) -> PResult<ExternFn> {
        let start = self.cursor.expect(&Token::Extern)?;
        self.cursor.expect(&Token::Fn)?;
        let (name, _) = self.cursor.expect_ident("a function name")?;
        let name = self.interner.intern(name);
        let params = self.parse_params()?;
        let ret = self.parse_return_type()?;
        let end = self.cursor.previous_span();
        self.cursor.eat(&Token::Semi);
        Ok(ExternFn {
            name,
            params,
            ret,
            doc,
            span: start.merge(end),
        })
    }

    /// `(name: Type, ctx, ...)`. An unannotated parameter is a `Context`.
    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        let open = self.cursor.expect(&Token::LParen)?;
        let mut params = Vec::new();
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
                Some(_) => {}
            }
            let (name, span) = self
                .cursor
                .expect_ident("a parameter name")
                .map_err(|e| e.in_context(ErrorContext::Parameters))?;
            let ty = if self.cursor.eat(&Token::Colon) {
                self.parse_type()?
            } else {
                Type::Context
            };
            params.push(Param {
                name: self.interner.intern(name),
                ty,
                span: span.merge(self.cursor.previous_span()),
            });
            if !self.cursor.eat(&Token::Comma) {
                break;
            }
        }
        self.cursor
            .expect(&Token::RParen)
            .map_err(|e| e.in_context(ErrorContext::Parameters))?;
        Ok(params)
    }

    /// `-> T` or `: T`; omitted means `()`.
    fn parse_return_type(&mut self) -> PResult<Type> {
        if self.cursor.eat(&Token::Arrow) || self.cursor.eat(&Token::Colon) {
            self.parse_type()
        } else {
            Ok(Type::Unit)
        }
    }

    pub(crate) fn parse_type(&mut self) -> PResult<Type> {
        if self.cursor.eat(&Token::LParen) {
            self.cursor
                .expect(&Token::RParen)
                .map_err(|e| e.in_context(ErrorContext::TypeAnnotation))?;
            return Ok(Type::Unit);
        }
        let (name, span) = self
            .cursor
            .expect_ident("a type")
            .map_err(|e| e.in_context(ErrorContext::TypeAnnotation))?;
        Type::from_keyword(name).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownType {
                    name: name.to_string(),
                },
                span,
            )
        })
    }
}
