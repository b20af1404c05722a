//! Recursive descent parser producing a [`Module`].
//!
//! Errors are collected rather than fatal: after a failed item the parser
//! skips to the next `fn`/`extern` and keeps going, so one run reports every
//! broken definition.

mod cursor;
mod error;
mod grammar;

use cairn_diagnostic::Diagnostic;
use cairn_ir::{ExprArena, Module, StringInterner};
use cairn_lexer::{SpannedToken, Token};

use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Deepest block/expression nesting accepted before reporting
/// [`ParseErrorKind::NestingTooDeep`].
pub const MAX_NESTING: usize = 128;

#[derive(Debug)]
pub struct ParseOutput {
    pub module: Module,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    arena: ExprArena,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [SpannedToken], interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            arena: ExprArena::new(),
            depth: 0,
        }
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.cursor.current_span(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Skip to the start of the next item after an error in the item that
    /// began at token `item_start`.
    fn synchronize(&mut self, item_start: usize) {
        if self.cursor.position() == item_start {
            self.cursor.advance();
        }
        while let Some(token) = self.cursor.peek() {
            if matches!(token, Token::Fn | Token::Extern | Token::Doc(_)) {
                break;
            }
            self.cursor.advance();
        }
    }
}

/// Parse a token stream into a module.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[SpannedToken], interner: &StringInterner) -> ParseOutput {
    let mut parser = Parser::new(tokens, interner);
    let mut module = Module::default();
    let mut errors = Vec::new();

    while !parser.cursor.is_at_end() {
        let start = parser.cursor.position();
        match parser.parse_item() {
            Ok(grammar::Item::Function(func)) => module.functions.push(func),
            Ok(grammar::Item::Extern(ext)) => module.externs.push(ext),
            Err(error) => {
                tracing::debug!(%error, "parse error, synchronizing");
                errors.push(error);
                parser.synchronize(start);
            }
        }
    }

    module.arena = parser.arena;
    ParseOutput { module, errors }
}

/// Lex and parse `source` in one step. Lexer failures are returned as
/// diagnostics and stop before parsing.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<ParseOutput, Vec<Diagnostic>> {
    match cairn_lexer::lex(source) {
        Ok(tokens) => Ok(parse(&tokens, interner)),
        Err(errors) => Err(errors.iter().map(|e| e.to_diagnostic(source)).collect()),
    }
}

#[cfg(test)]
mod tests;
