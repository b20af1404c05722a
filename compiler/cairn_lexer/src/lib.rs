//! Tokenizer for Cairn source, built on `logos`.
//!
//! Whitespace and `//` comments are skipped. `#` lines are documentation and
//! survive as [`Token::Doc`] so the parser can attach them to definitions.

use std::fmt;

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_ir::Span;
use logos::Logos;

mod escape;

pub use escape::unescape;

/// Why a stretch of input could not be tokenized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    UnterminatedString,
    InvalidEscape(char),
    IntegerOutOfRange,
}

#[derive(Logos, Clone, Debug, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[regex(r"#[^\n]*", |lex| lex.slice()[1..].trim().to_string())]
    Doc(String),

    // Keywords
    #[token("fn")]
    Fn,
    #[token("extern")]
    Extern,
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("as")]
    As,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("_", priority = 3)]
    Underscore,

    // Operators
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i32>().map_err(|_| LexErrorKind::IntegerOutOfRange))]
    Int(i32),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let raw = lex.slice();
        unescape(&raw[1..raw.len() - 1])
    })]
    Str(String),

    #[regex(r#""([^"\\]|\\.)*"#, unterminated)]
    UnterminatedStr,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

fn unterminated(_: &mut logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Doc(_) => return f.write_str("documentation comment"),
            Token::Int(value) => return write!(f, "integer `{value}`"),
            Token::Str(_) | Token::UnterminatedStr => return f.write_str("string literal"),
            Token::Ident(name) => return write!(f, "identifier `{name}`"),
            Token::Fn => "fn",
            Token::Extern => "extern",
            Token::Let => "let",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Return => "return",
            Token::Select => "select",
            Token::As => "as",
            Token::True => "true",
            Token::False => "false",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Colon => ":",
            Token::DoubleColon => "::",
            Token::Arrow => "->",
            Token::FatArrow => "=>",
            Token::Underscore => "_",
            Token::Assign => "=",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Bang => "!",
        };
        write!(f, "`{text}`")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        match &self.kind {
            LexErrorKind::InvalidCharacter => Diagnostic::error(ErrorCode::E0002)
                .with_message(format!(
                    "invalid character `{}`",
                    self.span.slice(source).escape_debug()
                ))
                .with_label(self.span, "not valid here"),
            LexErrorKind::UnterminatedString => Diagnostic::error(ErrorCode::E0001)
                .with_message("unterminated string literal")
                .with_label(self.span, "string starts here")
                .with_help("add a closing `\"`"),
            LexErrorKind::InvalidEscape(c) => Diagnostic::error(ErrorCode::E0004)
                .with_message(format!("invalid escape sequence `\\{c}`"))
                .with_label(self.span, "in this string")
                .with_note("valid escapes are \\n \\t \\r \\\\ \\\" \\0"),
            LexErrorKind::IntegerOutOfRange => Diagnostic::error(ErrorCode::E0003)
                .with_message(format!(
                    "integer literal `{}` does not fit in `i32`",
                    self.span.slice(source)
                ))
                .with_label(self.span, "out of range"),
        }
    }
}

/// Tokenize `source`, collecting every error instead of stopping at the first.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(token) => tokens.push(SpannedToken { token, span }),
            Err(kind) => errors.push(LexError { kind, span }),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
