//! Token definitions for the SQL lexer.

use crate::error::Span;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Empty,
    Keyword,
    Identifier,
    String,
    Number,
    Symbol,
    LParen,
    RParen,
    DataType,
    BuiltInFunc,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Empty => "empty",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Symbol => "symbol",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::DataType => "data type",
            TokenKind::BuiltInFunc => "built-in function",
        };
        write!(f, "{}", s)
    }
}

/// A single lexical token: its kind, the source span it came from, and its
/// normalized text (lower-cased for keywords/data types/built-ins, comma
/// escaped for strings, verbatim otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: Option<TokenKindWrapper>,
    pub span: Span,
    pub text: String,
}

/// `TokenKind` has no natural "empty" variant usable as a struct default, so
/// the token wraps it in an `Option` that is `None` only for the sentinel
/// empty token produced before parsing starts.
pub type TokenKindWrapper = TokenKind;

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            span,
            text: text.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            kind: None,
            span: Span::default(),
            text: String::new(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind.unwrap_or(TokenKind::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn text_eq(&self, s: &str) -> bool {
        self.text.eq_ignore_ascii_case(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
