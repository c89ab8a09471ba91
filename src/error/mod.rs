//! Error handling for the lexer, parser and storage layers.
//!
//! This module provides error types and utilities for representing and
//! displaying lex/parse errors with source location information, plus a
//! typed error for the storage and bootstrap layers.

use std::fmt;
use std::path::PathBuf;

pub mod diagnostic;

/// A span in the source code, represented as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position.
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Create an empty span at a position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The kind of syntax error that occurred while lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UnterminatedString,
    UnclosedParen,
    UnexpectedCharacter(char),
    InvalidSelectStatement,
    InvalidTableName,
    KeywordAsTableName,
    DataTypeOrderMismatch,
    ColumnOptionsBeforeDataType,
    InvalidColumnBeforeAssignment,
    ExpectedIdentifierAfterAs,
    ValuesMissing,
    InvalidWhereClause,
    ExpectedKeyword(&'static str),
    ExpectedStatementKeyword,
    UnrecognizedAction(String),
    Internal(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            ErrorKind::UnclosedParen => write!(f, "unclosed parenthesis"),
            ErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
            ErrorKind::InvalidSelectStatement => write!(f, "Invalid select statement"),
            ErrorKind::InvalidTableName => write!(f, "Invalid table name"),
            ErrorKind::KeywordAsTableName => write!(f, "SQL Keywords cannot be a table"),
            ErrorKind::DataTypeOrderMismatch => write!(f, "Data type order mismatch"),
            ErrorKind::ColumnOptionsBeforeDataType => write!(
                f,
                "Column options must be followed by the column data type"
            ),
            ErrorKind::InvalidColumnBeforeAssignment => {
                write!(f, "Invalid column selected before assignment")
            }
            ErrorKind::ExpectedIdentifierAfterAs => write!(f, "Expected identifier after AS"),
            ErrorKind::ValuesMissing => write!(f, "Values are missing"),
            ErrorKind::InvalidWhereClause => write!(f, "invalid `where` clause"),
            ErrorKind::ExpectedKeyword(kw) => write!(f, "expected keyword '{}'", kw),
            ErrorKind::ExpectedStatementKeyword => write!(
                f,
                "Expected SELECT, INSERT, UPDATE, DELETE, or CREATE"
            ),
            ErrorKind::UnrecognizedAction(text) => {
                write!(f, "Invalid sql command, command not recognized: `{}`", text)
            }
            ErrorKind::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

/// A syntax error with source location information.
#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    span: Option<Span>,
    context: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            context: None,
        }
    }

    pub fn with_span(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::with_span(ErrorKind::UnterminatedString, span)
    }

    pub fn unclosed_paren(span: Span) -> Self {
        Self::with_span(ErrorKind::UnclosedParen, span)
    }

    pub fn unexpected_char(c: char, pos: usize) -> Self {
        Self::with_span(ErrorKind::UnexpectedCharacter(c), Span::point(pos))
    }

    pub fn invalid_select(span: Span) -> Self {
        Self::with_span(ErrorKind::InvalidSelectStatement, span)
    }

    pub fn invalid_table_name(span: Span) -> Self {
        Self::with_span(ErrorKind::InvalidTableName, span)
    }

    pub fn keyword_as_table_name(span: Span) -> Self {
        Self::with_span(ErrorKind::KeywordAsTableName, span)
    }

    pub fn data_type_order_mismatch(span: Span) -> Self {
        Self::with_span(ErrorKind::DataTypeOrderMismatch, span)
    }

    pub fn column_options_before_data_type(span: Span) -> Self {
        Self::with_span(ErrorKind::ColumnOptionsBeforeDataType, span)
    }

    pub fn invalid_column_before_assignment(span: Span) -> Self {
        Self::with_span(ErrorKind::InvalidColumnBeforeAssignment, span)
    }

    pub fn expected_identifier_after_as(span: Span) -> Self {
        Self::with_span(ErrorKind::ExpectedIdentifierAfterAs, span)
    }

    pub fn values_missing(span: Span) -> Self {
        Self::with_span(ErrorKind::ValuesMissing, span)
    }

    pub fn invalid_where_clause(span: Span) -> Self {
        Self::with_span(ErrorKind::InvalidWhereClause, span)
    }

    pub fn expected_keyword(kw: &'static str, span: Span) -> Self {
        Self::with_span(ErrorKind::ExpectedKeyword(kw), span)
    }

    pub fn expected_statement_keyword(span: Span) -> Self {
        Self::with_span(ErrorKind::ExpectedStatementKeyword, span)
    }

    pub fn unrecognized_action(text: impl Into<String>, span: Span) -> Self {
        Self::with_span(ErrorKind::UnrecognizedAction(text.into()), span)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref ctx) = self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// A specialized Result type for lexing and parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the storage, catalog, and bootstrap layers.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted file {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    #[error("manifest entry missing: {path}")]
    ManifestEntryMissing { path: PathBuf },
}

pub type DbResult<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let span1 = Span::new(10, 20);
        let span2 = Span::new(15, 30);
        let merged = span1.merge(span2);
        assert_eq!(merged.start, 10);
        assert_eq!(merged.end, 30);
    }

    #[test]
    fn test_error_display() {
        let err = Error::unexpected_char('$', 5);
        let msg = format!("{}", err);
        assert!(msg.contains("unexpected character"));
    }

    #[test]
    fn test_db_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let db_err: DbError = io_err.into();
        assert!(matches!(db_err, DbError::Io(_)));
    }
}
