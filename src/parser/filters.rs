//! WHERE-clause filter-list sub-parser, shared by SELECT/UPDATE/DELETE.
//!
//! Each filter is `identifier op literal`, optionally chained to the next
//! with AND/OR stored on `next_logical_op` of the filter it follows.

use crate::ast::ColumnSpec;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

const COMPARISON_SYMBOLS: &[&str] = &["=", "!=", "<", "<=", ">", ">="];

/// Parse a WHERE predicate list starting right after the `WHERE` keyword.
/// Returns the parsed filters and the index just past the last token consumed.
pub fn parse_filter_list(tokens: &[Token], start: usize) -> Result<(Vec<ColumnSpec>, usize)> {
    let mut filters: Vec<ColumnSpec> = vec![ColumnSpec::new()];
    let mut prev = TokenKind::Empty;
    let mut i = start;

    while i < tokens.len() {
        let tok = &tokens[i];
        let cur = filters.last_mut().unwrap();

        match tok.kind() {
            TokenKind::Identifier if prev == TokenKind::Empty => {
                cur.column = tok.clone();
                prev = TokenKind::Identifier;
                i += 1;
            }
            TokenKind::Symbol if prev == TokenKind::Identifier && COMPARISON_SYMBOLS.contains(&tok.text.as_str()) => {
                cur.symbol = tok.clone();
                prev = TokenKind::Symbol;
                i += 1;
            }
            TokenKind::String | TokenKind::Number if prev == TokenKind::Symbol => {
                cur.value = tok.clone();
                prev = tok.kind();
                i += 1;
            }
            TokenKind::Keyword if tok.text_eq("and") || tok.text_eq("or") => {
                if !matches!(prev, TokenKind::String | TokenKind::Number) {
                    return Err(Error::invalid_where_clause(tok.span));
                }
                cur.next_logical_op = tok.clone();
                filters.push(ColumnSpec::new());
                prev = TokenKind::Empty;
                i += 1;
            }
            TokenKind::Keyword => {
                // terminates the sub-parser; caller re-examines this token
                break;
            }
            _ => return Err(Error::invalid_where_clause(tok.span)),
        }
    }

    if !matches!(prev, TokenKind::String | TokenKind::Number) {
        let span = tokens.get(i.saturating_sub(1)).map(|t| t.span).unwrap_or_default();
        return Err(Error::invalid_where_clause(span));
    }

    Ok((filters, i))
}
