//! Shared column-list sub-parser, reused by CREATE TABLE column definitions,
//! SELECT projections, UPDATE's SET assignment list, and INSERT's column
//! name list.

use crate::ast::ColumnSpec;
use crate::error::{Error, Result};
use crate::keywords;
use crate::lexer::{Token, TokenKind};

/// Where a column list ends.
pub enum ListTerm {
    /// Paren-wrapped list: CREATE's column defs, INSERT's column names.
    /// The opening `(` has already been consumed by the caller.
    Paren,
    /// Unwrapped list: SELECT's projection, UPDATE's SET list. Ends at the
    /// first of the given (lower-case) keyword texts, or at end of input.
    Keyword(&'static [&'static str]),
}

/// Parse a column list starting at `tokens[start]`. Returns the parsed
/// columns and the index just past the list (past the closing `)` for
/// `ListTerm::Paren`; pointing *at* the terminating keyword, unconsumed,
/// for `ListTerm::Keyword`).
pub fn parse_column_list(
    tokens: &[Token],
    start: usize,
    term: ListTerm,
) -> Result<(Vec<ColumnSpec>, usize, Option<Token>)> {
    let mut cols: Vec<ColumnSpec> = vec![ColumnSpec::new()];
    let mut prev = TokenKind::Empty;
    let mut i = start;
    let mut primary_key: Option<Token> = None;

    while i < tokens.len() {
        let tok = &tokens[i];

        if tok.is_kind(TokenKind::RParen) {
            if matches!(term, ListTerm::Paren) {
                i += 1;
                return Ok((finish(cols), i, primary_key));
            }
        }

        if let ListTerm::Keyword(stops) = &term {
            if tok.is_kind(TokenKind::Keyword) && stops.iter().any(|k| tok.text_eq(k)) {
                return Ok((finish(cols), i, primary_key));
            }
        }

        match tok.kind() {
            TokenKind::Identifier => {
                if prev != TokenKind::Empty {
                    return Err(Error::invalid_select(tok.span));
                }
                cols.last_mut().unwrap().column = tok.clone();
                prev = TokenKind::Identifier;
                i += 1;
            }
            TokenKind::DataType => {
                if prev != TokenKind::Identifier {
                    return Err(Error::data_type_order_mismatch(tok.span));
                }
                cols.last_mut().unwrap().data_type = tok.clone();
                prev = TokenKind::DataType;
                i += 1;
            }
            TokenKind::BuiltInFunc if tok.text_eq("unique") => {
                if !matches!(prev, TokenKind::BuiltInFunc | TokenKind::DataType) {
                    return Err(Error::column_options_before_data_type(tok.span));
                }
                cols.last_mut().unwrap().is_unique = true;
                prev = TokenKind::BuiltInFunc;
                i += 1;
            }
            TokenKind::BuiltInFunc if tok.text_eq("default") => {
                if !matches!(prev, TokenKind::BuiltInFunc | TokenKind::DataType) {
                    return Err(Error::column_options_before_data_type(tok.span));
                }
                let value_fn = tokens.get(i + 1).ok_or_else(|| Error::values_missing(tok.span))?;
                if !value_fn.is_kind(TokenKind::BuiltInFunc) || !keywords::is_value_func(&value_fn.text) {
                    return Err(Error::column_options_before_data_type(value_fn.span));
                }
                cols.last_mut().unwrap().default = value_fn.clone();
                prev = TokenKind::BuiltInFunc;
                i += 2;
            }
            TokenKind::BuiltInFunc if tok.text_eq("primary") => {
                let key_tok = tokens
                    .get(i + 1)
                    .ok_or_else(|| Error::column_options_before_data_type(tok.span))?;
                if !key_tok.is_kind(TokenKind::BuiltInFunc) || !key_tok.text_eq("key") {
                    return Err(Error::column_options_before_data_type(key_tok.span));
                }
                primary_key = Some(cols.last().unwrap().column.clone());
                i += 2;
            }
            TokenKind::Symbol if tok.text == "=" => {
                if prev != TokenKind::Identifier {
                    return Err(Error::invalid_column_before_assignment(tok.span));
                }
                cols.last_mut().unwrap().symbol = tok.clone();
                prev = TokenKind::Symbol;
                i += 1;
            }
            TokenKind::Symbol if tok.text == "," => {
                cols.push(ColumnSpec::new());
                prev = TokenKind::Empty;
                i += 1;
            }
            TokenKind::String | TokenKind::Number | TokenKind::BuiltInFunc => {
                if prev != TokenKind::Symbol {
                    return Err(Error::invalid_column_before_assignment(tok.span));
                }
                cols.last_mut().unwrap().value = tok.clone();
                prev = tok.kind();
                i += 1;
            }
            TokenKind::Keyword if tok.text_eq("as") => {
                let ident = tokens
                    .get(i + 1)
                    .ok_or_else(|| Error::expected_identifier_after_as(tok.span))?;
                if !ident.is_kind(TokenKind::Identifier) {
                    return Err(Error::expected_identifier_after_as(ident.span));
                }
                cols.last_mut().unwrap().display = Some(ident.clone());
                i += 2;
            }
            TokenKind::Keyword => {
                // terminates the sub-parser; caller re-examines this token
                return Ok((finish(cols), i, primary_key));
            }
            _ => {
                return Err(Error::invalid_select(tok.span));
            }
        }
    }

    if matches!(term, ListTerm::Paren) {
        return Err(Error::invalid_select(
            tokens.last().map(|t| t.span).unwrap_or_default(),
        ));
    }

    Ok((finish(cols), i, primary_key))
}

/// Drop a trailing empty column left over from a dangling comma or an
/// entirely empty list.
fn finish(mut cols: Vec<ColumnSpec>) -> Vec<ColumnSpec> {
    if let Some(last) = cols.last() {
        if last.column.is_empty() && last.value.is_empty() && last.data_type.is_empty() {
            cols.pop();
        }
    }
    cols
}
