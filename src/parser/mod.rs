//! Turns a token stream into a single [`Node`].
//!
//! The state machine walks the tokens left to right with a single cursor
//! `i`, deciding at each step which fragment of the statement it has
//! landed on: the target table, the SELECT/INSERT/UPDATE column list, the
//! WHERE predicate list, or (for INSERT) the VALUES list. Sub-parsers for
//! the column list and filter list live in [`columns`] and [`filters`]
//! respectively; this module only sequences them.

mod columns;
mod filters;

use crate::ast::{ColumnSpec, Node};
use crate::error::{diagnostic, Error, Result};
use crate::keywords;
use crate::lexer::{Token, TokenKind};

use columns::{parse_column_list, ListTerm};
use filters::parse_filter_list;

const ACTIONS: &[&str] = &["select", "insert", "update", "delete", "create"];

/// Parse `tokens` (already lexed from `source`) into a [`Node`].
///
/// On a diagnosed syntax error, the error is printed eagerly to stderr with
/// a caret and the sentinel `Node::invalid()` is returned; the caller never
/// sees the underlying [`Error`].
pub fn parse(tokens: &[Token], source: &str) -> Node {
    match try_parse(tokens, source) {
        Ok(node) => node,
        Err(err) => {
            diagnostic::eprint("Parse error", source, &err);
            Node::invalid()
        }
    }
}

fn try_parse(tokens: &[Token], source: &str) -> Result<Node> {
    if tokens.is_empty() {
        return Err(Error::expected_statement_keyword(Default::default()));
    }

    let action = &tokens[0];
    if !action.is_kind(TokenKind::Keyword) {
        return Err(Error::expected_statement_keyword(action.span));
    }
    if !ACTIONS.iter().any(|a| action.text_eq(a)) {
        return Err(Error::unrecognized_action(action.text.clone(), action.span));
    }

    let mut node = Node {
        action: action.clone(),
        sql: source.to_string(),
        ..Default::default()
    };

    let is_update_or_delete = action.text_eq("update") || action.text_eq("delete");
    let mut i = 1;
    let mut columns_set = false;
    let mut values_done = !action.text_eq("insert");

    loop {
        let Some(tok) = tokens.get(i) else { break };

        // UPDATE/DELETE: a bare identifier directly after the action names the table.
        if node.table.is_empty() && i == 1 && is_update_or_delete {
            if tok.is_kind(TokenKind::Identifier) {
                node.table = tok.clone();
                i += 1;
                continue;
            } else if tok.is_kind(TokenKind::Keyword) {
                if !keywords::is_pre_table_selector(&tok.text) {
                    return Err(Error::keyword_as_table_name(tok.span));
                }
                // fall through to the pre-table-selector branch below
            } else {
                return Err(Error::invalid_table_name(tok.span));
            }
        }

        // FROM / INTO / TABLE: next token names the table.
        if node.table.is_empty()
            && tok.is_kind(TokenKind::Keyword)
            && keywords::is_pre_table_selector(&tok.text)
        {
            let ident = tokens.get(i + 1).ok_or_else(|| Error::invalid_table_name(tok.span))?;
            if !ident.is_kind(TokenKind::Identifier) {
                if ident.is_kind(TokenKind::Keyword) {
                    return Err(Error::keyword_as_table_name(ident.span));
                }
                return Err(Error::invalid_table_name(ident.span));
            }
            node.table = ident.clone();
            i += 2;
            continue;
        }

        // SELECT *
        if !columns_set && node.action_is("select") && tok.is_kind(TokenKind::Symbol) && tok.text == "*" {
            node.is_all_col = true;
            columns_set = true;
            i += 1;
            continue;
        }

        // Column list / assignment list, shaped differently per action.
        if !columns_set && is_post_column_selector(&node, tok) {
            if node.action_is("create") {
                i += 1; // consume the opening '('
                let (cols, end, pk) = parse_column_list(tokens, i, ListTerm::Paren)?;
                node.columns = cols;
                node.primary_key = pk;
                i = end;
            } else if node.action_is("insert") {
                i += 1; // consume the opening '('
                let (cols, end, _pk) = parse_column_list(tokens, i, ListTerm::Paren)?;
                node.columns = cols;
                i = end;
            } else if node.action_is("update") {
                i += 1; // consume SET
                let (cols, end, _pk) = parse_column_list(tokens, i, ListTerm::Keyword(&["where"]))?;
                node.columns = cols;
                i = end;
            } else {
                // SELECT projection
                let (cols, end, _pk) = parse_column_list(tokens, i, ListTerm::Keyword(&["from"]))?;
                node.columns = cols;
                i = end;
            }
            columns_set = true;
            continue;
        }

        // INSERT ... VALUES ( ... )
        if !values_done && columns_set && tok.is_kind(TokenKind::Keyword) && tok.text_eq("values") {
            i += 1;
            i = parse_insert_values(tokens, i, &mut node.columns)?;
            values_done = true;
            continue;
        }

        // WHERE predicate list
        if tok.is_kind(TokenKind::Keyword) && tok.text_eq("where") {
            i += 1;
            let (filters, end) = parse_filter_list(tokens, i)?;
            node.filters = filters;
            i = end;
            continue;
        }

        return Err(Error::invalid_select(tok.span));
    }

    if node.table.is_empty() {
        return Err(Error::invalid_table_name(
            tokens.last().map(|t| t.span).unwrap_or_default(),
        ));
    }
    if node.action_is("insert") && !values_done {
        return Err(Error::values_missing(
            tokens.last().map(|t| t.span).unwrap_or_default(),
        ));
    }

    Ok(node)
}

/// Mirrors §4.2's `isPostColumnSelector`: recognizes the token that starts
/// the action-specific column/assignment list.
fn is_post_column_selector(node: &Node, tok: &Token) -> bool {
    if node.action_is("select") {
        return tok.is_kind(TokenKind::Identifier);
    }
    if node.action_is("update") {
        return tok.is_kind(TokenKind::Keyword) && tok.text_eq("set");
    }
    if node.action_is("create") {
        return !node.table.is_empty() && tok.is_kind(TokenKind::LParen);
    }
    if node.action_is("insert") {
        return tok.is_kind(TokenKind::LParen);
    }
    false
}

/// Scan the INSERT VALUES list starting at the opening `(` (index `i`,
/// unconsumed). Value tokens are assigned in order to `cols[].value`.
/// Returns the index just past the matching closing `)`.
fn parse_insert_values(tokens: &[Token], i: usize, cols: &mut [ColumnSpec]) -> Result<usize> {
    let open = tokens.get(i).ok_or_else(|| Error::values_missing(Default::default()))?;
    if !open.is_kind(TokenKind::LParen) {
        return Err(Error::values_missing(open.span));
    }
    let mut depth = 1;
    let mut idx = i + 1;
    let mut value_idx = 0usize;

    while depth > 0 {
        let tok = tokens
            .get(idx)
            .ok_or_else(|| Error::values_missing(tokens.last().map(|t| t.span).unwrap_or_default()))?;
        match tok.kind() {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth -= 1,
            TokenKind::Symbol if tok.text == "," => {}
            TokenKind::String | TokenKind::Number => {
                let slot = cols
                    .get_mut(value_idx)
                    .ok_or_else(|| Error::values_missing(tok.span))?;
                slot.value = tok.clone();
                value_idx += 1;
            }
            TokenKind::BuiltInFunc if keywords::is_value_func(&tok.text) => {
                let slot = cols
                    .get_mut(value_idx)
                    .ok_or_else(|| Error::values_missing(tok.span))?;
                slot.value = tok.clone();
                value_idx += 1;
            }
            _ => return Err(Error::values_missing(tok.span)),
        }
        idx += 1;
    }

    if value_idx != cols.len() {
        return Err(Error::values_missing(
            tokens.get(idx.saturating_sub(1)).map(|t| t.span).unwrap_or_default(),
        ));
    }

    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_sql(sql: &str) -> Node {
        let tokens = lex(sql).expect("lex should succeed");
        parse(&tokens, sql)
    }

    #[test]
    fn select_star_sets_all_col() {
        let node = parse_sql("SELECT * FROM t;");
        assert!(!node.is_invalid);
        assert!(node.action_is("select"));
        assert!(node.is_all_col);
        assert_eq!(node.columns.len(), 0);
        assert_eq!(node.table.text, "t");
    }

    #[test]
    fn select_projection_and_where() {
        let node = parse_sql("SELECT name FROM t WHERE id >= 1 AND id <= 2;");
        assert!(!node.is_invalid);
        assert_eq!(node.columns.len(), 1);
        assert_eq!(node.columns[0].column.text, "name");
        assert_eq!(node.filters.len(), 2);
        assert!(node.filters[0].next_logical_op.text_eq("and"));
    }

    #[test]
    fn insert_maps_columns_to_values_in_order() {
        let node = parse_sql("INSERT INTO t (name, age) VALUES ('a', 9);");
        assert!(!node.is_invalid);
        assert_eq!(node.table.text, "t");
        assert_eq!(node.columns.len(), 2);
        assert_eq!(node.columns[0].value.text, "'a'");
        assert_eq!(node.columns[1].value.text, "9");
    }

    #[test]
    fn insert_missing_values_is_invalid() {
        let node = parse_sql("INSERT INTO t (name, age) VALUES ('a');");
        assert!(node.is_invalid);
    }

    #[test]
    fn update_sets_assignment_and_filter() {
        let node = parse_sql("UPDATE t SET name = 'c' WHERE id = 1;");
        assert!(!node.is_invalid);
        assert_eq!(node.table.text, "t");
        assert_eq!(node.columns[0].value.text, "'c'");
        assert_eq!(node.filters[0].column.text, "id");
    }

    #[test]
    fn delete_requires_no_column_list() {
        let node = parse_sql("DELETE FROM t WHERE name = 'c';");
        assert!(!node.is_invalid);
        assert!(node.columns.is_empty());
        assert_eq!(node.filters.len(), 1);
    }

    #[test]
    fn create_table_captures_primary_key_and_unique() {
        let node = parse_sql(
            "CREATE TABLE t (id integer primary key, name varchar unique, created datetime default now);",
        );
        assert!(!node.is_invalid);
        assert_eq!(node.table.text, "t");
        assert_eq!(node.primary_key.as_ref().unwrap().text, "id");
        assert!(node.columns[1].is_unique);
        assert_eq!(node.columns[2].default.text, "now");
    }

    #[test]
    fn update_with_keyword_table_name_is_invalid() {
        let node = parse_sql("UPDATE SET x = 1;");
        assert!(node.is_invalid);
    }

    #[test]
    fn unrecognized_action_is_invalid() {
        let node = parse_sql("WHERE x = 1;");
        assert!(node.is_invalid);
    }
}
