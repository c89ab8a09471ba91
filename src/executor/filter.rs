//! Shared WHERE-clause predicate evaluation used by SELECT, UPDATE, and
//! DELETE. A comparison is numeric iff the filter's literal is a Number
//! token *and* the stored field parses as a signed integer; otherwise it
//! falls back to string comparison, where only `=`/`!=` are meaningful.

use crate::ast::{ColumnSpec, Node};
use crate::lexer::TokenKind;

use super::{split_fields, strip_quotes};

/// Evaluate `node`'s filter chain against one data-file line (tombstone
/// field included, newline stripped).
pub fn matches(filters: &[ColumnSpec], table: &Node, line: &str) -> bool {
    if filters.is_empty() {
        return true;
    }
    let fields = split_fields(line);

    let mut result = eval_one(&filters[0], table, &fields);
    for w in 1..filters.len() {
        let op = filters[w - 1].next_logical_op.text.as_str();
        let next = eval_one(&filters[w], table, &fields);
        result = if op.eq_ignore_ascii_case("or") {
            result || next
        } else {
            result && next
        };
    }
    result
}

fn eval_one(filter: &ColumnSpec, table: &Node, fields: &[String]) -> bool {
    let Some(idx) = table.column_index(&filter.column.text) else {
        return false;
    };
    let field_value = fields.get(idx + 1).map(String::as_str).unwrap_or("");
    let literal = strip_quotes(&filter.value.text);
    let op = filter.symbol.text.as_str();

    if filter.value.is_kind(TokenKind::Number) {
        if let (Ok(field_num), Ok(lit_num)) = (field_value.parse::<i64>(), literal.parse::<i64>()) {
            return compare_numeric(op, field_num, lit_num);
        }
    }
    compare_string(op, field_value, literal)
}

fn compare_numeric(op: &str, a: i64, b: i64) -> bool {
    match op {
        "=" => a == b,
        "!=" => a != b,
        "<" => a < b,
        "<=" => a <= b,
        ">" => a > b,
        ">=" => a >= b,
        _ => false,
    }
}

fn compare_string(op: &str, a: &str, b: &str) -> bool {
    match op {
        "=" => a == b,
        "!=" => a != b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn table() -> Node {
        let sql = "CREATE TABLE t (id integer primary key, name varchar unique);";
        let tokens = lex(sql).unwrap();
        parse(&tokens, sql)
    }

    fn filters(sql: &str) -> Vec<ColumnSpec> {
        let tokens = lex(sql).unwrap();
        parse(&tokens, sql).filters
    }

    #[test]
    fn numeric_comparison_when_literal_is_number() {
        let f = filters("SELECT * FROM t WHERE id >= 1 AND id <= 2;");
        assert!(matches(&f, &table(), "1,2,a"));
        assert!(!matches(&f, &table(), "1,3,a"));
    }

    #[test]
    fn string_comparison_when_literal_is_quoted_number() {
        // filterValue treats id as a string here because the literal is
        // quoted ('5'), even though the column holds numbers; `>` is
        // meaningless for strings and evaluates false.
        let f = filters("SELECT * FROM t WHERE id > '5';");
        assert!(!matches(&f, &table(), "1,9,a"));
    }

    #[test]
    fn missing_field_matches_only_empty_literal() {
        let f = filters("SELECT * FROM t WHERE name = '';");
        assert!(matches(&f, &table(), "1,1,"));
        assert!(!matches(&f, &table(), "1,1,a"));
    }

    #[test]
    fn or_combinator_short_circuits_logically() {
        let f = filters("SELECT * FROM t WHERE id = 1 OR id = 2;");
        assert!(matches(&f, &table(), "1,2,a"));
        assert!(!matches(&f, &table(), "1,3,a"));
    }
}
