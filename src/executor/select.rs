//! `SELECT`: filters, projects, and reports the result both as a
//! formatter-ready string and as raw matching lines (the latter is what
//! the auth layer uses to pull a stored password back out).

use std::fs;
use std::path::Path;

use crate::ast::Node;
use crate::catalog::paths;

use super::{filter, split_fields, DbOp};

pub fn execute(node: &Node, table: &Node, dir: &Path) -> DbOp {
    let table_name = table.table.text.as_str();
    let data_path = paths::data_file(dir, table_name);

    let content = match fs::read_to_string(&data_path) {
        Ok(s) => s,
        Err(e) => return DbOp::internal("select", format!("failed to read `{}`: {}", table_name, e)),
    };

    let projected_names: Vec<(String, String)> = if node.is_all_col {
        table.columns.iter().map(|c| (c.name().to_string(), c.name().to_string())).collect()
    } else {
        node.columns
            .iter()
            .map(|c| {
                let display = c.display.as_ref().map(|t| t.text.clone()).unwrap_or_else(|| c.name().to_string());
                (c.name().to_string(), display)
            })
            .collect()
    };

    for (name, _) in &projected_names {
        if table.column_index(name).is_none() {
            return DbOp::fail(
                "select",
                format!("Column `{}` doesn't exist on table `{}`", name, table_name),
            );
        }
    }

    let mut rows: Vec<String> = Vec::new();
    let mut projected_rows: Vec<String> = Vec::new();
    let mut max_col_space = projected_names.iter().map(|(_, d)| d.len()).max().unwrap_or(0);

    for line in content.lines() {
        if !filter::matches(&node.filters, table, line) {
            continue;
        }
        rows.push(line.to_string());

        let fields = split_fields(line);
        let values: Vec<String> = projected_names
            .iter()
            .map(|(name, _)| {
                let idx = table.column_index(name).unwrap();
                fields.get(idx + 1).cloned().unwrap_or_default()
            })
            .collect();
        for v in &values {
            max_col_space = max_col_space.max(v.len());
        }
        projected_rows.push(values.join(","));
    }

    let header = projected_names
        .iter()
        .map(|(_, display)| display.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let mut result = format!("{}\n", header);
    for row in &projected_rows {
        result.push_str(row);
        result.push('\n');
    }

    let mut op = DbOp::success("select", format!("{} row(s) selected", rows.len()));
    op.row_count = rows.len();
    op.line_count = projected_rows.len();
    op.col_count = projected_names.len();
    op.max_col_space = max_col_space;
    op.result = result;
    op.rows = rows;
    op
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::executor::{create, execute as exec, insert};
    use crate::lexer::lex;
    use crate::parser::parse;
    use std::fs as stdfs;
    use tempfile::tempdir;

    fn parse_sql(sql: &str) -> Node {
        let tokens = lex(sql).unwrap();
        parse(&tokens, sql)
    }

    fn setup() -> (tempfile::TempDir, Catalog) {
        let dir = tempdir().unwrap();
        stdfs::create_dir_all(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path()).unwrap();
        create::execute(
            &parse_sql("CREATE TABLE t (id integer primary key, name varchar unique);"),
            &mut catalog,
        );
        insert::execute(&parse_sql("INSERT INTO t (name) VALUES ('a');"), catalog.find("t").unwrap(), catalog.dir());
        insert::execute(&parse_sql("INSERT INTO t (name) VALUES ('b');"), catalog.find("t").unwrap(), catalog.dir());
        (dir, catalog)
    }

    #[test]
    fn select_all_without_where_returns_all_rows() {
        let (_dir, mut catalog) = setup();
        let op = exec(&parse_sql("SELECT * FROM t;"), &mut catalog);
        assert_eq!(op.row_count, 2);
        assert!(op.result.starts_with("id,name\n"));
    }

    #[test]
    fn select_projection_with_range_filter() {
        let (_dir, mut catalog) = setup();
        let op = exec(&parse_sql("SELECT name FROM t WHERE id >= 1 AND id <= 2;"), &mut catalog);
        assert_eq!(op.row_count, 2);
        assert_eq!(op.result, "name\na\nb\n");
    }

    #[test]
    fn unknown_column_in_projection_fails() {
        let (_dir, mut catalog) = setup();
        let op = exec(&parse_sql("SELECT ghost FROM t;"), &mut catalog);
        assert_eq!(op.code(), super::DbCode::Fail);
    }
}
