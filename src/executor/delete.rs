//! `DELETE`: rebuilds the data file excluding matched lines in a single
//! read/write cycle (soft-delete via the tombstone flag is not used; see
//! the tombstone's glossary note).

use std::fs;
use std::path::Path;

use crate::ast::Node;
use crate::catalog::paths;

use super::{filter, DbOp};

pub fn execute(node: &Node, table: &Node, dir: &Path) -> DbOp {
    let table_name = table.table.text.as_str();
    let data_path = paths::data_file(dir, table_name);

    let content = match fs::read_to_string(&data_path) {
        Ok(s) => s,
        Err(e) => return DbOp::internal("delete", format!("failed to read `{}`: {}", table_name, e)),
    };

    let mut kept: Vec<&str> = Vec::new();
    let mut deleted = 0usize;
    for line in content.lines() {
        if filter::matches(&node.filters, table, line) {
            deleted += 1;
        } else {
            kept.push(line);
        }
    }

    if deleted == 0 {
        return DbOp::success("delete", format!("0 rows deleted from `{}`", table_name));
    }

    let mut body = kept.join("\n");
    if !kept.is_empty() {
        body.push('\n');
    }
    if let Err(e) = fs::write(&data_path, body) {
        return DbOp::internal("delete", format!("failed to write `{}`: {}", table_name, e));
    }

    let mut op = DbOp::success("delete", format!("{} row(s) deleted from `{}`", deleted, table_name));
    op.row_count = deleted;
    op
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::executor::{create, execute as exec, insert};
    use crate::lexer::lex;
    use crate::parser::parse;
    use tempfile::tempdir;

    fn parse_sql(sql: &str) -> Node {
        let tokens = lex(sql).unwrap();
        parse(&tokens, sql)
    }

    fn setup() -> (tempfile::TempDir, Catalog) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
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
    fn delete_removes_only_matching_lines() {
        let (dir, mut catalog) = setup();
        let op = exec(&parse_sql("UPDATE t SET name = 'c' WHERE id = 1;"), &mut catalog);
        assert!(op.is_success());

        let op = exec(&parse_sql("DELETE FROM t WHERE name = 'c';"), &mut catalog);
        assert!(op.is_success());
        assert_eq!(op.row_count, 1);

        let content = fs::read_to_string(paths::data_file(dir.path(), "t")).unwrap();
        assert_eq!(content, "1,2,b\n");
    }

    #[test]
    fn delete_followed_by_select_never_returns_deleted_rows() {
        let (_dir, mut catalog) = setup();
        exec(&parse_sql("DELETE FROM t WHERE id = 1;"), &mut catalog);
        let op = exec(&parse_sql("SELECT * FROM t;"), &mut catalog);
        assert_eq!(op.row_count, 1);
        assert!(!op.result.contains(",a\n"));
    }
}
