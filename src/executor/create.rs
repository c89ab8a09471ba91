//! `CREATE TABLE`: the only statement that mutates the catalog itself.

use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::ast::Node;
use crate::catalog::{paths, Catalog};

use super::DbOp;

pub fn execute(node: &Node, catalog: &mut Catalog) -> DbOp {
    let table = node.table.text.as_str();
    let dir = catalog.dir();
    let data_path = paths::data_file(dir, table);
    let schema_path = paths::schema_file(dir, table);

    if data_path.exists() || schema_path.exists() {
        return DbOp::fail("create", "Table already exists");
    }

    if let Err(e) = fs::write(&schema_path, &node.sql) {
        return DbOp::internal("create", format!("failed to write schema file: {}", e));
    }

    if node.has_column("id") {
        if let Err(e) = fs::write(paths::pk_file(dir, table), "0") {
            return DbOp::internal("create", format!("failed to write pk counter: {}", e));
        }
    }

    if let Err(e) = fs::write(&data_path, "") {
        return DbOp::internal("create", format!("failed to create data file: {}", e));
    }

    if let Err(e) = append_manifest(dir, &schema_path) {
        return DbOp::internal("create", format!("failed to update manifest: {}", e));
    }

    if let Err(e) = catalog.reload() {
        return DbOp::internal("create", format!("failed to reload catalog: {}", e));
    }

    DbOp::success("create", format!("Table `{}` created", table))
}

fn append_manifest(dir: &std::path::Path, schema_path: &std::path::Path) -> std::io::Result<()> {
    let mut manifest = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::manifest_file(dir))?;
    writeln!(manifest, "{}", schema_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;
    use tempfile::tempdir;

    fn parse_sql(sql: &str) -> Node {
        let tokens = lex(sql).unwrap();
        parse(&tokens, sql)
    }

    #[test]
    fn creates_data_schema_and_pk_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path()).unwrap();
        let node = parse_sql("CREATE TABLE t (id integer primary key, name varchar unique);");

        let op = execute(&node, &mut catalog);
        assert!(op.is_success());
        assert!(paths::data_file(dir.path(), "t").exists());
        assert_eq!(fs::read_to_string(paths::pk_file(dir.path(), "t")).unwrap(), "0");
        assert!(catalog.exists("t"));
    }

    #[test]
    fn rejects_duplicate_table_name() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path()).unwrap();
        let node = parse_sql("CREATE TABLE t (id integer primary key);");
        execute(&node, &mut catalog);

        let op = execute(&node, &mut catalog);
        assert_eq!(op.code(), super::DbCode::Fail);
    }

    #[test]
    fn table_without_id_column_has_no_pk_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path()).unwrap();
        let node = parse_sql("CREATE TABLE log (message varchar);");
        execute(&node, &mut catalog);
        assert!(!paths::pk_file(dir.path(), "log").exists());
    }
}
