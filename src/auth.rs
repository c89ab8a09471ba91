//! Thin authentication layer above the executor: the system's own `user`
//! table gates entry to the REPL. Bootstrapped on first run by [`crate::shell::initialize`].

use crate::catalog::Catalog;
use crate::executor::{self, DbCode};
use crate::lexer;
use crate::parser;

pub const USER_TABLE_SQL: &str =
    "CREATE TABLE user (id integer primary key, username varchar unique, password varchar, created datetime default now)";

/// Create the `user` table if it isn't already in the catalog.
pub fn ensure_user_table(catalog: &mut Catalog) {
    if catalog.exists("user") {
        return;
    }
    let tokens = lexer::lex(USER_TABLE_SQL).expect("built-in user table SQL must lex cleanly");
    let node = parser::parse(&tokens, USER_TABLE_SQL);
    executor::execute(&node, catalog);
}

/// Insert a new row into the `user` table. Fails the same way any INSERT
/// would: a duplicate `username` violates the UNIQUE constraint.
pub fn create_user(catalog: &mut Catalog, username: &str, password: &str) -> executor::DbOp {
    let sql = format!(
        "INSERT INTO user (username, password) VALUES ('{}', '{}');",
        escape(username),
        escape(password)
    );
    run(catalog, &sql)
}

/// Check `username`/`password` against the stored row. `false` both when
/// the username doesn't exist and when the password doesn't match.
pub fn verify(catalog: &mut Catalog, username: &str, password: &str) -> bool {
    let sql = format!(
        "SELECT username, password FROM user WHERE username = '{}';",
        escape(username)
    );
    let op = run(catalog, &sql);
    if op.code() != DbCode::Success {
        return false;
    }
    op.rows.iter().any(|row| {
        let fields = executor::split_fields(row);
        fields.get(3).map(String::as_str) == Some(password)
    })
}

fn run(catalog: &mut Catalog, sql: &str) -> executor::DbOp {
    let tokens = match lexer::lex(sql) {
        Ok(t) => t,
        Err(_) => return executor::DbOp::default(),
    };
    let node = parser::parse(&tokens, sql);
    if node.is_invalid {
        return executor::DbOp::default();
    }
    executor::execute(&node, catalog)
}

/// Best-effort escaping for the literal values this module interpolates
/// into hand-built SQL: a single quote would otherwise close the string
/// literal early.
fn escape(s: &str) -> String {
    s.replace('\'', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn bootstrap_then_create_then_verify() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path()).unwrap();

        ensure_user_table(&mut catalog);
        assert!(catalog.exists("user"));

        let op = create_user(&mut catalog, "admin", "hunter2");
        assert!(op.is_success());

        assert!(verify(&mut catalog, "admin", "hunter2"));
        assert!(!verify(&mut catalog, "admin", "wrong"));
        assert!(!verify(&mut catalog, "ghost", "hunter2"));
    }
}
