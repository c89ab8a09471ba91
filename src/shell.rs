//! The interactive shell: banner, environment bootstrap, the login gate,
//! and the read-eval-print loop. Thin by design — every statement it reads
//! is handed straight to [`lexer`], [`parser`], and [`executor`].

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::auth;
use crate::catalog::Catalog;
use crate::error::DbResult;
use crate::executor::{self, DbCode};
use crate::formatter;
use crate::lexer;
use crate::parser;

const BANNER: &str = r#"
=====================================================
m    m   iii   nnnn    iii   ssss    q q q       ll
mm  mm    i    n   n    i    ss      q   q    q  ll
m mm m    i    n   n    i     sss    qqqqq   q   ll
m    m    i    n   n    i        ss      q q     ll
m    m   iii   n   n   iii    ssss       qq      lllll
=====================================================
"#;

pub fn print_banner() {
    println!("{}", "Booting MiniSql - v1".green());
    println!("{}", BANNER.trim_end().green());
}

/// Create the data directory if missing, load the catalog, and ensure the
/// `user` table exists, prompting for a first account when it doesn't.
///
/// `data_dir` is canonicalized before it is threaded into [`Catalog`]: the
/// manifest stores one absolute schema-SQL path per line (§3's manifest
/// invariant), so every path derived from the data directory — via
/// [`crate::catalog::paths`] — must itself be absolute from the start.
pub fn initialize(data_dir: &Path) -> DbResult<Catalog> {
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir)?;
        println!("{}", "Setting up 'minisql' database.".green());
    }
    let data_dir = std::fs::canonicalize(data_dir)?;

    let mut catalog = Catalog::load(&data_dir)?;
    let had_user_table = catalog.exists("user");
    auth::ensure_user_table(&mut catalog);

    if !had_user_table {
        println!("No account found; create one to continue.");
        let (username, password) = prompt_new_account();
        let op = auth::create_user(&mut catalog, &username, &password);
        print_op(&op);
    }

    Ok(catalog)
}

fn prompt_new_account() -> (String, String) {
    loop {
        let username = prompt("Enter username: ");
        let password = prompt("Enter password: ");
        let confirm = prompt("Confirm password: ");
        if password != confirm {
            println!("{}", "Passwords do not match. Try again.".red());
            continue;
        }
        return (username, password);
    }
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    io::stdout().flush().ok();
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
        std::process::exit(0); // EOF on stdin
    }
    buf.trim().to_string()
}

/// Gate entry with a username/password check against the `user` table.
/// Returns `false` after repeated failures.
pub fn login(catalog: &mut Catalog) -> bool {
    for _ in 0..3 {
        let username = prompt("username: ");
        let password = prompt("password: ");
        if auth::verify(catalog, &username, &password) {
            return true;
        }
        println!("{}", "Invalid username or password.".red());
    }
    false
}

/// The read-eval-print loop. Returns once `quit;` is entered or stdin closes.
pub fn run(mut catalog: Catalog) {
    loop {
        let line = prompt("$>> ");
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit;") {
            break;
        }
        if line.eq_ignore_ascii_case("create user;") {
            let (username, password) = prompt_new_account();
            let op = auth::create_user(&mut catalog, &username, &password);
            print_op(&op);
            continue;
        }
        if line.eq_ignore_ascii_case("list tables;") {
            list_tables(&catalog);
            continue;
        }
        handle_statement(&mut catalog, &line);
    }
}

fn list_tables(catalog: &Catalog) {
    for table in catalog.tables() {
        println!("{}", table.table.text);
    }
}

fn handle_statement(catalog: &mut Catalog, line: &str) {
    let tokens = match lexer::lex(line) {
        Ok(t) => t,
        Err(e) => {
            crate::error::diagnostic::eprint("Lex error", line, &e);
            return;
        }
    };
    let node = parser::parse(&tokens, line);
    if node.is_invalid {
        return; // the parser already rendered its own diagnostic
    }
    let op = executor::execute(&node, catalog);
    print_op(&op);
}

fn print_op(op: &executor::DbOp) {
    match op.code() {
        DbCode::Success if !op.result.is_empty() => println!("{}", formatter::render(op)),
        DbCode::Success => println!("{}", op.success_msg.green()),
        DbCode::Fail | DbCode::InternalError => eprintln!("{}", op.error.red()),
    }
}
