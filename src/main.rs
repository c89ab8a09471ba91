//! MiniSql CLI entry point: boots logging, bootstraps the data directory
//! and `user` table, gates entry behind a login prompt, then hands off to
//! the read-eval-print loop.

use std::path::Path;
use std::process::ExitCode;

use minisql::shell;

/// All per-table and manifest files live under this directory, relative to
/// the process's current working directory.
const DATA_DIR: &str = "data";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    shell::print_banner();

    let mut catalog = match shell::initialize(Path::new(DATA_DIR)) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("failed to initialize database: {}", e);
            eprintln!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !shell::login(&mut catalog) {
        eprintln!("Too many failed login attempts.");
        return ExitCode::FAILURE;
    }

    shell::run(catalog);
    ExitCode::SUCCESS
}
