//! In-memory catalog of table descriptors, recovered from the on-disk
//! manifest on startup and rebuilt after every successful `CREATE TABLE`.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::Node;
use crate::error::{DbError, DbResult};
use crate::{lexer, parser};

/// Ordered list of table descriptors, one per persisted `CREATE TABLE`.
/// Lookup is case-insensitive on the table name.
pub struct Catalog {
    dir: PathBuf,
    tables: Vec<Node>,
}

impl Catalog {
    /// Load the catalog from `dir`'s manifest (`{dir}/.table`). Missing or
    /// unparseable manifest entries are skipped with a warning; a missing
    /// manifest file itself just means an empty catalog.
    pub fn load(dir: impl Into<PathBuf>) -> DbResult<Self> {
        let dir = dir.into();
        let mut catalog = Self {
            dir,
            tables: Vec::new(),
        };
        catalog.reload()?;
        Ok(catalog)
    }

    /// Re-read the manifest and rebuild the in-memory table list.
    pub fn reload(&mut self) -> DbResult<()> {
        self.tables.clear();

        let manifest_path = paths::manifest_file(&self.dir);
        let manifest = match fs::read_to_string(&manifest_path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        for line in manifest.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.load_schema(Path::new(line)) {
                Ok(node) => self.tables.push(node),
                Err(e) => {
                    log::warn!("skipping unreadable manifest entry {}: {}", line, e);
                }
            }
        }
        Ok(())
    }

    fn load_schema(&self, schema_path: &Path) -> DbResult<Node> {
        let sql = fs::read_to_string(schema_path)?;
        let first_line = sql.lines().next().unwrap_or("").to_string();
        let tokens = lexer::lex(&first_line).map_err(|e| DbError::Corrupted {
            path: schema_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let node = parser::parse(&tokens, &first_line);
        if node.is_invalid {
            return Err(DbError::Corrupted {
                path: schema_path.to_path_buf(),
                reason: "schema SQL failed to parse".to_string(),
            });
        }
        Ok(node)
    }

    /// Case-insensitive lookup by table name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.tables.iter().find(|t| t.table.text.eq_ignore_ascii_case(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn tables(&self) -> &[Node] {
        &self.tables
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
