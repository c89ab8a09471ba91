//! Abstract Syntax Tree: one [`Node`] per parsed statement, built from a
//! uniform [`ColumnSpec`] record reused across CREATE columns, SELECT/UPDATE
//! projections and assignments, and WHERE-clause filters.

use crate::lexer::Token;

/// A single column-shaped fragment of a statement. Which fields are
/// meaningful depends on where the spec places this record:
///
/// - CREATE TABLE column definition: `column`, `data_type`, `is_unique`,
///   `default`, and (via the owning [`Node::primary_key`]) PRIMARY KEY.
/// - SELECT projection: `column`, `display` (alias).
/// - INSERT/UPDATE assignment: `column`, `value`, `symbol` (`=`).
/// - WHERE filter: `column`, `symbol` (comparison op), `value`,
///   `next_logical_op`.
#[derive(Debug, Clone, Default)]
pub struct ColumnSpec {
    pub column: Token,
    pub value: Token,
    pub data_type: Token,
    pub symbol: Token,
    pub default: Token,
    pub is_unique: bool,
    pub next_logical_op: Token,
    pub display: Option<Token>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.column.text
    }
}

/// Parsed representation of one SQL statement.
///
/// `is_invalid` is the sentinel the parser returns on a diagnosed syntax
/// error: the executor treats such a node as a no-op.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub action: Token,
    pub table: Token,
    pub columns: Vec<ColumnSpec>,
    pub filters: Vec<ColumnSpec>,
    pub primary_key: Option<Token>,
    pub is_all_col: bool,
    pub is_invalid: bool,
    pub sql: String,
}

impl Node {
    pub fn invalid() -> Self {
        Self {
            is_invalid: true,
            ..Default::default()
        }
    }

    pub fn action_is(&self, kw: &str) -> bool {
        self.action.text_eq(kw)
    }

    /// Case-insensitive lookup of a declared column by name; CREATE TABLE
    /// nodes use this to walk their own schema in declaration order.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns
            .iter()
            .find(|c| c.column.text.eq_ignore_ascii_case(name))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.column.text.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
