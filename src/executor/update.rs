//! `UPDATE`: rewrites matching lines in place and overwrites the data file
//! in a single write. A UNIQUE violation aborts before anything is
//! written — the partially rewritten in-memory buffer is discarded.

use std::fs;
use std::path::Path;

use crate::ast::Node;
use crate::catalog::paths;

use super::{filter, join_fields, split_fields, strip_quotes, DbOp};

pub fn execute(node: &Node, table: &Node, dir: &Path) -> DbOp {
    let table_name = table.table.text.as_str();
    let data_path = paths::data_file(dir, table_name);

    let content = match fs::read_to_string(&data_path) {
        Ok(s) => s,
        Err(e) => return DbOp::internal("update", format!("failed to read `{}`: {}", table_name, e)),
    };

    let lines: Vec<&str> = content.lines().collect();
    let mut rewritten: Vec<String> = Vec::with_capacity(lines.len());
    let mut updated = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        if !filter::matches(&node.filters, table, line) {
            rewritten.push(line.to_string());
            continue;
        }

        let mut fields = split_fields(line);
        for assignment in &node.columns {
            let name = assignment.name();
            let Some(col_idx) = table.column_index(name) else {
                return DbOp::fail("update", format!("Column `{}` doesn't exist on table `{}`", name, table_name));
            };
            let new_value = strip_quotes(&assignment.value.text).to_string();

            let is_unique = table.column(name).map(|c| c.is_unique).unwrap_or(false);
            if is_unique && !new_value.is_empty() {
                for (other_idx, other_line) in lines.iter().enumerate() {
                    if other_idx == idx {
                        continue;
                    }
                    let other_fields = split_fields(other_line);
                    if other_fields.get(col_idx + 1).map(String::as_str) == Some(new_value.as_str()) {
                        return DbOp::fail(
                            "update",
                            format!(
                                "Duplicate value `{}` violates unique constraint on column `{}` for table `{}`",
                                new_value, name, table_name
                            ),
                        );
                    }
                }
            }

            if let Some(slot) = fields.get_mut(col_idx + 1) {
                *slot = new_value;
            }
        }
        rewritten.push(join_fields(&fields));
        updated += 1;
    }

    if updated == 0 {
        let op = DbOp::success("update", format!("0 rows updated in `{}`", table_name));
        return op;
    }

    let mut body = rewritten.join("\n");
    body.push('\n');
    if let Err(e) = fs::write(&data_path, body) {
        return DbOp::internal("update", format!("failed to write `{}`: {}", table_name, e));
    }

    let mut op = DbOp::success("update", format!("{} row(s) updated in `{}`", updated, table_name));
    op.row_count = updated;
    op
}
