//! Renders a [`DbOp`]'s `result` buffer as a bordered ASCII table, reusing
//! the column accounting (`col_count`, `max_col_space`) the executor
//! already computed while projecting rows.

use crate::executor::DbOp;

/// Render `op.result` (header line + comma-separated rows) as a table. If
/// `op` carries no tabular result (e.g. an INSERT/UPDATE/DELETE success),
/// falls back to `op.success_msg`.
pub fn render(op: &DbOp) -> String {
    if op.result.is_empty() {
        return op.success_msg.clone();
    }

    let mut lines = op.result.lines();
    let Some(header) = lines.next() else {
        return op.success_msg.clone();
    };
    let header_cols: Vec<&str> = header.split(',').collect();
    let body: Vec<Vec<&str>> = lines.map(|l| l.split(',').collect()).collect();

    let col_width = op.max_col_space.max(1);
    let border = border_line(header_cols.len(), col_width);

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&row_line(&header_cols, col_width));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &body {
        out.push_str(&row_line(row, col_width));
        out.push('\n');
    }
    out.push_str(&border);
    out
}

fn border_line(cols: usize, col_width: usize) -> String {
    let mut s = String::from("+");
    for _ in 0..cols {
        s.push_str(&"-".repeat(col_width + 2));
        s.push('+');
    }
    s
}

fn row_line(cells: &[&str], col_width: usize) -> String {
    let mut s = String::from("|");
    for cell in cells {
        s.push(' ');
        s.push_str(&center_cell(cell, col_width));
        s.push_str(" |");
    }
    s
}

/// Center `text` within a `col_width`-wide field, following the original's
/// `printDbOp` padding arithmetic verbatim: an even-length cell is first
/// bumped by one (its one extra padding column), then the remaining
/// slack is split evenly across both sides. A cell at or past `col_width`
/// gets no padding at all — including when the bump alone pushes it past
/// `col_width` — which is the original's quirk, not a bug to smooth over.
fn center_cell(text: &str, col_width: usize) -> String {
    let mut t_off = text.len();
    let mut bumped = false;
    if t_off % 2 == 0 {
        t_off += 1;
        bumped = true;
    }
    let offset = col_width.saturating_sub(t_off);
    let half = " ".repeat(offset / 2);

    let mut out = String::new();
    out.push_str(&half);
    if bumped {
        out.push(' ');
    }
    out.push_str(text);
    out.push_str(&half);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_falls_back_to_success_message() {
        let op = DbOp {
            success_msg: "1 row inserted into `t`".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&op), "1 row inserted into `t`");
    }

    #[test]
    fn renders_bordered_table_for_select_result() {
        let op = DbOp {
            result: "name\na\nbb\n".to_string(),
            max_col_space: 4,
            col_count: 1,
            ..Default::default()
        };
        let rendered = render(&op);
        // "name" is even-length (4) so its padding bump alone pushes it
        // past col_width(4), clamping its own offset to 0 but still
        // printing the extra bump space — the original's quirk.
        assert!(rendered.contains("|  name |"));
        assert!(rendered.contains("|  a  |"));
        assert!(rendered.contains("|  bb |"));
        assert!(rendered.starts_with("+------+"));
    }

    #[test]
    fn odd_length_cell_splits_padding_evenly_both_sides() {
        assert_eq!(center_cell("a", 5), "  a  ");
    }

    #[test]
    fn even_length_cell_gets_one_extra_padding_column() {
        assert_eq!(center_cell("bb", 7), "   bb  ");
    }
}
