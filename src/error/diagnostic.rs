//! Eager, caret-pointing diagnostics for lex/parse errors.
//!
//! Both the lexer and the parser print their own errors as soon as they are
//! detected and hand back a sentinel (`Err` for the lexer, `is_invalid` for
//! the parser) rather than threading the error up through the executor.

use colored::Colorize;

use super::Error;

/// Render `err` against `source` as a two-line diagnostic: the offending
/// line, and a caret line pointing at the byte offset.
pub fn render(prefix: &str, source: &str, err: &Error) -> String {
    let offset = err.span().map(|s| s.start).unwrap_or(0).min(source.len());
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(source.len());
    let line = &source[line_start..line_end];
    let col = offset - line_start;

    format!(
        "{prefix}: {msg}\n{line}\n{caret}",
        prefix = prefix.red().bold(),
        msg = err,
        line = line,
        caret = format!("{}^", " ".repeat(col)).red(),
    )
}

/// Print `err`'s diagnostic to stderr.
pub fn eprint(prefix: &str, source: &str, err: &Error) {
    eprintln!("{}", render(prefix, source, err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    #[test]
    fn caret_lines_up_with_offset() {
        let err = Error::unexpected_char('$', 3);
        let rendered = render("Lex error", "1 + $ 2", &err);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with('^'));
        let caret_col = lines[2].chars().filter(|c| *c == ' ').count();
        assert_eq!(caret_col, 3);
    }

    #[test]
    fn multiline_source_picks_the_right_line() {
        let err = Error::invalid_where_clause(Span::point(10));
        let source = "SELECT *\nFROM t WHERE";
        let rendered = render("Parse error", source, &err);
        assert!(rendered.contains("FROM t WHERE"));
    }
}
