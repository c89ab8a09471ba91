//! Static, case-insensitively matched keyword tables.
//!
//! These mirror the process-wide classification arrays the lexer and parser
//! consult when deciding what a raw lexeme means.

pub const KEYWORDS: &[&str] = &[
    "select", "insert", "update", "delete", "create", "where", "and", "or", "set", "values",
    "as", "quit", "list", "tables",
];

/// Keywords whose immediate successor names a table.
pub const PRE_TABLE_SELECTOR_KEYWORDS: &[&str] = &["from", "into", "table", "update", "delete"];

pub const DATA_TYPES: &[&str] = &[
    "integer", "varchar", "text", "boolean", "float", "datetime", "char", "double", "decimal",
];

pub const LOGICAL_OP: &[&str] = &["and", "or"];

/// Built-in functions recognized as column-option keywords in CREATE TABLE.
pub const BUILT_IN_FUNC: &[&str] = &[
    "unique",
    "primary",
    "key",
    "default",
    "now",
    "random",
    "uuid",
    "null",
];

/// The subset of BUILT_IN_FUNC that produce a value (usable after DEFAULT
/// or directly inside an INSERT VALUES list).
pub const VALUE_FUNC: &[&str] = &["now", "random", "uuid", "null"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

pub fn is_pre_table_selector(word: &str) -> bool {
    PRE_TABLE_SELECTOR_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(word))
}

pub fn is_data_type(word: &str) -> bool {
    DATA_TYPES.iter().any(|k| k.eq_ignore_ascii_case(word))
}

pub fn is_logical_op(word: &str) -> bool {
    LOGICAL_OP.iter().any(|k| k.eq_ignore_ascii_case(word))
}

pub fn is_built_in_func(word: &str) -> bool {
    BUILT_IN_FUNC.iter().any(|k| k.eq_ignore_ascii_case(word))
}

pub fn is_value_func(word: &str) -> bool {
    VALUE_FUNC.iter().any(|k| k.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert!(is_keyword("SELECT"));
        assert!(is_keyword("select"));
        assert!(is_keyword("SeLeCt"));
        assert!(!is_keyword("notakeyword"));
    }

    #[test]
    fn data_type_lookup() {
        assert!(is_data_type("VARCHAR"));
        assert!(is_data_type("integer"));
        assert!(!is_data_type("select"));
    }

    #[test]
    fn value_func_is_subset_of_built_in_func() {
        for f in VALUE_FUNC {
            assert!(is_built_in_func(f));
        }
    }
}
