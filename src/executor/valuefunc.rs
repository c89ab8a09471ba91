//! Evaluation of the value-producing built-ins usable after `DEFAULT` or
//! directly inside an INSERT VALUES list: `NOW`, `RANDOM`, `UUID`, `NULL`.

use chrono::Utc;

use crate::lexer::Token;

/// Evaluate a value-function token. `token.text` is already lower-cased by
/// the lexer (it is a `BuiltInFunc` token).
pub fn evaluate(token: &Token) -> String {
    match token.text.as_str() {
        "now" => Utc::now().format("%Y-%m-%d %H:%M:%S GMT+0").to_string(),
        "random" => rand::random::<u64>().to_string(),
        "uuid" => uuid::Uuid::new_v4().to_string(),
        "null" => String::new(),
        other => {
            log::warn!("unknown value function `{}`, defaulting to empty", other);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;
    use crate::lexer::TokenKind;

    fn tok(text: &str) -> Token {
        Token::new(TokenKind::BuiltInFunc, Span::new(0, text.len()), text)
    }

    #[test]
    fn now_formats_as_utc_with_gmt_suffix() {
        let out = evaluate(&tok("now"));
        assert!(out.ends_with("GMT+0"));
        assert_eq!(out.len(), "2024-01-01 00:00:00 GMT+0".len());
    }

    #[test]
    fn null_is_empty() {
        assert_eq!(evaluate(&tok("null")), "");
    }

    #[test]
    fn uuid_is_non_empty_and_random() {
        let a = evaluate(&tok("uuid"));
        let b = evaluate(&tok("uuid"));
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn random_is_non_empty() {
        assert!(!evaluate(&tok("random")).is_empty());
    }
}
