//! Converts a single SQL statement into a flat stream of [`Token`]s.
//!
//! The lexer has no knowledge of grammar beyond classifying a lexeme by
//! matching it against the static keyword tables in [`crate::keywords`]. It
//! never looks ahead across statements: the caller feeds it one `;`
//! terminated statement at a time.

pub mod token;

pub use token::{Token, TokenKind};

use crate::error::{Error, Result, Span};
use crate::keywords;

/// Lex `source`, a single `;`-terminated SQL statement, into a token stream.
///
/// On success the trailing `;` is consumed but not emitted as a token. On
/// failure the caller is expected to render the returned [`Error`] eagerly
/// (see [`crate::error::diagnostic`]) and discard the statement.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    paren_depth: i32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            paren_depth: 0,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn run(mut self) -> Result<Vec<Token>> {
        let mut run_start: Option<usize> = None;

        while let Some(c) = self.peek() {
            match c {
                b'\'' => {
                    self.flush_run(&mut run_start);
                    self.lex_string()?;
                }
                b';' => {
                    if self.paren_depth > 0 {
                        return Err(Error::unclosed_paren(Span::new(0, self.pos)));
                    }
                    self.flush_run(&mut run_start);
                    self.pos += 1;
                    break;
                }
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.flush_run(&mut run_start);
                    self.pos += 1;
                }
                _ if is_special_punct(c) => {
                    self.flush_run(&mut run_start);
                    self.lex_punct();
                }
                _ => {
                    if run_start.is_none() {
                        run_start = Some(self.pos);
                    }
                    self.pos += 1;
                }
            }
        }
        self.flush_run(&mut run_start);

        Ok(self.tokens)
    }

    /// Emit the pending identifier/number run, if any, as a single token.
    fn flush_run(&mut self, run_start: &mut Option<usize>) {
        if let Some(start) = run_start.take() {
            let text = &self.source[start..self.pos];
            self.push_classified(start, self.pos, text);
        }
    }

    fn lex_string(&mut self) -> Result<()> {
        let str_start = self.pos;
        self.pos += 1; // opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(Error::unterminated_string(Span::point(str_start))),
                Some(b'\'') => break,
                Some(b';') => return Err(Error::unterminated_string(Span::point(str_start))),
                Some(_) => self.pos += 1,
            }
        }

        let content = &self.source[content_start..self.pos];
        self.pos += 1; // closing quote

        // Quotes are kept in the token's text; stripping them is the
        // parser/executor's job (see `strip_quotes`), not the lexer's.
        let escaped = format!("'{}'", content.replace(',', "\\,"));
        self.tokens.push(Token::new(
            TokenKind::String,
            Span::new(str_start, self.pos),
            escaped,
        ));
        Ok(())
    }

    fn lex_punct(&mut self) {
        let start = self.pos;
        let c = self.bytes[self.pos];

        // Multi-character operators: >=, <=, !=
        if matches!(c, b'>' | b'<' | b'!') && self.bytes.get(self.pos + 1) == Some(&b'=') {
            self.pos += 2;
            let text = self.source[start..self.pos].to_string();
            self.tokens
                .push(Token::new(TokenKind::Symbol, Span::new(start, self.pos), text));
            return;
        }

        self.pos += 1;
        let text = &self.source[start..self.pos];

        match c {
            b'(' => {
                self.paren_depth += 1;
                self.tokens
                    .push(Token::new(TokenKind::LParen, Span::new(start, self.pos), text));
            }
            b')' => {
                self.paren_depth -= 1;
                self.tokens
                    .push(Token::new(TokenKind::RParen, Span::new(start, self.pos), text));
            }
            _ => {
                self.tokens
                    .push(Token::new(TokenKind::Symbol, Span::new(start, self.pos), text));
            }
        }
    }

    fn push_classified(&mut self, start: usize, end: usize, text: &str) {
        let kind = classify(text);
        let normalized = match kind {
            TokenKind::Keyword | TokenKind::DataType | TokenKind::BuiltInFunc => {
                text.to_ascii_lowercase()
            }
            _ => text.to_string(),
        };
        self.tokens
            .push(Token::new(kind, Span::new(start, end), normalized));
    }
}

/// `ispunct` and not `'` (handled separately) and not `_` (identifier char).
fn is_special_punct(c: u8) -> bool {
    c.is_ascii_punctuation() && c != b'\'' && c != b'_'
}

fn is_number(text: &str) -> bool {
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    if text.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in text.chars() {
        if c == '.' {
            if seen_dot {
                return false;
            }
            seen_dot = true;
        } else if c.is_ascii_digit() {
            seen_digit = true;
        } else {
            return false;
        }
    }
    seen_digit
}

fn classify(text: &str) -> TokenKind {
    if keywords::is_keyword(text) {
        TokenKind::Keyword
    } else if keywords::is_data_type(text) {
        TokenKind::DataType
    } else if keywords::is_built_in_func(text) {
        TokenKind::BuiltInFunc
    } else if is_number(text) {
        TokenKind::Number
    } else {
        TokenKind::Identifier
    }
}
