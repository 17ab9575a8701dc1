//! The KSON reader.
//!
//! [`Parser`] walks the input once, character by character, and builds the
//! value tree bottom-up. There is no separate tokenizer: each production
//! looks at the next significant character, consumes what it recognizes and
//! skips whitespace and comments after every token. The first failure aborts
//! the whole parse; there is no recovery and no backtracking.
//!
//! ```rust
//! use kson::Parser;
//!
//! let mut parser = Parser::new("{a: 1, b: [true, NULL]}");
//! let doc = parser.parse().unwrap();
//! assert_eq!(doc.len(), 2);
//!
//! let mut parser = Parser::new("{a: 1\n, b: }");
//! assert!(parser.parse().is_err());
//! assert!(parser.error_info().starts_with("2: expect value"));
//! ```

use crate::{Error, KsonMap, Number, Result, Value};
use tracing::{debug, trace};

/// Default limit on how deeply objects and arrays may nest.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recursive-descent parser over a borrowed KSON document.
///
/// The cursor state (byte position, line, column, nesting depth) lives in
/// the parser and is threaded through every production as `&mut self`, so
/// independent parsers never interfere with each other.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
    max_depth: usize,
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            errors: Vec::new(),
        }
    }

    /// Sets how deeply objects and arrays may nest before parsing fails.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole input as one top-level object.
    ///
    /// Each call starts again from the beginning of the input. On failure the
    /// error is also appended to the diagnostic log (see [`Parser::errors`]).
    pub fn parse(&mut self) -> Result<KsonMap> {
        self.position = 0;
        self.line = 1;
        self.column = 1;
        self.depth = 0;

        match self.parse_document() {
            Ok(object) => {
                debug!(keys = object.len(), lines = self.line, "parsed kson document");
                Ok(object)
            }
            Err(err) => {
                debug!(error = %err, "kson parse failed");
                self.errors.push(err.clone());
                Err(err)
            }
        }
    }

    /// Every failure recorded by this parser, oldest first.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The diagnostic log as text, one `"<line>: <message>\n"` entry per failure.
    pub fn error_info(&self) -> String {
        self.errors.iter().map(|err| format!("{}\n", err)).collect()
    }

    /// Current 1-based line of the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    fn parse_document(&mut self) -> Result<KsonMap> {
        self.skip_whitespace()?;
        if self.peek_char() != Some('{') {
            return Err(self.unexpected("'{'"));
        }
        let object = self.parse_object()?;

        match self.peek_char() {
            None => Ok(object),
            Some(found) => Err(Error::TrailingCharacters {
                line: self.line,
                column: self.column,
                found,
            }),
        }
    }

    fn parse_object(&mut self) -> Result<KsonMap> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_object");

        self.expect_char('{', "'{'")?;
        self.enter_nested()?;
        self.skip_whitespace()?;

        let mut object = KsonMap::new();
        loop {
            match self.peek_char() {
                Some('}') => break,
                None => return Err(self.unexpected("'}'")),
                Some(_) => {}
            }

            let key = self.parse_key()?;
            self.skip_whitespace()?;

            if self.peek_char() != Some(':') {
                return Err(self.unexpected("':'"));
            }
            self.next_char();
            self.skip_whitespace()?;

            let value = self.parse_value()?;
            object.insert(key, value);

            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                    self.skip_whitespace()?;
                }
                Some('}') => {}
                Some(_) => return Err(self.unexpected("','")),
                None => return Err(self.unexpected("'}'")),
            }
        }

        self.next_char(); // consume '}'
        self.depth -= 1;
        self.skip_whitespace()?;
        Ok(object)
    }

    fn parse_array(&mut self) -> Result<Vec<Value>> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_array");

        self.expect_char('[', "'['")?;
        self.enter_nested()?;
        self.skip_whitespace()?;

        let mut array = Vec::new();
        loop {
            match self.peek_char() {
                Some(']') => break,
                None => return Err(self.unexpected("']'")),
                Some(_) => {}
            }

            array.push(self.parse_value()?);

            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                    self.skip_whitespace()?;
                }
                Some(']') => {}
                Some(_) => return Err(self.unexpected("','")),
                None => return Err(self.unexpected("']'")),
            }
        }

        self.next_char(); // consume ']'
        self.depth -= 1;
        self.skip_whitespace()?;
        Ok(array)
    }

    fn parse_value(&mut self) -> Result<Value> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_value");

        let value = match self.peek_char() {
            Some('{') => Value::Object(self.parse_object()?),
            Some('[') => Value::Array(self.parse_array()?),
            Some('"') => Value::String(self.parse_string()?),
            Some(ch) if ch.is_ascii_digit() || ch == '+' || ch == '-' => {
                Value::Number(self.parse_number()?)
            }
            Some('t' | 'T' | 'f' | 'F') => Value::Bool(self.parse_bool()?),
            Some('n' | 'N') => {
                self.parse_null()?;
                Value::Null
            }
            _ => return Err(self.unexpected("value")),
        };

        self.skip_whitespace()?;
        Ok(value)
    }

    fn parse_key(&mut self) -> Result<String> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_key");

        match self.peek_char() {
            Some(ch) if is_key_start(ch) => {}
            _ => return Err(self.unexpected("key")),
        }

        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if !is_key_char(ch) {
                break;
            }
            self.next_char();
        }
        Ok(self.input[start..self.position].to_string())
    }

    fn parse_string(&mut self) -> Result<String> {
        trace!(line = self.line, "parse_string");

        self.expect_char('"', "'\"'")?;
        let mut result = String::new();

        loop {
            match self.next_char() {
                Some('"') => return Ok(result),
                Some('\\') => {
                    let escaped = match self.peek_char() {
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('\\') => Some('\\'),
                        Some('\'') => Some('\''),
                        Some('"') => Some('"'),
                        _ => None,
                    };
                    match escaped {
                        Some(ch) => {
                            self.next_char();
                            result.push(ch);
                        }
                        // Unknown escapes keep their backslash.
                        None => result.push('\\'),
                    }
                }
                Some(ch) => result.push(ch),
                None => return Err(self.unexpected("'\"'")),
            }
        }
    }

    /// Integer arithmetic wraps on overflow; floats are rounded correctly
    /// from the literal's digits.
    fn parse_number(&mut self) -> Result<Number> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_number");

        let negative = match self.peek_char() {
            Some('+') => {
                self.next_char();
                self.skip_whitespace()?;
                false
            }
            Some('-') => {
                self.next_char();
                self.skip_whitespace()?;
                true
            }
            _ => false,
        };

        self.require_digit("digit")?;

        if self.peek_char() == Some('0') && matches!(self.peek_nth(1), Some('x' | 'X')) {
            let value = self.parse_hex()?;
            return Ok(Number::Integer(if negative {
                value.wrapping_neg()
            } else {
                value
            }));
        }

        let start = self.position;
        let mut integer: i64 = 0;
        while let Some(digit) = self.peek_digit(10) {
            integer = integer.wrapping_mul(10).wrapping_add(digit);
            self.next_char();
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            self.next_char();
            self.require_digit("digit after '.'")?;
            while self.peek_digit(10).is_some() {
                self.next_char();
            }
            is_float = true;
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.next_char();
            self.require_digit("digit after exponent")?;
            let mut exponent: u32 = 0;
            while let Some(digit) = self.peek_digit(10) {
                exponent = exponent.saturating_mul(10).saturating_add(digit as u32);
                self.next_char();
            }
            if !is_float {
                integer = integer.wrapping_mul(10i64.wrapping_pow(exponent));
            }
        }

        if is_float {
            let literal = &self.input[start..self.position];
            let float: f64 = literal
                .parse()
                .map_err(|_| Error::expected(self.line, self.column, "number", '.'))?;
            Ok(Number::Float(if negative { -float } else { float }))
        } else {
            Ok(Number::Integer(if negative {
                integer.wrapping_neg()
            } else {
                integer
            }))
        }
    }

    fn parse_hex(&mut self) -> Result<i64> {
        self.next_char(); // '0'
        self.next_char(); // 'x' or 'X'

        if self.peek_digit(16).is_none() {
            return Err(self.unexpected("hexadecimal digit"));
        }

        let mut value: i64 = 0;
        while let Some(digit) = self.peek_digit(16) {
            value = value.wrapping_mul(16).wrapping_add(digit);
            self.next_char();
        }
        Ok(value)
    }

    fn parse_bool(&mut self) -> Result<bool> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_bool");

        let rest = &self.input[self.position..];
        for (literal, value) in [
            ("true", true),
            ("TRUE", true),
            ("false", false),
            ("FALSE", false),
        ] {
            if rest.starts_with(literal) {
                self.advance(literal.len());
                return Ok(value);
            }
        }
        Err(Error::invalid_literal(
            self.line,
            self.column,
            "true/TRUE/false/FALSE",
        ))
    }

    fn parse_null(&mut self) -> Result<()> {
        trace!(line = self.line, lookahead = ?self.peek_char(), "parse_null");

        let rest = &self.input[self.position..];
        for literal in ["null", "NULL"] {
            if rest.starts_with(literal) {
                self.advance(literal.len());
                return Ok(());
            }
        }
        Err(Error::invalid_literal(self.line, self.column, "null/NULL"))
    }

    /// Skips whitespace and comments, then rejects characters outside the
    /// accepted content set.
    fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
                self.next_char();
            }

            match self.peek_char() {
                None => return Ok(()),
                Some('/') if self.peek_nth(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_nth(1) == Some('*') => self.skip_block_comment()?,
                Some(ch) if is_content_char(ch) => return Ok(()),
                Some(ch) => {
                    return Err(Error::unsupported_character(self.line, self.column, ch));
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.next_char();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        self.advance(2); // "/*"
        loop {
            match self.next_char() {
                Some('*') if self.peek_char() == Some('/') => {
                    self.next_char();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(Error::unexpected_eof(self.line, self.column, "'*/'")),
            }
        }
    }

    fn enter_nested(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                line: self.line,
                column: self.column,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn expect_char(&mut self, expected: char, description: &'static str) -> Result<()> {
        if self.peek_char() == Some(expected) {
            self.next_char();
            Ok(())
        } else {
            Err(self.unexpected(description))
        }
    }

    fn require_digit(&self, description: &'static str) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch.is_ascii_digit() => Ok(()),
            _ => Err(self.unexpected(description)),
        }
    }

    /// Builds the error for a missing `expected`: a mismatch if there is a
    /// character under the cursor, end-of-input otherwise.
    fn unexpected(&self, expected: &'static str) -> Error {
        match self.peek_char() {
            Some(found) => Error::expected(self.line, self.column, expected, found),
            None => Error::unexpected_eof(self.line, self.column, expected),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.position..].chars().nth(n)
    }

    fn peek_digit(&self, radix: u32) -> Option<i64> {
        self.peek_char()
            .and_then(|ch| ch.to_digit(radix))
            .map(i64::from)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.next_char();
        }
    }
}

#[inline]
fn is_key_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline]
fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Characters that may start or continue a token outside of strings and comments.
#[inline]
fn is_content_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '_' | '{' | '}' | '[' | ']' | ':' | ',' | '"' | '+' | '-' | '.' | '/'
        )
}

/// Returns `true` if `key` can be written as an unquoted object key.
pub(crate) fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if is_key_start(first) => chars.all(is_key_char),
        _ => false,
    }
}
