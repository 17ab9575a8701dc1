//! Error types for KSON parsing and writing.
//!
//! Every syntax error carries the 1-based line and column where the parser
//! stopped, so a caller can point a user at the offending spot.
//!
//! ## Error Categories
//!
//! - **Structural mismatch**: an expected token or production is missing
//!   ([`Error::Expected`])
//! - **Unrecognized literal**: a `true`/`false`/`null` spelling that is not one
//!   of the accepted casings ([`Error::InvalidLiteral`])
//! - **Unsupported character**: a character outside the accepted content set
//!   appears between tokens ([`Error::UnsupportedCharacter`])
//! - **Premature end of input**: the text ends inside a production
//!   ([`Error::UnexpectedEof`])
//!
//! ## Examples
//!
//! ```rust
//! use kson::{parse, Error};
//!
//! let err = parse("{a: }").unwrap_err();
//! assert!(matches!(err, Error::Expected { expected: "value", .. }));
//! assert_eq!(err.line(), Some(1));
//! ```

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing KSON.
///
/// The `Display` form of syntax errors is `"<line>: <message>"`, the same
/// layout [`Parser::error_info`](crate::Parser::error_info) uses for its log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An expected token or production was not found.
    #[error("{line}: expect {expected}, found {found:?} (column {column})")]
    Expected {
        line: usize,
        column: usize,
        expected: &'static str,
        found: char,
    },

    /// A boolean or null literal did not match one of its accepted spellings.
    #[error("{line}: expect {expected} (column {column})")]
    InvalidLiteral {
        line: usize,
        column: usize,
        expected: &'static str,
    },

    /// A character outside the accepted content set appeared between tokens.
    ///
    /// This aborts the whole parse regardless of the production in progress.
    #[error("{line}: character {character:?} (code: {code}) not supported (column {column})")]
    UnsupportedCharacter {
        line: usize,
        column: usize,
        character: char,
        code: u32,
    },

    /// The input ended while a production was still incomplete.
    #[error("{line}: unexpected end of input, expect {expected} (column {column})")]
    UnexpectedEof {
        line: usize,
        column: usize,
        expected: &'static str,
    },

    /// Content followed the closing brace of the top-level object.
    #[error("{line}: unexpected {found:?} after the end of the document (column {column})")]
    TrailingCharacters {
        line: usize,
        column: usize,
        found: char,
    },

    /// Objects and arrays were nested deeper than the parser allows.
    #[error("{line}: nesting deeper than {limit} levels (column {column})")]
    DepthLimitExceeded {
        line: usize,
        column: usize,
        limit: usize,
    },

    /// A value was accessed as the wrong kind.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType { expected: Kind, found: Kind },

    /// An object key cannot be written as an unquoted identifier.
    #[error("invalid key {0:?}: keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey(String),

    /// Unsupported type for serialization
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an "expected token" error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::Error;
    ///
    /// let err = Error::expected(3, 7, "':'", 'x');
    /// assert!(err.to_string().starts_with("3: expect ':'"));
    /// ```
    pub fn expected(line: usize, column: usize, expected: &'static str, found: char) -> Self {
        Error::Expected {
            line,
            column,
            expected,
            found,
        }
    }

    /// Creates an unrecognized-literal error.
    pub fn invalid_literal(line: usize, column: usize, expected: &'static str) -> Self {
        Error::InvalidLiteral {
            line,
            column,
            expected,
        }
    }

    /// Creates an unsupported-character error, recording the character's code point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::Error;
    ///
    /// let err = Error::unsupported_character(1, 6, '#');
    /// assert!(err.to_string().contains("(code: 35)"));
    /// ```
    pub fn unsupported_character(line: usize, column: usize, character: char) -> Self {
        Error::UnsupportedCharacter {
            line,
            column,
            character,
            code: u32::from(character),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, column: usize, expected: &'static str) -> Self {
        Error::UnexpectedEof {
            line,
            column,
            expected,
        }
    }

    /// Creates a wrong-kind access error.
    pub fn invalid_type(expected: Kind, found: Kind) -> Self {
        Error::InvalidType { expected, found }
    }

    /// Creates an unsupported type error for values that have no KSON form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The 1-based line of a syntax error, `None` for other errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Expected { line, .. }
            | Error::InvalidLiteral { line, .. }
            | Error::UnsupportedCharacter { line, .. }
            | Error::UnexpectedEof { line, .. }
            | Error::TrailingCharacters { line, .. }
            | Error::DepthLimitExceeded { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The 1-based column of a syntax error, `None` for other errors.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Expected { column, .. }
            | Error::InvalidLiteral { column, .. }
            | Error::UnsupportedCharacter { column, .. }
            | Error::UnexpectedEof { column, .. }
            | Error::TrailingCharacters { column, .. }
            | Error::DepthLimitExceeded { column, .. } => Some(*column),
            _ => None,
        }
    }

    /// Returns `true` for errors raised while reading KSON text.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        self.line().is_some()
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
