//! Configuration options for KSON output.
//!
//! This module provides types to customize how values are written:
//!
//! - [`KsonOptions`]: Main configuration struct
//! - [`LiteralCase`]: Spelling of `true`, `false` and `null`
//!
//! ## Examples
//!
//! ```rust
//! use kson::{KsonOptions, LiteralCase, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: Option<i32> }
//!
//! let data = Data { x: 1, y: None };
//!
//! let options = KsonOptions::new().with_literal_case(LiteralCase::Upper);
//! let kson = to_string_with_options(&data, options).unwrap();
//! assert_eq!(kson, "{x:1,y:NULL}");
//! ```

/// Spelling used for boolean and null literals.
///
/// The reader accepts both spellings; this only affects what is written.
///
/// # Examples
///
/// ```rust
/// use kson::LiteralCase;
///
/// assert_eq!(LiteralCase::Lower.null(), "null");
/// assert_eq!(LiteralCase::Upper.bool(true), "TRUE");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LiteralCase {
    #[default]
    Lower,
    Upper,
}

impl LiteralCase {
    #[must_use]
    pub const fn bool(&self, value: bool) -> &'static str {
        match (self, value) {
            (LiteralCase::Lower, true) => "true",
            (LiteralCase::Lower, false) => "false",
            (LiteralCase::Upper, true) => "TRUE",
            (LiteralCase::Upper, false) => "FALSE",
        }
    }

    #[must_use]
    pub const fn null(&self) -> &'static str {
        match self {
            LiteralCase::Lower => "null",
            LiteralCase::Upper => "NULL",
        }
    }
}

/// Configuration options for KSON output.
///
/// # Examples
///
/// ```rust
/// use kson::{KsonOptions, LiteralCase};
///
/// // Default compact options
/// let options = KsonOptions::new();
///
/// // Pretty-printed with 2-space indentation
/// let options = KsonOptions::pretty();
///
/// // Custom configuration
/// let options = KsonOptions::pretty()
///     .with_indent(4)
///     .with_sort_keys(true)
///     .with_literal_case(LiteralCase::Upper);
/// ```
#[derive(Clone, Debug)]
pub struct KsonOptions {
    pub indent: usize,
    pub pretty: bool,
    pub sort_keys: bool,
    pub literal_case: LiteralCase,
}

impl Default for KsonOptions {
    fn default() -> Self {
        KsonOptions {
            indent: 2,
            pretty: false,
            sort_keys: false,
            literal_case: LiteralCase::default(),
        }
    }
}

impl KsonOptions {
    /// Creates default options (compact, insertion order, lower-case literals).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::KsonOptions;
    ///
    /// let options = KsonOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for output with one entry per line and indentation.
    #[must_use]
    pub fn pretty() -> Self {
        KsonOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::KsonOptions;
    ///
    /// let options = KsonOptions::pretty().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Writes object entries sorted by key instead of in insertion order.
    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[must_use]
    pub fn with_literal_case(mut self, literal_case: LiteralCase) -> Self {
        self.literal_case = literal_case;
        self
    }
}
