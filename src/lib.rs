//! # kson
//!
//! A reader and writer for KSON, a relaxed JSON dialect for hand-written
//! configuration files.
//!
//! ## What is KSON?
//!
//! KSON keeps JSON's data model and adds a few conveniences for people
//! editing files by hand:
//!
//! - **Bare keys**: object keys are identifiers and are never quoted
//! - **Comments**: `// line` and `/* block */` comments anywhere between tokens
//! - **Trailing commas**: allowed after the last entry of objects and arrays
//! - **Hexadecimal integers**: `0xff`, `-0x10`
//! - **Upper-case literals**: `TRUE`, `FALSE` and `NULL` alongside the lower-case forms
//!
//! A document is always a single object:
//!
//! ```text
//! document := ws object ws
//! object   := '{' ws ( key ws ':' ws value ws ( ',' ws key ws ':' ws value ws )* ','? )? ws '}'
//! array    := '[' ws ( value ws ( ',' ws value ws )* ','? )? ws ']'
//! value    := object | array | string | number | bool | null
//! key      := [A-Za-z_][A-Za-z0-9_]*
//! string   := '"' ( escape | any character except '"' )* '"'
//! escape   := '\n' | '\t' | '\\' | '\'' | '\"'
//! number   := ('+'|'-')? ( '0' ('x'|'X') hex+ | digit+ ( '.' digit+ )? ( ('e'|'E') digit+ )? )
//! bool     := 'true' | 'TRUE' | 'false' | 'FALSE'
//! null     := 'null' | 'NULL'
//! ```
//!
//! Outside strings and comments only ASCII letters, digits, `_` and the
//! punctuation `{ } [ ] : , " + - . /` may appear; any other character is
//! rejected as unsupported.
//!
//! ## Quick Start
//!
//! ```rust
//! use kson::{parse, Value};
//!
//! let doc = parse(r#"
//!     // service settings
//!     {
//!         name: "edge",
//!         port: 0x1f90,
//!         ratio: 0.75,
//!         hosts: ["a", "b",],
//!         debug: FALSE,
//!     }
//! "#).unwrap();
//!
//! assert_eq!(doc.get("port").and_then(Value::as_i64), Some(8080));
//! assert_eq!(doc.get_array("hosts").map(Vec::len), Some(2));
//! ```
//!
//! ### Serde Integration
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use kson::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let kson = to_string(&user).unwrap();
//! assert_eq!(kson, r#"{id:123,name:"Alice",active:true}"#);
//!
//! let user_back: User = from_str(&kson).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Diagnostics
//!
//! Parsing stops at the first error. [`Parser`] keeps a log of every failure
//! it has seen, rendered one `"<line>: <message>"` entry per line:
//!
//! ```rust
//! use kson::Parser;
//!
//! let mut parser = Parser::new("{\n  a: 1,\n  b: \n}");
//! assert!(parser.parse().is_err());
//! assert_eq!(parser.error_info(), "4: expect value, found '}' (column 1)\n");
//! ```
//!
//! ### Dynamic Values with the kson! Macro
//!
//! ```rust
//! use kson::{kson, Value};
//!
//! let data = kson!({
//!     name: "Alice",
//!     tags: ["rust", "config"]
//! });
//!
//! assert_eq!(data.to_string(), r#"{name:"Alice",tags:["rust","config"]}"#);
//! ```
//!
//! ## Logging
//!
//! The parser emits `tracing` events: one `trace` event per grammar production
//! and a `debug` event when a document is accepted or rejected. Nothing is
//! printed unless the application installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`parse_config.rs`** - Reading a commented configuration file
//! - **`dynamic_values.rs`** - Navigating and building [`Value`] trees
//! - **`custom_options.rs`** - Pretty printing, key sorting and literal case
//!
//! Run any of them with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::KsonMap;
pub use options::{KsonOptions, LiteralCase};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};
pub use ser::{Serializer, ValueSerializer};
pub use value::{Kind, Number, Value};

use serde::{Deserialize, Serialize};
use std::io;

/// Parses a KSON document into its top-level object.
///
/// # Examples
///
/// ```rust
/// let doc = kson::parse("{a: 1, /* note */ b: [2, 3]}").unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first syntax error, with its line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<KsonMap> {
    Parser::new(input).parse()
}

/// Serialize any `T: Serialize` to a compact KSON string.
///
/// # Examples
///
/// ```rust
/// use kson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "{x:1,y:2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize as an object, has a key
/// that is not an identifier, or holds a non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, KsonOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed KSON string.
///
/// # Examples
///
/// ```rust
/// use kson::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string_pretty(&point).unwrap(), "{\n  x: 1,\n  y: 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, KsonOptions::pretty())
}

/// Serialize any `T: Serialize` to a KSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use kson::{to_string_with_options, KsonOptions, LiteralCase};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Flags { b: bool, a: Option<u8> }
///
/// let options = KsonOptions::new()
///     .with_sort_keys(true)
///     .with_literal_case(LiteralCase::Upper);
/// let kson = to_string_with_options(&Flags { b: true, a: None }, options).unwrap();
/// assert_eq!(kson, "{a:NULL,b:TRUE}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: KsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Unlike the string functions, any kind of value is accepted here.
///
/// # Examples
///
/// ```rust
/// use kson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// assert!(to_value(&vec![1, 2]).unwrap().is_array());
/// ```
///
/// # Errors
///
/// Returns an error if a map key does not serialize as a string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in compact KSON.
///
/// # Examples
///
/// ```rust
/// use kson::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"{x:1,y:2}");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, KsonOptions::default())
}

/// Serialize any `T: Serialize` to a writer in KSON with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: KsonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let kson_string = to_string_with_options(value, options)?;
    writer
        .write_all(kson_string.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of KSON text.
///
/// # Examples
///
/// ```rust
/// use kson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{x: 1, y: -0x2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid KSON or cannot be deserialized
/// to type `T`. Syntax errors carry line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of KSON.
///
/// # Examples
///
/// ```rust
/// use kson::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"{x: 1, y: 2}");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// KSON, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of KSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid KSON,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use kson::{from_value, kson};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(kson!({ x: 1, y: 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        score: f64,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice \"A\"\n".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            score: 9.5,
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let kson = to_string(&point).unwrap();
        let point_back: Point = from_str(&kson).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let kson = to_string(&user()).unwrap();
        let user_back: User = from_str(&kson).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let kson = to_string_pretty(&user()).unwrap();
        assert!(kson.contains("\n  tags: [\n    \"admin\",\n"));
        let user_back: User = from_str(&kson).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();

        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_from_value() {
        let value = to_value(&user()).unwrap();
        let user_back: User = from_value(value).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_top_level_array_rejected() {
        assert!(matches!(
            to_string(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(_))
        ));
        assert!(from_str::<Vec<i32>>("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_parse_value_roundtrip() {
        let doc = parse("{a: 0x10, b: [1.5, \"s\", NULL], c: {d: TRUE}}").unwrap();
        let text = to_string(&doc).unwrap();
        assert_eq!(text, "{a:16,b:[1.5,\"s\",null],c:{d:true}}");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_custom_options() {
        let options = KsonOptions::pretty()
            .with_indent(4)
            .with_sort_keys(true)
            .with_literal_case(LiteralCase::Upper);

        let kson = to_string_with_options(&user(), options).unwrap();
        assert!(kson.starts_with("{\n    active: TRUE,\n    id: 123,"));
        let user_back: User = from_str(&kson).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<Point>(&[b'{', 0xff, b'}']).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }
}
