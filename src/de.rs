//! KSON deserialization.
//!
//! [`Deserializer`] parses a document with [`Parser`] and hands the resulting
//! tree to serde. The whole document is read before any visitor runs, so a
//! syntax error anywhere in the input is reported before type errors.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use kson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, tags: Vec<String> }
//!
//! let kson = "{ x: 0x10, tags: [\"a\", \"b\",], // trailing comma is fine\n }";
//! let data: Data = from_str(kson).unwrap();
//! assert_eq!(data, Data { x: 16, tags: vec!["a".into(), "b".into()] });
//! ```
//!
//! ## Enums
//!
//! Unit variants are read from strings. Variants with data are read from an
//! object holding exactly one entry, keyed by the variant name:
//!
//! ```rust
//! use kson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! enum Mode { Fast, Limit(u32) }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { a: Mode, b: Mode }
//!
//! let config: Config = from_str("{a: \"Fast\", b: {Limit: 3}}").unwrap();
//! assert_eq!(config, Config { a: Mode::Fast, b: Mode::Limit(3) });
//! ```

use crate::{Error, KsonMap, Number, Parser, Result, Value};
use serde::de::{self, Deserializer as _};
use serde::forward_to_deserialize_any;

/// The KSON deserializer.
///
/// Created via [`Deserializer::from_str`]. The parser's diagnostic log stays
/// available through [`Deserializer::error_info`] after a failed parse.
pub struct Deserializer<'de> {
    parser: Parser<'de>,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            parser: Parser::new(input),
        }
    }

    /// Sets how deeply objects and arrays may nest before parsing fails.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.parser = self.parser.with_max_depth(max_depth);
        self
    }

    /// The parser's diagnostic log, one `"<line>: <message>\n"` entry per failure.
    pub fn error_info(&self) -> String {
        self.parser.error_info()
    }

    fn parse_root(&mut self) -> Result<ValueDeserializer> {
        let document = self.parser.parse()?;
        Ok(ValueDeserializer::new(Value::Object(document)))
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?.deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?.deserialize_option(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?.deserialize_newtype_struct(name, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_root()?.deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: KsonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(_) => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

/// Feeds an already-built [`Value`] tree to serde.
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Value::Object(obj) => {
                let mut entries = obj.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    _ => Err(Error::custom(
                        "expected an object with exactly one entry for an enum variant",
                    )),
                }
            }
            other => Err(Error::custom(format!(
                "expected a string or object for an enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    fn from_str<'a, T: Deserialize<'a>>(input: &'a str) -> Result<T> {
        let mut deserializer = Deserializer::from_str(input);
        T::deserialize(&mut deserializer)
    }

    #[test]
    fn test_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Server {
            host: String,
            port: u16,
            debug: bool,
        }

        let server: Server = from_str("{host: \"localhost\", port: 0x1f90, debug: FALSE}").unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 8080,
                debug: false
            }
        );
    }

    #[test]
    fn test_option_fields() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Opt {
            a: Option<i32>,
            b: Option<i32>,
        }

        let opt: Opt = from_str("{a: NULL, b: 3}").unwrap();
        assert_eq!(opt, Opt { a: None, b: Some(3) });
    }

    #[test]
    fn test_nested_collections() {
        let map: HashMap<String, Vec<f64>> = from_str("{xs: [1.5, 2], ys: []}").unwrap();
        assert_eq!(map["xs"], vec![1.5, 2.0]);
        assert!(map["ys"].is_empty());
    }

    #[test]
    fn test_enum_variants() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Shape {
            Empty,
            Circle(f64),
            Line(i32, i32),
            Rect { w: i32, h: i32 },
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Shapes {
            items: Vec<Shape>,
        }

        let shapes: Shapes = from_str(
            "{items: [\"Empty\", {Circle: 1.5}, {Line: [1, 2]}, {Rect: {w: 2, h: 3}}]}",
        )
        .unwrap();
        assert_eq!(
            shapes.items,
            vec![
                Shape::Empty,
                Shape::Circle(1.5),
                Shape::Line(1, 2),
                Shape::Rect { w: 2, h: 3 }
            ]
        );
    }

    #[test]
    fn test_enum_requires_single_entry() {
        #[derive(Deserialize, Debug)]
        enum Mode {
            #[allow(dead_code)]
            On(i32),
        }

        #[derive(Deserialize, Debug)]
        struct Holder {
            #[allow(dead_code)]
            mode: Mode,
        }

        assert!(from_str::<Holder>("{mode: {On: 1, Off: 2}}").is_err());
        assert!(from_str::<Holder>("{mode: 3}").is_err());
    }

    #[test]
    fn test_type_mismatch() {
        #[derive(Deserialize, Debug)]
        struct Count {
            #[allow(dead_code)]
            n: i32,
        }

        let err = from_str::<Count>("{n: \"three\"}").unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert!(from_str::<Count>("{n: 1.5}").is_err());
    }

    #[test]
    fn test_syntax_error_is_logged() {
        let mut deserializer = Deserializer::from_str("{a: 1,\n b: }");
        let result: Result<HashMap<String, i32>> = HashMap::deserialize(&mut deserializer);
        let err = result.unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), Some(2));
        assert!(deserializer.error_info().starts_with("2: expect value"));
    }

    #[test]
    fn test_depth_limit() {
        let mut deserializer = Deserializer::from_str("{a: {b: {c: 1}}}").with_max_depth(2);
        let result: Result<Value> = Value::deserialize(&mut deserializer);
        assert!(matches!(
            result,
            Err(Error::DepthLimitExceeded { limit: 2, .. })
        ));
    }

    #[test]
    fn test_newtype_and_unit_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Meters(f64);

        #[derive(Deserialize, Debug, PartialEq)]
        struct Marker;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Wrapper {
            len: Meters,
            mark: Marker,
        }

        let wrapper: Wrapper = from_str("{len: 2.5, mark: null}").unwrap();
        assert_eq!(
            wrapper,
            Wrapper {
                len: Meters(2.5),
                mark: Marker
            }
        );
    }
}
