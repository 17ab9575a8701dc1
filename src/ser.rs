//! KSON serialization.
//!
//! This module provides two serializers:
//!
//! - [`Serializer`] writes KSON text. It serializes documents through serde and
//!   also writes [`Value`] trees directly with [`Serializer::write_value`] and
//!   [`Serializer::write_document`].
//! - [`ValueSerializer`] turns any `Serialize` type into a [`Value`] tree.
//!
//! ## Output Format
//!
//! Compact output has no whitespace at all: `{a:1,b:"x",c:[true,null]}`.
//! Pretty output puts each entry on its own line and indents nested
//! containers. Keys are always written unquoted, so every key must match
//! `[A-Za-z_][A-Za-z0-9_]*`. Floats are always written with a decimal point
//! so that they read back as floats.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use kson::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: f64 }
//!
//! let data = Data { x: 1, y: 2.0 };
//!
//! assert_eq!(to_string(&data).unwrap(), "{x:1,y:2.0}");
//! assert_eq!(to_string_pretty(&data).unwrap(), "{\n  x: 1,\n  y: 2.0\n}");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use kson::{KsonOptions, Serializer, Value};
//!
//! let mut serializer = Serializer::new(KsonOptions::new());
//! let value = Value::from(vec![Value::from(1), Value::from("two")]);
//! serializer.write_value(&value).unwrap();
//!
//! assert_eq!(serializer.into_inner(), "[1,\"two\"]");
//! ```

use crate::parser::is_identifier;
use crate::{Error, KsonMap, KsonOptions, Number, Result, Value};
use serde::ser::Serializer as _;
use serde::{ser, Serialize};

/// The KSON text serializer.
///
/// Serializing a type through `&mut Serializer` produces a whole document,
/// so the type must serialize as a map, a struct or an enum variant with
/// data. Fragments of any kind can be written with [`Serializer::write_value`].
pub struct Serializer {
    output: String,
    options: KsonOptions,
    indent_level: usize,
    lenient: bool,
}

impl Serializer {
    pub fn new(options: KsonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
            lenient: false,
        }
    }

    /// A compact writer that renders trees `write_value` would reject.
    pub(crate) fn for_display() -> Self {
        Serializer {
            lenient: true,
            ..Serializer::new(KsonOptions::default())
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a top-level object.
    pub fn write_document(&mut self, document: &KsonMap) -> Result<()> {
        self.write_object(document)
    }

    /// Writes any value, including fragments that are not valid documents
    /// on their own.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.output.push_str(self.options.literal_case.null()),
            Value::Bool(b) => self.output.push_str(self.options.literal_case.bool(*b)),
            Value::Number(n) => self.write_number(*n)?,
            Value::String(s) => self.write_string(s),
            Value::Array(arr) => self.write_array(arr)?,
            Value::Object(obj) => self.write_object(obj)?,
        }
        Ok(())
    }

    fn write_root(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(obj) => self.write_document(obj),
            other => Err(Self::top_level(other.kind().as_str())),
        }
    }

    fn write_number(&mut self, number: Number) -> Result<()> {
        match number {
            Number::Integer(i) => self.output.push_str(&i.to_string()),
            Number::Float(f) if !f.is_finite() && !self.lenient => {
                return Err(Error::unsupported_type("non-finite float"));
            }
            Number::Float(_) => self.output.push_str(&number.to_string()),
        }
        Ok(())
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\t' => self.output.push_str("\\t"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn write_array(&mut self, arr: &[Value]) -> Result<()> {
        self.output.push('[');
        if arr.is_empty() {
            self.output.push(']');
            return Ok(());
        }

        self.indent_level += 1;
        for (i, element) in arr.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_newline_indent();
            self.write_value(element)?;
        }
        self.indent_level -= 1;

        self.write_newline_indent();
        self.output.push(']');
        Ok(())
    }

    fn write_object(&mut self, obj: &KsonMap) -> Result<()> {
        self.output.push('{');
        if obj.is_empty() {
            self.output.push('}');
            return Ok(());
        }

        let mut entries: Vec<_> = obj.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        }

        self.indent_level += 1;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            let bare = is_identifier(key);
            if !bare && !self.lenient {
                return Err(Error::InvalidKey(key.clone()));
            }
            if i > 0 {
                self.output.push(',');
            }
            self.write_newline_indent();
            if bare {
                self.output.push_str(key);
            } else {
                self.write_string(key);
            }
            self.output.push(':');
            if self.options.pretty {
                self.output.push(' ');
            }
            self.write_value(value)?;
        }
        self.indent_level -= 1;

        self.write_newline_indent();
        self.output.push('}');
        Ok(())
    }

    fn write_newline_indent(&mut self) {
        if self.options.pretty {
            self.output.push('\n');
            self.output
                .push_str(&" ".repeat(self.indent_level * self.options.indent));
        }
    }

    fn top_level(kind: &str) -> Error {
        Error::unsupported_type(&format!(
            "{} at the top level, a document must be an object",
            kind
        ))
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = ser::Impossible<(), Error>;
    type SerializeTuple = ser::Impossible<(), Error>;
    type SerializeTupleStruct = ser::Impossible<(), Error>;
    type SerializeTupleVariant = Document<'a, SerializeTupleVariant>;
    type SerializeMap = Document<'a, SerializeMap>;
    type SerializeStruct = Document<'a, SerializeMap>;
    type SerializeStructVariant = Document<'a, SerializeStructVariant>;

    fn serialize_bool(self, _v: bool) -> Result<Self::Ok> {
        Err(Serializer::top_level("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(Serializer::top_level("number"))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<Self::Ok> {
        Err(Serializer::top_level("number"))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(Serializer::top_level("number"))
    }

    fn serialize_char(self, _v: char) -> Result<Self::Ok> {
        Err(Serializer::top_level("string"))
    }

    fn serialize_str(self, _v: &str) -> Result<Self::Ok> {
        Err(Serializer::top_level("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(Serializer::top_level("array"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(Serializer::top_level("null"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(Serializer::top_level("null"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(Serializer::top_level("string"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        let tagged = ValueSerializer.serialize_newtype_variant(name, variant_index, variant, value)?;
        self.write_root(&tagged)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Serializer::top_level("array"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Serializer::top_level("array"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Serializer::top_level("array"))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Document {
            ser: self,
            inner: ValueSerializer.serialize_tuple_variant(name, variant_index, variant, len)?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Document {
            ser: self,
            inner: ValueSerializer.serialize_map(len)?,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(Document {
            ser: self,
            inner: ValueSerializer.serialize_struct(name, len)?,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Document {
            ser: self,
            inner: ValueSerializer.serialize_struct_variant(name, variant_index, variant, len)?,
        })
    }
}

/// Collects a top-level object as a [`Value`] and writes it once complete.
pub struct Document<'a, S> {
    ser: &'a mut Serializer,
    inner: S,
}

impl<'a, S> ser::SerializeMap for Document<'a, S>
where
    S: ser::SerializeMap<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_key<K>(&mut self, key: &K) -> Result<()>
    where
        K: ?Sized + Serialize,
    {
        self.inner.serialize_key(key)
    }

    fn serialize_value<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.inner.serialize_value(value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = self.inner.end()?;
        self.ser.write_root(&value)
    }
}

impl<'a, S> ser::SerializeStruct for Document<'a, S>
where
    S: ser::SerializeStruct<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<V>(&mut self, key: &'static str, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = self.inner.end()?;
        self.ser.write_root(&value)
    }
}

impl<'a, S> ser::SerializeTupleVariant for Document<'a, S>
where
    S: ser::SerializeTupleVariant<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.inner.serialize_field(value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = self.inner.end()?;
        self.ser.write_root(&value)
    }
}

impl<'a, S> ser::SerializeStructVariant for Document<'a, S>
where
    S: ser::SerializeStructVariant<Ok = Value, Error = Error>,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<V>(&mut self, key: &'static str, value: &V) -> Result<()>
    where
        V: ?Sized + Serialize,
    {
        self.inner.serialize_field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        let value = self.inner.end()?;
        self.ser.write_root(&value)
    }
}

/// Serializes Rust values into [`Value`] trees.
///
/// Enum variants with data become single-entry objects keyed by the variant
/// name; unit variants become strings.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: KsonMap,
    current_key: Option<String>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: KsonMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = KsonMap::with_capacity(1);
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: KsonMap::new(),
        })
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: KsonMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = KsonMap::with_capacity(1);
        map.insert(self.name.to_string(), Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::InvalidKey(other.to_string())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = KsonMap::with_capacity(1);
        outer.insert(self.name.to_string(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
