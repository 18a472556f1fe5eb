//! Dynamic value representation for KYAML data.
//!
//! [`Value`] is the closed set of shapes a KYAML document can hold. The
//! encoder renders a `Value` tree to text and the decoder produces one from
//! text; the two agree on every variant, so any finite value survives a
//! `dump`/`load` round trip unchanged.
//!
//! ## Creating Values
//!
//! ```rust
//! use kyaml::{kyaml, Value};
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(3);
//! let name = Value::from("web");
//!
//! let deployment = kyaml!({
//!     "apiVersion": "apps/v1",
//!     "kind": "Deployment",
//!     "spec": { "replicas": 3 }
//! });
//! assert_eq!(deployment["spec"]["replicas"].as_i64(), Some(3));
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use kyaml::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! let num = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::Mapping;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

/// A dynamically-typed representation of any KYAML value.
///
/// # Examples
///
/// ```rust
/// use kyaml::Value;
///
/// let text = Value::String("hello".to_string());
/// assert!(text.is_string());
/// assert!(Value::Null.is_null());
/// assert!(Value::Float(2.5).is_f64());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Mapping(Mapping),
    Sequence(Vec<Value>),
}

static NULL: Value = Value::Null;

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_i64(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_f64(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is an integer or a float.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// Floats are not converted: `2.0` decodes as a float and stays one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kyaml::Value;
    ///
    /// assert_eq!(Value::Int(42).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is numeric, returns it as an `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a mutable reference to it.
    #[inline]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a mutable reference to it.
    #[inline]
    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Looks up a mapping entry or sequence element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kyaml::kyaml;
    ///
    /// let value = kyaml!({ "ports": [80, 443] });
    /// assert_eq!(value.get("ports").and_then(|p| p.get(1)).and_then(|p| p.as_i64()), Some(443));
    /// assert!(value.get("missing").is_none());
    /// ```
    #[must_use]
    pub fn get<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Name of the variant, used in conversion error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }
}

/// A type that can index into a [`Value`]: `&str` for mappings, `usize` for
/// sequences.
pub trait ValueIndex {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Sequence(seq) => seq.get(*self),
            _ => None,
        }
    }
}

impl ValueIndex for str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Mapping(map) => map.get(self),
            _ => None,
        }
    }
}

impl ValueIndex for String {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(value)
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).index_into(value)
    }
}

impl<I: ValueIndex> Index<I> for Value {
    type Output = Value;

    /// Missing keys and out-of-range indices yield `Value::Null`.
    fn index(&self, index: I) -> &Value {
        index.index_into(self).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    /// Writes the canonical KYAML encoding, without the `---` document prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::Encoder::new().encode(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => {
                use serde::ser::SerializeSeq;
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    state.serialize_element(element)?;
                }
                state.end()
            }
            Value::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid KYAML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Int)
                    .map_err(|_| E::custom(format!("integer {} out of range for i64", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Sequence(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Mapping::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Mapping(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected int, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = TryFrom::try_from(Value::Int(42)).unwrap();
        assert_eq!(result, 42);

        assert!(i64::try_from(Value::Float(42.0)).is_err());
        assert!(i64::try_from(Value::String("test".to_string())).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let result: f64 = TryFrom::try_from(Value::Float(3.5)).unwrap();
        assert_eq!(result, 3.5);

        let result: f64 = TryFrom::try_from(Value::Int(42)).unwrap();
        assert_eq!(result, 42.0);
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(Value::Bool(true)).unwrap());
        assert!(bool::try_from(Value::Int(1)).is_err());

        let s: String = TryFrom::try_from(Value::from("hello")).unwrap();
        assert_eq!(s, "hello");
        let err = String::try_from(Value::Int(1)).unwrap_err();
        assert!(err.to_string().contains("found int"));
    }

    #[test]
    fn test_deserialize_rejects_u64_above_i64_max() {
        let value: Value = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(value, Value::Int(i64::MAX));

        let err = serde_json::from_str::<Value>("18446744073709551615").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_index() {
        let mut inner = Mapping::new();
        inner.insert("name".to_string(), Value::from("app"));
        let mut outer = Mapping::new();
        outer.insert("metadata".to_string(), Value::Mapping(inner));
        outer.insert(
            "items".to_string(),
            vec![Value::from(1), Value::from(2)].into(),
        );
        let value = Value::Mapping(outer);

        assert_eq!(value["metadata"]["name"].as_str(), Some("app"));
        assert_eq!(value["items"][1].as_i64(), Some(2));
        assert!(value["items"][9].is_null());
        assert!(value["nope"]["deeper"].is_null());
    }

    #[test]
    fn test_display_uses_encoder() {
        let value: Value = vec![Value::from("a"), Value::Null].into_iter().collect();
        assert_eq!(value.to_string(), "[\n  \"a\",\n  null,\n]");
    }

    #[test]
    fn test_type_checks() {
        let value = Value::Int(42);
        assert!(value.is_i64());
        assert!(value.is_number());
        assert!(!value.is_f64());
        assert!(!value.is_null());
        assert_eq!(value.as_f64(), Some(42.0));
        assert_eq!(value.type_name(), "int");
    }
}
