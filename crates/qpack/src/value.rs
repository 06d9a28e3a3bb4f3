//! [`Value`]: the closed set of things qpack can encode.

use std::fmt;

use crate::EncodeError;

/// A qpack value.
///
/// Byte strings are opaque: qpack does not distinguish text from binary, so
/// `"abc"` and `b"abc"` encode identically and both decode as
/// [`Value::Bytes`].
///
/// Map pairs keep the order they were given in. Duplicate keys are allowed
/// and preserved; [`Value::get`] returns the first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

/// Category of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Bytes,
    Array,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Builds a map from anything that yields key/value pairs.
    pub fn map<K, V, I>(pairs: I) -> Value
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array from anything that yields values.
    pub fn array<T, I>(items: I) -> Value
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Byte string as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Looks up the first pair whose key equals `key`.
    ///
    /// Returns `None` for non-map values.
    pub fn get<K: Into<Value>>(&self, key: K) -> Option<&Value> {
        let key = key.into();
        self.as_map()?
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i64)
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Value {
    type Error = EncodeError;

    fn try_from(u: u64) -> Result<Self, Self::Error> {
        i64::try_from(u)
            .map(Value::Int)
            .map_err(|_| EncodeError::ValueOutOfRange(format!("integer {u}")))
    }
}

impl TryFrom<usize> for Value {
    type Error = EncodeError;

    fn try_from(u: usize) -> Result<Self, Self::Error> {
        i64::try_from(u)
            .map(Value::Int)
            .map_err(|_| EncodeError::ValueOutOfRange(format!("integer {u}")))
    }
}

impl TryFrom<i128> for Value {
    type Error = EncodeError;

    fn try_from(i: i128) -> Result<Self, Self::Error> {
        i64::try_from(i)
            .map(Value::Int)
            .map_err(|_| EncodeError::ValueOutOfRange(format!("integer {i}")))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(-7i32), Value::Int(-7));
        assert_eq!(Value::from("hi"), Value::Bytes(b"hi".to_vec()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
        assert_eq!(Value::try_from(u64::MAX >> 1), Ok(Value::Int(i64::MAX)));
        assert!(matches!(
            Value::try_from(u64::MAX),
            Err(EncodeError::ValueOutOfRange(_))
        ));
        assert!(matches!(
            Value::try_from(i64::MIN as i128 - 1),
            Err(EncodeError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn map_lookup_returns_first_match() {
        let value = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(value.get("a"), Some(&Value::Int(1)));
        assert_eq!(value.get("b"), Some(&Value::Int(2)));
        assert_eq!(value.get("c"), None);
        assert_eq!(Value::Int(1).get("a"), None);
    }

    #[test]
    fn map_keys_need_not_be_strings() {
        let value = Value::map([(Value::Int(1), "one"), (Value::Null, "none")]);
        assert_eq!(value.get(1).and_then(Value::as_str), Some("one"));
        assert_eq!(value.get(Value::Null).and_then(Value::as_str), Some("none"));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_i64(), None);
        assert_eq!(Value::Bytes(vec![0xff]).as_str(), None);
        assert_eq!(Value::array([1, 2]).as_array().map(<[Value]>::len), Some(2));
        assert_eq!(Value::Bool(false).kind(), ValueKind::Bool);
        assert_eq!(ValueKind::Map.to_string(), "map");
        assert!(Value::default().is_null());
    }
}
