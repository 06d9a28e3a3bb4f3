//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! JSON strings become qpack byte strings (UTF-8) and objects become maps
//! with byte-string keys in document order. Numbers that fit `i64` become
//! integers; every other number becomes a float.
//!
//! Going back, byte strings that are not valid UTF-8 are rendered as
//! `data:application/octet-stream;base64,…` strings. Map keys that are not
//! text are rendered as their JSON form.

use std::collections::HashSet;

use base64::Engine;
use serde_json::{Map, Number};

use crate::{DecodeError, EncodeError, QpackDecoder, QpackEncoder, Value};

const BINARY_PREFIX: &str = "data:application/octet-stream;base64,";

pub fn from_json(json: &serde_json::Value) -> Result<Value, EncodeError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => from_number(n)?,
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.iter().map(from_json).collect::<Result<Vec<_>, _>>()?)
        }
        serde_json::Value::Object(obj) => Value::Map(
            obj.iter()
                .map(|(k, v)| Ok((Value::from(k.as_str()), from_json(v)?)))
                .collect::<Result<_, EncodeError>>()?,
        ),
    })
}

fn from_number(n: &Number) -> Result<Value, EncodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| EncodeError::UnsupportedCategory(format!("number {n}")))
}

/// Converts a value to JSON.
///
/// JSON objects cannot hold the same key twice, so map pairs whose keys render
/// to the same text (a repeated key, or `1` next to `"1"`) collapse into one
/// entry: the later value replaces the earlier one at the earlier position.
/// [`merged_keys`] reports how many pairs that drops.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Bytes(b) => serde_json::Value::String(bytes_to_string(b)),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(to_json).collect()),
        Value::Map(pairs) => {
            let mut obj = Map::with_capacity(pairs.len());
            for (k, v) in pairs {
                obj.insert(key_to_string(k), to_json(v));
            }
            serde_json::Value::Object(obj)
        }
    }
}

/// Counts the map pairs, at any depth, that [`to_json`] merges into an
/// earlier pair of the same map.
pub fn merged_keys(value: &Value) -> usize {
    match value {
        Value::Array(arr) => arr.iter().map(merged_keys).sum(),
        Value::Map(pairs) => {
            let mut seen = HashSet::with_capacity(pairs.len());
            pairs
                .iter()
                .map(|(k, v)| usize::from(!seen.insert(key_to_string(k))) + merged_keys(v))
                .sum()
        }
        _ => 0,
    }
}

fn bytes_to_string(b: &[u8]) -> String {
    match std::str::from_utf8(b) {
        Ok(s) => s.to_owned(),
        Err(_) => format!(
            "{BINARY_PREFIX}{}",
            base64::engine::general_purpose::STANDARD.encode(b)
        ),
    }
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::Bytes(b) => bytes_to_string(b),
        other => to_json(other).to_string(),
    }
}

/// Encodes a JSON document as qpack.
pub fn encode_json(json: &serde_json::Value) -> Result<Vec<u8>, EncodeError> {
    let value = from_json(json)?;
    QpackEncoder::new().encode(&value)
}

/// Decodes the qpack value at the start of `input` into JSON.
pub fn decode_json(input: &[u8]) -> Result<serde_json::Value, DecodeError> {
    let (value, _) = QpackDecoder::new().decode(input, 0)?;
    Ok(to_json(&value))
}
