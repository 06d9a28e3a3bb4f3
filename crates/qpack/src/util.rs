//! Convenience helpers over the default encoder and decoder.

use crate::{DecodeError, EncodeError, QpackDecoder, QpackEncoder, Value};

/// Encodes `value` into a fresh byte vector.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    QpackEncoder::new().encode(value)
}

/// Appends the encoding of `value` to `out`, leaving `out` untouched on error.
pub fn encode_into(out: &mut Vec<u8>, value: &Value) -> Result<(), EncodeError> {
    QpackEncoder::new().encode_into(out, value)
}

/// Decodes one value at `offset`, returning it with the offset just past it.
pub fn decode(input: &[u8], offset: usize) -> Result<(Value, usize), DecodeError> {
    QpackDecoder::new().decode(input, offset)
}

/// Same as [`encode`].
pub fn pack(value: &Value) -> Result<Vec<u8>, EncodeError> {
    encode(value)
}

/// Decodes the value at the start of `input`. Trailing bytes are ignored.
pub fn unpack(input: &[u8]) -> Result<Value, DecodeError> {
    decode(input, 0).map(|(value, _)| value)
}

/// Decodes the value at the start of `input` and requires it to span the
/// whole buffer.
pub fn decode_exact(input: &[u8]) -> Result<Value, DecodeError> {
    let (value, next) = decode(input, 0)?;
    if next != input.len() {
        return Err(DecodeError::TrailingBytes { offset: next });
    }
    Ok(value)
}
