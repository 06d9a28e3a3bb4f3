//! `QpackEncoder`: value to bytes.
//!
//! Integers and length prefixes always take the narrowest form that holds
//! them. Arrays and maps with up to five entries carry their size in the tag;
//! larger ones are written as open containers terminated by a close marker.

use qpack_buffers::Writer;

use crate::tags::{self, Width};
use crate::{EncodeError, Value};

pub struct QpackEncoder {
    pub writer: Writer,
}

impl Default for QpackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QpackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `value` into a fresh byte vector.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    /// Appends the encoding of `value` to `out`.
    ///
    /// On error `out` is left exactly as it was.
    pub fn encode_into(&mut self, out: &mut Vec<u8>, value: &Value) -> Result<(), EncodeError> {
        let start = out.len();
        let mut writer = Writer::from_vec(std::mem::take(out));
        std::mem::swap(&mut self.writer, &mut writer);
        let res = self.write_any(value);
        std::mem::swap(&mut self.writer, &mut writer);
        if res.is_err() {
            writer.truncate(start);
        }
        *out = writer.into_inner();
        res
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Int(i) => self.write_integer(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Bytes(b) => self.write_bytes(b)?,
            Value::Array(arr) => self.write_arr(arr)?,
            Value::Map(pairs) => self.write_map(pairs)?,
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.writer.u8(tags::NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { tags::TRUE } else { tags::FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if let Some(tag) = tags::small_int_tag(int) {
            self.writer.u8(tag);
            return;
        }
        match tags::int_width(int) {
            Width::W8 => self.writer.u8u8(tags::INT8, int as i8 as u8),
            Width::W16 => self.writer.u8u16(tags::INT16, int as i16 as u16),
            Width::W32 => self.writer.u8u32(tags::INT32, int as i32 as u32),
            Width::W64 => self.writer.u8u64(tags::INT64, int as u64),
        }
    }

    /// Writes a float; `-1.0`, `0.0` and `1.0` take a single byte.
    ///
    /// `-0.0` compares equal to `0.0` and shares its literal, so the sign of
    /// zero does not survive a round trip.
    pub fn write_float(&mut self, float: f64) {
        if float == 0.0 {
            self.writer.u8(tags::FLOAT_ZERO);
        } else if float == 1.0 {
            self.writer.u8(tags::FLOAT_ONE);
        } else if float == -1.0 {
            self.writer.u8(tags::FLOAT_NEG_ONE);
        } else {
            self.writer.u8f64(tags::DOUBLE, float);
        }
    }

    pub fn write_bytes_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        if length <= tags::INLINE_STR_MAX {
            self.writer.u8(tags::STR_INLINE + length as u8);
            return Ok(());
        }
        let len = u64::try_from(length)
            .map_err(|_| EncodeError::ValueOutOfRange(format!("byte string length {length}")))?;
        match tags::len_width(len) {
            Width::W8 => self.writer.u8u8(tags::STR8, len as u8),
            Width::W16 => self.writer.u8u16(tags::STR16, len as u16),
            Width::W32 => self.writer.u8u32(tags::STR32, len as u32),
            Width::W64 => self.writer.u8u64(tags::STR64, len),
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<(), EncodeError> {
        self.writer.ensure_capacity(buf.len() + 9);
        self.write_bytes_hdr(buf.len())?;
        self.writer.buf(buf);
        Ok(())
    }

    /// Writes text as a byte string.
    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_bytes(s.as_bytes())
    }

    /// Writes the header of an array with `length` values.
    ///
    /// Returns `true` when the array is open and the caller must finish it
    /// with [`Self::write_end_arr`] after the values.
    pub fn write_arr_hdr(&mut self, length: usize) -> bool {
        if length <= tags::FIXED_CONTAINER_MAX {
            self.writer.u8(tags::ARR0 + length as u8);
            false
        } else {
            self.write_start_arr();
            true
        }
    }

    /// Writes the header of a map with `length` pairs.
    ///
    /// Returns `true` when the map is open and the caller must finish it with
    /// [`Self::write_end_map`] after the pairs.
    pub fn write_map_hdr(&mut self, length: usize) -> bool {
        if length <= tags::FIXED_CONTAINER_MAX {
            self.writer.u8(tags::MAP0 + length as u8);
            false
        } else {
            self.write_start_map();
            true
        }
    }

    pub fn write_arr(&mut self, arr: &[Value]) -> Result<(), EncodeError> {
        let open = self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item)?;
        }
        if open {
            self.write_end_arr();
        }
        Ok(())
    }

    pub fn write_map(&mut self, pairs: &[(Value, Value)]) -> Result<(), EncodeError> {
        let open = self.write_map_hdr(pairs.len());
        for (key, val) in pairs {
            self.write_any(key)?;
            self.write_any(val)?;
        }
        if open {
            self.write_end_map();
        }
        Ok(())
    }

    // ---- Streaming ----

    pub fn write_start_arr(&mut self) {
        self.writer.u8(tags::ARR_OPEN);
    }

    pub fn write_end_arr(&mut self) {
        self.writer.u8(tags::ARR_CLOSE);
    }

    pub fn write_start_map(&mut self) {
        self.writer.u8(tags::MAP_OPEN);
    }

    pub fn write_end_map(&mut self) {
        self.writer.u8(tags::MAP_CLOSE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: impl Into<Value>) -> Vec<u8> {
        QpackEncoder::new().encode(&value.into()).unwrap()
    }

    #[test]
    fn integers_pick_narrowest_width() {
        assert_eq!(enc(0), [0x00]);
        assert_eq!(enc(5), [0x05]);
        assert_eq!(enc(63), [0x3f]);
        assert_eq!(enc(-1), [0x40]);
        assert_eq!(enc(-60), [0x7b]);
        assert_eq!(enc(-61), [0xe8, 0xc3]);
        assert_eq!(enc(64), [0xe8, 0x40]);
        assert_eq!(enc(127), [0xe8, 0x7f]);
        assert_eq!(enc(128), [0xe9, 0x80, 0x00]);
        assert_eq!(enc(-128), [0xe8, 0x80]);
        assert_eq!(enc(-129), [0xe9, 0x7f, 0xff]);
        assert_eq!(enc(i32::MAX), [0xea, 0xff, 0xff, 0xff, 0x7f]);
        assert_eq!(
            enc(i64::MIN),
            [0xeb, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
        );
    }

    #[test]
    fn float_literals() {
        assert_eq!(enc(0.0), [0x7e]);
        assert_eq!(enc(1.0), [0x7f]);
        assert_eq!(enc(-1.0), [0x7d]);
        assert_eq!(enc(-0.0), [0x7e]);
        assert_eq!(enc(2.0)[0], 0xec);
    }

    #[test]
    fn byte_string_headers() {
        assert_eq!(enc(""), [0x80]);
        assert_eq!(enc(vec![7u8; 99])[0], 0xe3);
        assert_eq!(&enc(vec![7u8; 100])[..2], &[0xe4, 100]);
        assert_eq!(&enc(vec![7u8; 255])[..2], &[0xe4, 0xff]);
        assert_eq!(&enc(vec![7u8; 256])[..3], &[0xe5, 0x00, 0x01]);
        assert_eq!(&enc(vec![7u8; 65_536])[..5], &[0xe6, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(enc(vec![7u8; 256]).len(), 3 + 256);
    }

    #[test]
    fn container_threshold() {
        assert_eq!(enc(Value::Array(vec![])), [0xed]);
        assert_eq!(enc(Value::Map(vec![])), [0xf3]);
        assert_eq!(enc(Value::array([1, 2, 3, 4, 5])), [0xf2, 1, 2, 3, 4, 5]);
        assert_eq!(
            enc(Value::array([1, 2, 3, 4, 5, 6])),
            [0xfc, 1, 2, 3, 4, 5, 6, 0xfe]
        );
        let map6 = Value::map((0..6).map(|i| (i, Value::Null)));
        let bin = enc(map6);
        assert_eq!(bin[0], 0xfd);
        assert_eq!(*bin.last().unwrap(), 0xff);
        assert_eq!(bin.len(), 2 + 12);
    }

    #[test]
    fn streaming_headers() {
        let mut encoder = QpackEncoder::new();
        assert!(!encoder.write_arr_hdr(2));
        encoder.write_integer(1);
        encoder.write_integer(2);
        assert!(encoder.write_map_hdr(9));
        encoder.write_end_map();
        assert_eq!(encoder.writer.flush(), [0xef, 1, 2, 0xfd, 0xff]);
    }

    #[test]
    fn encode_into_appends() {
        let mut out = vec![0xaa];
        let mut encoder = QpackEncoder::new();
        encoder.encode_into(&mut out, &Value::Bool(true)).unwrap();
        encoder.encode_into(&mut out, &Value::Null).unwrap();
        assert_eq!(out, [0xaa, 0xf9, 0xfb]);
        assert!(encoder.writer.is_empty());
    }
}
