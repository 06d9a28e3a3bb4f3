//! `QpackDecoder`: bytes to value.
//!
//! The decoder walks a bounded region with a [`Reader`]. Every read is
//! checked against the end of the region before it happens, so malformed or
//! truncated input yields a [`DecodeError`] and never reads out of bounds.
//!
//! Open containers are decoded one full child at a time until the matching
//! close marker shows up in place of the next child. Nested open containers
//! therefore consume their own close markers before the outer loop looks
//! again.

use qpack_buffers::Reader;

use crate::tags::{self, Tag, Width};
use crate::{DecodeError, Value};

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum container nesting; `None` disables the check.
    pub max_depth: Option<usize>,

    /// Decode the reserved tag `0x7c` as null instead of rejecting it.
    pub reserved_as_null: bool,

    /// For the 8-byte length prefix (`0xe7`), use only the low 16 bits of the
    /// length field. Some older writers' readers did this; enable it only to
    /// read streams that depend on it.
    pub legacy_short_length: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            reserved_as_null: false,
            legacy_short_length: false,
        }
    }
}

impl DecoderOptions {
    /// Both legacy compatibility switches turned on.
    pub fn legacy() -> Self {
        DecoderOptions {
            reserved_as_null: true,
            legacy_short_length: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QpackDecoder {
    pub options: DecoderOptions,
}

#[inline]
fn eof(r: &Reader<'_>) -> DecodeError {
    DecodeError::TruncatedInput { offset: r.x }
}

impl QpackDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// Decodes one value starting at `offset`.
    ///
    /// Returns the value and the offset of the first byte after it.
    pub fn decode(&self, input: &[u8], offset: usize) -> Result<(Value, usize), DecodeError> {
        let mut r = Reader::from_slice(input, offset, input.len());
        let value = self.read_any(&mut r, 0)?;
        Ok((value, r.x))
    }

    /// Reads one value; `depth` is the number of enclosing containers.
    pub fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
        let offset = r.x;
        let tag = r.try_u8().map_err(|_| eof(r))?;
        match Tag::from_byte(tag) {
            Tag::SmallInt(int) => Ok(Value::Int(int)),
            Tag::FloatLiteral(float) => Ok(Value::Float(float)),
            Tag::InlineStr(len) => self.read_bytes(r, len as u64),
            Tag::Str(width) => {
                let len = self.read_len(r, width)?;
                self.read_bytes(r, len)
            }
            Tag::Int(width) => self.read_int(r, width).map(Value::Int),
            Tag::Double => r.try_f64().map(Value::Float).map_err(|_| eof(r)),
            Tag::FixedArr(size) => self.read_arr(r, size, depth),
            Tag::FixedMap(size) => self.read_map(r, size, depth),
            Tag::Bool(b) => Ok(Value::Bool(b)),
            Tag::Null => Ok(Value::Null),
            Tag::ArrOpen => self.read_open_arr(r, depth),
            Tag::MapOpen => self.read_open_map(r, depth),
            Tag::ArrClose | Tag::MapClose => Err(DecodeError::MismatchedContainer { tag, offset }),
            Tag::Reserved(tags::RESERVED) if self.options.reserved_as_null => Ok(Value::Null),
            Tag::Reserved(tag) => Err(DecodeError::UnknownTag { tag, offset }),
        }
    }

    fn read_int(&self, r: &mut Reader<'_>, width: Width) -> Result<i64, DecodeError> {
        let int = match width {
            Width::W8 => r.try_i8().map(i64::from),
            Width::W16 => r.try_i16().map(i64::from),
            Width::W32 => r.try_i32().map(i64::from),
            Width::W64 => r.try_i64(),
        };
        int.map_err(|_| eof(r))
    }

    fn read_len(&self, r: &mut Reader<'_>, width: Width) -> Result<u64, DecodeError> {
        let len = match width {
            Width::W8 => r.try_u8().map(u64::from),
            Width::W16 => r.try_u16().map(u64::from),
            Width::W32 => r.try_u32().map(u64::from),
            Width::W64 => r.try_u64(),
        }
        .map_err(|_| eof(r))?;
        if width == Width::W64 && self.options.legacy_short_length {
            return Ok(len & 0xffff);
        }
        Ok(len)
    }

    fn read_bytes(&self, r: &mut Reader<'_>, len: u64) -> Result<Value, DecodeError> {
        if len > r.size() as u64 {
            return Err(eof(r));
        }
        r.try_buf(len as usize)
            .map(|buf| Value::Bytes(buf.to_vec()))
            .map_err(|_| eof(r))
    }

    fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        match self.options.max_depth {
            Some(limit) if depth > limit => Err(DecodeError::DepthLimitExceeded { limit }),
            _ => Ok(depth),
        }
    }

    fn read_arr(&self, r: &mut Reader<'_>, size: usize, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        let mut arr = Vec::with_capacity(size);
        for _ in 0..size {
            arr.push(self.read_any(r, depth)?);
        }
        Ok(Value::Array(arr))
    }

    fn read_map(&self, r: &mut Reader<'_>, size: usize, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        let mut pairs = Vec::with_capacity(size);
        for _ in 0..size {
            let key = self.read_any(r, depth)?;
            let val = self.read_any(r, depth)?;
            pairs.push((key, val));
        }
        Ok(Value::Map(pairs))
    }

    fn read_open_arr(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        let mut arr = Vec::new();
        // A stray 0xff here is rejected by `read_any` as a mismatched close.
        while r.try_peek().map_err(|_| eof(r))? != tags::ARR_CLOSE {
            arr.push(self.read_any(r, depth)?);
        }
        r.x += 1;
        Ok(Value::Array(arr))
    }

    fn read_open_map(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        let mut pairs = Vec::new();
        while r.try_peek().map_err(|_| eof(r))? != tags::MAP_CLOSE {
            let key = self.read_any(r, depth)?;
            let val = self.read_any(r, depth)?;
            pairs.push((key, val));
        }
        r.x += 1;
        Ok(Value::Map(pairs))
    }
}

/// Iterator over consecutive values packed back to back in one buffer.
///
/// Stops at the end of the buffer, or after yielding the first error.
pub struct ValueIter<'a> {
    decoder: QpackDecoder,
    input: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> ValueIter<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_decoder(QpackDecoder::new(), input)
    }

    pub fn with_decoder(decoder: QpackDecoder, input: &'a [u8]) -> Self {
        Self {
            decoder,
            input,
            offset: 0,
            failed: false,
        }
    }

    /// Offset of the next value to be decoded.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for ValueIter<'_> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.input.len() {
            return None;
        }
        match self.decoder.decode(self.input, self.offset) {
            Ok((value, next)) => {
                self.offset = next;
                Some(Ok(value))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
