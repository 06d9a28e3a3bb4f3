//! Growable little-endian byte writer.

/// A byte writer that appends to a growable buffer.
///
/// All multi-byte scalars are written little-endian.
///
/// # Example
///
/// ```
/// use qpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x03, 0x02]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Wraps an existing buffer; new bytes are appended after its contents.
    pub fn from_vec(uint8: Vec<u8>) -> Self {
        Self { uint8 }
    }

    /// Returns the underlying buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.uint8
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Drops everything written after position `len`.
    pub fn truncate(&mut self, len: usize) {
        self.uint8.truncate(len);
    }

    /// Discards all written bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written data and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Ensures at least `capacity` more bytes can be written without
    /// reallocating.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        self.uint8.reserve(capacity);
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.uint8.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a signed 16-bit integer (little-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a 64-bit IEEE-754 float (little-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a u8 followed by a u8.
    pub fn u8u8(&mut self, u8_val: u8, val: u8) {
        self.uint8.extend_from_slice(&[u8_val, val]);
    }

    /// Writes a u8 followed by a u16 (little-endian).
    pub fn u8u16(&mut self, u8_val: u8, u16_val: u16) {
        let bytes = u16_val.to_le_bytes();
        self.uint8.extend_from_slice(&[u8_val, bytes[0], bytes[1]]);
    }

    /// Writes a u8 followed by a u32 (little-endian).
    pub fn u8u32(&mut self, u8_val: u8, u32_val: u32) {
        self.ensure_capacity(5);
        self.u8(u8_val);
        self.u32(u32_val);
    }

    /// Writes a u8 followed by a u64 (little-endian).
    pub fn u8u64(&mut self, u8_val: u8, u64_val: u64) {
        self.ensure_capacity(9);
        self.u8(u8_val);
        self.u64(u64_val);
    }

    /// Writes a u8 followed by a f64 (little-endian).
    pub fn u8f64(&mut self, u8_val: u8, f64_val: f64) {
        self.ensure_capacity(9);
        self.u8(u8_val);
        self.f64(f64_val);
    }

    /// Writes a byte slice verbatim.
    pub fn buf(&mut self, buf: &[u8]) {
        self.uint8.extend_from_slice(buf);
    }
}
