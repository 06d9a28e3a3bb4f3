//! Bounded little-endian byte reader with cursor tracking.

use crate::BufferError;

/// A reader over the region `[x, end)` of a byte slice.
///
/// Every read checks the remaining length first and returns
/// [`BufferError::EndOfBuffer`] without moving the cursor when the region is
/// too short.
///
/// # Example
///
/// ```
/// use qpack_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0302));
/// assert!(reader.try_u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the whole slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `[x, end)`. `end` is clamped to the slice length.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self { uint8, x, end }
    }

    /// Returns the number of bytes left before `end`.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.x > self.end || n > self.end - self.x {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(bytes)
    }

    /// Peeks at the current byte without advancing.
    pub fn try_peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by `length` bytes.
    pub fn try_skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.check(length)?;
        self.x += length;
        Ok(())
    }

    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        self.try_u8().map(|b| b as i8)
    }

    /// Reads an unsigned 16-bit little-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.take().map(u16::from_le_bytes)
    }

    /// Reads a signed 16-bit little-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.take().map(i16::from_le_bytes)
    }

    /// Reads an unsigned 32-bit little-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.take().map(u32::from_le_bytes)
    }

    /// Reads a signed 32-bit little-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.take().map(i32::from_le_bytes)
    }

    /// Reads an unsigned 64-bit little-endian integer.
    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.take().map(u64::from_le_bytes)
    }

    /// Reads a signed 64-bit little-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.take().map(i64::from_le_bytes)
    }

    /// Reads a 64-bit little-endian IEEE-754 float.
    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        self.take().map(f64::from_le_bytes)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_u8_success() {
        let data = [0x42u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x42));
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_try_u8_end_of_buffer() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i8_negative() {
        let data = [0xc3u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i8(), Ok(-61i8));
    }

    #[test]
    fn test_try_u16_partial() {
        let data = [0x01u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i16_negative() {
        let data = [0x02u8, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Ok(-0xfe));
    }

    #[test]
    fn test_try_i64_negative() {
        let data = [0x8au8, 0x67, 0x45, 0x23, 0x01, 0xff, 0xff, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i64(), Ok(-0xfedcba9876));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_try_f64() {
        let data = [0x53u8, 0x05, 0xa3, 0x92, 0x3a, 0xdd, 0x5e, 0x40];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_f64(), Ok(123.4567));
    }

    #[test]
    fn test_end_bounds_reads_not_slice_length() {
        let data = [0x01u8, 0x02, 0x03, 0x04];
        let mut reader = Reader::from_slice(&data, 1, 3);
        assert_eq!(reader.size(), 2);
        assert_eq!(reader.try_u16(), Ok(0x0302));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_cursor_past_end_reads_nothing() {
        let data = [0x01u8];
        let mut reader = Reader::from_slice(&data, 5, 1);
        assert_eq!(reader.size(), 0);
        assert_eq!(reader.try_peek(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.try_buf(0), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_try_buf_and_skip() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.try_buf(5), Ok(&b"hello"[..]));
        assert_eq!(reader.try_skip(1), Ok(()));
        assert_eq!(reader.try_buf(6), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.try_buf(5), Ok(&b"world"[..]));
    }
}
