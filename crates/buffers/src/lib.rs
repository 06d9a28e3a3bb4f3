//! Byte buffer primitives for the qpack codec.
//!
//! - [`Writer`] appends little-endian scalars and raw bytes to a growable
//!   buffer.
//! - [`Reader`] walks a bounded region `[x, end)` of a borrowed slice and
//!   never reads past `end`.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
}
