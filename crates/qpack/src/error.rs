use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// An integer or a length does not fit the widest field of its category.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),
    /// An adapter handed over something with no qpack value category.
    #[error("unsupported value category: {0}")]
    UnsupportedCategory(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input at offset {offset}")]
    TruncatedInput { offset: usize },
    #[error("unknown tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("unexpected close marker 0x{tag:02x} at offset {offset}")]
    MismatchedContainer { tag: u8, offset: usize },
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: usize },
}
