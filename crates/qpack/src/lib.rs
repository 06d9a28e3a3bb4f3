//! qpack: a compact, self-describing binary serialization format.
//!
//! A [`Value`] (null, bool, integer, float, byte string, array or map,
//! arbitrarily nested) is written as a tag byte followed by an optional
//! payload. Small integers, the floats `-1.0`/`0.0`/`1.0`, short byte strings
//! and small containers fit their size into the tag itself; everything else
//! uses the narrowest width that holds it. See [`tags`] for the full layout.
//!
//! ```
//! use qpack::{decode, encode, Value};
//!
//! let value = Value::map([("Names", Value::array(["Iris", "Sasha"]))]);
//! let bin = encode(&value).unwrap();
//! assert_eq!(decode(&bin, 0).unwrap(), (value, bin.len()));
//! ```

mod decoder;
mod encoder;
mod error;
mod util;
mod value;

pub mod json;
pub mod tags;

pub use decoder::{DecoderOptions, QpackDecoder, ValueIter, DEFAULT_MAX_DEPTH};
pub use encoder::QpackEncoder;
pub use error::{DecodeError, EncodeError};
pub use util::{decode, decode_exact, encode, encode_into, pack, unpack};
pub use value::{Value, ValueKind};
