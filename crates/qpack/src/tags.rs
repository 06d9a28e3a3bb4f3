//! The qpack tag scheme.
//!
//! Every encoded value starts with one tag byte. The byte selects the value
//! category and, for variable-width categories, the width of the payload that
//! follows:
//!
//! | Tag byte(s)   | Meaning                                           |
//! |---------------|---------------------------------------------------|
//! | `0x00..=0x3f` | integer literal `0..=63`                          |
//! | `0x40..=0x7b` | integer literal `63 - tag` (`-1..=-60`)           |
//! | `0x7c`        | reserved                                          |
//! | `0x7d`        | float `-1.0`                                      |
//! | `0x7e`        | float `0.0`                                       |
//! | `0x7f`        | float `1.0`                                       |
//! | `0x80..=0xe3` | byte string, length `tag - 0x80` (`0..=99`)       |
//! | `0xe4..=0xe7` | byte string, u8/u16/u32/u64 LE length prefix      |
//! | `0xe8..=0xeb` | i8/i16/i32/i64 LE payload                         |
//! | `0xec`        | f64 LE payload                                    |
//! | `0xed..=0xf2` | array of `tag - 0xed` values                      |
//! | `0xf3..=0xf8` | map of `tag - 0xf3` key/value pairs               |
//! | `0xf9`/`0xfa` | `true` / `false`                                  |
//! | `0xfb`        | null                                              |
//! | `0xfc`/`0xfd` | open array / open map                             |
//! | `0xfe`/`0xff` | open array close / open map close                 |

pub const INT_POS_MAX: u8 = 0x3f;
pub const INT_NEG_FIRST: u8 = 0x40;
pub const INT_NEG_LAST: u8 = 0x7b;
pub const RESERVED: u8 = 0x7c;
pub const FLOAT_NEG_ONE: u8 = 0x7d;
pub const FLOAT_ZERO: u8 = 0x7e;
pub const FLOAT_ONE: u8 = 0x7f;

pub const STR_INLINE: u8 = 0x80;
pub const STR_INLINE_LAST: u8 = 0xe3;
pub const STR8: u8 = 0xe4;
pub const STR16: u8 = 0xe5;
pub const STR32: u8 = 0xe6;
pub const STR64: u8 = 0xe7;

pub const INT8: u8 = 0xe8;
pub const INT16: u8 = 0xe9;
pub const INT32: u8 = 0xea;
pub const INT64: u8 = 0xeb;
pub const DOUBLE: u8 = 0xec;

pub const ARR0: u8 = 0xed;
pub const ARR5: u8 = 0xf2;
pub const MAP0: u8 = 0xf3;
pub const MAP5: u8 = 0xf8;

pub const TRUE: u8 = 0xf9;
pub const FALSE: u8 = 0xfa;
pub const NULL: u8 = 0xfb;

pub const ARR_OPEN: u8 = 0xfc;
pub const MAP_OPEN: u8 = 0xfd;
pub const ARR_CLOSE: u8 = 0xfe;
pub const MAP_CLOSE: u8 = 0xff;

/// Largest integer stored directly in the tag byte.
pub const SMALL_INT_MAX: i64 = 63;
/// Smallest integer stored directly in the tag byte.
pub const SMALL_INT_MIN: i64 = -60;
/// Longest byte string whose length is stored directly in the tag byte.
pub const INLINE_STR_MAX: usize = 99;
/// Largest container cardinality that uses the fixed-size tag form.
pub const FIXED_CONTAINER_MAX: usize = 5;

/// Width of a length prefix or integer payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Payload size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }
}

/// What a single tag byte announces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tag {
    /// Integer stored in the tag itself.
    SmallInt(i64),
    /// Float stored in the tag itself (`-1.0`, `0.0`, `1.0`).
    FloatLiteral(f64),
    /// Byte string whose length is stored in the tag.
    InlineStr(usize),
    /// Byte string with a length prefix of the given width.
    Str(Width),
    /// Signed integer payload of the given width.
    Int(Width),
    /// 8-byte float payload.
    Double,
    /// Array with the given number of values (`0..=5`).
    FixedArr(usize),
    /// Map with the given number of pairs (`0..=5`).
    FixedMap(usize),
    Bool(bool),
    Null,
    ArrOpen,
    MapOpen,
    ArrClose,
    MapClose,
    /// Byte not assigned by the tag scheme.
    Reserved(u8),
}

impl Tag {
    /// Classifies a tag byte.
    pub const fn from_byte(byte: u8) -> Tag {
        match byte {
            0x00..=INT_POS_MAX => Tag::SmallInt(byte as i64),
            INT_NEG_FIRST..=INT_NEG_LAST => Tag::SmallInt(63 - byte as i64),
            FLOAT_NEG_ONE => Tag::FloatLiteral(-1.0),
            FLOAT_ZERO => Tag::FloatLiteral(0.0),
            FLOAT_ONE => Tag::FloatLiteral(1.0),
            STR_INLINE..=STR_INLINE_LAST => Tag::InlineStr((byte - STR_INLINE) as usize),
            STR8 => Tag::Str(Width::W8),
            STR16 => Tag::Str(Width::W16),
            STR32 => Tag::Str(Width::W32),
            STR64 => Tag::Str(Width::W64),
            INT8 => Tag::Int(Width::W8),
            INT16 => Tag::Int(Width::W16),
            INT32 => Tag::Int(Width::W32),
            INT64 => Tag::Int(Width::W64),
            DOUBLE => Tag::Double,
            ARR0..=ARR5 => Tag::FixedArr((byte - ARR0) as usize),
            MAP0..=MAP5 => Tag::FixedMap((byte - MAP0) as usize),
            TRUE => Tag::Bool(true),
            FALSE => Tag::Bool(false),
            NULL => Tag::Null,
            ARR_OPEN => Tag::ArrOpen,
            MAP_OPEN => Tag::MapOpen,
            ARR_CLOSE => Tag::ArrClose,
            MAP_CLOSE => Tag::MapClose,
            _ => Tag::Reserved(byte),
        }
    }

    /// Returns `true` for the two close markers.
    pub const fn is_close(self) -> bool {
        matches!(self, Tag::ArrClose | Tag::MapClose)
    }
}

/// Tag for an integer that fits in the tag byte, if any.
#[inline]
pub fn small_int_tag(int: i64) -> Option<u8> {
    match int {
        0..=SMALL_INT_MAX => Some(int as u8),
        SMALL_INT_MIN..=-1 => Some((63 - int) as u8),
        _ => None,
    }
}

/// Narrowest payload width that holds `int` exactly.
#[inline]
pub fn int_width(int: i64) -> Width {
    if i8::try_from(int).is_ok() {
        Width::W8
    } else if i16::try_from(int).is_ok() {
        Width::W16
    } else if i32::try_from(int).is_ok() {
        Width::W32
    } else {
        Width::W64
    }
}

/// Narrowest length-prefix width that holds `len` exactly.
#[inline]
pub fn len_width(len: u64) -> Width {
    if len <= u8::MAX as u64 {
        Width::W8
    } else if len <= u16::MAX as u64 {
        Width::W16
    } else if len <= u32::MAX as u64 {
        Width::W32
    } else {
        Width::W64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_classifies() {
        let reserved: Vec<u8> = (0..=255u8)
            .filter(|b| matches!(Tag::from_byte(*b), Tag::Reserved(_)))
            .collect();
        assert_eq!(reserved, vec![RESERVED]);
    }

    #[test]
    fn small_int_boundaries() {
        assert_eq!(Tag::from_byte(0x00), Tag::SmallInt(0));
        assert_eq!(Tag::from_byte(0x3f), Tag::SmallInt(63));
        assert_eq!(Tag::from_byte(0x40), Tag::SmallInt(-1));
        assert_eq!(Tag::from_byte(0x7b), Tag::SmallInt(-60));
        assert_eq!(small_int_tag(63), Some(0x3f));
        assert_eq!(small_int_tag(64), None);
        assert_eq!(small_int_tag(-1), Some(0x40));
        assert_eq!(small_int_tag(-60), Some(0x7b));
        assert_eq!(small_int_tag(-61), None);
    }

    #[test]
    fn small_int_tags_agree_with_classification() {
        for int in SMALL_INT_MIN..=SMALL_INT_MAX {
            let tag = small_int_tag(int).unwrap();
            assert_eq!(Tag::from_byte(tag), Tag::SmallInt(int));
        }
    }

    #[test]
    fn container_counts() {
        assert_eq!(Tag::from_byte(ARR0), Tag::FixedArr(0));
        assert_eq!(Tag::from_byte(ARR5), Tag::FixedArr(5));
        assert_eq!(Tag::from_byte(MAP0), Tag::FixedMap(0));
        assert_eq!(Tag::from_byte(MAP5), Tag::FixedMap(5));
        assert!(Tag::from_byte(ARR_CLOSE).is_close());
        assert!(Tag::from_byte(MAP_CLOSE).is_close());
        assert!(!Tag::from_byte(ARR_OPEN).is_close());
    }

    #[test]
    fn inline_str_range() {
        assert_eq!(Tag::from_byte(0x80), Tag::InlineStr(0));
        assert_eq!(Tag::from_byte(0xe3), Tag::InlineStr(INLINE_STR_MAX));
    }

    #[test]
    fn widths_are_minimal() {
        assert_eq!(int_width(-128), Width::W8);
        assert_eq!(int_width(128), Width::W16);
        assert_eq!(int_width(-32_769), Width::W32);
        assert_eq!(int_width(i32::MAX as i64 + 1), Width::W64);
        assert_eq!(len_width(255), Width::W8);
        assert_eq!(len_width(256), Width::W16);
        assert_eq!(len_width(65_536), Width::W32);
        assert_eq!(len_width(1 << 32), Width::W64);
        assert_eq!(Width::W64.bytes(), 8);
    }
}
