//! Logic behind the `qpack-pack` and `qpack-unpack` binaries.
//!
//! - `qpack-pack`: JSON (stdin) → qpack (stdout)
//! - `qpack-unpack`: qpack (stdin) → pretty JSON (stdout)
//!
//! Both accept `--hex` to exchange lowercase hex text instead of raw bytes.

pub mod logger;

use qpack::json::{from_json, merged_keys, to_json};
use qpack::{
    DecodeError, DecoderOptions, EncodeError, QpackDecoder, QpackEncoder, Value, ValueIter,
};
use thiserror::Error;
use tracing::{debug, warn};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("encode: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid hex input: {0}")]
    Hex(String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
}

// ── Options ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackOptions {
    pub hex: bool,
    pub verbose: bool,
}

impl PackOptions {
    /// Parses the arguments following the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = PackOptions::default();
        for arg in args {
            match arg.as_ref() {
                "--hex" => opts.hex = true,
                "--verbose" | "-v" => opts.verbose = true,
                other => return Err(CliError::UnknownFlag(other.to_string())),
            }
        }
        Ok(opts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    pub hex: bool,
    pub all: bool,
    pub verbose: bool,
    pub decoder: DecoderOptions,
}

impl UnpackOptions {
    /// Parses the arguments following the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = UnpackOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--hex" => opts.hex = true,
                "--all" => opts.all = true,
                "--verbose" | "-v" => opts.verbose = true,
                "--legacy" => {
                    opts.decoder.reserved_as_null = true;
                    opts.decoder.legacy_short_length = true;
                }
                "--max-depth" => {
                    let value = args.next().ok_or(CliError::MissingValue("--max-depth"))?;
                    opts.decoder.max_depth = parse_depth(value.as_ref())?;
                }
                other => return Err(CliError::UnknownFlag(other.to_string())),
            }
        }
        Ok(opts)
    }
}

/// `none` lifts the limit; anything else must be a positive integer.
fn parse_depth(value: &str) -> Result<Option<usize>, CliError> {
    if value == "none" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(CliError::InvalidValue {
            flag: "--max-depth",
            value: value.to_string(),
        }),
    }
}

// ── qpack-pack ────────────────────────────────────────────────────────────

/// Encodes a JSON document to qpack, or to hex text when `opts.hex` is set.
pub fn pack(json: &str, opts: &PackOptions) -> Result<Vec<u8>, CliError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let value = from_json(&doc)?;
    let bin = QpackEncoder::new().encode(&value)?;
    debug!("packed {} bytes of JSON into {} bytes", json.len(), bin.len());
    if opts.hex {
        let mut text = to_hex(&bin);
        text.push('\n');
        return Ok(text.into_bytes());
    }
    Ok(bin)
}

// ── qpack-unpack ──────────────────────────────────────────────────────────

/// Decodes qpack input to a pretty-printed JSON string.
pub fn unpack(input: &[u8], opts: &UnpackOptions) -> Result<String, CliError> {
    let bin = if opts.hex {
        from_hex(input)?
    } else {
        input.to_vec()
    };
    let decoder = QpackDecoder::with_options(opts.decoder);

    let doc = if opts.all {
        let values = ValueIter::with_decoder(decoder, &bin)
            .map(|item| item.map(|v| json_with_warnings(&v)))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("decoded {} values from {} bytes", values.len(), bin.len());
        serde_json::Value::Array(values)
    } else {
        let (value, next) = decoder.decode(&bin, 0)?;
        debug!("decoded one value from {next} bytes");
        if next < bin.len() {
            warn!("ignoring {} trailing bytes at offset {next}", bin.len() - next);
        }
        json_with_warnings(&value)
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn json_with_warnings(value: &Value) -> serde_json::Value {
    let merged = merged_keys(value);
    if merged > 0 {
        warn!("{merged} map pairs share a JSON key with an earlier pair; later values win");
    }
    to_json(value)
}

// ── Hex ───────────────────────────────────────────────────────────────────

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

pub fn to_hex(bin: &[u8]) -> String {
    let mut out = String::with_capacity(bin.len() * 2);
    for b in bin {
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Parses hex text. ASCII whitespace between digits is ignored.
pub fn from_hex(text: &[u8]) -> Result<Vec<u8>, CliError> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::Hex("odd number of digits".to_string()));
    }
    digits
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(c: u8) -> Result<u8, CliError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(CliError::Hex(format!("unexpected character {:?}", c as char))),
    }
}
