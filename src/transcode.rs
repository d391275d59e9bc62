//! Base64 transcoding between byte buffers and text payloads.
//!
//! Uses the standard alphabet (`A-Z a-z 0-9 + /`) with `=` padding and no
//! line wrapping. Every group of 3 input bytes becomes 4 symbols; a trailing
//! group of 1 or 2 bytes is zero-filled and padded with `==` or `=`.
//!
//! ```rust
//! let payload = pixelwire::encode(&[255, 0, 0, 255]);
//! assert_eq!(payload.as_str(), "/wAA/w==");
//! assert_eq!(pixelwire::decode(payload.as_str())?, [255, 0, 0, 255]);
//! # Ok::<(), pixelwire::At<pixelwire::Error>>(())
//! ```

use crate::error::{Error, PayloadError, Result};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use whereat::*;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';
const INVALID: u8 = 0xff;

static DECODE_TABLE: [u8; 256] = decode_table();

const fn decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Length of the text payload produced for `len` input bytes.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Encode bytes to a text payload.
///
/// Never fails; empty input yields an empty payload.
pub fn encode(bytes: &[u8]) -> TextPayload {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    let mut groups = bytes.chunks_exact(3);

    for group in &mut groups {
        let bits = u32::from(group[0]) << 16 | u32::from(group[1]) << 8 | u32::from(group[2]);
        push_symbols(&mut out, bits, 4);
    }

    match *groups.remainder() {
        [a] => {
            push_symbols(&mut out, u32::from(a) << 16, 2);
            out.push_str("==");
        }
        [a, b] => {
            push_symbols(&mut out, u32::from(a) << 16 | u32::from(b) << 8, 3);
            out.push('=');
        }
        _ => {}
    }

    TextPayload(out)
}

/// Decode a text payload back to bytes.
///
/// Fails with [`Error::MalformedPayload`] if the length is not a multiple of
/// 4, a character falls outside the alphabet, or `=` appears anywhere but the
/// last one or two positions. The empty string decodes to an empty buffer.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let padding = validate(text).map_err(|e| at!(Error::from(e)))?;
    Ok(decode_unchecked(text.as_bytes(), padding))
}

/// Number of bytes `text` decodes to, without decoding it.
pub fn decoded_len(text: &str) -> Result<usize> {
    let padding = validate(text).map_err(|e| at!(Error::from(e)))?;
    Ok(text.len() / 4 * 3 - padding)
}

/// Push the top `count` sextets of a 24-bit group.
#[inline]
fn push_symbols(out: &mut String, bits: u32, count: usize) {
    for i in 0..count {
        let index = (bits >> (18 - 6 * i)) & 0x3f;
        out.push(ALPHABET[index as usize] as char);
    }
}

/// Check structure and return the number of trailing padding symbols.
fn validate(text: &str) -> core::result::Result<usize, PayloadError> {
    let bytes = text.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(PayloadError::Length(bytes.len()));
    }

    let padding = bytes.iter().rev().take(2).take_while(|&&b| b == PAD).count();
    let body = &bytes[..bytes.len() - padding];

    for (index, &b) in body.iter().enumerate() {
        if b == PAD {
            return Err(PayloadError::MisplacedPadding { index });
        }
        if DECODE_TABLE[b as usize] == INVALID {
            // Everything before `index` is ASCII, so it sits on a char boundary.
            let symbol = text[index..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(PayloadError::InvalidSymbol { index, symbol });
        }
    }

    Ok(padding)
}

/// Decode a payload that already passed [`validate`].
///
/// Bits below the last whole byte of a padded group are ignored.
fn decode_unchecked(text: &[u8], padding: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() / 4 * 3);

    for quad in text.chunks_exact(4) {
        let bits = quad.iter().fold(0u32, |acc, &b| {
            let sextet = if b == PAD { 0 } else { DECODE_TABLE[b as usize] };
            acc << 6 | u32::from(sextet)
        });
        out.extend_from_slice(&[(bits >> 16) as u8, (bits >> 8) as u8, bits as u8]);
    }

    out.truncate(out.len() - padding);
    out
}

/// A structurally valid base64 text payload.
///
/// Obtained either from [`encode`] or from [`TextPayload::parse`], so holding
/// one means decoding cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextPayload(String);

impl TextPayload {
    /// Validate `text` and wrap it.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        validate(&text).map_err(|e| at!(Error::from(e)))?;
        Ok(TextPayload(text))
    }

    /// The payload text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the payload text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the payload text in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty (encodes an empty buffer).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of trailing `=` symbols (0, 1 or 2).
    #[must_use]
    pub fn padding(&self) -> usize {
        self.0.bytes().rev().take(2).take_while(|&b| b == PAD).count()
    }

    /// Number of bytes this payload decodes to.
    #[must_use]
    pub fn decoded_len(&self) -> usize {
        self.0.len() / 4 * 3 - self.padding()
    }

    /// Decode to bytes.
    #[must_use]
    pub fn decode(&self) -> Vec<u8> {
        decode_unchecked(self.0.as_bytes(), self.padding())
    }
}

impl fmt::Display for TextPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TextPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TextPayload> for String {
    fn from(payload: TextPayload) -> Self {
        payload.0
    }
}

impl FromStr for TextPayload {
    type Err = At<Error>;

    fn from_str(s: &str) -> Result<Self> {
        TextPayload::parse(s)
    }
}
