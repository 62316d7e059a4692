//! UTF-16 to UTF-8 transcoding.
//!
//! Text that reaches a content stream is usually available as UTF-16 code
//! units (character codes as seen by the font metrics). This crate turns those
//! units into the byte sequence that is embedded in the output, combining
//! surrogate pairs into a single 4-byte sequence.

use std::fmt;

const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The input ended right after a high surrogate.
    IncompleteSurrogatePair { index: usize },
    /// A high surrogate was followed by something other than a low surrogate.
    InvalidLowSurrogate { index: usize, unit: u16 },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::IncompleteSurrogatePair { index } => {
                write!(f, "incomplete surrogate pair at index {}", index)
            }
            EncodeError::InvalidLowSurrogate { index, unit } => write!(
                f,
                "second char code 0x{:04x} at index {} in surrogate pair out of range",
                unit, index
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    InvalidLeadByte { index: usize, byte: u8 },
    InvalidContinuation { index: usize, byte: u8 },
    /// A multi byte sequence was cut off by the end of the input.
    Truncated { index: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidLeadByte { index, byte } => {
                write!(f, "invalid lead byte 0x{:02x} at index {}", byte, index)
            }
            DecodeError::InvalidContinuation { index, byte } => {
                write!(f, "invalid continuation byte 0x{:02x} at index {}", byte, index)
            }
            DecodeError::Truncated { index } => write!(f, "truncated sequence starting at index {}", index),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Iterates the code points of UTF-16 input.
///
/// Lone low surrogates are passed through as they are, only a high surrogate
/// demands a partner.
struct CodePoints<'a> {
    units: &'a [u16],
    index: usize,
}

impl<'a> Iterator for CodePoints<'a> {
    type Item = Result<u32, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &unit = self.units.get(self.index)?;
        let index = self.index;
        self.index += 1;

        if !HIGH_SURROGATES.contains(&unit) {
            return Some(Ok(u32::from(unit)));
        }

        let low = match self.units.get(self.index) {
            Some(&low) => low,
            None => return Some(Err(EncodeError::IncompleteSurrogatePair { index })),
        };
        if !LOW_SURROGATES.contains(&low) {
            return Some(Err(EncodeError::InvalidLowSurrogate {
                index: self.index,
                unit: low,
            }));
        }
        self.index += 1;

        Some(Ok(0x10000 + ((u32::from(unit) & 0x3ff) << 10) + (u32::from(low) & 0x3ff)))
    }
}

fn code_points(units: &[u16]) -> CodePoints<'_> {
    CodePoints { units, index: 0 }
}

fn sequence_len(code_point: u32) -> usize {
    match code_point {
        0..=0x7f => 1,
        0x80..=0x7ff => 2,
        0x800..=0xffff => 3,
        _ => 4,
    }
}

/// Number of bytes `encode` produces for `units`.
pub fn encoded_len(units: &[u16]) -> Result<usize, EncodeError> {
    code_points(units).try_fold(0, |len, c| c.map(|c| len + sequence_len(c)))
}

/// Encode UTF-16 code units as UTF-8.
pub fn encode(units: &[u16]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(units.len());
    encode_into(units, &mut out)?;
    Ok(out)
}

/// Append the UTF-8 encoding of `units` to `out`.
///
/// On error `out` is left untouched.
pub fn encode_into(units: &[u16], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let start = out.len();
    for c in code_points(units) {
        let c = match c {
            Ok(c) => c,
            Err(err) => {
                out.truncate(start);
                return Err(err);
            }
        };
        match sequence_len(c) {
            1 => out.push(c as u8),
            2 => out.extend_from_slice(&[(c >> 6) as u8 | 0xc0, (c & 0x3f) as u8 | 0x80]),
            3 => out.extend_from_slice(&[
                (c >> 12) as u8 | 0xe0,
                ((c >> 6) & 0x3f) as u8 | 0x80,
                (c & 0x3f) as u8 | 0x80,
            ]),
            _ => out.extend_from_slice(&[
                (c >> 18) as u8 | 0xf0,
                ((c >> 12) & 0x3f) as u8 | 0x80,
                ((c >> 6) & 0x3f) as u8 | 0x80,
                (c & 0x3f) as u8 | 0x80,
            ]),
        }
    }
    Ok(())
}

/// Decode UTF-8 bytes back into UTF-16 code units.
///
/// 3 byte sequences that encode a surrogate are accepted, they are what
/// `encode` produces for lone low surrogates. Overlong forms and code points
/// past U+10FFFF are rejected.
pub fn decode(bytes: &[u8]) -> Result<Vec<u16>, DecodeError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while let Some(&lead) = bytes.get(index) {
        let (len, initial) = match lead {
            0x00..=0x7f => (1, u32::from(lead)),
            0xc2..=0xdf => (2, u32::from(lead & 0x1f)),
            0xe0..=0xef => (3, u32::from(lead & 0x0f)),
            0xf0..=0xf4 => (4, u32::from(lead & 0x07)),
            _ => return Err(DecodeError::InvalidLeadByte { index, byte: lead }),
        };
        let sequence = bytes
            .get(index..index + len)
            .ok_or(DecodeError::Truncated { index })?;

        let mut c = initial;
        for (offset, &byte) in sequence.iter().enumerate().skip(1) {
            if byte & 0xc0 != 0x80 {
                return Err(DecodeError::InvalidContinuation {
                    index: index + offset,
                    byte,
                });
            }
            c = (c << 6) | u32::from(byte & 0x3f);
        }
        // overlong forms and code points past U+10FFFF
        if sequence_len(c) != len || c > 0x10ffff {
            return Err(DecodeError::InvalidLeadByte { index, byte: lead });
        }

        if c >= 0x10000 {
            let c = c - 0x10000;
            units.push(0xd800 | (c >> 10) as u16);
            units.push(0xdc00 | (c & 0x3ff) as u16);
        } else {
            units.push(c as u16);
        }
        index += len;
    }

    Ok(units)
}
