//! Legacy flat-buffer argument decoding.
//!
//! The legacy calling convention supplies arguments as an untyped byte
//! sequence with no self-describing structure: the only way to interpret it
//! is to replay the token stream of the format string it was packed for,
//! reading each token's width in order. String-id tokens recurse into the
//! referenced format string against the same cursor, so one buffer can feed
//! an entire expansion tree.
//!
//! Unlike the legacy engine, every read here is checked against the buffer
//! bound and fails with [`DecodeError::BufferExhausted`] instead of reading
//! out of bounds.

use thiserror::Error;

use crate::arg::{Argument, Arguments};
use crate::fmt::FmtString;
use crate::render::StringSource;
use crate::token::{real_name_index, Kind};
use crate::MAX_STRING_DEPTH;

/// Legacy decode failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("legacy argument buffer exhausted at byte {offset}")]
    BufferExhausted { offset: usize },

    #[error("unknown text handle {0} in legacy argument buffer")]
    BadTextHandle(u64),

    #[error("string expansion exceeded {MAX_STRING_DEPTH} nested references")]
    DepthExceeded,
}

/// Bounded little-endian cursor over a legacy argument buffer.
///
/// Raw-string tokens resolve their 8-byte handle against the attached text
/// table, the safe stand-in for the pointers the legacy buffer carried.
#[derive(Clone, Debug)]
pub struct ArgBuffer<'a> {
    bytes: &'a [u8],
    strings: &'a [&'a str],
    pos: usize,
}

impl<'a> ArgBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            strings: &[],
            pos: 0,
        }
    }

    /// Attach the text-handle table consulted by `{STRING}` tokens.
    pub fn with_strings(bytes: &'a [u8], strings: &'a [&'a str]) -> Self {
        Self {
            bytes,
            strings,
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(width)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(DecodeError::BufferExhausted { offset: self.pos })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        let b = self.take(8)?;
        Ok(i64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.read_i64().map(|v| v as u64)
    }

    /// `{PUSH16}`: rewind two bytes so the next 16-bit read repeats.
    fn rewind16(&mut self) -> Result<(), DecodeError> {
        self.pos = self
            .pos
            .checked_sub(2)
            .ok_or(DecodeError::BufferExhausted { offset: self.pos })?;
        Ok(())
    }

    /// `{POP16}`: advance two bytes without producing an argument.
    fn skip16(&mut self) -> Result<(), DecodeError> {
        self.take(2).map(|_| ())
    }

    fn text_handle(&self, handle: u64) -> Result<&'a str, DecodeError> {
        usize::try_from(handle)
            .ok()
            .and_then(|i| self.strings.get(i).copied())
            .ok_or(DecodeError::BadTextHandle(handle))
    }
}

/// Replay `fmt`'s token stream against `cursor`, producing the typed argument
/// list the renderer consumes.
pub fn decode_args<S: StringSource + ?Sized>(
    fmt: &FmtString<'_>,
    cursor: &mut ArgBuffer<'_>,
    strings: &S,
) -> Result<Arguments, DecodeError> {
    let mut out = Arguments::new();
    decode_into(fmt, cursor, strings, &mut out, 0)?;
    Ok(out)
}

fn decode_into<S: StringSource + ?Sized>(
    fmt: &FmtString<'_>,
    cursor: &mut ArgBuffer<'_>,
    strings: &S,
    out: &mut Arguments,
    depth: usize,
) -> Result<(), DecodeError> {
    if depth > MAX_STRING_DEPTH {
        return Err(DecodeError::DepthExceeded);
    }

    for token in fmt.tokens() {
        match token.kind {
            Kind::StringId => {
                let id = cursor.read_u16()?;
                out.push(Argument::U16(id));
                // Real-name ids resolve against the fixed tables and pull
                // nothing further from the buffer.
                if real_name_index(id).is_none() {
                    if let Some(nested) = strings.lookup(id) {
                        let nested = FmtString::new(nested);
                        decode_into(&nested, cursor, strings, out, depth + 1)?;
                    }
                }
            }
            Kind::String => {
                let handle = cursor.read_u64()?;
                let text = cursor.text_handle(handle)?;
                out.push(Argument::Text(text.to_string()));
            }
            Kind::Push16 => cursor.rewind16()?,
            Kind::Pop16 => cursor.skip16()?,
            kind => match kind.legacy_width() {
                2 => out.push(Argument::U16(cursor.read_u16()?)),
                4 => out.push(Argument::I32(cursor.read_i32()?)),
                8 => out.push(Argument::I64(cursor.read_i64()?)),
                _ => {}
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn no_strings() -> HashMap<u16, String> {
        HashMap::new()
    }

    #[test]
    fn reads_token_driven_widths() {
        let fmt = FmtString::new("{COMMA16} rode {COMMA32} at {CURRENCY}");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&42u16.to_le_bytes());
        bytes.extend_from_slice(&(-70_000i32).to_le_bytes());
        bytes.extend_from_slice(&1_500i64.to_le_bytes());
        let mut cursor = ArgBuffer::new(&bytes);

        let args = decode_args(&fmt, &mut cursor, &no_strings()).unwrap();
        assert_eq!(args.get(0), Some(&Argument::U16(42)));
        assert_eq!(args.get(1), Some(&Argument::I32(-70_000)));
        assert_eq!(args.get(2), Some(&Argument::I64(1_500)));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn non_value_tokens_consume_nothing() {
        let fmt = FmtString::new("plain {{ }} \n {MOVE_X}{4} {UNKNOWN}");
        let mut cursor = ArgBuffer::new(&[]);
        let args = decode_args(&fmt, &mut cursor, &no_strings()).unwrap();
        assert!(args.is_empty());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn push_pop_move_the_cursor() {
        // PUSH16 rereads the previous 16-bit value; POP16 skips one.
        let fmt = FmtString::new("{UINT16}{PUSH16}{UINT16}{POP16}{UINT16}");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(&9u16.to_le_bytes());
        let mut cursor = ArgBuffer::new(&bytes);

        let args = decode_args(&fmt, &mut cursor, &no_strings()).unwrap();
        assert_eq!(args.get(0), Some(&Argument::U16(7)));
        assert_eq!(args.get(1), Some(&Argument::U16(7)));
        assert_eq!(args.get(2), Some(&Argument::U16(9)));
    }

    #[test]
    fn push_before_start_is_exhausted() {
        let fmt = FmtString::new("{PUSH16}");
        let mut cursor = ArgBuffer::new(&[0, 0]);
        assert_eq!(
            decode_args(&fmt, &mut cursor, &no_strings()),
            Err(DecodeError::BufferExhausted { offset: 0 })
        );
    }

    #[test]
    fn over_read_is_exhausted_not_unchecked() {
        let fmt = FmtString::new("{COMMA32}");
        let mut cursor = ArgBuffer::new(&[1, 2]);
        assert_eq!(
            decode_args(&fmt, &mut cursor, &no_strings()),
            Err(DecodeError::BufferExhausted { offset: 0 })
        );
    }

    #[test]
    fn string_id_recurses_against_same_cursor() {
        let mut strings = HashMap::new();
        strings.insert(10u16, "Ride: {STRINGID} opened".to_string());
        strings.insert(11u16, "Carousel {UINT16}".to_string());

        let fmt = FmtString::new("{STRINGID}");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10u16.to_le_bytes()); // outer id
        bytes.extend_from_slice(&11u16.to_le_bytes()); // nested id
        bytes.extend_from_slice(&3u16.to_le_bytes()); // nested UINT16
        let mut cursor = ArgBuffer::new(&bytes);

        let args = decode_args(&fmt, &mut cursor, &strings).unwrap();
        assert_eq!(args.get(0), Some(&Argument::U16(10)));
        assert_eq!(args.get(1), Some(&Argument::U16(11)));
        assert_eq!(args.get(2), Some(&Argument::U16(3)));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn real_name_id_stops_recursion() {
        let fmt = FmtString::new("{STRINGID}");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xA005u16.to_le_bytes());
        let mut cursor = ArgBuffer::new(&bytes);

        let args = decode_args(&fmt, &mut cursor, &no_strings()).unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(args.get(0), Some(&Argument::U16(0xA005)));
    }

    #[test]
    fn text_handles_resolve_against_attached_table() {
        let fmt = FmtString::new("{STRING}");
        let bytes = 1u64.to_le_bytes();
        let handles = ["zero", "one"];
        let mut cursor = ArgBuffer::with_strings(&bytes, &handles);

        let args = decode_args(&fmt, &mut cursor, &no_strings()).unwrap();
        assert_eq!(args.get(0), Some(&Argument::Text("one".to_string())));

        let bytes = 9u64.to_le_bytes();
        let mut cursor = ArgBuffer::with_strings(&bytes, &handles);
        assert_eq!(
            decode_args(&fmt, &mut cursor, &no_strings()),
            Err(DecodeError::BadTextHandle(9))
        );
    }

    #[test]
    fn cyclic_reference_hits_depth_limit() {
        let mut strings = HashMap::new();
        strings.insert(20u16, "loop {STRINGID}".to_string());

        let fmt = FmtString::new("{STRINGID}");
        let bytes: Vec<u8> = std::iter::repeat(20u16.to_le_bytes())
            .take(MAX_STRING_DEPTH + 4)
            .flatten()
            .collect();
        let mut cursor = ArgBuffer::new(&bytes);

        assert_eq!(
            decode_args(&fmt, &mut cursor, &strings),
            Err(DecodeError::DepthExceeded)
        );
    }
}
