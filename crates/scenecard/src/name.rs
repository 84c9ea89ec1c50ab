//! Decoder for the single string value stored after the `fullname` key.
//!
//! The card payload is MessagePack, but only the string headers are
//! understood here:
//!
//! | leading byte  | length                      | header bytes |
//! |---------------|-----------------------------|--------------|
//! | `0b101x_xxxx` | low five bits               | 1            |
//! | `0xD9`        | next byte                   | 2            |
//! | `0xDA`        | next two bytes, BE signed   | 3            |
//! | `0xDB`        | next four bytes, BE signed  | 5            |
//!
//! The text is decoded lossily: invalid UTF-8 becomes U+FFFD.

use alloc::string::String;

use bstr::ByteSlice;

use crate::{
    cursor::{Cursor, CursorError},
    error::{CardError, Encoding},
};

const FIXSTR_MASK: u8 = 0b1110_0000;
const FIXSTR: u8 = 0b1010_0000;
const STR8: u8 = 0xD9;
const STR16: u8 = 0xDA;
const STR32: u8 = 0xDB;

const FIELD: &str = "name";

fn non_negative(len: i64) -> Result<usize, CardError> {
    usize::try_from(len).map_err(|_| Encoding::NegativeLength(len).into())
}

/// Decodes the string whose header starts at `offset`.
///
/// Returns the text and the total number of bytes consumed (header plus
/// text).
///
/// # Errors
///
/// [`Encoding::UnknownTag`] for a non-string header,
/// [`Encoding::NegativeLength`] for a `str16`/`str32` length with the sign bit
/// set, and [`Malformed::Truncated`] when the header or text runs past the
/// end of `buf`.
///
/// # Examples
///
/// ```rust
/// let buf = [0xA3, b'A', b'y', b'a'];
/// assert_eq!(scenecard::decode_name(&buf, 0), Ok(("Aya".to_string(), 4)));
/// ```
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), CardError> {
    let mut cur = Cursor::new(buf, offset);
    let tag = cur.take(1, FIELD).map_err(CursorError::into_card)?[0];

    let len = if tag & FIXSTR_MASK == FIXSTR {
        usize::from(tag & !FIXSTR_MASK)
    } else {
        match tag {
            STR8 => usize::from(cur.take(1, FIELD).map_err(CursorError::into_card)?[0]),
            STR16 => {
                let raw = cur.take(2, FIELD).map_err(CursorError::into_card)?;
                non_negative(i16::from_be_bytes([raw[0], raw[1]]).into())?
            }
            STR32 => {
                let raw = cur.take(4, FIELD).map_err(CursorError::into_card)?;
                non_negative(i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]).into())?
            }
            other => return Err(Encoding::UnknownTag(other).into()),
        }
    };

    let text = cur.take(len, FIELD).map_err(CursorError::into_card)?;
    Ok((text.to_str_lossy().into_owned(), cur.position() - offset))
}
