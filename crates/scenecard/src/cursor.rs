//! Bounds-checked forward cursor over a byte buffer.
//!
//! Every read and skip is checked against the end of the buffer and for
//! `usize` overflow. Failures carry the name of the field being read so the
//! card parser and the header walker can map them onto their own error kinds.

use crate::error::{CardError, FormatError, Malformed};

/// Why the cursor could not advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorError {
    Truncated(&'static str),
    Overflow(&'static str),
    BadPrefix(usize),
}

impl CursorError {
    pub(crate) fn into_card(self) -> CardError {
        match self {
            CursorError::Overflow(field) => Malformed::OffsetOverflow { field }.into(),
            CursorError::Truncated(field) => Malformed::Truncated { field }.into(),
            CursorError::BadPrefix(_) => Malformed::Truncated { field: "length prefix" }.into(),
        }
    }

    pub(crate) fn into_format(self) -> FormatError {
        match self {
            CursorError::Truncated(field) | CursorError::Overflow(field) => {
                FormatError::TruncatedHeader { field }
            }
            CursorError::BadPrefix(offset) => FormatError::BadLengthPrefix { offset },
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Borrows `len` bytes and advances past them.
    pub(crate) fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], CursorError> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(CursorError::Overflow(field))?;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(CursorError::Truncated(field))?;
        self.pos = end;
        Ok(bytes)
    }

    /// Advances by `len` bytes. Landing exactly on the end of the buffer is
    /// allowed.
    pub(crate) fn skip(&mut self, len: usize, field: &'static str) -> Result<(), CursorError> {
        self.take(len, field).map(|_| ())
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], CursorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    pub(crate) fn read_u32_le(&mut self, field: &'static str) -> Result<u32, CursorError> {
        self.array::<4>(field).map(u32::from_le_bytes)
    }

    pub(crate) fn read_u64_le(&mut self, field: &'static str) -> Result<u64, CursorError> {
        self.array::<8>(field).map(u64::from_le_bytes)
    }

    /// Skips a `u32` element count followed by that many 4-byte elements.
    pub(crate) fn skip_u32_array(&mut self, field: &'static str) -> Result<u32, CursorError> {
        let count = self.read_u32_le(field)?;
        let len = usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(4))
            .ok_or(CursorError::Overflow(field))?;
        self.skip(len, field)?;
        Ok(count)
    }

    /// Reads a length encoded 7 bits per byte, least significant group first.
    ///
    /// A byte with the top bit clear ends the prefix; at most five bytes are
    /// accepted.
    pub(crate) fn read_7bit_len(&mut self, field: &'static str) -> Result<usize, CursorError> {
        let start = self.pos;
        let mut value: u64 = 0;
        for i in 0..5 {
            let byte = self.array::<1>(field)?[0];
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return usize::try_from(value).map_err(|_| CursorError::Overflow(field));
            }
        }
        Err(CursorError::BadPrefix(start))
    }

    /// Borrows a string stored behind a 7-bit length prefix.
    pub(crate) fn read_prefixed(&mut self, field: &'static str) -> Result<&'a [u8], CursorError> {
        let len = self.read_7bit_len(field)?;
        self.take(len, field)
    }
}
