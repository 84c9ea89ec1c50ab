//! Measuring one card that starts at a known offset.

use alloc::string::String;
use core::ops::Range;

use crate::{
    cursor::{Cursor, CursorError},
    error::{CardError, Malformed},
    name::decode_name,
    options::CardLayout,
    search::{find, find_from},
};

/// PNG file signature that opens every image.
pub const IMAGE_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// The empty `IEND` chunk type followed by its CRC; the last 8 bytes of a PNG.
pub const IMAGE_END: [u8; 8] = [b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

/// MessagePack key whose value is the card's display name.
pub const FULLNAME_KEY: &[u8] = b"fullname";

/// Largest accepted payload length.
pub const MAX_PAYLOAD_LEN: u64 = 0xFFFF_FFFE;

/// Fixed header between the image and the package id table.
const CARD_HEADER_LEN: usize = 0x6B;

/// Trailing bytes after the payload.
const FOOTER_LEN: usize = 8;

/// Location and name of one card inside a buffer.
///
/// `image_start..image_end` is the card's PNG image and
/// `image_start..image_start + length` is the whole card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardInfo {
    /// Display name read from the payload.
    pub name: String,
    /// Offset of the image signature.
    pub image_start: usize,
    /// One past the image end marker.
    pub image_end: usize,
    /// Total byte span of the card.
    pub length: usize,
}

impl CardInfo {
    /// One past the last byte of the card.
    #[must_use]
    pub fn end(&self) -> usize {
        self.image_start + self.length
    }

    /// Byte range of the whole card.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.image_start..self.end()
    }

    /// Byte range of the card's image only.
    #[must_use]
    pub fn image_range(&self) -> Range<usize> {
        self.image_start..self.image_end
    }

    /// The same card relocated `by` bytes further into a larger buffer.
    ///
    /// Returns `None` if any offset would overflow.
    #[must_use]
    pub fn translate(&self, by: usize) -> Option<Self> {
        let image_start = self.image_start.checked_add(by)?;
        let image_end = self.image_end.checked_add(by)?;
        image_start.checked_add(self.length)?;
        Some(Self {
            name: self.name.clone(),
            image_start,
            image_end,
            length: self.length,
        })
    }
}

/// Measures the card starting at `start` using [`CardLayout::Current`].
///
/// # Errors
///
/// See [`read_card_with`].
pub fn read_card(buf: &[u8], start: usize) -> Result<CardInfo, CardError> {
    read_card_with(buf, start, CardLayout::Current)
}

/// Measures the card starting at `start`.
///
/// `start` must point at an image signature. The card's extent is derived
/// entirely from its own length fields; nothing past the card is read.
///
/// # Errors
///
/// - [`Malformed::MissingSignature`] if no signature is at `start`.
/// - [`Malformed::MissingImageEnd`] if the image has no end marker.
/// - [`Malformed::Truncated`] / [`Malformed::OffsetOverflow`] if a length field
///   points past the buffer.
/// - [`CardError::UnsupportedSize`] if the payload length exceeds
///   [`MAX_PAYLOAD_LEN`].
/// - [`Malformed::MissingName`] if the card has no `fullname` key, and any
///   error from [`decode_name`](crate::decode_name) for its value.
pub fn read_card_with(buf: &[u8], start: usize, layout: CardLayout) -> Result<CardInfo, CardError> {
    if !buf
        .get(start..)
        .is_some_and(|rest| rest.starts_with(&IMAGE_SIGNATURE))
    {
        return Err(Malformed::MissingSignature.into());
    }

    let marker = find_from(buf, &IMAGE_END, start)?.ok_or(Malformed::MissingImageEnd)?;
    let image_end = marker + IMAGE_END.len();

    let data_end = skip_card_body(buf, image_end, layout)?;

    let key = find(buf, FULLNAME_KEY, image_end, data_end - image_end)?
        .ok_or(Malformed::MissingName)?;
    let (name, _) = decode_name(&buf[..data_end], key + FULLNAME_KEY.len())?;

    tracing::trace!(start, image_end, data_end, name = %name, "measured card");

    Ok(CardInfo {
        name,
        image_start: start,
        image_end,
        length: data_end - start,
    })
}

/// Walks the header, package table, opaque block and payload; returns the
/// offset one past the footer.
fn skip_card_body(buf: &[u8], image_end: usize, layout: CardLayout) -> Result<usize, CardError> {
    let mut cur = Cursor::new(buf, image_end);
    cur.skip(CARD_HEADER_LEN, "card header")
        .map_err(CursorError::into_card)?;

    let payload_len = match layout {
        CardLayout::Current => {
            cur.skip_u32_array("package ids")
                .map_err(CursorError::into_card)?;
            skip_opaque_block(&mut cur)?;
            cur.read_u64_le("payload length")
                .map_err(CursorError::into_card)?
        }
        CardLayout::Legacy => {
            cur.skip(8, "unused fields")
                .map_err(CursorError::into_card)?;
            skip_opaque_block(&mut cur)?;
            cur.read_u32_le("payload length")
                .map(u64::from)
                .map_err(CursorError::into_card)?
        }
    };

    if payload_len > MAX_PAYLOAD_LEN {
        return Err(CardError::UnsupportedSize(payload_len));
    }
    let payload_len = usize::try_from(payload_len).map_err(|_| Malformed::OffsetOverflow {
        field: "payload",
    })?;

    cur.skip(payload_len, "payload")
        .map_err(CursorError::into_card)?;
    cur.skip(FOOTER_LEN, "footer")
        .map_err(CursorError::into_card)?;
    Ok(cur.position())
}

fn skip_opaque_block(cur: &mut Cursor<'_>) -> Result<(), CardError> {
    let len = cur
        .read_u32_le("opaque block")
        .map_err(CursorError::into_card)?;
    let len = usize::try_from(len).map_err(|_| Malformed::OffsetOverflow {
        field: "opaque block",
    })?;
    cur.skip(len, "opaque block")
        .map_err(CursorError::into_card)
}
