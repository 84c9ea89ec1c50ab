//! Walks the scene metadata header to the card count field.
//!
//! The header is positional; every field before the card count has to be
//! skipped in order:
//!
//! | field                          | encoding                      |
//! |--------------------------------|-------------------------------|
//! | scene marker                   | fixed text, located by search |
//! | version                        | 7-bit prefixed string         |
//! | language id                    | 4 bytes                       |
//! | user id, save id, title, comment | 7-bit prefixed strings      |
//! | default audio track            | 4 bytes                       |
//! | scene tags                     | `u32` count + 4-byte elements |
//! | two counts, three flags        | 11 bytes                      |
//! | character package ids          | `u32` count + 4-byte elements |
//! | map package ids                | `u32` count + 4-byte elements |
//! | flag, scalar                   | 5 bytes                       |
//! | **card count**                 | `u32`                         |

use alloc::string::String;

use bstr::ByteSlice;

use crate::{
    card::IMAGE_END,
    cursor::{Cursor, CursorError},
    error::{FormatError, SceneError},
    options::SceneOptions,
    scene::signature_at,
    search::find_from,
};

/// Fields read while walking the metadata header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SceneHeader {
    /// Header format version string.
    pub version: String,
    /// Scene title.
    pub title: String,
    /// Offset of the `u32` card count.
    pub card_count_offset: usize,
    /// Card count as currently stored.
    pub stored_card_count: u32,
    /// One past the card count; where a first card is inserted.
    pub end: usize,
}

struct Walk<'a> {
    cur: Cursor<'a>,
}

impl<'a> Walk<'a> {
    fn step<T>(
        &mut self,
        f: impl FnOnce(&mut Cursor<'a>) -> Result<T, CursorError>,
    ) -> Result<T, SceneError> {
        let at = self.cur.position();
        f(&mut self.cur).map_err(|e| SceneError::format(e.into_format(), at))
    }

    fn text(&mut self, field: &'static str) -> Result<String, SceneError> {
        let bytes = self.step(|c| c.read_prefixed(field))?;
        Ok(bytes.to_str_lossy().into_owned())
    }

    fn skip_text(&mut self, field: &'static str) -> Result<(), SceneError> {
        self.step(|c| c.read_prefixed(field)).map(|_| ())
    }

    fn skip(&mut self, len: usize, field: &'static str) -> Result<(), SceneError> {
        self.step(|c| c.skip(len, field))
    }

    fn skip_array(&mut self, field: &'static str) -> Result<(), SceneError> {
        self.step(|c| c.skip_u32_array(field)).map(|_| ())
    }
}

/// Walks the header of the scene in `buf`.
///
/// # Errors
///
/// A [`SceneError`] carrying a [`FormatError`]: the thumbnail signature,
/// its end marker or the scene marker is missing, a field runs past the end
/// of the buffer, a length prefix is malformed, or the version differs from
/// [`SceneOptions::expected_version`].
pub fn read_scene_header(buf: &[u8], options: &SceneOptions) -> Result<SceneHeader, SceneError> {
    let start = options.start_offset;
    if !signature_at(buf, start) {
        return Err(SceneError::format(FormatError::MissingSignature, start));
    }
    let image_end = find_from(buf, &IMAGE_END, start)
        .ok()
        .flatten()
        .ok_or_else(|| SceneError::format(FormatError::MissingImageEnd, start))?
        + IMAGE_END.len();
    let marker = find_from(buf, options.scene_marker, image_end)
        .ok()
        .flatten()
        .ok_or_else(|| SceneError::format(FormatError::MissingSceneMarker, image_end))?;

    let mut walk = Walk {
        cur: Cursor::new(buf, marker + options.scene_marker.len()),
    };

    let version_at = walk.cur.position();
    let version = walk.text("version")?;
    if let Some(expected) = &options.expected_version {
        if *expected != version {
            return Err(SceneError::format(
                FormatError::VersionMismatch {
                    expected: expected.clone(),
                    found: version,
                },
                version_at,
            ));
        }
    }

    walk.skip(4, "language id")?;
    walk.skip_text("user id")?;
    walk.skip_text("save id")?;
    let title = walk.text("title")?;
    walk.skip_text("comment")?;
    walk.skip(4, "default audio track")?;
    walk.skip_array("scene tags")?;
    walk.skip(11, "counts and flags")?;
    walk.skip_array("character package ids")?;
    walk.skip_array("map package ids")?;
    walk.skip(5, "flag and scalar")?;

    let card_count_offset = walk.cur.position();
    let stored_card_count = walk.step(|c| c.read_u32_le("card count"))?;

    tracing::trace!(
        version = %version,
        card_count_offset,
        stored_card_count,
        "walked scene header"
    );

    Ok(SceneHeader {
        version,
        title,
        card_count_offset,
        stored_card_count,
        end: walk.cur.position(),
    })
}

/// Offset of the scene's `u32` card count, walked with default options.
///
/// The offset depends on every variable-length field before it, so it is
/// recomputed from the buffer on every call.
///
/// # Errors
///
/// See [`read_scene_header`].
pub fn find_card_count_offset(buf: &[u8]) -> Result<usize, SceneError> {
    read_scene_header(buf, &SceneOptions::default()).map(|header| header.card_count_offset)
}
