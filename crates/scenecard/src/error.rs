use alloc::string::String;

use thiserror::Error;

/// Misuse of [`find`](crate::find).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The requested window is empty or does not fit inside the source.
    #[error("search window {start}+{length} does not fit a source of {source_len} bytes")]
    InvalidRange {
        /// First byte of the window.
        start: usize,
        /// Window length in bytes.
        length: usize,
        /// Length of the searched buffer.
        source_len: usize,
    },
    /// The pattern to search for is empty.
    #[error("search pattern is empty")]
    EmptyPattern,
}

/// Why a card could not be measured.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The card does not start with the image signature.
    #[error("card does not start with a PNG signature")]
    MissingSignature,
    /// No image end marker follows the signature.
    #[error("card image has no IEND chunk")]
    MissingImageEnd,
    /// The payload carries no `fullname` key.
    #[error("card payload has no fullname key")]
    MissingName,
    /// A field runs past the end of the buffer.
    #[error("card is truncated inside {field}")]
    Truncated {
        /// Field being read.
        field: &'static str,
    },
    /// Skipping a field overflows `usize`.
    #[error("offset overflow while skipping {field}")]
    OffsetOverflow {
        /// Field being skipped.
        field: &'static str,
    },
}

/// String header variants the name decoder refuses.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The leading byte is not a string header.
    #[error("unrecognized string format byte 0x{0:02X}")]
    UnknownTag(u8),
    /// A `str16`/`str32` header decoded to a negative length.
    #[error("negative string length {0}")]
    NegativeLength(i64),
}

/// Failure while measuring a single card. Never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    /// A search was issued over an invalid window.
    #[error(transparent)]
    InvalidRange(#[from] SearchError),
    /// The card structure is broken.
    #[error("malformed card: {0}")]
    Malformed(#[from] Malformed),
    /// The payload length exceeds [`MAX_PAYLOAD_LEN`](crate::MAX_PAYLOAD_LEN).
    #[error("card payload of {0} bytes is too large")]
    UnsupportedSize(u64),
    /// The name value uses an unsupported string header.
    #[error(transparent)]
    UnsupportedEncoding(#[from] Encoding),
}

/// The buffer is not a scene this crate understands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The buffer does not start with the image signature.
    #[error("file does not begin with the PNG format signature")]
    MissingSignature,
    /// The scene thumbnail has no end marker.
    #[error("scene image has no IEND chunk")]
    MissingImageEnd,
    /// The scene marker text is absent.
    #[error("scene marker not found")]
    MissingSceneMarker,
    /// A header field runs past the end of the buffer.
    #[error("scene header is truncated inside {field}")]
    TruncatedHeader {
        /// Field being read.
        field: &'static str,
    },
    /// A string length prefix does not terminate within five bytes.
    #[error("bad 7-bit length prefix at offset {offset:#x}")]
    BadLengthPrefix {
        /// Offset of the first prefix byte.
        offset: usize,
    },
    /// The scene was written by a header layout we were told not to accept.
    #[error("scene version {found:?} does not match expected {expected:?}")]
    VersionMismatch {
        /// Version requested through [`SceneOptions`](crate::SceneOptions).
        expected: String,
        /// Version stored in the scene.
        found: String,
    },
    /// The header walk ended inside card data.
    #[error("card count at {count_offset:#x} overlaps the first card at {first_card:#x}")]
    HeaderOverlapsCards {
        /// Located card count offset.
        count_offset: usize,
        /// Image start of the first card.
        first_card: usize,
    },
}

/// Cause carried by a [`SceneError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorSource {
    /// Not recognized as a scene.
    #[error("{0}")]
    Format(#[from] FormatError),
    /// Recognized as a scene, but a card was corrupt.
    #[error("{0}")]
    Card(#[from] CardError),
}

/// The single failure reported when a scene cannot be fully processed.
///
/// `offset` is the byte position the failing step started at: the card's
/// image start for card failures, the scan or header start otherwise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load scene: {source} (at offset {offset:#x})")]
pub struct SceneError {
    pub(crate) source: ErrorSource,
    pub(crate) offset: usize,
}

impl SceneError {
    pub(crate) fn format(error: FormatError, offset: usize) -> Self {
        Self {
            source: ErrorSource::Format(error),
            offset,
        }
    }

    pub(crate) fn card(error: CardError, offset: usize) -> Self {
        Self {
            source: ErrorSource::Card(error),
            offset,
        }
    }

    /// The underlying cause.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// Byte offset the failing step started at.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `true` when the buffer was not recognized as a scene at all.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self.source, ErrorSource::Format(_))
    }

    /// The card-level cause, if a card was corrupt.
    #[must_use]
    pub fn card_error(&self) -> Option<&CardError> {
        match &self.source {
            ErrorSource::Card(e) => Some(e),
            ErrorSource::Format(_) => None,
        }
    }
}
