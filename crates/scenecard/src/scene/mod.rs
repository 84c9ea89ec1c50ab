//! Scene-level operations: scanning the card list, walking the metadata
//! header and appending cards.
//!
//! A scene is laid out as
//!
//! ```text
//! [thumbnail PNG][metadata header .. card count][card 0][card 1]...[trailing data]
//! ```
//!
//! Cards are contiguous: each one starts exactly where the previous one
//! ends. The first card is found by searching for the image signature after
//! the thumbnail's own signature.

mod append;
mod header;

use alloc::vec::Vec;
use core::fmt;

pub use header::{SceneHeader, find_card_count_offset, read_scene_header};

use crate::{
    card::{CardInfo, IMAGE_SIGNATURE, read_card_with},
    error::{FormatError, SceneError},
    options::SceneOptions,
    search::{find, find_from},
};

/// `true` when an image signature starts exactly at `at`.
pub(crate) fn signature_at(buf: &[u8], at: usize) -> bool {
    matches!(find(buf, &IMAGE_SIGNATURE, at, IMAGE_SIGNATURE.len()), Ok(Some(_)))
}

/// Scans `buf` with default options.
///
/// # Errors
///
/// See [`scan_with`].
pub fn scan(buf: &[u8]) -> Result<Vec<CardInfo>, SceneError> {
    scan_with(buf, &SceneOptions::default())
}

/// Returns every card in `buf`, ordered by offset.
///
/// Either the complete list is returned or nothing is: the first corrupt
/// card aborts the scan.
///
/// # Errors
///
/// A [`SceneError`] carrying [`FormatError::MissingSignature`] if no image
/// signature sits at `options.start_offset`, or carrying the
/// [`CardError`](crate::CardError) of the first card that could not be
/// measured.
pub fn scan_with(buf: &[u8], options: &SceneOptions) -> Result<Vec<CardInfo>, SceneError> {
    let start = options.start_offset;
    if !signature_at(buf, start) {
        return Err(SceneError::format(FormatError::MissingSignature, start));
    }

    // An empty window (thumbnail signature at the very end) means no cards.
    let mut next = find_from(buf, &IMAGE_SIGNATURE, start + IMAGE_SIGNATURE.len())
        .ok()
        .flatten();

    let mut cards = Vec::new();
    while let Some(at) = next {
        let card = read_card_with(buf, at, options.layout).map_err(|e| SceneError::card(e, at))?;
        tracing::debug!(
            index = cards.len(),
            name = %card.name,
            start = card.image_start,
            length = card.length,
            "found card"
        );
        let end = card.end();
        cards.push(card);
        next = signature_at(buf, end).then_some(end);
    }

    tracing::debug!(cards = cards.len(), bytes = buf.len(), "scanned scene");
    Ok(cards)
}

/// One scene buffer together with its parsed card list.
///
/// The buffer is never modified in place; [`Scene::append_card`] returns a new
/// scene.
#[derive(Clone, PartialEq, Eq)]
pub struct Scene {
    data: Vec<u8>,
    cards: Vec<CardInfo>,
    options: SceneOptions,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("len", &self.data.len())
            .field("cards", &self.cards)
            .field("options", &self.options)
            .finish()
    }
}

impl Scene {
    /// Parses `data` with default options.
    ///
    /// # Errors
    ///
    /// See [`scan_with`].
    pub fn parse(data: Vec<u8>) -> Result<Self, SceneError> {
        Self::parse_with(data, SceneOptions::default())
    }

    /// Parses `data`, building the full card list.
    ///
    /// # Errors
    ///
    /// See [`scan_with`].
    pub fn parse_with(data: Vec<u8>, options: SceneOptions) -> Result<Self, SceneError> {
        let cards = scan_with(&data, &options)?;
        Ok(Self {
            data,
            cards,
            options,
        })
    }

    /// Cards in buffer order.
    #[must_use]
    pub fn cards(&self) -> &[CardInfo] {
        &self.cards
    }

    /// Options the scene was parsed with.
    #[must_use]
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// The raw scene bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Gives back the raw scene bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The bytes of `card` as a standalone card file.
    ///
    /// `None` if `card` does not describe a range of this scene.
    #[must_use]
    pub fn card_bytes(&self, card: &CardInfo) -> Option<&[u8]> {
        self.data.get(card.range())
    }

    /// The PNG image of `card`.
    #[must_use]
    pub fn image_bytes(&self, card: &CardInfo) -> Option<&[u8]> {
        self.data.get(card.image_range())
    }

    /// Walks the metadata header.
    ///
    /// # Errors
    ///
    /// See [`read_scene_header`].
    pub fn header(&self) -> Result<SceneHeader, SceneError> {
        read_scene_header(&self.data, &self.options)
    }

    /// Returns a new scene with the standalone card in `card` inserted after
    /// the last card, and the header's card count updated.
    ///
    /// `card` must start with the card's image signature at offset 0; bytes
    /// past the card's measured length are ignored.
    ///
    /// # Errors
    ///
    /// The [`CardError`](crate::CardError) from measuring `card` (reported at
    /// offset 0 of `card`), or a [`FormatError`] if the header cannot be
    /// walked.
    pub fn append_card(&self, card: &[u8]) -> Result<Self, SceneError> {
        let (data, cards) = append::append_card(&self.data, &self.cards, card, &self.options)?;
        Ok(Self {
            data,
            cards,
            options: self.options.clone(),
        })
    }
}
