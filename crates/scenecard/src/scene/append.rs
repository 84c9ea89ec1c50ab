use alloc::vec::Vec;

use crate::{
    card::{CardInfo, read_card_with},
    error::{FormatError, Malformed, SceneError},
    options::SceneOptions,
    scene::header::read_scene_header,
};

/// Splices the standalone card in `card` after the last card of `scene` and
/// rewrites the card count.
///
/// `cards` must be the scan result for `scene`. The count offset is located
/// on the original buffer; it precedes every card, so inserting card data
/// does not move it.
pub(super) fn append_card(
    scene: &[u8],
    cards: &[CardInfo],
    card: &[u8],
    options: &SceneOptions,
) -> Result<(Vec<u8>, Vec<CardInfo>), SceneError> {
    let measured = read_card_with(card, 0, options.layout).map_err(|e| SceneError::card(e, 0))?;

    let header = read_scene_header(scene, options)?;
    if let Some(first) = cards.first() {
        if header.end > first.image_start {
            return Err(SceneError::format(
                FormatError::HeaderOverlapsCards {
                    count_offset: header.card_count_offset,
                    first_card: first.image_start,
                },
                header.card_count_offset,
            ));
        }
    }

    let insert_at = cards.last().map_or(header.end, CardInfo::end);
    let total = cards.len() + 1;
    let overflow = |field| SceneError::card(Malformed::OffsetOverflow { field }.into(), insert_at);
    let count = u32::try_from(total).map_err(|_| overflow("card count"))?;
    let placed = measured.translate(insert_at).ok_or_else(|| overflow("card offset"))?;

    if header.stored_card_count as usize != cards.len() {
        tracing::warn!(
            stored = header.stored_card_count,
            scanned = cards.len(),
            "stored card count disagrees with scanned cards; rewriting from the scan"
        );
    }

    let mut out = Vec::with_capacity(scene.len() + measured.length);
    out.extend_from_slice(&scene[..insert_at]);
    out.extend_from_slice(&card[..measured.length]);
    out.extend_from_slice(&scene[insert_at..]);

    let at = header.card_count_offset;
    out[at..at + 4].copy_from_slice(&count.to_le_bytes());

    tracing::debug!(
        name = %placed.name,
        insert_at,
        length = placed.length,
        cards = total,
        "appended card"
    );

    let mut list = Vec::with_capacity(total);
    list.extend_from_slice(cards);
    list.push(placed);
    Ok((out, list))
}
