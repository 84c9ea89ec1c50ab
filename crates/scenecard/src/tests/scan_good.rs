use alloc::vec;

use super::fixtures::{CardBuilder, SceneBuilder};
use crate::{CardLayout, Scene, SceneOptions, read_card, read_card_with, scan, scan_with};

#[test]
fn scene_without_cards_is_empty() {
    let built = SceneBuilder::default().build();
    assert_eq!(scan(&built.bytes), Ok(vec![]));
}

#[test]
fn single_card_spans_to_end_of_buffer() {
    let card = CardBuilder::new("Aoi").build();
    let built = SceneBuilder::with_cards([card.clone()]).build();

    let cards = scan(&built.bytes).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Aoi");
    assert_eq!(cards[0].image_start, built.card_offsets[0]);
    assert_eq!(
        cards[0].image_end,
        built.card_offsets[0] + CardBuilder::image_len()
    );
    assert_eq!(cards[0].length, card.len());
    assert_eq!(cards[0].end(), built.bytes.len());
}

#[test]
fn cards_are_returned_in_buffer_order() {
    let names = ["Aoi", "Beni", "Chika", "Daria"];
    let built = SceneBuilder::with_cards(names.map(|n| CardBuilder::new(n).build())).build();

    let cards = scan(&built.bytes).unwrap();
    assert_eq!(cards.iter().map(|c| c.name.as_str()).collect::<alloc::vec::Vec<_>>(), names);
    for (card, &offset) in cards.iter().zip(&built.card_offsets) {
        assert_eq!(card.image_start, offset);
        assert!(card.image_start <= card.image_end && card.image_end <= card.end());
    }
    for pair in cards.windows(2) {
        assert_eq!(pair[0].end(), pair[1].image_start);
    }
}

#[test]
fn trailing_bytes_end_the_scan() {
    let mut builder = SceneBuilder::with_cards([CardBuilder::new("Aoi").build()]);
    builder.trailing = b"\x00\x00\x00\x00extra data".to_vec();
    let built = builder.build();

    let cards = scan(&built.bytes).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].end(), built.bytes.len() - builder.trailing.len());
}

#[test]
fn card_read_ignores_bytes_past_its_end() {
    let mut bytes = CardBuilder::new("Aoi").build();
    let len = bytes.len();
    bytes.extend_from_slice(b"anything at all");
    assert_eq!(read_card(&bytes, 0).unwrap().length, len);
}

#[test]
fn empty_package_table_and_opaque_block() {
    let mut card = CardBuilder::new("Eri");
    card.package_ids.clear();
    card.opaque.clear();
    let bytes = card.build();
    assert_eq!(read_card(&bytes, 0).unwrap().length, bytes.len());
}

#[test]
fn legacy_layout_needs_legacy_options() {
    let cards = ["Old", "Older"].map(|n| CardBuilder::new(n).layout(CardLayout::Legacy).build());
    let built = SceneBuilder::with_cards(cards.clone()).build();

    let options = SceneOptions {
        layout: CardLayout::Legacy,
        ..Default::default()
    };
    let found = scan_with(&built.bytes, &options).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].name, "Older");
    assert_eq!(found[1].end(), built.bytes.len());

    assert_eq!(
        read_card_with(&cards[0], 0, CardLayout::Legacy).unwrap().length,
        cards[0].len()
    );
    assert!(scan(&built.bytes).is_err());
}

#[test]
fn scan_honours_start_offset() {
    let built = SceneBuilder::with_cards([CardBuilder::new("Aoi").build()]).build();
    let mut shifted = b"prefix--".to_vec();
    shifted.extend_from_slice(&built.bytes);

    let options = SceneOptions {
        start_offset: 8,
        ..Default::default()
    };
    let cards = scan_with(&shifted, &options).unwrap();
    assert_eq!(cards[0].image_start, built.card_offsets[0] + 8);
    assert!(scan(&shifted).unwrap_err().is_format());
}

#[test]
fn scene_view_exposes_card_ranges() {
    let card = CardBuilder::new("Aoi").build();
    let built = SceneBuilder::with_cards([card.clone()]).build();
    let scene = Scene::parse(built.bytes.clone()).unwrap();

    let info = &scene.cards()[0];
    assert_eq!(scene.card_bytes(info), Some(card.as_slice()));
    assert_eq!(
        scene.image_bytes(info),
        Some(&card[..CardBuilder::image_len()])
    );

    let header = scene.header().unwrap();
    assert_eq!(header.version, "0.0.2");
    assert_eq!(header.title, "Night Walk");
    assert_eq!(header.card_count_offset, built.count_offset);
    assert_eq!(header.stored_card_count, 1);
    assert_eq!(header.end, built.count_offset + 4);
    assert_eq!(scene.into_bytes(), built.bytes);
}
