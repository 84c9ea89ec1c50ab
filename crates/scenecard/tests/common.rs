#![allow(missing_docs, dead_code)]

//! Minimal scene writer shared by the integration tests.
//!
//! Layout produced by [`scene`], with offsets for an empty title and the
//! default marker:
//!
//! - `0..21` thumbnail (`signature`, `THUMB`, `IEND`)
//! - `21..40` scene marker
//! - `94..98` card count
//! - `98..` cards
//!
//! Each card from [`card`] is `160 + name.len()` bytes with its image
//! ending 19 bytes in.

use scenecard::{DEFAULT_SCENE_MARKER, IMAGE_END, IMAGE_SIGNATURE};

pub const TITLE: &str = "Snapshot";
pub const COUNT_OFFSET: usize = 94;

pub fn card(name: &str) -> Vec<u8> {
    assert!(name.len() < 32);
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(b"IMG");
    out.extend_from_slice(&IMAGE_END);
    out.extend_from_slice(&[0; 0x6B]);
    out.extend_from_slice(&0u32.to_le_bytes()); // package ids
    out.extend_from_slice(&0u32.to_le_bytes()); // opaque block

    let mut payload = vec![0xA8];
    payload.extend_from_slice(b"fullname");
    payload.push(0xA0 | u8::try_from(name.len()).unwrap());
    payload.extend_from_slice(name.as_bytes());

    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0xFF; 8]);
    out
}

fn text(out: &mut Vec<u8>, s: &str) {
    out.push(u8::try_from(s.len()).unwrap());
    out.extend_from_slice(s.as_bytes());
}

pub fn scene(cards: &[Vec<u8>]) -> Vec<u8> {
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(b"THUMB");
    out.extend_from_slice(&IMAGE_END);
    out.extend_from_slice(DEFAULT_SCENE_MARKER);
    text(&mut out, "0.0.2");
    out.extend_from_slice(&[0; 4]);
    text(&mut out, "");
    text(&mut out, "");
    text(&mut out, TITLE);
    text(&mut out, "");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&[0; 4]); // tags
    out.extend_from_slice(&[0; 11]);
    out.extend_from_slice(&[0; 4]); // characters
    out.extend_from_slice(&[0; 4]); // maps
    out.extend_from_slice(&[0; 5]);
    assert_eq!(out.len(), COUNT_OFFSET);
    out.extend_from_slice(&u32::try_from(cards.len()).unwrap().to_le_bytes());
    for card in cards {
        out.extend_from_slice(card);
    }
    out
}

pub fn render(cards: &[scenecard::CardInfo]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        writeln!(
            out,
            "{i}: {} image={}..{} card={}..{}",
            card.name,
            card.image_start,
            card.image_end,
            card.image_start,
            card.end()
        )
        .unwrap();
    }
    out
}
