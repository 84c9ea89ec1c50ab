//! Tiny scene and card writer for the command tests.

use scenecard::{DEFAULT_SCENE_MARKER, IMAGE_END, IMAGE_SIGNATURE};

pub fn image() -> Vec<u8> {
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(b"PIXELS");
    out.extend_from_slice(&IMAGE_END);
    out
}

pub fn card(name: &str) -> Vec<u8> {
    let mut payload = vec![0xA8];
    payload.extend_from_slice(b"fullname");
    payload.push(0xA0 | u8::try_from(name.len()).unwrap());
    payload.extend_from_slice(name.as_bytes());

    let mut out = image();
    out.extend_from_slice(&[0; 0x6B]);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&42u32.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(b"{}");
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0; 8]);
    out
}

pub fn scene(cards: &[Vec<u8>]) -> Vec<u8> {
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(&IMAGE_END);
    out.extend_from_slice(DEFAULT_SCENE_MARKER);
    out.push(5);
    out.extend_from_slice(b"0.0.2");
    out.extend_from_slice(&[0; 4]);
    // user id, save id, title, comment
    for text in ["", "", "CLI", ""] {
        out.push(u8::try_from(text.len()).unwrap());
        out.extend_from_slice(text.as_bytes());
    }
    out.extend_from_slice(&[0; 4 + 4 + 11 + 4 + 4 + 5]);
    out.extend_from_slice(&u32::try_from(cards.len()).unwrap().to_le_bytes());
    for card in cards {
        out.extend_from_slice(card);
    }
    out
}
