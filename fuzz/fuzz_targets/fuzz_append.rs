#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scenecard::{
    CardLayout, DEFAULT_SCENE_MARKER, IMAGE_END, IMAGE_SIGNATURE, Scene, SceneOptions,
    find_card_count_offset, scan_with,
};

#[derive(Debug, Arbitrary)]
enum NameHeader {
    Fix,
    Str8,
    Str16,
    Str32,
}

#[derive(Debug, Arbitrary)]
struct CardInput {
    name: String,
    header: NameHeader,
    package_ids: Vec<u32>,
    opaque: Vec<u8>,
    extra_payload: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    legacy: bool,
    title: String,
    tags: Vec<u32>,
    existing: Vec<CardInput>,
    appended: Vec<CardInput>,
    trailing: Vec<u8>,
}

fn name_bytes(name: &str, header: &NameHeader) -> Vec<u8> {
    let len = name.len();
    let mut out = match header {
        NameHeader::Fix if len < 32 => vec![0xA0 | len as u8],
        NameHeader::Fix | NameHeader::Str8 if len < 0x100 => vec![0xD9, len as u8],
        NameHeader::Fix | NameHeader::Str8 | NameHeader::Str16 if len < 0x8000 => {
            let mut h = vec![0xDA];
            h.extend_from_slice(&(len as u16).to_be_bytes());
            h
        }
        _ => {
            let mut h = vec![0xDB];
            h.extend_from_slice(&(len as u32).to_be_bytes());
            h
        }
    };
    out.extend_from_slice(name.as_bytes());
    out
}

fn card(input: &CardInput, layout: CardLayout) -> Vec<u8> {
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(b"\0\0\0\0");
    out.extend_from_slice(&IMAGE_END);
    out.extend_from_slice(&[0; 0x6B]);
    match layout {
        CardLayout::Current => {
            out.extend_from_slice(&(input.package_ids.len() as u32).to_le_bytes());
            for id in &input.package_ids {
                out.extend_from_slice(&id.to_le_bytes());
            }
        }
        CardLayout::Legacy => out.extend_from_slice(&[0; 8]),
    }
    out.extend_from_slice(&(input.opaque.len() as u32).to_le_bytes());
    out.extend_from_slice(&input.opaque);

    let mut payload = vec![0xA8];
    payload.extend_from_slice(b"fullname");
    payload.extend(name_bytes(&input.name, &input.header));
    payload.extend_from_slice(&input.extra_payload);
    match layout {
        CardLayout::Current => out.extend_from_slice(&(payload.len() as u64).to_le_bytes()),
        CardLayout::Legacy => out.extend_from_slice(&(payload.len() as u32).to_le_bytes()),
    }
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0; 8]);
    out
}

fn text(out: &mut Vec<u8>, s: &[u8]) {
    let mut len = s.len();
    while len >= 0x80 {
        out.push((len as u8 & 0x7F) | 0x80);
        len >>= 7;
    }
    out.push(len as u8);
    out.extend_from_slice(s);
}

fn scene(input: &Input, cards: &[Vec<u8>]) -> Vec<u8> {
    let mut out = IMAGE_SIGNATURE.to_vec();
    out.extend_from_slice(&IMAGE_END);
    out.extend_from_slice(DEFAULT_SCENE_MARKER);
    text(&mut out, b"0.0.2");
    out.extend_from_slice(&[0; 4]);
    text(&mut out, b"");
    text(&mut out, b"");
    text(&mut out, input.title.as_bytes());
    text(&mut out, b"");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(input.tags.len() as u32).to_le_bytes());
    for tag in &input.tags {
        out.extend_from_slice(&tag.to_le_bytes());
    }
    out.extend_from_slice(&[0; 11 + 4 + 4 + 5]);
    out.extend_from_slice(&(cards.len() as u32).to_le_bytes());
    for card in cards {
        out.extend_from_slice(card);
    }
    out.extend_from_slice(&input.trailing);
    out
}

fn contains_signature(bytes: &[u8]) -> bool {
    bytes.windows(IMAGE_SIGNATURE.len()).any(|w| w == IMAGE_SIGNATURE)
}

fn append_then_rescan(input: &Input) {
    let layout = if input.legacy {
        CardLayout::Legacy
    } else {
        CardLayout::Current
    };
    let options = SceneOptions {
        layout,
        ..SceneOptions::default()
    };

    // The generator cannot keep arbitrary header bytes from looking like a
    // card; such inputs are out of scope for the equivalence check.
    let header_only = scene(input, &[]);
    if contains_signature(&header_only[IMAGE_SIGNATURE.len()..]) {
        return;
    }

    let existing: Vec<Vec<u8>> = input.existing.iter().map(|c| card(c, layout)).collect();
    let Ok(mut current) = Scene::parse_with(scene(input, &existing), options.clone()) else {
        return;
    };
    let count_offset = find_card_count_offset(current.as_bytes()).ok();

    for new in &input.appended {
        let Ok(next) = current.append_card(&card(new, layout)) else {
            return;
        };
        current = next;
        let offset = find_card_count_offset(current.as_bytes()).ok();
        assert_eq!(offset, count_offset);
        if let Some(at) = offset {
            let stored = u32::from_le_bytes(current.as_bytes()[at..at + 4].try_into().unwrap());
            assert_eq!(stored as usize, current.cards().len());
        }
    }

    let rescanned = scan_with(current.as_bytes(), &options).expect("rescan after append");
    assert_eq!(rescanned, current.cards());
}

fuzz_target!(|input: Input| append_then_rescan(&input));
