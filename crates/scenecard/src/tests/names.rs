use alloc::{string::String, vec::Vec};

use rstest::rstest;

use super::fixtures::{CardBuilder, NameEncoding};
use crate::{decode_name, read_card};

fn name_of_len(len: usize) -> String {
    "abcdefghijklmnopqrstuvwxyz0123456789".chars().cycle().take(len).collect()
}

#[rstest]
fn decodes_every_encoding_at_boundary_lengths(
    #[values(NameEncoding::Fix, NameEncoding::Str8, NameEncoding::Str16, NameEncoding::Str32)]
    encoding: NameEncoding,
    #[values(0, 31, 32, 255, 256)] len: usize,
) {
    let name = name_of_len(len);
    let encoding = encoding.fitting(len);
    let encoded = encoding.encode(&name);
    assert_eq!(decode_name(&encoded, 0), Ok((name, encoded.len())));
}

#[rstest]
#[case::hiragana("さくら")]
#[case::mixed("Élodie 🌸 夜")]
#[case::combining("e\u{0301}")]
fn multibyte_names_survive(#[case] name: &str) {
    for encoding in NameEncoding::ALL {
        let encoding = encoding.fitting(name.len());
        let encoded = encoding.encode(name);
        assert_eq!(
            decode_name(&encoded, 0).map(|(n, _)| n),
            Ok(name.into()),
            "{encoding:?}"
        );
    }
}

#[rstest]
#[case(NameEncoding::Fix, 1)]
#[case(NameEncoding::Str8, 2)]
#[case(NameEncoding::Str16, 3)]
#[case(NameEncoding::Str32, 5)]
fn header_width_per_encoding(#[case] encoding: NameEncoding, #[case] header: usize) {
    let (_, used) = decode_name(&encoding.encode("Mio"), 0).unwrap();
    assert_eq!(used, header + 3);
}

#[rstest]
fn names_survive_inside_a_card(
    #[values(NameEncoding::Fix, NameEncoding::Str8, NameEncoding::Str16, NameEncoding::Str32)]
    encoding: NameEncoding,
    #[values(0, 31, 32, 255, 256)] len: usize,
) {
    let name = name_of_len(len);
    let bytes = CardBuilder::new(&name).encoding(encoding).build();
    let card = read_card(&bytes, 0).unwrap();
    assert_eq!(card.name, name);
    assert_eq!(card.length, bytes.len());
}

#[test]
fn name_is_read_from_first_fullname_key() {
    let mut bytes: Vec<u8> = CardBuilder::new("First").build();
    // A second key inside the footer region is never reached.
    let tail = bytes.len() - 8;
    bytes[tail..].copy_from_slice(b"fullname");
    assert_eq!(read_card(&bytes, 0).unwrap().name, "First");
}
