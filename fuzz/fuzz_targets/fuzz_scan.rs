#![no_main]
use std::cell::RefCell;

use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scenecard::{
    CardLayout, FULLNAME_KEY, IMAGE_END, IMAGE_SIGNATURE, Scene, SceneOptions, read_scene_header,
};

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

// Byte strings the parser keys on; random bytes almost never contain them.
static TOKENS: &[&[u8]] = &[
    &IMAGE_SIGNATURE,
    &IMAGE_END,
    FULLNAME_KEY,
    scenecard::DEFAULT_SCENE_MARKER,
    &[0xA5],
    &[0xD9, 0x20],
    &[0xDA, 0x80, 0x00],
    &[0xDB, 0x7F, 0xFF, 0xFF, 0xFF],
    &[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0],
    &[0xFE, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0],
    &[0x80, 0x80, 0x80, 0x80, 0x80],
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Overwrite a random position with one of the format tokens, otherwise
/// defer to libFuzzer's own mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if seed % 3 != 0 {
        return fuzzer_mutate(data, size, max_size);
    }
    with_rng(|rng| {
        let token = TOKENS[rng.random_range(0..TOKENS.len())];
        let grown = (size + token.len()).min(max_size);
        if token.len() > grown {
            return size;
        }
        let at = rng.random_range(0..=grown - token.len());
        data[at..at + token.len()].copy_from_slice(token);
        grown.max(at + token.len())
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn scan(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };
    let options = SceneOptions {
        layout: if flags & 1 == 0 {
            CardLayout::Current
        } else {
            CardLayout::Legacy
        },
        ..SceneOptions::default()
    };

    let _ = read_scene_header(data, &options);
    let Ok(scene) = Scene::parse_with(data.to_vec(), options) else {
        return;
    };
    let mut previous_end = 0;
    for card in scene.cards() {
        assert!(card.image_start >= previous_end);
        assert!(card.image_start <= card.image_end && card.image_end <= card.end());
        assert!(scene.card_bytes(card).is_some());
        previous_end = card.end();
    }
}

fuzz_target!(|data: &[u8]| scan(data));
