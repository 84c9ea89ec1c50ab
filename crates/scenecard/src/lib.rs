//! Locate, measure and splice character cards embedded in scene files.
//!
//! A scene file starts with a PNG thumbnail and a metadata header, followed
//! by any number of character cards. Each card is itself a PNG image
//! followed by a fixed header, a package id table, an opaque block and a
//! length-prefixed payload. There is no central index: card boundaries are
//! discovered by scanning for the PNG signature and decoding length fields
//! as they are encountered.
//!
//! ```rust
//! use scenecard::{Scene, SceneOptions};
//!
//! fn card_names(bytes: Vec<u8>) -> Result<Vec<String>, scenecard::SceneError> {
//!     let scene = Scene::parse_with(bytes, SceneOptions::default())?;
//!     Ok(scene.cards().iter().map(|card| card.name.clone()).collect())
//! }
//! ```
//!
//! Everything here operates on whole, in-memory buffers. Reading and writing
//! files is left to the caller.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod card;
mod cursor;
mod error;
mod name;
mod options;
mod scene;
mod search;

#[cfg(test)]
mod tests;

pub use card::{
    CardInfo, FULLNAME_KEY, IMAGE_END, IMAGE_SIGNATURE, MAX_PAYLOAD_LEN, read_card,
    read_card_with,
};
pub use error::{CardError, Encoding, ErrorSource, FormatError, Malformed, SceneError, SearchError};
pub use name::decode_name;
pub use options::{CardLayout, DEFAULT_SCENE_MARKER, SceneOptions};
pub use scene::{Scene, SceneHeader, find_card_count_offset, read_scene_header, scan, scan_with};
pub use search::{find, find_from};
