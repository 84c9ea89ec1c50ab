use alloc::string::String;

/// Marker text that opens the scene metadata header.
pub const DEFAULT_SCENE_MARKER: &[u8] = "【EroMakeHScene】".as_bytes();

/// Wire layout of the card trailer that follows the fixed card header.
///
/// Both layouts start with the image, the image end marker and the
/// `0x6B`-byte fixed header, and both end with a `u32`-length opaque block,
/// the payload and an 8-byte footer. They differ in between:
///
/// | layout    | after the fixed header                 | payload length |
/// |-----------|----------------------------------------|----------------|
/// | `Current` | `u32` count + `count` package ids      | `u64`          |
/// | `Legacy`  | two raw `u32` fields (unused)          | `u32`          |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CardLayout {
    /// Package id table and a 64-bit payload length.
    #[default]
    Current,
    /// Two unused 32-bit fields and a 32-bit payload length.
    Legacy,
}

/// Configuration for scanning and editing scenes.
///
/// # Examples
///
/// ```rust
/// use scenecard::{CardLayout, SceneOptions};
///
/// let options = SceneOptions {
///     layout: CardLayout::Legacy,
///     expected_version: Some("0.0.1".into()),
///     ..Default::default()
/// };
/// assert_eq!(options.start_offset, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOptions {
    /// Offset of the scene's leading image signature.
    ///
    /// # Default
    ///
    /// `0`
    pub start_offset: usize,

    /// Layout used to measure every card in the scene.
    ///
    /// # Default
    ///
    /// [`CardLayout::Current`]
    pub layout: CardLayout,

    /// Text located to start the header walk.
    ///
    /// # Default
    ///
    /// [`DEFAULT_SCENE_MARKER`]
    pub scene_marker: &'static [u8],

    /// Header version this caller knows how to walk.
    ///
    /// The header walk is positional. When set, a scene whose version string
    /// differs is rejected with
    /// [`FormatError::VersionMismatch`](crate::FormatError::VersionMismatch)
    /// instead of risking a patch at the wrong offset.
    ///
    /// # Default
    ///
    /// `None` (any version is walked)
    pub expected_version: Option<String>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            start_offset: 0,
            layout: CardLayout::default(),
            scene_marker: DEFAULT_SCENE_MARKER,
            expected_version: None,
        }
    }
}
