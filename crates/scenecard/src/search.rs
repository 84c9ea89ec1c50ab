//! Exact subsequence search over a bounded window of a byte buffer.
//!
//! "Not found" is an ordinary outcome (`Ok(None)`); callers use it to detect
//! the end of the card list. Only misuse of the window is an error.

use bstr::ByteSlice;

use crate::error::SearchError;

/// Finds the first occurrence of `pattern` inside `source[start..start + length]`.
///
/// Returns the absolute offset of the match.
///
/// # Errors
///
/// [`SearchError::EmptyPattern`] when `pattern` is empty, and
/// [`SearchError::InvalidRange`] when `length` is zero or the window runs past
/// the end of `source`.
///
/// # Examples
///
/// ```rust
/// let data = b"..IEND..IEND";
/// assert_eq!(scenecard::find(data, b"IEND", 0, data.len()), Ok(Some(2)));
/// assert_eq!(scenecard::find(data, b"IEND", 3, 4), Ok(None));
/// ```
pub fn find(
    source: &[u8],
    pattern: &[u8],
    start: usize,
    length: usize,
) -> Result<Option<usize>, SearchError> {
    if pattern.is_empty() {
        return Err(SearchError::EmptyPattern);
    }
    let end = start
        .checked_add(length)
        .filter(|&end| length > 0 && end <= source.len())
        .ok_or(SearchError::InvalidRange {
            start,
            length,
            source_len: source.len(),
        })?;

    Ok(source[start..end].find(pattern).map(|at| start + at))
}

/// Like [`find`], with the window extending to the end of `source`.
///
/// # Errors
///
/// Same as [`find`]; in particular `start == source.len()` is an empty window.
pub fn find_from(source: &[u8], pattern: &[u8], start: usize) -> Result<Option<usize>, SearchError> {
    find(
        source,
        pattern,
        start,
        source.len().saturating_sub(start),
    )
}
