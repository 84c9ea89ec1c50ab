//! File access: the only place the tool touches the filesystem.

use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the whole file at `path` into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read file");
    Ok(data)
}

/// Write `data[range]` to `dest`, replacing any existing file
pub fn write_range(data: &[u8], range: Range<usize>, dest: &Path) -> Result<()> {
    let bytes = data.get(range.clone()).with_context(|| {
        format!(
            "Range {}..{} is outside a buffer of {} bytes",
            range.start,
            range.end,
            data.len()
        )
    })?;
    write_file(bytes, dest)
}

/// Write `bytes` to `dest`, replacing any existing file
pub fn write_file(bytes: &[u8], dest: &Path) -> Result<()> {
    fs::write(dest, bytes).with_context(|| format!("Failed to write {}", dest.display()))?;
    tracing::debug!(path = %dest.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}
