//! Extract command - write cards to a directory as standalone files
//!
//! Each card is written as `<name>.png`. When that file already exists and
//! `--overwrite` is not given, the first free `<name> (k).png` is used.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::{io, options::SceneArgs};

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Directory to write the cards to (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Only extract the card at this index (repeatable; default: all cards)
    #[arg(long)]
    pub index: Vec<usize>,

    /// Write only the card image, without the character data
    #[arg(long)]
    pub image_only: bool,

    /// Replace existing files instead of picking a new name
    #[arg(long)]
    pub overwrite: bool,
}

/// Execute the extract command, returning the written paths
pub fn execute(args: &ExtractArgs) -> Result<Vec<PathBuf>> {
    let scene = args.scene.open()?;
    let cards = scene.cards();

    if let Some(&bad) = args.index.iter().find(|&&i| i >= cards.len()) {
        bail!("Card index {bad} is out of range: the scene has {} cards", cards.len());
    }
    let selected: Vec<usize> = if args.index.is_empty() {
        (0..cards.len()).collect()
    } else {
        args.index.clone()
    };

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut written = Vec::with_capacity(selected.len());
    for index in selected {
        let card = &cards[index];
        let dest = destination(&args.output, &card.name, args.overwrite);
        let range = if args.image_only {
            card.image_range()
        } else {
            card.range()
        };
        io::write_range(scene.as_bytes(), range, &dest)?;
        tracing::info!(index, name = %card.name, path = %dest.display(), "extracted card");
        written.push(dest);
    }
    Ok(written)
}

/// Replace characters that cannot appear in a file name
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_end_matches('.');
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "card".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Path for a card named `name` inside `dir`
pub fn destination(dir: &Path, name: &str, overwrite: bool) -> PathBuf {
    let stem = sanitize_name(name);
    let path = dir.join(format!("{stem}.png"));
    if overwrite || !path.exists() {
        return path;
    }
    (1..)
        .map(|k| dir.join(format!("{stem} ({k}).png")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}
