//! Info command - print the scene header and card count

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use scenecard::{Scene, SceneHeader};
use serde::Serialize;

use crate::options::SceneArgs;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Info<'a> {
    path: &'a Path,
    size: usize,
    cards: usize,
    #[serde(flatten)]
    header: &'a SceneHeader,
}

/// Execute the info command
pub fn execute(args: &InfoArgs) -> Result<()> {
    let scene = args.scene.open()?;
    let header = scene
        .header()
        .with_context(|| format!("Failed to read the header of {}", args.scene.scene.display()))?;

    if header.stored_card_count as usize != scene.cards().len() {
        tracing::warn!(
            stored = header.stored_card_count,
            found = scene.cards().len(),
            "header card count does not match the cards found"
        );
    }

    let info = Info {
        path: &args.scene.scene,
        size: scene.as_bytes().len(),
        cards: scene.cards().len(),
        header: &header,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", render_text(&info, &scene));
    }
    Ok(())
}

fn render_text(info: &Info<'_>, scene: &Scene) -> String {
    let header = info.header;
    let mut out = String::new();
    out.push_str(&format!("Scene:        {}\n", info.path.display()));
    out.push_str(&format!("Size:         {} bytes\n", info.size));
    out.push_str(&format!("Version:      {}\n", header.version));
    out.push_str(&format!("Title:        {}\n", header.title));
    out.push_str(&format!(
        "Card count:   {} stored at {:#x}, {} found\n",
        header.stored_card_count, header.card_count_offset, info.cards
    ));
    if let Some(last) = scene.cards().last() {
        out.push_str(&format!(
            "Trailing:     {} bytes\n",
            info.size.saturating_sub(last.end())
        ));
    }
    out
}
