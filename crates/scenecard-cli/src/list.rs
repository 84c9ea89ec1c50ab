//! List command - print the cards of a scene in file order

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;
use scenecard::CardInfo;
use serde::Serialize;

use crate::options::SceneArgs;

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Entry<'a> {
    index: usize,
    #[serde(flatten)]
    card: &'a CardInfo,
}

/// Execute the list command
pub fn execute(args: &ListArgs) -> Result<()> {
    let scene = args.scene.open()?;
    let out = if args.json {
        render_json(scene.cards())?
    } else {
        render_table(scene.cards())
    };
    print!("{out}");
    Ok(())
}

pub fn render_json(cards: &[CardInfo]) -> Result<String> {
    let entries: Vec<Entry<'_>> = cards
        .iter()
        .enumerate()
        .map(|(index, card)| Entry { index, card })
        .collect();
    let mut out = serde_json::to_string_pretty(&entries)?;
    out.push('\n');
    Ok(out)
}

pub fn render_table(cards: &[CardInfo]) -> String {
    let mut out = String::new();
    if cards.is_empty() {
        out.push_str("(no cards)\n");
        return out;
    }
    let _ = writeln!(out, "{:>5}  {:>10}  {:>10}  NAME", "INDEX", "OFFSET", "LENGTH");
    for (index, card) in cards.iter().enumerate() {
        let _ = writeln!(
            out,
            "{index:>5}  {:>#10x}  {:>10}  {}",
            card.image_start, card.length, card.name
        );
    }
    out
}
