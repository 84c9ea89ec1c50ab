//! Append command - add standalone card files to a scene

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{io, options::SceneArgs};

/// Arguments for the append command
#[derive(Args)]
pub struct AppendArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Card files to append, in order
    #[arg(required = true)]
    pub cards: Vec<PathBuf>,

    /// Where to write the new scene (may be the input scene)
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute the append command
pub fn execute(args: &AppendArgs) -> Result<()> {
    let mut scene = args.scene.open()?;

    for path in &args.cards {
        let card = io::read_file(path)?;
        scene = scene
            .append_card(&card)
            .with_context(|| format!("Failed to append {}", path.display()))?;
        if let Some(added) = scene.cards().last() {
            tracing::info!(name = %added.name, path = %path.display(), "appended card");
        }
    }

    io::write_file(scene.as_bytes(), &args.output)?;
    println!(
        "Wrote {} ({} cards)",
        args.output.display(),
        scene.cards().len()
    );
    Ok(())
}
