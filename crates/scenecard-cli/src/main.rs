//! `scenecard` - inspect and edit the character cards stored in scene files
//!
//! # Commands
//!
//! - `scenecard list` - Print the cards of a scene in file order
//! - `scenecard info` - Print the scene header and card count
//! - `scenecard extract` - Write cards (or only their images) to a directory
//! - `scenecard append` - Add standalone card files to a scene
//!
//! # Usage
//!
//! ```bash
//! scenecard list scene.png
//! scenecard extract scene.png --output cards/ --index 0 --index 2
//! scenecard append scene.png alice.png bob.png --output scene-new.png
//! RUST_LOG=scenecard=trace scenecard list scene.png
//! ```

mod append;
mod extract;
mod info;
mod io;
mod list;
mod options;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Inspect and edit the character cards stored in scene files
#[derive(Parser)]
#[command(name = "scenecard")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Ignored when RUST_LOG is set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cards of a scene in file order
    List(list::ListArgs),

    /// Print the scene header and card count
    Info(info::InfoArgs),

    /// Write cards to a directory as standalone files
    Extract(extract::ExtractArgs),

    /// Append standalone card files to a scene
    Append(append::AppendArgs),
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List(args) => list::execute(&args),
        Commands::Info(args) => info::execute(&args),
        Commands::Extract(args) => extract::execute(&args).map(|_| ()),
        Commands::Append(args) => append::execute(&args),
    }
}
