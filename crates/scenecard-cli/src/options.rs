//! Arguments shared by every command that opens a scene.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use scenecard::{CardLayout, Scene, SceneOptions};

use crate::io;

/// Card wire layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Package id table and 64-bit payload length
    #[default]
    Current,
    /// Two unused fields and 32-bit payload length
    Legacy,
}

impl From<LayoutArg> for CardLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Current => CardLayout::Current,
            LayoutArg::Legacy => CardLayout::Legacy,
        }
    }
}

/// The scene to open and how to read it
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Scene file (.png)
    pub scene: PathBuf,

    /// Card layout used by the scene
    #[arg(long, value_enum, default_value_t = LayoutArg::Current)]
    pub layout: LayoutArg,

    /// Offset of the scene's leading image
    #[arg(long, default_value_t = 0)]
    pub start_offset: usize,

    /// Refuse scenes whose header version differs
    #[arg(long, value_name = "VERSION")]
    pub expect_version: Option<String>,
}

impl SceneArgs {
    pub fn options(&self) -> SceneOptions {
        SceneOptions {
            start_offset: self.start_offset,
            layout: self.layout.into(),
            expected_version: self.expect_version.clone(),
            ..SceneOptions::default()
        }
    }

    /// Read and parse the scene
    pub fn open(&self) -> Result<Scene> {
        open_scene(&self.scene, self.options())
    }
}

pub fn open_scene(path: &Path, options: SceneOptions) -> Result<Scene> {
    let data = io::read_file(path)?;
    let scene = Scene::parse_with(data, options)
        .with_context(|| format!("{} is not a readable scene", path.display()))?;
    tracing::info!(
        path = %path.display(),
        cards = scene.cards().len(),
        "opened scene"
    );
    Ok(scene)
}
