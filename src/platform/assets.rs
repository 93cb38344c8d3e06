//! Asset manifest and the filesystem loader
//!
//! Every image the game draws, relative to the asset root. Loading is
//! all-or-nothing: one missing file fails the whole load.

use std::path::PathBuf;

use anyhow::Context;

use super::AssetGateway;
use crate::sim::FruitKind;

/// Backgrounds, figures and HUD images
pub const ASSET_MANIFEST: [&str; 7] = [
    "summer.jpg",
    "winter.jpg",
    "professor.png",
    "images/explosion.png",
    "images/white_lives.png",
    "images/red_lives.png",
    "images/game_over.png",
];

/// Whole-fruit image for a category
pub fn fruit_image(kind: FruitKind) -> String {
    format!("images/{}.png", kind.as_str())
}

/// Sliced-fruit image; the bomb shows the explosion instead
pub fn half_fruit_image(kind: FruitKind) -> Option<String> {
    (!kind.is_hazard()).then(|| format!("images/half_{}.png", kind.as_str()))
}

/// Every path that must load before the game can start
pub fn all_assets() -> Vec<String> {
    let mut paths: Vec<String> = ASSET_MANIFEST.iter().map(|p| p.to_string()).collect();
    for kind in FruitKind::ALL {
        paths.push(fruit_image(kind));
        paths.extend(half_fruit_image(kind));
    }
    paths
}

/// Checks the manifest against a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssets {
    pub root: PathBuf,
    pub loaded: usize,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            loaded: 0,
        }
    }
}

impl AssetGateway for FsAssets {
    fn load_all(&mut self) -> anyhow::Result<()> {
        self.loaded = 0;
        for rel in all_assets() {
            let path = self.root.join(&rel);
            let meta = std::fs::metadata(&path)
                .with_context(|| format!("cannot load {}", path.display()))?;
            if !meta.is_file() {
                anyhow::bail!("{} is not a file", path.display());
            }
            self.loaded += 1;
        }
        log::info!("Loaded {} assets from {}", self.loaded, self.root.display());
        Ok(())
    }
}
