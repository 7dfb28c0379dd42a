use serde::Serialize;

use crate::{encoder::TileAssets, pattern::Flip};

/// Human-readable summary of one encode, saved alongside the artifacts.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub tiles: usize,
    pub patterns: usize,
    pub flipped_tiles: usize,
    pub palettes: Vec<Vec<String>>, // Hardware colors as 3-digit hex
}

impl Manifest {
    pub fn new(source: &str, assets: &TileAssets) -> Self {
        Manifest {
            source: source.to_string(),
            width: assets.width_tiles * 8,
            height: assets.height_tiles * 8,
            tiles: assets.name_table.len(),
            patterns: assets.patterns.len(),
            flipped_tiles: assets
                .name_table
                .iter()
                .filter(|e| e.flip != Flip::None)
                .count(),
            palettes: assets
                .palettes
                .iter()
                .map(|p| p.colors.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}
