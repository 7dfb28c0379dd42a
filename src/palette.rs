// Per-tile palette selection under the 4x16 color budget.
//
// Allocation is split into `plan` (read-only) and `commit` so the encoder can
// reject a placement before the palette table is touched.
use itertools::Itertools;
use log::debug;

use crate::{
    color::HwColor,
    common::{PaletteIdx, MAX_PALETTES, PALETTE_SIZE},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<HwColor>,
}

impl Palette {
    pub fn new(colors: Vec<HwColor>) -> Self {
        Palette { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains_all(&self, needed: &[HwColor]) -> bool {
        needed.iter().all(|c| self.colors.contains(c))
    }

    // Existing colors keep their positions; new ones are appended in the
    // order they were first seen in the tile.
    fn union(&self, needed: &[HwColor]) -> Vec<HwColor> {
        self.colors
            .iter()
            .chain(needed.iter())
            .copied()
            .unique()
            .collect_vec()
    }
}

/// Where a tile's colors will live once committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// An existing palette already holds every color.
    Existing(PaletteIdx),
    /// An existing palette is replaced by its union with the needed colors.
    Grow(PaletteIdx, Vec<HwColor>),
    /// A new palette is appended at the end of the table.
    New(Vec<HwColor>),
}

impl Placement {
    /// Number of palettes in the table after `commit`.
    pub fn palette_count(&self, palettes: &[Palette]) -> usize {
        match self {
            Placement::New(_) => palettes.len() + 1,
            _ => palettes.len(),
        }
    }

    pub fn fits(&self, palettes: &[Palette]) -> bool {
        self.palette_count(palettes) <= MAX_PALETTES
    }
}

/// Seeds a fresh palette: black first, then the remaining needed colors.
pub fn seed_palette(needed: &[HwColor]) -> Vec<HwColor> {
    std::iter::once(HwColor::BLACK)
        .chain(needed.iter().copied())
        .unique()
        .collect_vec()
}

/// Decides which palette covers `needed` without mutating the table.
///
/// `needed` must hold distinct colors in first-seen order.
pub fn plan(needed: &[HwColor], palettes: &[Palette]) -> Placement {
    if let Some(idx) = palettes.iter().position(|p| p.contains_all(needed)) {
        return Placement::Existing(idx as PaletteIdx);
    }
    for (idx, pal) in palettes.iter().enumerate() {
        let union = pal.union(needed);
        if union.len() <= PALETTE_SIZE {
            return Placement::Grow(idx as PaletteIdx, union);
        }
    }
    Placement::New(seed_palette(needed))
}

pub fn commit(placement: Placement, palettes: &mut Vec<Palette>) -> PaletteIdx {
    match placement {
        Placement::Existing(idx) => idx,
        Placement::Grow(idx, colors) => {
            debug!(
                "Palette {} grows from {} to {} colors",
                idx,
                palettes[idx as usize].len(),
                colors.len()
            );
            palettes[idx as usize].colors = colors;
            idx
        }
        Placement::New(colors) => {
            debug!("Palette {} created with {} colors", palettes.len(), colors.len());
            palettes.push(Palette::new(colors));
            (palettes.len() - 1) as PaletteIdx
        }
    }
}

/// Plans and commits in one step. Returns `None`, leaving the table
/// untouched, when covering `needed` would take more than 4 palettes.
pub fn assign(needed: &[HwColor], palettes: &mut Vec<Palette>) -> Option<PaletteIdx> {
    let placement = plan(needed, palettes);
    if !placement.fits(palettes) {
        return None;
    }
    Some(commit(placement, palettes))
}
