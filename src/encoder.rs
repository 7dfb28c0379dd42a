// Image -> palette/pattern/name tables, one 8x8 tile at a time.
use hashbrown::HashMap;
use itertools::Itertools;
use log::info;

use crate::{
    color::{quantize_color, HwColor},
    common::{ColorIdx, PaletteIdx, PatternIdx, PixelCoord, PALETTE_SIZE, TILE_PIXELS, TILE_SIZE},
    error::EncodeError,
    image::Raster,
    palette::{self, Palette, Placement},
    pattern::{Flip, Pattern, PatternStore},
};

const FLIP_H_BIT: u16 = 1 << 11;
const FLIP_V_BIT: u16 = 1 << 12;
const PALETTE_SHIFT: u16 = 13;
const PATTERN_MASK: u16 = 0x7FF;

/// One screen tile's reference into the pattern and palette tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTableEntry {
    pub pattern: PatternIdx,
    pub flip: Flip,
    pub palette: PaletteIdx,
}

impl NameTableEntry {
    pub fn to_word(self) -> u16 {
        let mut w = self.pattern & PATTERN_MASK;
        if self.flip.h_flip() {
            w |= FLIP_H_BIT;
        }
        if self.flip.v_flip() {
            w |= FLIP_V_BIT;
        }
        w | (self.palette as u16 & 3) << PALETTE_SHIFT
    }

    pub fn from_word(w: u16) -> Self {
        Self {
            pattern: w & PATTERN_MASK,
            flip: Flip::from_flags(w & FLIP_H_BIT != 0, w & FLIP_V_BIT != 0),
            palette: ((w >> PALETTE_SHIFT) & 3) as PaletteIdx,
        }
    }
}

/// The in-memory result of one encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileAssets {
    pub width_tiles: u32,
    pub height_tiles: u32,
    pub palettes: Vec<Palette>,
    pub patterns: Vec<Pattern>,
    pub name_table: Vec<NameTableEntry>, // Row-major scan order
}

/// Mutable state of a single encode. Not shared between images.
pub struct TileEncoder {
    palettes: Vec<Palette>,
    patterns: PatternStore,
    name_table: Vec<NameTableEntry>,
    flipped_reuses: usize,
}

impl TileEncoder {
    pub fn new() -> Self {
        TileEncoder {
            palettes: vec![],
            patterns: PatternStore::new(),
            name_table: vec![],
            flipped_reuses: 0,
        }
    }

    pub fn encode<R: Raster + ?Sized>(mut self, image: &R) -> Result<TileAssets, EncodeError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 || width % 8 != 0 || height % 8 != 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }
        let (width_tiles, height_tiles) = (width / 8, height / 8);
        self.name_table.reserve((width_tiles * height_tiles) as usize);

        for ty in 0..height_tiles {
            for tx in 0..width_tiles {
                let entry = self.encode_tile(image, tx * 8, ty * 8)?;
                self.name_table.push(entry);
            }
        }

        info!(
            "Encoded {}x{} tiles: {} palettes, {} patterns ({} flipped reuses)",
            width_tiles,
            height_tiles,
            self.palettes.len(),
            self.patterns.len(),
            self.flipped_reuses
        );
        Ok(TileAssets {
            width_tiles,
            height_tiles,
            palettes: self.palettes,
            patterns: self.patterns.into_patterns(),
            name_table: self.name_table,
        })
    }

    fn encode_tile<R: Raster + ?Sized>(
        &mut self,
        image: &R,
        x: PixelCoord,
        y: PixelCoord,
    ) -> Result<NameTableEntry, EncodeError> {
        let colors = read_tile(image, x, y);
        let needed = colors.iter().copied().unique().collect_vec();
        if needed.len() > PALETTE_SIZE {
            return Err(EncodeError::PaletteOverflow {
                x,
                y,
                colors: needed.len(),
            });
        }

        // Nothing below mutates the tables until every check has passed.
        let placement = palette::plan(&needed, &self.palettes);
        let target: &[HwColor] = match &placement {
            Placement::Existing(idx) => &self.palettes[*idx as usize].colors,
            Placement::Grow(_, colors) => colors,
            Placement::New(colors) => {
                // Slot 0 of a new palette is reserved for black, so 16 colors
                // without black do not fit.
                if colors.len() > PALETTE_SIZE {
                    return Err(EncodeError::PaletteOverflow {
                        x,
                        y,
                        colors: needed.len(),
                    });
                }
                colors
            }
        };
        if !placement.fits(&self.palettes) {
            return Err(EncodeError::TooManyPalettes { x, y });
        }

        let index_of: HashMap<HwColor, ColorIdx> = target
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as ColorIdx))
            .collect();
        let mut pattern: Pattern = [0; TILE_PIXELS];
        for (px, c) in pattern.iter_mut().zip(colors.iter()) {
            *px = index_of[c];
        }

        if self.patterns.find(&pattern).is_none() && self.patterns.is_full() {
            return Err(EncodeError::PatternStoreOverflow { x, y });
        }

        let palette = palette::commit(placement, &mut self.palettes);
        let found = self
            .patterns
            .resolve(&pattern)
            .ok_or(EncodeError::PatternStoreOverflow { x, y })?;
        if found.flip != Flip::None {
            self.flipped_reuses += 1;
        }
        Ok(NameTableEntry {
            pattern: found.index,
            flip: found.flip,
            palette,
        })
    }
}

impl Default for TileEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_tile<R: Raster + ?Sized>(image: &R, x: PixelCoord, y: PixelCoord) -> [HwColor; TILE_PIXELS] {
    let mut colors = [HwColor::BLACK; TILE_PIXELS];
    let x0 = x as usize;
    for (dy, chunk) in colors.chunks_exact_mut(TILE_SIZE).enumerate() {
        let row = &image.row(y + dy as PixelCoord)[x0..x0 + TILE_SIZE];
        for (dst, &src) in chunk.iter_mut().zip(row) {
            *dst = quantize_color(src);
        }
    }
    colors
}

/// Encodes `image` with fresh state.
pub fn encode<R: Raster + ?Sized>(image: &R) -> Result<TileAssets, EncodeError> {
    TileEncoder::new().encode(image)
}
