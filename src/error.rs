use thiserror::Error;

use crate::common::PixelCoord;

/// Fatal conditions raised while encoding an image. Tile coordinates are the
/// top-left pixel of the offending tile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("image dimensions {width}x{height} are not positive multiples of 8")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("tile at ({x}, {y}) uses {colors} colors, more than a 16-slot palette with black in slot 0 can hold")]
    PaletteOverflow {
        x: PixelCoord,
        y: PixelCoord,
        colors: usize,
    },

    #[error("tile at ({x}, {y}) does not fit any palette and all 4 palettes are in use")]
    TooManyPalettes { x: PixelCoord, y: PixelCoord },

    #[error("tile at ({x}, {y}) would exceed the pattern table limit of 2048")]
    PatternStoreOverflow { x: PixelCoord, y: PixelCoord },
}

/// Malformed artifact bytes handed to `serialize::deserialize`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("palette data is {0} bytes, expected 128")]
    PaletteLength(usize),

    #[error("pattern data length {0} is not a multiple of 32")]
    PatternLength(usize),

    #[error("name table length {0} is not a multiple of 2")]
    NameTableLength(usize),

    #[error("{entries} name table entries do not fill rows of {width_tiles} tiles")]
    NameTableShape { entries: usize, width_tiles: u32 },

    #[error("name table entry {index} references missing {what} {value}")]
    DanglingReference {
        index: usize,
        what: &'static str,
        value: usize,
    },
}
