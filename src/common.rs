pub type ColorValue = u8; // 8-bit channel intensity (0-255)
pub type ColorLevel = u8; // Hardware ramp level (0-7)
pub type ColorIdx = u8; // Index into 4bpp palette (0-15)
pub type PaletteIdx = u8; // Index into palette table (0-3)
pub type PatternIdx = u16; // Index into pattern table (0-2047)
pub type PixelCoord = u32; // Pixel coordinate within the source image

pub const TILE_SIZE: usize = 8;
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;
pub const PALETTE_SIZE: usize = 16;
pub const MAX_PALETTES: usize = 4;

// The name-table word reserves bits 0-10 for the pattern reference.
pub const PATTERN_BITS: u32 = 11;
pub const MAX_PATTERNS: usize = 1 << PATTERN_BITS;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: ColorValue,
    pub green: ColorValue,
    pub blue: ColorValue,
}

impl Color {
    pub const fn new(red: ColorValue, green: ColorValue, blue: ColorValue) -> Self {
        Color { red, green, blue }
    }
}
