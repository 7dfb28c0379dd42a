// Reduction of truecolor pixels to the 8-level hardware color ramp.
use std::fmt::Display;

use crate::common::{Color, ColorLevel, ColorValue};

/// Channel intensities the display hardware can produce, indexed by level.
pub const RAMP: [ColorValue; 8] = [0, 52, 87, 116, 144, 172, 206, 255];

/// A color packed in the hardware word layout: `(B<<9)|(G<<5)|(R<<1)`.
///
/// Two pixels that quantize to the same `HwColor` are indistinguishable to the
/// rest of the pipeline.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HwColor(pub u16);

impl HwColor {
    pub const BLACK: HwColor = HwColor(0);

    pub fn from_levels(red: ColorLevel, green: ColorLevel, blue: ColorLevel) -> Self {
        HwColor((blue as u16 & 7) << 9 | (green as u16 & 7) << 5 | (red as u16 & 7) << 1)
    }

    /// Unpacks the (red, green, blue) ramp levels.
    pub fn levels(self) -> (ColorLevel, ColorLevel, ColorLevel) {
        (
            ((self.0 >> 1) & 7) as ColorLevel,
            ((self.0 >> 5) & 7) as ColorLevel,
            ((self.0 >> 9) & 7) as ColorLevel,
        )
    }

    /// Expands the color back to 8-bit intensities through the ramp.
    pub fn to_rgb(self) -> Color {
        let (r, g, b) = self.levels();
        Color::new(RAMP[r as usize], RAMP[g as usize], RAMP[b as usize])
    }
}

impl Display for HwColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03X}", self.0)
    }
}

pub fn quantize_channel(intensity: ColorValue) -> ColorLevel {
    let v = intensity as u16;
    for i in 0..RAMP.len() - 1 {
        let lo = RAMP[i] as u16;
        let hi = RAMP[i + 1] as u16;
        // Strictly below the midpoint, compared without rounding.
        if v <= lo || 2 * v < lo + hi {
            return i as ColorLevel;
        }
    }
    (RAMP.len() - 1) as ColorLevel
}

pub fn quantize_color(color: Color) -> HwColor {
    HwColor::from_levels(
        quantize_channel(color.red),
        quantize_channel(color.green),
        quantize_channel(color.blue),
    )
}
