use crate::common::Color;

/// Read-only pixel access to a truecolor raster.
///
/// Rows are exposed as slices so the encoder can read a whole tile row at a
/// time instead of going through `pixel` for every coordinate.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn row(&self, y: u32) -> &[Color];

    fn pixel(&self, x: u32, y: u32) -> Color {
        self.row(y)[x as usize]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::default())
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Image {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps row-major pixels; returns `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Packed 8-bit RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels()
            .iter()
            .flat_map(|c| [c.red, c.green, c.blue])
            .collect()
    }
}

impl Raster for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_pixels_agree() {
        let mut img = Image::new(3, 2);
        img.set_pixel(2, 1, Color::new(1, 2, 3));
        assert_eq!(img.row(1)[2], Color::new(1, 2, 3));
        assert_eq!(img.pixel(2, 1), Color::new(1, 2, 3));
        assert_eq!(img.row(0).len(), 3);
        assert_eq!(img.pixels()[5], Color::new(1, 2, 3));
    }

    #[test]
    fn rejects_mismatched_pixel_count() {
        assert!(Image::from_pixels(2, 2, vec![Color::default(); 3]).is_none());
        assert!(Image::from_pixels(2, 2, vec![Color::default(); 4]).is_some());
    }

    #[test]
    fn rgb_bytes_are_interleaved() {
        let img = Image::filled(2, 1, Color::new(9, 8, 7));
        assert_eq!(img.to_rgb_bytes(), vec![9, 8, 7, 9, 8, 7]);
    }
}
