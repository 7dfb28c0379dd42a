// Reassembles an image from encoded tables, as the display would draw it.
use crate::{
    color::HwColor,
    common::{PixelCoord, TILE_SIZE},
    encoder::TileAssets,
    image::Image,
};

pub fn render(assets: &TileAssets) -> Image {
    let width = assets.width_tiles * TILE_SIZE as u32;
    let height = assets.height_tiles * TILE_SIZE as u32;
    let mut img = Image::new(width, height);
    if assets.width_tiles == 0 {
        return img;
    }
    for (i, entry) in assets.name_table.iter().enumerate() {
        let tx = i as u32 % assets.width_tiles;
        let ty = i as u32 / assets.width_tiles;
        let (Some(pattern), Some(palette)) = (
            assets.patterns.get(entry.pattern as usize),
            assets.palettes.get(entry.palette as usize),
        ) else {
            continue;
        };
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let (sx, sy) = entry.flip.apply_to_coords(x, y);
                let idx = pattern[sy * TILE_SIZE + sx] as usize;
                let color = palette.colors.get(idx).copied().unwrap_or(HwColor::BLACK);
                img.set_pixel(
                    tx * TILE_SIZE as PixelCoord + x as PixelCoord,
                    ty * TILE_SIZE as PixelCoord + y as PixelCoord,
                    color.to_rgb(),
                );
            }
        }
    }
    img
}
