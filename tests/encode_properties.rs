//! End-to-end properties of the encoder and the byte layouts it produces.

use md_tiles::{
    color::RAMP, deserialize, encode, preview::render, quantize_color, Color, EncodeError,
    HwColor, Image, Raster,
};

/// Deterministic generator so test images are reproducible.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn level(&mut self, max: u64) -> usize {
        ((self.next_u64() >> 33) % max) as usize
    }
}

/// An image whose tiles use a handful of colors from a small shared set, so it
/// always fits the palette budget.
fn sample_image(width: u32, height: u32, seed: u64) -> Image {
    let mut rng = SimpleRng::new(seed);
    let mut img = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let c = Color::new(RAMP[rng.level(3)], RAMP[rng.level(2) * 3], 0);
            img.set_pixel(x, y, c);
        }
    }
    img
}

#[test]
fn solid_red_tile_artifacts() {
    let img = Image::filled(8, 8, Color::new(255, 0, 0));
    let artifacts = encode(&img).unwrap().to_artifacts();

    let mut palette = vec![0u8; 128];
    palette[3] = 14;
    assert_eq!(artifacts.palette, palette);
    assert_eq!(artifacts.patterns, vec![0x11; 32]);
    assert_eq!(artifacts.name_table, vec![0, 0]);
}

#[test]
fn horizontal_mirror_differs_only_in_flip_bit() {
    let mut rng = SimpleRng::new(7);
    let mut img = Image::new(16, 8);
    for y in 0..8 {
        for x in 0..8 {
            let c = Color::new(RAMP[rng.level(4)], 0, RAMP[rng.level(2)]);
            img.set_pixel(x, y, c);
            img.set_pixel(15 - x, y, c);
        }
    }
    let bytes = encode(&img).unwrap().to_artifacts().name_table;
    let a = u16::from_be_bytes([bytes[0], bytes[1]]);
    let b = u16::from_be_bytes([bytes[2], bytes[3]]);
    assert_eq!(a & 0x7FF, b & 0x7FF);
    assert_eq!(a ^ b, 1 << 11);
}

#[test]
fn too_many_colors_in_a_tile() {
    let mut img = Image::new(8, 16);
    // Second tile row: 17 distinct levels of red and green.
    for i in 0..17u32 {
        let c = Color::new(RAMP[(i % 8) as usize], RAMP[(i / 8) as usize], 0);
        img.set_pixel(i % 8, 8 + i / 8, c);
    }
    match encode(&img) {
        Err(EncodeError::PaletteOverflow { x, y, colors }) => {
            assert_eq!((x, y, colors), (0, 8, 17));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn invalid_dimensions_are_reported() {
    let err = encode(&Image::new(10, 9)).unwrap_err();
    assert_eq!(
        err,
        EncodeError::InvalidDimensions {
            width: 10,
            height: 9
        }
    );
    assert!(err.to_string().contains("10x9"));
}

#[test]
fn output_is_identical_across_runs() {
    let img = sample_image(64, 48, 42);
    let first = encode(&img).unwrap().to_artifacts();
    for _ in 0..3 {
        assert_eq!(encode(&img).unwrap().to_artifacts(), first);
    }
}

#[test]
fn render_matches_quantized_input() {
    let img = sample_image(40, 32, 3);
    let assets = encode(&img).unwrap();
    let out = render(&assets);
    assert_eq!((out.width(), out.height()), (40, 32));
    for y in 0..img.height() {
        for x in 0..img.width() {
            assert_eq!(out.pixel(x, y), quantize_color(img.pixel(x, y)).to_rgb());
        }
    }
}

#[test]
fn artifacts_decode_to_the_same_picture() {
    let img = sample_image(32, 16, 11);
    let assets = encode(&img).unwrap();
    let decoded = deserialize(&assets.to_artifacts(), assets.width_tiles).unwrap();
    assert_eq!(decoded.name_table, assets.name_table);
    assert_eq!(decoded.patterns, assets.patterns);
    assert_eq!(render(&decoded), render(&assets));
}

#[test]
fn palette_colors_stay_within_budget() {
    let assets = encode(&sample_image(64, 64, 5)).unwrap();
    assert!(assets.palettes.len() <= 4);
    for pal in &assets.palettes {
        assert!(pal.len() <= 16);
        assert_eq!(pal.colors[0], HwColor::BLACK);
    }
    for (entry, pattern) in assets
        .name_table
        .iter()
        .map(|e| (e, &assets.patterns[e.pattern as usize]))
    {
        let len = assets.palettes[entry.palette as usize].len();
        assert!(pattern.iter().all(|&i| (i as usize) < len));
    }
}
