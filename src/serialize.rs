// Fixed binary layouts of the palette, pattern and name-table artifacts.
// All words are big-endian.
use crate::{
    color::HwColor,
    common::{MAX_PALETTES, PALETTE_SIZE, TILE_PIXELS},
    encoder::{NameTableEntry, TileAssets},
    error::ArtifactError,
    palette::Palette,
    pattern::Pattern,
};

pub const PALETTE_BYTES: usize = MAX_PALETTES * PALETTE_SIZE * 2;
pub const PATTERN_BYTES: usize = TILE_PIXELS / 2;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub palette: Vec<u8>,
    pub patterns: Vec<u8>,
    pub name_table: Vec<u8>,
}

pub fn serialize_palettes(palettes: &[Palette]) -> Vec<u8> {
    let mut out = vec![0; PALETTE_BYTES];
    for (slot, pal) in palettes.iter().take(MAX_PALETTES).enumerate() {
        for (i, color) in pal.colors.iter().take(PALETTE_SIZE).enumerate() {
            let offset = (slot * PALETTE_SIZE + i) * 2;
            out[offset..offset + 2].copy_from_slice(&color.0.to_be_bytes());
        }
    }
    out
}

pub fn serialize_patterns(patterns: &[Pattern]) -> Vec<u8> {
    let mut out = Vec::with_capacity(patterns.len() * PATTERN_BYTES);
    for pattern in patterns {
        for pair in pattern.chunks_exact(2) {
            out.push((pair[0] & 0xF) << 4 | (pair[1] & 0xF));
        }
    }
    out
}

pub fn serialize_name_table(name_table: &[NameTableEntry]) -> Vec<u8> {
    name_table
        .iter()
        .flat_map(|e| e.to_word().to_be_bytes())
        .collect()
}

pub fn serialize(
    palettes: &[Palette],
    patterns: &[Pattern],
    name_table: &[NameTableEntry],
) -> Artifacts {
    Artifacts {
        palette: serialize_palettes(palettes),
        patterns: serialize_patterns(patterns),
        name_table: serialize_name_table(name_table),
    }
}

impl TileAssets {
    pub fn to_artifacts(&self) -> Artifacts {
        serialize(&self.palettes, &self.patterns, &self.name_table)
    }
}

/// Parses artifacts back into tables. Palettes come back as 4 full slots of 16
/// colors since the file does not record their lengths.
pub fn deserialize(artifacts: &Artifacts, width_tiles: u32) -> Result<TileAssets, ArtifactError> {
    if artifacts.palette.len() != PALETTE_BYTES {
        return Err(ArtifactError::PaletteLength(artifacts.palette.len()));
    }
    if artifacts.patterns.len() % PATTERN_BYTES != 0 {
        return Err(ArtifactError::PatternLength(artifacts.patterns.len()));
    }
    if artifacts.name_table.len() % 2 != 0 {
        return Err(ArtifactError::NameTableLength(artifacts.name_table.len()));
    }

    let palettes = artifacts
        .palette
        .chunks_exact(PALETTE_SIZE * 2)
        .map(|slot| {
            Palette::new(
                slot.chunks_exact(2)
                    .map(|b| HwColor(u16::from_be_bytes([b[0], b[1]])))
                    .collect(),
            )
        })
        .collect();

    let patterns: Vec<Pattern> = artifacts
        .patterns
        .chunks_exact(PATTERN_BYTES)
        .map(|bytes| {
            let mut pattern = [0; TILE_PIXELS];
            for (i, b) in bytes.iter().enumerate() {
                pattern[i * 2] = b >> 4;
                pattern[i * 2 + 1] = b & 0xF;
            }
            pattern
        })
        .collect();

    let name_table: Vec<NameTableEntry> = artifacts
        .name_table
        .chunks_exact(2)
        .map(|b| NameTableEntry::from_word(u16::from_be_bytes([b[0], b[1]])))
        .collect();
    if let Some((index, e)) = name_table
        .iter()
        .enumerate()
        .find(|(_, e)| e.pattern as usize >= patterns.len())
    {
        return Err(ArtifactError::DanglingReference {
            index,
            what: "pattern",
            value: e.pattern as usize,
        });
    }

    let tiles = name_table.len() as u32;
    if width_tiles == 0 || tiles % width_tiles != 0 {
        return Err(ArtifactError::NameTableShape {
            entries: name_table.len(),
            width_tiles,
        });
    }

    Ok(TileAssets {
        width_tiles,
        height_tiles: tiles / width_tiles,
        palettes,
        patterns,
        name_table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Flip;

    #[test]
    fn palette_file_is_always_128_bytes() {
        assert_eq!(serialize_palettes(&[]), vec![0; 128]);
        let pals = vec![
            Palette::new(vec![HwColor(0), HwColor(14)]),
            Palette::new(vec![HwColor(0), HwColor(0xEEE)]),
        ];
        let bytes = serialize_palettes(&pals);
        assert_eq!(bytes.len(), 128);
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x00, 0x0E]);
        assert_eq!(&bytes[32..36], &[0x00, 0x00, 0x0E, 0xEE]);
        assert!(bytes[4..32].iter().all(|&b| b == 0));
        assert!(bytes[36..].iter().all(|&b| b == 0));
    }

    #[test]
    fn patterns_pack_high_nibble_first() {
        let mut p = [0; TILE_PIXELS];
        p[0] = 1;
        p[1] = 2;
        p[63] = 15;
        let bytes = serialize_patterns(&[p, [1; TILE_PIXELS]]);
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes[0], 0x12);
        assert_eq!(bytes[31], 0x0F);
        assert!(bytes[32..].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn name_table_words_are_big_endian() {
        let entries = [
            NameTableEntry::default(),
            NameTableEntry {
                pattern: 0x102,
                flip: Flip::Horizontal,
                palette: 3,
            },
        ];
        assert_eq!(
            serialize_name_table(&entries),
            vec![0x00, 0x00, 0x69, 0x02]
        );
    }

    #[test]
    fn deserialize_recovers_tables() {
        let mut p = [0; TILE_PIXELS];
        p[5] = 9;
        let entries = vec![
            NameTableEntry {
                pattern: 0,
                flip: Flip::Vertical,
                palette: 1,
            };
            4
        ];
        let pals = vec![Palette::new(vec![HwColor(0)]), Palette::new(vec![HwColor(0), HwColor(0x2A6)])];
        let artifacts = serialize(&pals, &[p], &entries);
        let tables = deserialize(&artifacts, 2).unwrap();
        assert_eq!(tables.height_tiles, 2);
        assert_eq!(tables.patterns, vec![p]);
        assert_eq!(tables.name_table, entries);
        assert_eq!(tables.palettes.len(), 4);
        assert_eq!(tables.palettes[1].colors[1], HwColor(0x2A6));
    }

    #[test]
    fn deserialize_validates_lengths_and_references() {
        let good = serialize(&[], &[[0; TILE_PIXELS]], &[NameTableEntry::default()]);
        let mut bad = good.clone();
        bad.palette.pop();
        assert_eq!(deserialize(&bad, 1), Err(ArtifactError::PaletteLength(127)));
        let mut bad = good.clone();
        bad.patterns.push(0);
        assert_eq!(deserialize(&bad, 1), Err(ArtifactError::PatternLength(33)));
        let mut bad = good.clone();
        bad.name_table.push(0);
        assert_eq!(deserialize(&bad, 1), Err(ArtifactError::NameTableLength(3)));
        let mut bad = good.clone();
        bad.name_table = vec![0x00, 0x01];
        assert!(matches!(
            deserialize(&bad, 1),
            Err(ArtifactError::DanglingReference { index: 0, .. })
        ));
        assert!(deserialize(&good, 1).is_ok());
        assert!(matches!(
            deserialize(&good, 0),
            Err(ArtifactError::NameTableShape { .. })
        ));
    }
}
