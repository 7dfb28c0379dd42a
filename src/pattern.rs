// Deduplicated store of 8x8 patterns with mirror-symmetry reuse.
use hashbrown::{hash_map::Entry, HashMap};
use log::debug;

use crate::common::{ColorIdx, PatternIdx, MAX_PATTERNS, TILE_PIXELS, TILE_SIZE};

pub type Pattern = [ColorIdx; TILE_PIXELS]; // Row-major palette-relative indices

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    // Tie-break order when several orientations match.
    pub const ALL: [Flip; 4] = [Flip::None, Flip::Horizontal, Flip::Vertical, Flip::Both];

    pub fn from_flags(h_flip: bool, v_flip: bool) -> Self {
        match (h_flip, v_flip) {
            (false, false) => Flip::None,
            (true, false) => Flip::Horizontal,
            (false, true) => Flip::Vertical,
            (true, true) => Flip::Both,
        }
    }

    pub fn h_flip(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    pub fn v_flip(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }

    pub fn apply_to_coords(self, x: usize, y: usize) -> (usize, usize) {
        let x = if self.h_flip() { TILE_SIZE - 1 - x } else { x };
        let y = if self.v_flip() { TILE_SIZE - 1 - y } else { y };
        (x, y)
    }

    pub fn apply_to_pattern(self, pattern: &Pattern) -> Pattern {
        let mut out = [0; TILE_PIXELS];
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let (sx, sy) = self.apply_to_coords(x, y);
                out[y * TILE_SIZE + x] = pattern[sy * TILE_SIZE + sx];
            }
        }
        out
    }
}

/// Result of resolving a tile against the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PatternRef {
    pub index: PatternIdx,
    pub flip: Flip,
}

pub struct PatternStore {
    patterns: Vec<Pattern>,
    // Every orientation of every stored pattern, mapped to the first
    // (pattern, flip) producing it. Creation order and `Flip::ALL` order
    // decide which entry is kept.
    lookup: HashMap<Pattern, PatternRef>,
}

impl PatternStore {
    pub fn new() -> Self {
        PatternStore {
            patterns: vec![],
            lookup: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    /// Finds a stored pattern equivalent to `pattern` under mirroring.
    pub fn find(&self, pattern: &Pattern) -> Option<PatternRef> {
        self.lookup.get(pattern).copied()
    }

    pub fn is_full(&self) -> bool {
        self.patterns.len() >= MAX_PATTERNS
    }

    /// Returns the matching stored pattern, or appends `pattern` as a new
    /// canonical entry. Returns `None`, leaving the store untouched, when a new
    /// entry is needed but the store is full.
    pub fn resolve(&mut self, pattern: &Pattern) -> Option<PatternRef> {
        if let Some(found) = self.find(pattern) {
            return Some(found);
        }
        if self.is_full() {
            return None;
        }
        let index = self.patterns.len() as PatternIdx;
        self.patterns.push(*pattern);
        for flip in Flip::ALL {
            if let Entry::Vacant(entry) = self.lookup.entry(flip.apply_to_pattern(pattern)) {
                entry.insert(PatternRef { index, flip });
            }
        }
        debug!("Pattern {} added", index);
        Some(PatternRef {
            index,
            flip: Flip::None,
        })
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}
