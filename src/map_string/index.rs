use std::iter;

use bimap::BiMap;
use hexgrid::Hex;

/// Large enough for any supported map, with room for the fixed extra tile.
pub const MAX_MAP_RADIUS: u8 = 8;

/// Map string position ↔ hex.
///
/// Index 0 is the center; ring `k` starts at index `3k(k-1)+1` with the hex
/// "above" the center and walks clockwise. Map strings are authored against
/// this order, so it never changes.
#[derive(Clone, Debug)]
pub struct SpiralIndex {
    hexes: BiMap<usize, Hex>,
}

impl Default for SpiralIndex {
    fn default() -> Self {
        Self::new(MAX_MAP_RADIUS)
    }
}

impl SpiralIndex {
    pub fn new(radius: u8) -> Self {
        let mut hexes = BiMap::with_capacity(ring_start(radius as usize + 1));
        hexes.extend(iter::once(Hex::ZERO)
            .chain((1..=radius).flat_map(|k| Hex::ZERO.ring(k)))
            .enumerate());
        Self { hexes }
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn hex_of(&self, index: usize) -> Option<Hex> {
        self.hexes.get_by_left(&index).copied()
    }

    pub fn index_of(&self, hex: Hex) -> Option<usize> {
        self.hexes.get_by_right(&hex).copied()
    }
}

/// First index on ring `k`.
pub fn ring_start(k: usize) -> usize {
    if k == 0 { 0 } else { 3 * k * (k - 1) + 1 }
}
