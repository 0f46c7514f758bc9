//! Map strings: the compact text form of a galaxy layout.
//!
//! `"18 25a2 0 ..."` lists one token per hex in outward-spiral order (see
//! [`index`]). A token is a tile number, an optional face (`a`/`b`) and an
//! optional rotation in 60° steps.

pub mod index;
pub mod load;
pub mod parser;
pub mod save;

pub use index::SpiralIndex;
pub use load::{MapStringLoad, PlacementDirective};
pub use parser::{parse, MapString, MapStringEntry, Side};
pub use save::save;

use crate::table::TileId;

/// Conventionally the center of the map.
pub const MECATOL_TILE: TileId = 18;

/// Empty slot, to be filled by a player's home system.
pub const GENERIC_TILE: TileId = 0;
