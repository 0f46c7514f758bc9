//! Map-string layout for a hex-board tabletop game.
//!
//! A map string is a compact list of system tiles; this crate parses it,
//! resolves each position to a hex on the table, and drives a [`table::Table`]
//! collaborator (the host that owns the actual game objects) to spawn or move
//! tiles into place. Hex math lives in the `hexgrid` crate.

pub mod error;
pub mod map_string;
pub mod table;
