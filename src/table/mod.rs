//! The table: the host-owned world that system tiles live in.
//!
//! Everything here is either fixed table data (desks, the system catalog,
//! session config) or the [`Table`] seam the layout code drives.

pub mod config;
pub mod desks;
pub mod memory;
pub mod systems;

use std::{fmt::Debug, hash::Hash};

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use config::{Session, TableConfig};
pub use desks::Desk;
pub use memory::MemoryTable;
pub use systems::{System, SystemCatalog};

/// System tile number as printed on the tile.
pub type TileId = u16;

/// Host player slot owning a desk or a generic home system tile.
pub type PlayerSlot = u8;

/// Rotation in degrees; z-up, yaw about the table normal.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Rotator,
}

/// A system tile lying on the table (not in a container).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedTile {
    pub tile: TileId,
    pub position: Vec3,
    pub rotation: Rotator,
}

/// Host-side collaborator that owns the game objects.
pub trait Table {
    type Handle: Copy + Debug + Eq + Hash;

    fn table_height(&self) -> f32;

    /// Every object for this tile number, including ones inside containers.
    fn find_existing(&self, tile: TileId) -> Vec<Self::Handle>;

    fn spawn(&mut self, tile: TileId, nsid: &str, placement: &Placement) -> Self::Handle;

    /// Move an object into place, taking it out of its container if needed.
    fn place(&mut self, handle: Self::Handle, placement: &Placement);

    fn set_position(&mut self, handle: Self::Handle, position: Vec3);

    /// Generic home system tiles on the table with their owning slot.
    fn generic_home_systems(&self) -> Vec<(PlayerSlot, Self::Handle)>;

    fn placed_system_tiles(&self) -> Vec<PlacedTile>;
}
