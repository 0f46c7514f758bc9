use glam::Vec3;
use log::trace;

use crate::table::{PlacedTile, Placement, PlayerSlot, Rotator, Table, TileId};

pub const DEFAULT_TABLE_HEIGHT: f32 = 1.;

/// Index into [`MemoryTable::objects`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct TableObject {
    pub tile: TileId,
    pub nsid: String,
    pub position: Vec3,
    pub rotation: Rotator,
    pub owner: Option<PlayerSlot>,
    pub contained: bool,
}

/// A [`Table`] that only keeps objects in memory.
///
/// Stands in for the host when previewing a layout or testing one.
#[derive(Clone, Debug)]
pub struct MemoryTable {
    height: f32,
    objects: Vec<TableObject>,
    spawned: usize,
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_HEIGHT)
    }
}

impl MemoryTable {
    pub fn new(height: f32) -> Self {
        Self { height, objects: Vec::new(), spawned: 0 }
    }

    pub fn objects(&self) -> &[TableObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&TableObject> {
        self.objects.get(id.0)
    }

    /// How many objects came from [`Table::spawn`] rather than being added up front.
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Put a system tile on the table.
    pub fn add_tile(&mut self, tile: TileId, position: Vec3) -> ObjectId {
        self.push(TableObject {
            tile,
            nsid: format!("tile.system:base/{tile}"),
            position,
            rotation: Rotator::default(),
            owner: None,
            contained: false,
        })
    }

    /// Put a system tile away in a container.
    pub fn add_contained_tile(&mut self, tile: TileId) -> ObjectId {
        let id = self.add_tile(tile, Vec3::ZERO);
        self.objects[id.0].contained = true;
        id
    }

    /// Put a generic home system owned by `slot` on the table.
    pub fn add_generic_home_system(&mut self, slot: PlayerSlot, position: Vec3) -> ObjectId {
        let id = self.add_tile(0, position);
        self.objects[id.0].owner = Some(slot);
        id
    }

    fn push(&mut self, object: TableObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }
}

impl Table for MemoryTable {
    type Handle = ObjectId;

    fn table_height(&self) -> f32 {
        self.height
    }

    fn find_existing(&self, tile: TileId) -> Vec<ObjectId> {
        self.objects.iter().enumerate()
            .filter(|(_, obj)| obj.tile == tile)
            .map(|(i, _)| ObjectId(i))
            .collect()
    }

    fn spawn(&mut self, tile: TileId, nsid: &str, placement: &Placement) -> ObjectId {
        trace!("spawn {nsid} at {}", placement.position);
        self.spawned += 1;
        self.push(TableObject {
            tile,
            nsid: nsid.to_owned(),
            position: placement.position,
            rotation: placement.rotation,
            owner: None,
            contained: false,
        })
    }

    fn place(&mut self, handle: ObjectId, placement: &Placement) {
        if let Some(obj) = self.objects.get_mut(handle.0) {
            obj.position = placement.position;
            obj.rotation = placement.rotation;
            obj.contained = false;
        }
    }

    fn set_position(&mut self, handle: ObjectId, position: Vec3) {
        if let Some(obj) = self.objects.get_mut(handle.0) {
            obj.position = position;
        }
    }

    fn generic_home_systems(&self) -> Vec<(PlayerSlot, ObjectId)> {
        self.objects.iter().enumerate()
            .filter(|(_, obj)| obj.tile == 0 && !obj.contained)
            .filter_map(|(i, obj)| obj.owner.map(|slot| (slot, ObjectId(i))))
            .collect()
    }

    fn placed_system_tiles(&self) -> Vec<PlacedTile> {
        self.objects.iter()
            .filter(|obj| !obj.contained)
            .map(|obj| PlacedTile { tile: obj.tile, position: obj.position, rotation: obj.rotation })
            .collect()
    }
}
