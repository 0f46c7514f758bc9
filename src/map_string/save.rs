use std::collections::BTreeMap;

use hexgrid::Layout;
use log::{debug, warn};

use crate::{
    map_string::{load::{MALLICE_HEX, MALLICE_TILE}, MapString, MapStringEntry, Side, SpiralIndex, GENERIC_TILE},
    table::{Rotator, Table, TileId},
};

/// Read the system tiles lying on the table back into a map string.
///
/// Tiles off the spiral are ignored, as is Mallice in its fixed spot. Holes
/// below the outermost occupied index become generic `0` slots. When two
/// tiles share a hex the first one found wins.
pub fn save<T: Table>(table: &T, layout: &Layout, index: &SpiralIndex) -> MapString {
    let mut entries: BTreeMap<usize, MapStringEntry> = BTreeMap::new();
    for placed in table.placed_system_tiles() {
        if placed.tile == GENERIC_TILE {
            continue;
        }
        let hex = layout.from_position(placed.position);
        if placed.tile == MALLICE_TILE && hex == MALLICE_HEX {
            continue;
        }
        let Some(i) = index.index_of(hex) else {
            debug!("tile {} at {hex} is off the map", placed.tile);
            continue;
        };
        if let Some(first) = entries.get(&i) {
            warn!("tiles {} and {} both at {hex}, keeping {}", first.tile, placed.tile, first.tile);
            continue;
        }
        entries.insert(i, entry_for(placed.tile, &placed.rotation));
    }

    let len = entries.last_key_value().map_or(0, |(i, _)| i + 1);
    MapString::new(
        (0..len)
            .map(|i| entries.get(&i).copied().unwrap_or_else(|| MapStringEntry::new(GENERIC_TILE)))
            .collect(),
    )
}

fn entry_for(tile: TileId, rotation: &Rotator) -> MapStringEntry {
    let face_down = (rotation.roll.rem_euclid(360.) - 180.).abs() < 90.;
    let steps = ((rotation.yaw / 60.).round() as i32).rem_euclid(6) as u8;

    let rotation = (steps != 0).then_some(steps);
    let side = match (face_down, rotation) {
        (true, _) => Some(Side::B),
        (false, Some(_)) => Some(Side::A),
        (false, None) => None,
    };
    MapStringEntry { tile, side, rotation }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        map_string::MapStringLoad,
        table::{MemoryTable, Placement, SystemCatalog, TableConfig},
    };

    fn session(pok: bool) -> crate::table::Session {
        let mut config = TableConfig::default();
        config.set_pok(pok);
        config.begin_session()
    }

    #[test]
    fn test_load_then_save() {
        let session = session(false);
        let catalog = SystemCatalog::standard();
        let loader = MapStringLoad::new(&session, &catalog);
        let mut table = MemoryTable::default();

        loader.load(&mut table, "18 25a2 26b 0 27", false).unwrap();

        let saved = save(&table, session.layout(), loader.index());
        assert_eq!(saved.to_string(), "18 25a2 26b 0 27");
    }

    #[test]
    fn test_save_skips_mallice() {
        let session = session(true);
        let catalog = SystemCatalog::standard();
        let loader = MapStringLoad::new(&session, &catalog);
        let mut table = MemoryTable::default();

        loader.load(&mut table, "18 19 20", false).unwrap();
        assert!(table.objects().iter().any(|obj| obj.tile == MALLICE_TILE));

        assert_eq!(save(&table, session.layout(), loader.index()).to_string(), "18 19 20");
    }

    #[test]
    fn test_save_ignores_off_map_and_generic() {
        let session = session(false);
        let index = SpiralIndex::new(1);
        let mut table = MemoryTable::default();
        table.add_tile(18, Vec3::ZERO);
        table.add_tile(40, Vec3::new(500., 0., 0.));
        table.add_generic_home_system(4, session.layout().to_position(index.hex_of(3).unwrap()));

        assert_eq!(save(&table, session.layout(), &index).to_string(), "18");
    }

    #[test]
    fn test_save_first_tile_wins() {
        let session = session(false);
        let mut table = MemoryTable::default();
        table.add_tile(18, Vec3::ZERO);
        table.add_tile(19, Vec3::new(0.5, 0.5, 0.));

        assert_eq!(save(&table, session.layout(), &SpiralIndex::default()).to_string(), "18");
    }

    #[test]
    fn test_save_reads_rotation_loosely() {
        let session = session(false);
        let mut table = MemoryTable::default();
        let id = table.add_tile(18, Vec3::ZERO);
        table.place(id, &Placement {
            position: Vec3::ZERO,
            rotation: Rotator { pitch: 0., yaw: -61., roll: -179.5 },
        });

        assert_eq!(save(&table, session.layout(), &SpiralIndex::default()).to_string(), "18b5");
    }

    #[test]
    fn test_save_empty_table() {
        let session = session(false);
        let table = MemoryTable::default();
        assert!(save(&table, session.layout(), &SpiralIndex::default()).is_empty());
    }
}
