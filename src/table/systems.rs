use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::CatalogError, table::TileId};

pub const BASE: &str = "base";
pub const POK: &str = "pok";

/// One system tile in the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct System {
    pub tile: TileId,
    /// Content source, the namespace the host spawns the tile from.
    pub source: String,
    #[serde(default)]
    pub home: bool,
    #[serde(default)]
    pub hyperlane: bool,
}

impl System {
    fn standard(tile: TileId) -> System {
        let source = if tile <= 51 { BASE } else { POK };
        System {
            tile,
            source: source.to_owned(),
            home: matches!(tile, 0..=17 | 51..=58),
            hyperlane: matches!(tile, 83..=91),
        }
    }

    /// Host identifier for this tile's object template.
    pub fn nsid(&self) -> String {
        format!("tile.system:{}/{}", self.source, self.tile)
    }
}

/// Every system tile that can appear in a map string.
///
/// The catalog is exhaustive: a map string naming a tile that isn't here is a
/// content error, not something to skip.
#[derive(Clone, Debug, Default)]
pub struct SystemCatalog {
    systems: BTreeMap<TileId, System>,
}

impl SystemCatalog {
    /// Base game (0-51) and expansion (52-91) tiles. 0 is the generic home system.
    pub fn standard() -> Self {
        Self {
            systems: (0..=91).map(|tile| (tile, System::standard(tile))).collect(),
        }
    }

    pub fn get(&self, tile: TileId) -> Option<&System> {
        self.systems.get(&tile)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn inject(&mut self, system: System) -> Result<(), CatalogError> {
        if self.systems.contains_key(&system.tile) {
            return Err(CatalogError::Duplicate(system.tile));
        }
        debug!("injecting system {}", system.nsid());
        self.systems.insert(system.tile, system);
        Ok(())
    }

    /// Add homebrew systems from a JSON array of systems.
    ///
    /// All or nothing: a duplicate anywhere in the list leaves the catalog
    /// untouched.
    pub fn inject_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let systems: Vec<System> = serde_json::from_str(json)?;
        let mut next = self.clone();
        for system in systems.iter().cloned() {
            next.inject(system)?;
        }
        *self = next;
        Ok(systems.len())
    }
}
