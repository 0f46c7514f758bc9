//! Lay a map string out on the table.
//!
//! Tiles already on the table (or packed away in a container) are reused;
//! missing ones are spawned. Separately, generic home system tiles can be
//! dealt into the map's empty slots so each lands near its owner's desk.

use std::{
    collections::{HashMap, HashSet},
    f32::consts::TAU,
};

use glam::Vec3;
use hexgrid::{Hex, Layout};
use log::{debug, info};
use serde::Serialize;
use tinyvec::TinyVec;

use crate::{
    error::LayoutError,
    map_string::{parse, MapStringEntry, Side, SpiralIndex},
    table::{Placement, PlayerSlot, Rotator, Session, SystemCatalog, Table, TileId},
};

/// Expansion tile placed off-map on every expansion table, face down.
pub const MALLICE_TILE: TileId = 82;
pub const MALLICE_HEX: Hex = Hex { q: -4, r: 5, s: -1 };

/// Height above the table that placed tiles drop from.
const LOAD_LIFT: f32 = 10.;
const HOME_LIFT: f32 = 1.;

/// Where and how one tile goes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementDirective {
    pub tile: TileId,
    pub hex: Hex,
    pub nsid: String,
    pub placement: Placement,
    pub home: bool,
    pub hyperlane: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Existing objects moved into place.
    pub moved: usize,
    pub spawned: usize,
}

pub struct MapStringLoad<'a> {
    session: &'a Session,
    catalog: &'a SystemCatalog,
    index: SpiralIndex,
}

impl<'a> MapStringLoad<'a> {
    pub fn new(session: &'a Session, catalog: &'a SystemCatalog) -> Self {
        Self { session, catalog, index: SpiralIndex::default() }
    }

    pub fn index(&self) -> &SpiralIndex {
        &self.index
    }

    fn hex_of(&self, index: usize) -> Result<Hex, LayoutError> {
        self.index.hex_of(index).ok_or(LayoutError::IndexOutOfRange(index))
    }

    /// Resolve every non-empty entry to a placement, without touching the table.
    ///
    /// Fails on the first malformed token, out-of-range position or unknown tile.
    pub fn directives(&self, map_string: &str, skip_mallice: bool, table_height: f32) -> Result<Vec<PlacementDirective>, LayoutError> {
        let parsed = parse(map_string)?;
        let layout = self.session.layout().with_z(table_height + LOAD_LIFT);

        let mut directives = Vec::with_capacity(parsed.len() + 1);
        for (i, entry) in parsed.iter().enumerate() {
            if entry.is_generic() {
                continue;
            }
            directives.push(self.directive(&layout, entry, self.hex_of(i)?)?);
        }

        let has_mallice = directives.iter().any(|d| d.tile == MALLICE_TILE);
        if self.session.pok() && !skip_mallice && !has_mallice {
            directives.push(self.directive(&layout, &MapStringEntry::new(MALLICE_TILE), MALLICE_HEX)?);
        }
        Ok(directives)
    }

    fn directive(&self, layout: &Layout, entry: &MapStringEntry, hex: Hex) -> Result<PlacementDirective, LayoutError> {
        let system = self.catalog.get(entry.tile).ok_or(LayoutError::UnknownTile(entry.tile))?;

        let mut rotation = Rotator { yaw: entry.yaw(), ..Default::default() };
        // Mallice starts upside down
        if entry.side == Some(Side::B) || entry.tile == MALLICE_TILE {
            rotation.roll = 180.;
        }

        Ok(PlacementDirective {
            tile: entry.tile,
            hex,
            nsid: system.nsid(),
            placement: Placement { position: layout.to_position(hex), rotation },
            home: system.home,
            hyperlane: system.hyperlane,
        })
    }

    /// Place every tile in the map string, reusing objects where possible.
    ///
    /// Nothing moves unless the whole string resolves.
    pub fn load<T: Table>(&self, table: &mut T, map_string: &str, skip_mallice: bool) -> Result<LoadReport, LayoutError> {
        let directives = self.directives(map_string, skip_mallice, table.table_height())?;
        info!("placing {} system tiles", directives.len());

        let mut report = LoadReport::default();
        let mut used = HashSet::new();
        for directive in &directives {
            let existing = table.find_existing(directive.tile).into_iter().find(|h| !used.contains(h));
            let handle = match existing {
                Some(handle) => {
                    report.moved += 1;
                    handle
                }
                None => {
                    debug!("tile {} missing, spawning {}", directive.tile, directive.nsid);
                    report.spawned += 1;
                    table.spawn(directive.tile, &directive.nsid, &directive.placement)
                }
            };
            used.insert(handle);
            table.place(handle, &directive.placement);
        }
        Ok(report)
    }

    /// Move each seated player's generic home system into one of the map's
    /// empty (`0`) slots.
    ///
    /// Only applies when there is exactly one empty slot and one generic tile
    /// per player; otherwise nothing moves and the result is empty. Returns
    /// the slot each player's tile went to.
    pub fn move_generic_home_systems<T: Table>(&self, table: &mut T, map_string: &str) -> Result<Vec<(PlayerSlot, Hex)>, LayoutError> {
        let parsed = parse(map_string)?;
        let player_count = self.session.player_count() as usize;

        let zero_hexes = parsed.iter().enumerate()
            .filter(|(_, entry)| entry.is_generic())
            .map(|(i, _)| self.hex_of(i))
            .collect::<Result<TinyVec<[Hex; 8]>, _>>()?;
        if zero_hexes.len() != player_count {
            debug!("{} empty slots for {} players, leaving generic home systems", zero_hexes.len(), player_count);
            return Ok(Vec::new());
        }

        let desks = self.session.desks();
        let generic: HashMap<PlayerSlot, T::Handle> = table.generic_home_systems().into_iter()
            .filter(|(slot, _)| self.session.desk_for_slot(*slot).is_some())
            .collect();
        if generic.len() != player_count {
            debug!("{} generic home systems for {} players, leaving them", generic.len(), player_count);
            return Ok(Vec::new());
        }

        // Assume desks and empty slots both run clockwise and only pick where
        // the two sequences line up.
        let layout = self.session.layout().with_z(table.table_height() + HOME_LIFT);
        let seats: TinyVec<[f32; 8]> = desks.iter().map(|desk| desk.angle()).collect();
        let slots: TinyVec<[f32; 8]> = zero_hexes.iter().map(|hex| angle_of(layout.to_position(*hex))).collect();
        let best = best_rotation(&seats, &slots);
        debug!("generic home systems offset by {best}");

        let mut moved = Vec::with_capacity(player_count);
        for (i, desk) in desks.iter().enumerate() {
            let hex = zero_hexes[(i + best) % player_count];
            if let Some(&handle) = generic.get(&desk.player_slot) {
                table.set_position(handle, layout.to_position(hex));
                moved.push((desk.player_slot, hex));
            }
        }
        Ok(moved)
    }
}

fn angle_of(pos: Vec3) -> f32 {
    pos.y.atan2(pos.x)
}

/// Smallest angle between two directions, radians.
pub fn angle_between(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Cyclic offset `c` minimizing the summed angle between seat `i` and slot
/// `(i + c) % n`. Ties go to the lowest offset.
///
/// Each difference is wrapped into `[0, π]` rather than taken raw, so a seat
/// at -170° counts as 20° from a slot at 170°, not 340°.
pub fn best_rotation(seats: &[f32], slots: &[f32]) -> usize {
    let n = seats.len().min(slots.len());
    let mut best = 0;
    let mut best_d = f32::MAX;
    for candidate in 0..n {
        let d: f32 = (0..n)
            .map(|offset| angle_between(seats[offset], slots[(offset + candidate) % n]))
            .sum();
        if d < best_d {
            best = candidate;
            best_d = d;
        }
    }
    best
}
