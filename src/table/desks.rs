use glam::Vec3;

use crate::table::PlayerSlot;

/// A player's seat at the table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Desk {
    pub color: &'static str,
    /// Center in cm, z ignored.
    pub center: Vec3,
    /// Facing in degrees.
    pub yaw: f32,
    pub player_slot: PlayerSlot,
    /// Smallest player count that seats someone here.
    pub min_player_count: u8,
}

impl Desk {
    /// Angle of the desk center around the table center, radians.
    pub fn angle(&self) -> f32 {
        self.center.y.atan2(self.center.x)
    }
}

// starts "south-east", then clockwise
pub const DESKS: [Desk; 8] = [
    Desk { color: "white", center: Vec3::new(-90.6987, 110.52, 0.), yaw: -117.5, player_slot: 18, min_player_count: 1 },
    Desk { color: "blue", center: Vec3::new(-119.224, 6.05442, 0.), yaw: -90., player_slot: 15, min_player_count: 5 },
    Desk { color: "purple", center: Vec3::new(-96.29, -99.7789, 0.), yaw: -62.5, player_slot: 4, min_player_count: 3 },
    Desk { color: "orange", center: Vec3::new(-6.05441, -150.691, 0.), yaw: 0., player_slot: 6, min_player_count: 8 },
    Desk { color: "yellow", center: Vec3::new(91.3162, -110.52, 0.), yaw: 62.5, player_slot: 9, min_player_count: 4 },
    Desk { color: "red", center: Vec3::new(119.842, -6.0544, 0.), yaw: 90., player_slot: 16, min_player_count: 6 },
    Desk { color: "green", center: Vec3::new(96.9075, 99.7789, 0.), yaw: 117.5, player_slot: 1, min_player_count: 2 },
    Desk { color: "pink", center: Vec3::new(6.0544, 149.218, 0.), yaw: 180., player_slot: 5, min_player_count: 7 },
];

/// Desks in use for a player count, in table (clockwise) order.
pub fn desks_for(player_count: u8) -> Vec<&'static Desk> {
    DESKS.iter().filter(|desk| desk.min_player_count <= player_count).collect()
}

pub fn desk_for_slot(player_count: u8, slot: PlayerSlot) -> Option<&'static Desk> {
    desks_for(player_count).into_iter().find(|desk| desk.player_slot == slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_counts() {
        for player_count in 1..=8u8 {
            assert_eq!(desks_for(player_count).len(), player_count as usize);
        }
        assert!(desks_for(0).is_empty());
    }

    #[test]
    fn test_desks_run_clockwise() {
        // clockwise on the table is increasing atan2(y, x)
        let angles: Vec<f32> = desks_for(8).iter()
            .map(|desk| desk.angle().rem_euclid(std::f32::consts::TAU))
            .collect();
        let turns = angles.windows(2).filter(|w| w[1] < w[0]).count();
        assert!(turns <= 1, "desk angles {angles:?} should wrap at most once");
    }

    #[test]
    fn test_slots_unique() {
        let mut slots: Vec<_> = DESKS.iter().map(|d| d.player_slot).collect();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), DESKS.len());
    }

    #[test]
    fn test_desk_for_slot() {
        assert_eq!(desk_for_slot(6, 18).map(|d| d.color), Some("white"));
        // pink sits out below seven players
        assert_eq!(desk_for_slot(6, 5), None);
        assert_eq!(desk_for_slot(7, 5).map(|d| d.color), Some("pink"));
    }
}
