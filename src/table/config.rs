use std::{fs, io, path::Path};

use hexgrid::{Layout, Orientation, Scale};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    table::{desks::{self, Desk}, PlayerSlot},
};

pub const DEFAULT_PLAYER_COUNT: u8 = 6;
pub const MAX_PLAYER_COUNT: u8 = 8;

/// Pre-game table settings, persisted across save/load.
///
/// Only this type can change scale; [`TableConfig::begin_session`] consumes it,
/// so nothing can resize hexes once tiles are laid out.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TableConfig {
    player_count: u8,
    pok: bool,
    larger_scale: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            pok: true,
            larger_scale: false,
        }
    }
}

impl TableConfig {
    /// Read saved settings, falling back to defaults when nothing was saved.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no table config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path: path.into(), source }),
        };
        let config: TableConfig = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.into(), source })?;
        check_player_count(config.player_count)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Json { path: path.into(), source })?;
        fs::write(path, text).map_err(|source| ConfigError::Io { path: path.into(), source })
    }

    pub fn player_count(&self) -> u8 { self.player_count }
    pub fn pok(&self) -> bool { self.pok }
    pub fn larger_scale(&self) -> bool { self.larger_scale }

    pub fn set_player_count(&mut self, player_count: u8) -> Result<(), ConfigError> {
        check_player_count(player_count)?;
        self.player_count = player_count;
        Ok(())
    }

    pub fn set_pok(&mut self, pok: bool) {
        self.pok = pok;
    }

    /// Use larger hexes. Pre-session only.
    pub fn set_larger_scale(&mut self, larger: bool) {
        self.larger_scale = larger;
    }

    pub fn begin_session(self) -> Session {
        let layout = Layout::new(Orientation::Pointy, Scale::from_larger(self.larger_scale));
        info!("session started: {} players, {:?} scale, pok {}", self.player_count, layout.scale(), self.pok);
        Session {
            layout,
            player_count: self.player_count,
            pok: self.pok,
        }
    }
}

fn check_player_count(player_count: u8) -> Result<(), ConfigError> {
    match player_count {
        1..=MAX_PLAYER_COUNT => Ok(()),
        _ => Err(ConfigError::PlayerCount(player_count)),
    }
}

/// Frozen settings for a game in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Session {
    layout: Layout,
    player_count: u8,
    pok: bool,
}

impl Session {
    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn player_count(&self) -> u8 { self.player_count }
    pub fn pok(&self) -> bool { self.pok }

    /// Seated desks for this player count, clockwise.
    pub fn desks(&self) -> Vec<&'static Desk> {
        desks::desks_for(self.player_count)
    }

    /// The seated desk belonging to `slot`, if that slot plays this game.
    pub fn desk_for_slot(&self, slot: PlayerSlot) -> Option<&'static Desk> {
        desks::desk_for_slot(self.player_count, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.player_count(), 6);
        assert!(config.pok());
        assert!(!config.larger_scale());
    }

    #[test]
    fn test_player_count_bounds() {
        let mut config = TableConfig::default();
        assert!(matches!(config.set_player_count(0), Err(ConfigError::PlayerCount(0))));
        assert!(matches!(config.set_player_count(9), Err(ConfigError::PlayerCount(9))));
        config.set_player_count(8).unwrap();
        assert_eq!(config.player_count(), 8);
    }

    #[test]
    fn test_session_scale_follows_config() {
        let mut config = TableConfig::default();
        assert_eq!(config.begin_session().layout().scale(), Scale::Default);

        config.set_larger_scale(true);
        let session = config.begin_session();
        assert_eq!(session.layout().scale(), Scale::Larger);
        assert_eq!(session.layout().orientation(), Orientation::Pointy);
    }

    #[test]
    fn test_session_desks_match_player_count() {
        let mut config = TableConfig::default();
        config.set_player_count(4).unwrap();
        let session = config.begin_session();
        assert_eq!(session.desks().len(), 4);
        assert_eq!(session.desk_for_slot(9).map(|d| d.color), Some("yellow"));
        // red only sits at six or more
        assert!(session.desk_for_slot(16).is_none());
    }

    // ===== PERSISTENCE TESTS =====

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        let mut config = TableConfig::default();
        config.set_player_count(3).unwrap();
        config.set_larger_scale(true);
        config.set_pok(false);
        config.save(&path).unwrap();

        assert_eq!(TableConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = TableConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"{ "larger_scale": true }"#).unwrap();

        let config = TableConfig::load(&path).unwrap();
        assert!(config.larger_scale());
        assert_eq!(config.player_count(), DEFAULT_PLAYER_COUNT);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        fs::write(&path, r#"{ "player_count": 12 }"#).unwrap();
        assert!(matches!(TableConfig::load(&path), Err(ConfigError::PlayerCount(12))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(TableConfig::load(&path), Err(ConfigError::Json { .. })));
    }
}
