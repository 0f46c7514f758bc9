use std::{io, path::PathBuf};

use hexgrid::ParseHexError;
use thiserror::Error;

use crate::table::TileId;

/// A map string token that does not read as `<digits>[a|b][0-5]`.
///
/// Parsing is fail-fast: the first bad token aborts the whole string.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("bad map string token #{index} \"{token}\": {fault}")]
pub struct MapStringError {
    pub index: usize,
    pub token: String,
    pub fault: TokenFault,
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum TokenFault {
    #[error("tile number must start with a digit")]
    NotANumber,
    #[error("tile number does not fit")]
    TileOutOfRange,
    #[error("rotation '{0}' is not 0-5")]
    BadRotation(char),
    #[error("unexpected '{0}'")]
    Unexpected(char),
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Parse(#[from] MapStringError),
    #[error(transparent)]
    Hex(#[from] ParseHexError),
    #[error("no system tile {0} in the catalog")]
    UnknownTile(TileId),
    #[error("map string position {0} is outside the supported map")]
    IndexOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("decoding {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("player count {0} is not 1-8")]
    PlayerCount(u8),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("system tile {0} is already in the catalog")]
    Duplicate(TileId),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
