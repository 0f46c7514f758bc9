mod hex;
mod layout;

pub use hex::{round, Hex, ParseHexError, COORD_LIMIT, DIRECTIONS};
pub use layout::{Basis, Convert, Layout, Orientation, Scale, HALF_SIZE_UNSCALED};
