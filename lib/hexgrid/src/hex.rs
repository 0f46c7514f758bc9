use std::str::FromStr;

use derive_more::{Add, Display, Mul, Sub};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// first is "above", winding counterclockwise
pub const DIRECTIONS: [Hex; 6] = [
        Hex { q: 1, r: 0, s: -1 },
        Hex { q: 1, r: -1, s: 0 },
        Hex { q: 0, r: -1, s: 1 },
        Hex { q: -1, r: 0, s: 1 },
        Hex { q: -1, r: 1, s: 0 },
        Hex { q: 0, r: 1, s: -1 },
];

/// Largest component magnitude a [`Hex`] is built with.
///
/// Half the `i16` range, so neighbors, rings and differences of in-range hexes
/// never overflow.
pub const COORD_LIMIT: i16 = i16::MAX / 2;

/// Cube coordinate on a hex grid, `q + r + s == 0`.
///
/// Text form is `<q,r,s>`, which is also what map tooling uses as a key.
/// Components stay within [`COORD_LIMIT`]: parsing rejects anything larger and
/// [`round`] clamps to it.
#[derive(Add, Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Mul, Ord, PartialEq, PartialOrd, Serialize, Sub)]
#[display("<{q},{r},{s}>")]
pub struct Hex {
    pub q: i16,
    pub r: i16,
    pub s: i16,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseHexError {
    #[error("malformed hex \"{0}\", expected <q,r,s>")]
    Malformed(String),
    #[error("q + r + s must be 0 (\"{0}\")")]
    NotOnPlane(String),
    #[error("hex \"{0}\" is beyond the supported range")]
    OutOfRange(String),
}

impl Hex {
    pub const ZERO: Hex = Hex { q: 0, r: 0, s: 0 };

    /// `q`, `r` and the derived `s` are expected within [`COORD_LIMIT`].
    pub fn new(q: i16, r: i16) -> Hex {
        Hex { q, r, s: -q - r }
    }

    pub fn try_new(q: i16, r: i16, s: i16) -> Option<Hex> {
        (q as i32 + r as i32 + s as i32 == 0).then_some(Hex { q, r, s })
    }

    pub fn distance(&self, other: &Hex) -> i16 {
        let d = *self - *other;
        d.q.abs().max(d.r.abs()).max(d.s.abs())
    }

    /// Adjacent hexes, first "above", winding counterclockwise.
    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|dir| *self + dir)
    }

    /// Hexes at exactly `radius` steps, starting "above" and walking clockwise.
    pub fn ring(&self, radius: u8) -> Vec<Hex> {
        if radius == 0 { return vec![*self]; }
        let radius = radius as i16;
        let mut hex = *self + DIRECTIONS[0] * radius;
        let mut ring = Vec::with_capacity(6 * radius as usize);
        for side in 0..6 {
            let step = DIRECTIONS[(10 - side) % 6];
            for _ in 0..radius {
                ring.push(hex);
                hex = hex + step;
            }
        }
        ring
    }
}

impl FromStr for Hex {
    type Err = ParseHexError;

    fn from_str(it: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseHexError::Malformed(it.to_owned());
        let inner = it.strip_prefix('<').and_then(|s| s.strip_suffix('>')).ok_or_else(malformed)?;

        let mut parts = [0i16; 3];
        let mut count = 0;
        for part in inner.split(',') {
            let digits = part.strip_prefix('-').unwrap_or(part);
            if count == 3 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            parts[count] = part.parse().map_err(|_| malformed())?;
            count += 1;
        }
        if count != 3 { return Err(malformed()); }

        if parts.iter().any(|c| c.unsigned_abs() > COORD_LIMIT as u16) {
            return Err(ParseHexError::OutOfRange(it.to_owned()));
        }
        let [q, r, s] = parts;
        Hex::try_new(q, r, s).ok_or_else(|| ParseHexError::NotOnPlane(it.to_owned()))
    }
}

/// Round a fractional axial position to the containing hex.
///
/// The component with the largest rounding error is recomputed from the other
/// two so the result stays on the `q + r + s == 0` plane. Halves round up,
/// toward +∞, so a point exactly on an edge always lands on the same side.
/// Positions far outside [`COORD_LIMIT`] clamp into it.
pub fn round(q0: f64, r0: f64) -> Hex {
    let s0 = -q0-r0;
    let mut q = round_half_up(q0);
    let mut r = round_half_up(r0);
    let s = round_half_up(s0);

    let q_diff = (q - q0).abs();
    let r_diff = (r - r0).abs();
    let s_diff = (s - s0).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r-s;
    } else if r_diff > s_diff {
        r = -q-s;
    }

    // s is rebuilt from q and r; half the limit on those keeps s in range too
    let limit = (COORD_LIMIT / 2) as f64;
    Hex::new(q.clamp(-limit, limit) as i16, r.clamp(-limit, limit) as i16)
}

// f64::round sends halves away from zero
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1. } else { floor }
}
