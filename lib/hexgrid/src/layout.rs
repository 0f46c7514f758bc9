//! # Layout: Hex ↔ Table Space Conversion
//!
//! A `Layout` is the immutable context every coordinate conversion runs
//! through: the orientation's basis matrices plus the hex half size picked
//! from a `Scale` preset.
//!
//! ## Overview
//!
//! Table space is z-up: hexes lie on the XY plane and `z` is carried through
//! unchanged from the layout (positions produced by a layout all share its
//! `z`). Pointy-top is the orientation map strings are authored against; the
//! flat-top basis is kept so the transforms stay parametric.
//!
//! ## Example
//!
//! ```rust
//! use hexgrid::{Convert, Hex, Layout, Orientation, Scale};
//! use glam::Vec3;
//!
//! let layout = Layout::new(Orientation::Pointy, Scale::Default);
//!
//! let hex = Hex { q: 1, r: 2, s: -3 };
//! let pos: Vec3 = layout.convert(hex);
//! let back: Hex = layout.convert(pos);
//! assert_eq!(hex, back);
//! ```

use std::f64::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::hex::{self, Hex, ParseHexError};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Half of a hex's width at scale 1.
pub const HALF_SIZE_UNSCALED: f64 = 5.77735;

/// Trait for bidirectional coordinate conversion
pub trait Convert<T,U> {
    /// Convert from type T to type U
    fn convert(&self, it: T) -> U;
}

/// Forward (hex → position) and backward (position → hex) matrices, plus the
/// angle to the first corner in sixths of a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub f: [f64; 4],
    pub b: [f64; 4],
    pub start_angle: f64,
}

const FLAT: Basis = Basis {
    f: [3./2., 0., SQRT_3/2., SQRT_3],
    b: [2./3., 0., -1./3., SQRT_3/3.],
    start_angle: 0.,
};

const POINTY: Basis = Basis {
    f: [SQRT_3, SQRT_3/2., 0., 3./2.],
    b: [SQRT_3/3., -1./3., 0., 2./3.],
    start_angle: 0.5,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Orientation {
    Flat,
    #[default]
    Pointy,
}

impl Orientation {
    pub fn basis(&self) -> &'static Basis {
        match self {
            Orientation::Flat => &FLAT,
            Orientation::Pointy => &POINTY,
        }
    }
}

/// Hex size presets. Pieces are spawned to match, so a session never changes
/// preset once tiles are on the table.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Scale {
    #[default]
    Default,
    Larger,
}

impl Scale {
    pub fn from_larger(larger: bool) -> Scale {
        if larger { Scale::Larger } else { Scale::Default }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Scale::Default => 1.5,
            Scale::Larger => 2.0,
        }
    }

    pub fn half_size(&self) -> f64 {
        HALF_SIZE_UNSCALED * self.factor()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    orientation: Orientation,
    scale: Scale,
    z: f32,
}

impl Layout {
    pub fn new(orientation: Orientation, scale: Scale) -> Self {
        Self { orientation, scale, z: 0. }
    }

    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }

    pub fn orientation(&self) -> Orientation { self.orientation }
    pub fn scale(&self) -> Scale { self.scale }
    pub fn half_size(&self) -> f64 { self.scale.half_size() }
    pub fn z(&self) -> f32 { self.z }

    /// Hex containing `pos`; only `x` and `y` are used.
    pub fn from_position(&self, pos: Vec3) -> Hex {
        let m = self.orientation.basis();
        let x = pos.x as f64 / self.half_size();
        let y = pos.y as f64 / self.half_size();
        let q = m.b[0] * x + m.b[1] * y;
        let r = m.b[2] * x + m.b[3] * y;
        hex::round(q, r)
    }

    pub fn to_position(&self, hex: Hex) -> Vec3 {
        let m = self.orientation.basis();
        let x = (m.f[0] * hex.q as f64 + m.f[1] * hex.r as f64) * self.half_size();
        let y = (m.f[2] * hex.q as f64 + m.f[3] * hex.r as f64) * self.half_size();
        Vec3 { x: x as f32, y: y as f32, z: self.z }
    }

    /// Center of a hex given in `<q,r,s>` text form.
    pub fn position_of(&self, hex: &str) -> Result<Vec3, ParseHexError> {
        Ok(self.to_position(hex.parse()?))
    }

    /// Boundary vertices, first at the orientation's start angle, winding
    /// counterclockwise.
    pub fn corners(&self, hex: Hex) -> [Vec3; 6] {
        let center = self.to_position(hex);
        let start = self.orientation.basis().start_angle;
        std::array::from_fn(|i| {
            let phi = 2. * PI * (start - i as f64) / 6.;
            center + Vec3 {
                x: (self.half_size() * phi.cos()) as f32,
                y: (self.half_size() * phi.sin()) as f32,
                z: 0.,
            }
        })
    }
}

impl Convert<Vec3,Hex> for Layout {
    fn convert(&self, other: Vec3) -> Hex {
        self.from_position(other)
    }
}

impl Convert<Hex,Vec3> for Layout {
    fn convert(&self, other: Hex) -> Vec3 {
        self.to_position(other)
    }
}
