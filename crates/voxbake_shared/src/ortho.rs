//! The 24 orthogonal bases.
//!
//! Every proper rotation that maps the unit cube onto itself, indexed `0..24`.
//! Index 0 is the identity. The table is fixed: stored model configurations refer
//! to rotations by index, so reordering it would silently rotate existing content.

use serde::{Deserialize, Serialize};

use crate::math::{Basis3, Vec3};

/// Number of orthogonal bases.
pub const ORTHOGONAL_BASIS_COUNT: usize = 24;

/// Index of the identity basis.
pub const ORTHOGONAL_BASIS_IDENTITY_INDEX: u8 = 0;

/// Rows of each basis, flattened row-major.
const ORTHO_BASES: [[i8; 9]; ORTHOGONAL_BASIS_COUNT] = [
    [1, 0, 0, 0, 1, 0, 0, 0, 1],
    [0, -1, 0, 1, 0, 0, 0, 0, 1],
    [-1, 0, 0, 0, -1, 0, 0, 0, 1],
    [0, 1, 0, -1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, -1, 0, 1, 0],
    [0, 0, 1, 1, 0, 0, 0, 1, 0],
    [-1, 0, 0, 0, 0, 1, 0, 1, 0],
    [0, 0, -1, -1, 0, 0, 0, 1, 0],
    [1, 0, 0, 0, -1, 0, 0, 0, -1],
    [0, 1, 0, 1, 0, 0, 0, 0, -1],
    [-1, 0, 0, 0, 1, 0, 0, 0, -1],
    [0, -1, 0, -1, 0, 0, 0, 0, -1],
    [1, 0, 0, 0, 0, 1, 0, -1, 0],
    [0, 0, -1, 1, 0, 0, 0, -1, 0],
    [-1, 0, 0, 0, 0, -1, 0, -1, 0],
    [0, 0, 1, -1, 0, 0, 0, -1, 0],
    [0, 0, 1, 0, 1, 0, -1, 0, 0],
    [0, -1, 0, 0, 0, 1, -1, 0, 0],
    [0, 0, -1, 0, -1, 0, -1, 0, 0],
    [0, 1, 0, 0, 0, -1, -1, 0, 0],
    [0, 0, 1, 0, -1, 0, 1, 0, 0],
    [0, 1, 0, 0, 0, 1, 1, 0, 0],
    [0, 0, -1, 0, 1, 0, 1, 0, 0],
    [0, -1, 0, 0, 0, -1, 1, 0, 0],
];

/// Axis of a quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// All three axes, X first.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of this axis in `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Next axis in cyclic order X, Y, Z.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    /// Index of the counter-clockwise quarter turn about this axis.
    const fn quarter_turn_index(self) -> u8 {
        match self {
            Self::X => 4,
            Self::Y => 16,
            Self::Z => 1,
        }
    }
}

/// One of the 24 axis-preserving rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrthoBasis {
    index: u8,
}

impl OrthoBasis {
    /// The identity rotation.
    pub const IDENTITY: Self = Self { index: ORTHOGONAL_BASIS_IDENTITY_INDEX };

    /// Basis at `index`, or `None` if `index >= 24`.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < ORTHOGONAL_BASIS_COUNT {
            Some(Self { index })
        } else {
            None
        }
    }

    /// Looks up the basis whose integer rows equal `rows`.
    #[must_use]
    pub fn from_rows(rows: [i8; 9]) -> Option<Self> {
        ORTHO_BASES
            .iter()
            .position(|b| *b == rows)
            .and_then(|i| u8::try_from(i).ok())
            .map(|index| Self { index })
    }

    /// Counter-clockwise (or clockwise) quarter turn about `axis`.
    #[must_use]
    pub fn quarter_turn(axis: Axis, clockwise: bool) -> Self {
        let ccw = Self { index: axis.quarter_turn_index() };
        if clockwise {
            ccw.inverse()
        } else {
            ccw
        }
    }

    /// Table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// True for the identity rotation.
    #[inline]
    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.index == ORTHOGONAL_BASIS_IDENTITY_INDEX
    }

    /// Integer rows, flattened row-major.
    #[inline]
    #[must_use]
    pub const fn rows(self) -> [i8; 9] {
        ORTHO_BASES[self.index as usize]
    }

    /// Float basis for transforming geometry.
    #[must_use]
    pub fn basis(self) -> Basis3 {
        let r = self.rows();
        let row = |i: usize| Vec3::new(f32::from(r[i]), f32::from(r[i + 1]), f32::from(r[i + 2]));
        Basis3::from_rows(row(0), row(3), row(6))
    }

    /// The rotation undoing this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        let r = self.rows();
        let transposed = [r[0], r[3], r[6], r[1], r[4], r[7], r[2], r[5], r[8]];
        // The table is closed under transposition.
        Self::from_rows(transposed).unwrap_or(Self::IDENTITY)
    }

    /// Rotation applying `first`, then `self`.
    #[must_use]
    pub fn compose(self, first: Self) -> Self {
        let a = self.rows();
        let b = first.rows();
        let mut out = [0i8; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        // The table is closed under composition.
        Self::from_rows(out).unwrap_or(Self::IDENTITY)
    }

    /// This rotation followed by a quarter turn about `axis`.
    #[must_use]
    pub fn rotated_90(self, axis: Axis, clockwise: bool) -> Self {
        Self::quarter_turn(axis, clockwise).compose(self)
    }

    /// Iterates all 24 bases in table order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ORTHOGONAL_BASIS_COUNT as u8).map(|index| Self { index })
    }
}

impl Default for OrthoBasis {
    fn default() -> Self {
        Self::IDENTITY
    }
}
