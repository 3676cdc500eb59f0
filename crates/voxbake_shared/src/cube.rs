//! Cube side table.
//!
//! Sides are enumerated in a fixed canonical order: -X, +X, -Y, +Y, -Z, +Z.
//! That order is externally observable (it decides which side wins when a
//! degenerate triangle lies on a cube edge) and must not change.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::ortho::Axis;

/// Number of sides of a cube.
pub const SIDE_COUNT: usize = 6;

/// One of the six faces of the `[0, 1]³` cube a voxel model occupies.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Plane `x = 0`.
    NegativeX = 0,
    /// Plane `x = 1`.
    PositiveX = 1,
    /// Plane `y = 0`.
    NegativeY = 2,
    /// Plane `y = 1`.
    PositiveY = 3,
    /// Plane `z = 0`.
    NegativeZ = 4,
    /// Plane `z = 1`.
    PositiveZ = 5,
}

impl Side {
    /// All sides in canonical order.
    pub const ALL: [Self; SIDE_COUNT] = [
        Self::NegativeX,
        Self::PositiveX,
        Self::NegativeY,
        Self::PositiveY,
        Self::NegativeZ,
        Self::PositiveZ,
    ];

    /// Index of this side in canonical order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Side from its canonical index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SIDE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Bit of this side in a 6-bit side mask.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Axis perpendicular to this side.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::NegativeX | Self::PositiveX => Axis::X,
            Self::NegativeY | Self::PositiveY => Axis::Y,
            Self::NegativeZ | Self::PositiveZ => Axis::Z,
        }
    }

    /// Coordinate of this side's plane along its axis.
    #[inline]
    #[must_use]
    pub const fn plane(self) -> f32 {
        if self.index() % 2 == 0 {
            0.0
        } else {
            1.0
        }
    }

    /// Outward unit normal.
    #[must_use]
    pub const fn normal(self) -> Vec3 {
        match self {
            Self::NegativeX => Vec3::new(-1.0, 0.0, 0.0),
            Self::PositiveX => Vec3::new(1.0, 0.0, 0.0),
            Self::NegativeY => Vec3::new(0.0, -1.0, 0.0),
            Self::PositiveY => Vec3::new(0.0, 1.0, 0.0),
            Self::NegativeZ => Vec3::new(0.0, 0.0, -1.0),
            Self::PositiveZ => Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// The side facing this one across the cube.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[self.index() ^ 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        for (i, side) in Side::ALL.iter().enumerate() {
            assert_eq!(side.index(), i);
            assert_eq!(Side::from_index(i), Some(*side));
        }
        assert_eq!(Side::from_index(SIDE_COUNT), None);
    }

    #[test]
    fn test_opposites_and_normals() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.normal() + side.opposite().normal(), Vec3::ZERO);
            assert_eq!(side.normal().axis(side.axis()).abs(), 1.0);
        }
        assert_eq!(Side::NegativeX.axis(), Axis::X);
        assert_eq!(Side::PositiveY.axis(), Axis::Y);
        assert_eq!(Side::PositiveZ.axis(), Axis::Z);
        assert_eq!(Side::PositiveY.plane(), 1.0);
        assert_eq!(Side::NegativeZ.plane(), 0.0);
    }
}
