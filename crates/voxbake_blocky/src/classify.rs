//! Face classification.
//!
//! A triangle belongs to a cube side when all three of its vertices lie on that
//! side's plane. Anything else is interior geometry.

use voxbake_shared::{Side, Vec3};

/// Mask of all six side bits.
pub const ALL_SIDES_MASK: u8 = 0b11_1111;

/// Bitmask of the sides whose plane `position` lies on, within `tolerance`.
#[must_use]
pub fn side_mask(position: Vec3, tolerance: f32) -> u8 {
    let mut mask = 0;
    for side in Side::ALL {
        let coord = position.axis(side.axis());
        if (coord - side.plane()).abs() <= tolerance {
            mask |= side.mask();
        }
    }
    mask
}

/// First side of `mask` in canonical order.
#[must_use]
pub fn first_side(mask: u8) -> Option<Side> {
    let masked = mask & ALL_SIDES_MASK;
    if masked == 0 {
        None
    } else {
        Side::from_index(masked.trailing_zeros() as usize)
    }
}

/// Side a triangle lies on, or `None` for interior triangles.
///
/// A degenerate triangle lying along a cube edge sits on two planes at once; it
/// goes to whichever of them comes first in canonical order.
#[must_use]
pub fn triangle_side(a: Vec3, b: Vec3, c: Vec3, tolerance: f32) -> Option<Side> {
    first_side(side_mask(a, tolerance) & side_mask(b, tolerance) & side_mask(c, tolerance))
}
