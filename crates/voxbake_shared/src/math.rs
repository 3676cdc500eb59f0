//! Vector and basis math used by the baking pipeline.
//!
//! Model geometry lives in cube-local space, `[0, 1]` on every axis. These types are
//! plain `#[repr(C)]` Pod structs so baked buffers can be viewed as raw floats.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::ortho::Axis;

/// 3D Vector - position, normal, tangent direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Component along `axis`.
    #[must_use]
    pub const fn axis(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or zero if the length is zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// True if every component is within `tolerance` of `other`'s.
    #[must_use]
    pub fn is_equal_approx(self, other: Self, tolerance: f32) -> bool {
        is_equal_approx(self.x, other.x, tolerance)
            && is_equal_approx(self.y, other.y, tolerance)
            && is_equal_approx(self.z, other.z, tolerance)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// 2D Vector - texture coords
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component (U)
    pub x: f32,
    /// Y component (V)
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 3x3 basis stored as rows. `xform(v)` is the matrix-vector product.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Basis3 {
    /// Matrix rows
    pub rows: [Vec3; 3],
}

impl Basis3 {
    /// Identity basis
    pub const IDENTITY: Self = Self::from_rows(Vec3::X, Vec3::Y, Vec3::Z);

    /// Creates a basis from its rows
    #[must_use]
    pub const fn from_rows(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { rows: [x, y, z] }
    }

    /// Transforms a vector by this basis
    #[must_use]
    pub fn xform(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    /// Transposed basis. For a rotation this is also the inverse.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(
            Vec3::new(a.x, b.x, c.x),
            Vec3::new(a.y, b.y, c.y),
            Vec3::new(a.z, b.z, c.z),
        )
    }

    /// Matrix product `self * rhs` (apply `rhs` first, then `self`)
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        let t = rhs.transposed();
        let row = |r: Vec3| Vec3::new(r.dot(t.rows[0]), r.dot(t.rows[1]), r.dot(t.rows[2]));
        Self::from_rows(row(self.rows[0]), row(self.rows[1]), row(self.rows[2]))
    }

    /// Determinant
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let [a, b, c] = self.rows;
        a.dot(b.cross(c))
    }
}

impl Default for Basis3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `|a - b| <= tolerance`, with an exact-equality shortcut for infinities.
#[inline]
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_equal_approx(a: f32, b: f32, tolerance: f32) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= tolerance
}

/// Sign of `v`, treating zero as positive.
#[inline]
#[must_use]
pub fn sign_nonzero(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Adds `offset` to every vector.
pub fn translate(vectors: &mut [Vec3], offset: Vec3) {
    for v in vectors {
        *v += offset;
    }
}

/// Transforms every vector by `basis`.
pub fn transform(vectors: &mut [Vec3], basis: &Basis3) {
    for v in vectors {
        *v = basis.xform(*v);
    }
}

/// Rotates vertex, normal and tangent buffers as a unit.
///
/// `tangents` holds 4 floats per vertex (xyz + bitangent sign) and may be empty,
/// in which case only positions and normals are rotated. When present, the sign is
/// recomputed from the rotated frame.
pub fn rotate_mesh_arrays(
    vertices: &mut [Vec3],
    normals: &mut [Vec3],
    tangents: &mut [f32],
    basis: &Basis3,
) {
    transform(vertices, basis);

    if tangents.is_empty() {
        transform(normals, basis);
        return;
    }

    debug_assert_eq!(tangents.len(), normals.len() * 4);

    for (normal, tangent) in normals.iter_mut().zip(tangents.chunks_exact_mut(4)) {
        let t = Vec3::new(tangent[0], tangent[1], tangent[2]);
        let bitangent = normal.cross(t) * tangent[3];

        let n = basis.xform(*normal);
        let t = basis.xform(t);
        let b = basis.xform(bitangent);

        *normal = n;
        tangent[0] = t.x;
        tangent[1] = t.y;
        tangent[2] = t.z;
        tangent[3] = sign_nonzero(b.dot(n.cross(t)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_component_by_axis() {
        let v = Vec3::from_array([0.25, 0.5, 0.75]);
        let components: Vec<f32> = Axis::ALL.iter().map(|&axis| v.axis(axis)).collect();
        assert_eq!(components, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_vec3_bytemuck() {
        let v = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
        let floats: &[f32] = bytemuck::cast_slice(&v);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_basis_mul_and_transpose() {
        // 90 degrees about Z
        let rz = Basis3::from_rows(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(rz.xform(Vec3::X), Vec3::Y);
        assert_eq!(rz.mul(&rz.transposed()), Basis3::IDENTITY);
        assert_eq!(rz.determinant(), 1.0);
    }

    #[test]
    fn test_rotate_without_tangents_rotates_normals() {
        let rz = Basis3::from_rows(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let mut vertices = vec![Vec3::X];
        let mut normals = vec![Vec3::X];
        rotate_mesh_arrays(&mut vertices, &mut normals, &mut [], &rz);
        assert_eq!(vertices[0], Vec3::Y);
        assert_eq!(normals[0], Vec3::Y);
    }

    #[test]
    fn test_rotate_preserves_tangent_sign() {
        let rx = Basis3::from_rows(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let mut vertices = vec![Vec3::ZERO];
        let mut normals = vec![Vec3::Z];
        let mut tangents = vec![1.0, 0.0, 0.0, -1.0];
        rotate_mesh_arrays(&mut vertices, &mut normals, &mut tangents, &rx);

        // A proper rotation keeps handedness.
        assert_eq!(tangents[3], -1.0);
        assert!(normals[0].is_equal_approx(Vec3::new(0.0, -1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_sign_nonzero() {
        assert_eq!(sign_nonzero(0.0), 1.0);
        assert_eq!(sign_nonzero(-0.5), -1.0);
    }
}
