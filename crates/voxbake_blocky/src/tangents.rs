//! Tangent derivation from texture coordinates.

use voxbake_shared::{Vec2, Vec3, TANGENT_STRIDE};

/// UV-space triangles with a smaller determinant contribute nothing.
const UV_DETERMINANT_EPSILON: f32 = 1e-12;

/// Derives per-vertex tangents from UV gradients.
///
/// Each triangle contributes its tangent (direction of increasing U) and bitangent
/// (increasing V) to its three vertices. Per vertex, the summed tangent is made
/// orthogonal to the normal and the sign records whether the summed bitangent
/// agrees with `cross(normal, tangent)`. Vertices no triangle touches, or whose
/// UVs are degenerate, get an arbitrary tangent perpendicular to the normal.
///
/// Returns 4 floats per vertex. `normals` and `uvs` must match `positions` in
/// length and every index must be in range.
#[must_use]
pub fn generate_tangents_from_uvs(
    positions: &[Vec3],
    normals: &[Vec3],
    uvs: &[Vec2],
    indices: &[u32],
) -> Vec<f32> {
    let vertex_count = positions.len();
    let mut tangent_sums = vec![Vec3::ZERO; vertex_count];
    let mut bitangent_sums = vec![Vec3::ZERO; vertex_count];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let dp1 = positions[i1] - positions[i0];
        let dp2 = positions[i2] - positions[i0];
        let duv1 = uvs[i1] - uvs[i0];
        let duv2 = uvs[i2] - uvs[i0];

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det.abs() < UV_DETERMINANT_EPSILON {
            continue;
        }
        let r = 1.0 / det;

        let tangent = (dp1 * duv2.y - dp2 * duv1.y) * r;
        let bitangent = (dp2 * duv1.x - dp1 * duv2.x) * r;

        for i in [i0, i1, i2] {
            tangent_sums[i] += tangent;
            bitangent_sums[i] += bitangent;
        }
    }

    let mut tangents = Vec::with_capacity(vertex_count * TANGENT_STRIDE);
    for ((normal, t), bt) in normals.iter().zip(&tangent_sums).zip(&bitangent_sums) {
        let n = *normal;

        // Gram-Schmidt against the normal
        let mut tangent = (*t - n * n.dot(*t)).normalized();
        if tangent.length_squared() < 0.5 {
            tangent = any_perpendicular(n);
        }

        let sign = if bt.dot(n.cross(tangent)) < 0.0 { -1.0 } else { 1.0 };
        tangents.extend_from_slice(&[tangent.x, tangent.y, tangent.z, sign]);
    }
    tangents
}

/// Some unit vector perpendicular to `n`.
fn any_perpendicular(n: Vec3) -> Vec3 {
    let abs = Vec3::new(n.x.abs(), n.y.abs(), n.z.abs());
    let least_aligned = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let perpendicular = n.cross(least_aligned).normalized();
    if perpendicular.length_squared() < 0.5 {
        Vec3::X
    } else {
        perpendicular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit quad on z = 0 facing +Z.
    fn quad(uvs: [Vec2; 4]) -> Vec<f32> {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        generate_tangents_from_uvs(&positions, &[Vec3::Z; 4], &uvs, &[0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn test_tangent_follows_u() {
        let tangents = quad([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
        assert_eq!(tangents.len(), 16);
        for t in tangents.chunks_exact(4) {
            assert!(Vec3::new(t[0], t[1], t[2]).is_equal_approx(Vec3::X, 1e-5));
            assert_eq!(t[3], 1.0);
        }
    }

    #[test]
    fn test_flipped_v_flips_sign() {
        let tangents = quad([
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]);
        for t in tangents.chunks_exact(4) {
            assert!(Vec3::new(t[0], t[1], t[2]).is_equal_approx(Vec3::X, 1e-5));
            assert_eq!(t[3], -1.0);
        }
    }

    #[test]
    fn test_degenerate_uvs_fall_back_to_perpendicular() {
        let tangents = quad([Vec2::ZERO; 4]);
        for t in tangents.chunks_exact(4) {
            let tangent = Vec3::new(t[0], t[1], t[2]);
            assert!((tangent.length() - 1.0).abs() < 1e-5);
            assert!(tangent.dot(Vec3::Z).abs() < 1e-5);
        }
    }
}
