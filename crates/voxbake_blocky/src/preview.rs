//! Reconstruction of a renderable mesh from baked data.
//!
//! Puts interior and side geometry back together, one surface per source surface.
//! Used for previews: the result is what the blocky mesher would emit for a voxel
//! with every side exposed.

use voxbake_shared::{Side, Vec2, Vec3, MAX_SURFACES, TANGENT_STRIDE};

use crate::baked::{BakedModel, BakedSideSurface, BakedSurface};
use crate::material::MaterialRef;

/// One renderable surface of a preview mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewSurface {
    /// Source surface this was baked from
    pub source_surface: usize,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals
    pub normals: Vec<Vec3>,
    /// Texture coordinates
    pub uvs: Vec<Vec2>,
    /// Tangents, 4 floats per vertex. Empty unless requested.
    pub tangents: Vec<f32>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle list indices
    pub indices: Vec<u32>,
    /// Material id from the bake
    pub material_id: u32,
    /// Material to render with
    pub material: MaterialRef,
}

impl PreviewSurface {
    /// Vertex count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as a flat float buffer, ready for upload.
    #[must_use]
    pub fn position_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat float buffer.
    #[must_use]
    pub fn normal_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UVs as a flat float buffer.
    #[must_use]
    pub fn uv_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Colors as a flat float buffer.
    #[must_use]
    pub fn color_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    #[allow(clippy::cast_possible_truncation, clippy::too_many_arguments)]
    fn append(
        &mut self,
        positions: &[Vec3],
        normals: impl IntoIterator<Item = Vec3>,
        uvs: &[Vec2],
        tangents: &[f32],
        indices: &[u32],
        include_tangents: bool,
        color: [f32; 4],
    ) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(positions);
        self.normals.extend(normals);
        self.uvs.extend_from_slice(uvs);
        if include_tangents {
            if tangents.len() == positions.len() * TANGENT_STRIDE {
                self.tangents.extend_from_slice(tangents);
            } else {
                // Baked without tangents; keep the buffer aligned with positions
                self.tangents
                    .resize(self.tangents.len() + positions.len() * TANGENT_STRIDE, 0.0);
            }
        }
        self.colors.resize(self.positions.len(), color);
        self.indices.extend(indices.iter().map(|i| i + offset));
    }
}

/// A renderable mesh rebuilt from a baked model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewMesh {
    /// Surfaces, in source order, skipping those without geometry
    pub surfaces: Vec<PreviewSurface>,
}

impl PreviewMesh {
    /// Number of surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// True if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Total triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(PreviewSurface::triangle_count).sum()
    }
}

/// Rebuilds a mesh from a baked model.
#[must_use]
pub fn reconstruct(model: &BakedModel, tangents_enabled: bool) -> PreviewMesh {
    let count = model.surface_count.min(MAX_SURFACES);
    reconstruct_from_parts(
        &model.surfaces[..count],
        &model.sides_surfaces,
        model.color,
        tangents_enabled,
    )
}

/// Rebuilds a mesh from loose baked parts.
///
/// `sides[k]` holds the side surfaces of the `k`-th side in canonical order. For
/// each surface index, interior vertices come first, then each side's vertices in
/// canonical order. Side normals are the side's outward normal. Nothing is welded.
#[must_use]
pub fn reconstruct_from_parts(
    surfaces: &[BakedSurface],
    sides: &[[BakedSideSurface; MAX_SURFACES]],
    color: [f32; 4],
    tangents_enabled: bool,
) -> PreviewMesh {
    let mut mesh = PreviewMesh::default();

    for (surface_index, interior) in surfaces.iter().enumerate().take(MAX_SURFACES) {
        let mut surface = PreviewSurface {
            source_surface: surface_index,
            material_id: interior.material_id,
            ..PreviewSurface::default()
        };

        surface.append(
            &interior.positions,
            interior.normals.iter().copied(),
            &interior.uvs,
            &interior.tangents,
            &interior.indices,
            tangents_enabled,
            color,
        );

        for (side, per_surface) in Side::ALL.into_iter().zip(sides) {
            let side_surface = &per_surface[surface_index];
            surface.append(
                &side_surface.positions,
                std::iter::repeat(side.normal()).take(side_surface.positions.len()),
                &side_surface.uvs,
                &side_surface.tangents,
                &side_surface.indices,
                tangents_enabled,
                color,
            );
        }

        if !surface.indices.is_empty() {
            mesh.surfaces.push(surface);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_side() -> BakedSideSurface {
        BakedSideSurface {
            positions: vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            uvs: vec![Vec2::ZERO; 4],
            tangents: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_interior_first_then_sides() {
        let mut model = BakedModel::new();
        model.surface_count = 1;
        model.surfaces[0] = BakedSurface {
            positions: vec![Vec3::splat(0.2), Vec3::splat(0.5), Vec3::new(0.2, 0.8, 0.5)],
            normals: vec![Vec3::Z; 3],
            uvs: vec![Vec2::ZERO; 3],
            tangents: Vec::new(),
            indices: vec![0, 1, 2],
            material_id: 3,
        };
        *model.side_mut(Side::PositiveX, 0) = quad_side();

        let mesh = reconstruct(&model, false);
        assert_eq!(mesh.surface_count(), 1);

        let surface = &mesh.surfaces[0];
        assert_eq!(surface.material_id, 3);
        assert_eq!(surface.vertex_count(), 7);
        assert_eq!(surface.indices, vec![0, 1, 2, 3, 4, 5, 3, 5, 6]);
        assert_eq!(surface.normals[0], Vec3::Z);
        assert_eq!(surface.normals[3], Vec3::X);
        assert_eq!(surface.colors, vec![model.color; 7]);
        assert!(surface.tangents.is_empty());

        assert_eq!(surface.position_data().len(), 21);
        assert_eq!(&surface.normal_data()[9..12], &[1.0, 0.0, 0.0]);
        assert_eq!(surface.uv_data().len(), 14);
        assert_eq!(surface.color_data().len(), 28);
    }

    #[test]
    fn test_surfaces_without_geometry_are_skipped() {
        let mut model = BakedModel::new();
        model.surface_count = 2;
        *model.side_mut(Side::NegativeZ, 1) = quad_side();

        let mesh = reconstruct(&model, false);
        assert_eq!(mesh.surface_count(), 1);
        assert_eq!(mesh.surfaces[0].source_surface, 1);
        assert_eq!(mesh.surfaces[0].normals, vec![Vec3::new(0.0, 0.0, -1.0); 4]);
    }

    #[test]
    fn test_tangent_buffer_stays_aligned() {
        let mut model = BakedModel::new();
        model.surface_count = 1;
        *model.side_mut(Side::PositiveX, 0) = quad_side();

        let mesh = reconstruct(&model, true);
        assert_eq!(mesh.surfaces[0].tangents.len(), 4 * TANGENT_STRIDE);
    }

    #[test]
    fn test_empty_model() {
        assert!(reconstruct(&BakedModel::new(), true).is_empty());
    }
}
