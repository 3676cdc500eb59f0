//! Baked model data.
//!
//! The output of a bake is split by where geometry sits on the unit cube:
//!
//! - **Interior**: everything not lying flat on a cube side. Always rendered.
//! - **Sides**: triangles flat on one of the six faces, stored per face so a
//!   mesher can drop them when the neighboring voxel covers that face.
//!
//! Both are further split by source surface so materials stay separate. Shapes
//! are fixed: at most [`MAX_SURFACES`] surfaces, and one side slot per
//! (face, surface) pair whether it is used or not.

use voxbake_shared::{Side, Vec2, Vec3, MAX_SURFACES, SIDE_COUNT};

// ============================================================================
// SURFACES
// ============================================================================

/// Interior geometry of one source surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BakedSurface {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals
    pub normals: Vec<Vec3>,
    /// Texture coordinates
    pub uvs: Vec<Vec2>,
    /// Tangents, 4 floats per vertex. Empty when tangents are not baked.
    pub tangents: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u32>,
    /// Id assigned by the material indexer
    pub material_id: u32,
}

impl BakedSurface {
    /// True if this surface has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex count.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangle count.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Clears geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.tangents.clear();
        self.indices.clear();
        self.material_id = 0;
    }
}

/// Geometry of one source surface lying on one cube side. Normals are implied by
/// the side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BakedSideSurface {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Texture coordinates
    pub uvs: Vec<Vec2>,
    /// Tangents, 4 floats per vertex. Empty when tangents are not baked.
    pub tangents: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl BakedSideSurface {
    /// True if this side surface has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex count.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Clears geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.tangents.clear();
        self.indices.clear();
    }
}

/// True if none of `surfaces` has triangles.
#[must_use]
pub fn sides_are_empty(surfaces: &[BakedSideSurface]) -> bool {
    surfaces.iter().all(BakedSideSurface::is_empty)
}

// ============================================================================
// MODEL
// ============================================================================

/// Default model tint: opaque white.
pub const DEFAULT_MODEL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A fully baked blocky model.
#[derive(Clone, Debug, PartialEq)]
pub struct BakedModel {
    /// True if no surface produced geometry.
    pub empty: bool,
    /// Whether side geometry may be partially culled against neighbors.
    pub cutout_sides_enabled: bool,
    /// Number of source surfaces represented, at most [`MAX_SURFACES`].
    pub surface_count: usize,
    /// Interior geometry per source surface.
    pub surfaces: [BakedSurface; MAX_SURFACES],
    /// Side geometry, `[side][surface]`.
    pub sides_surfaces: [[BakedSideSurface; MAX_SURFACES]; SIDE_COUNT],
    /// Model tint (RGBA).
    pub color: [f32; 4],
}

impl Default for BakedModel {
    fn default() -> Self {
        Self {
            empty: true,
            cutout_sides_enabled: false,
            surface_count: 0,
            surfaces: Default::default(),
            sides_surfaces: Default::default(),
            color: DEFAULT_MODEL_COLOR,
        }
    }
}

impl BakedModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to an empty model, keeping allocations. Color is kept.
    pub fn clear(&mut self) {
        self.empty = true;
        self.cutout_sides_enabled = false;
        self.surface_count = 0;
        for surface in &mut self.surfaces {
            surface.clear();
        }
        for side in &mut self.sides_surfaces {
            for surface in side {
                surface.clear();
            }
        }
    }

    /// Interior surfaces in use.
    #[must_use]
    pub fn used_surfaces(&self) -> &[BakedSurface] {
        &self.surfaces[..self.surface_count.min(MAX_SURFACES)]
    }

    /// Side geometry of `surface` on `side`.
    ///
    /// # Panics
    ///
    /// Panics if `surface >= MAX_SURFACES`.
    #[must_use]
    pub fn side(&self, side: Side, surface: usize) -> &BakedSideSurface {
        &self.sides_surfaces[side.index()][surface]
    }

    /// Mutable side geometry of `surface` on `side`.
    ///
    /// # Panics
    ///
    /// Panics if `surface >= MAX_SURFACES`.
    pub fn side_mut(&mut self, side: Side, surface: usize) -> &mut BakedSideSurface {
        &mut self.sides_surfaces[side.index()][surface]
    }

    /// True if no surface has geometry on `side`.
    #[must_use]
    pub fn is_side_empty(&self, side: Side) -> bool {
        sides_are_empty(&self.sides_surfaces[side.index()])
    }

    /// True if `surface` has geometry anywhere, interior or sides.
    #[must_use]
    pub fn surface_has_geometry(&self, surface: usize) -> bool {
        surface < MAX_SURFACES
            && (!self.surfaces[surface].is_empty()
                || self.sides_surfaces.iter().any(|side| !side[surface].is_empty()))
    }

    /// Total triangles, interior and sides.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        let interior: usize = self.surfaces.iter().map(BakedSurface::triangle_count).sum();
        let sides: usize = self
            .sides_surfaces
            .iter()
            .flatten()
            .map(|s| s.indices.len() / 3)
            .sum();
        interior + sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_empty() {
        let model = BakedModel::new();
        assert!(model.empty);
        assert_eq!(model.surface_count, 0);
        assert_eq!(model.color, DEFAULT_MODEL_COLOR);
        assert!(Side::ALL.iter().all(|&side| model.is_side_empty(side)));
        assert_eq!(model.triangle_count(), 0);
    }

    #[test]
    fn test_surface_geometry_tracking() {
        let mut model = BakedModel::new();
        model.surface_count = 2;
        model.side_mut(Side::PositiveY, 1).positions.extend([Vec3::Y; 3]);
        model.side_mut(Side::PositiveY, 1).indices.extend([0, 1, 2]);

        assert!(!model.surface_has_geometry(0));
        assert!(model.surface_has_geometry(1));
        assert!(!model.surface_has_geometry(MAX_SURFACES));
        assert!(!model.is_side_empty(Side::PositiveY));
        assert_eq!(model.triangle_count(), 1);

        model.clear();
        assert!(model.is_side_empty(Side::PositiveY));
        assert!(model.used_surfaces().is_empty());
    }

    #[test]
    fn test_sides_are_empty() {
        let mut sides: [BakedSideSurface; 2] = Default::default();
        assert!(sides_are_empty(&sides));
        sides[1].indices.extend([0, 1, 2]);
        assert!(!sides_are_empty(&sides));
    }
}
