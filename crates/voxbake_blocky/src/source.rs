//! Source meshes handed to the baker.

use voxbake_shared::{Vec2, Vec3, TANGENT_STRIDE};

use crate::material::MaterialRef;

/// How a mesh's index buffer is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveKind {
    /// Indexed triangle list
    #[default]
    Triangles,
    /// Point cloud
    Points,
}

impl PrimitiveKind {
    /// True if this primitive can become blocky geometry.
    #[must_use]
    pub const fn is_bakeable(self) -> bool {
        matches!(self, Self::Triangles)
    }
}

/// Vertex and index arrays of one surface, in cube-local `[0, 1]³` space.
///
/// `normals` has one entry per position. `uvs` is either empty or one per position.
/// `tangents` is either empty or 4 floats per position (xyz + bitangent sign).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceArrays {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals
    pub normals: Vec<Vec3>,
    /// Texture coordinates
    pub uvs: Vec<Vec2>,
    /// Tangents, flattened
    pub tangents: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl SurfaceArrays {
    /// Surface with positions, normals and indices only.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
            ..Self::default()
        }
    }

    /// Adds texture coordinates.
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = uvs;
        self
    }

    /// Adds tangents (4 floats per vertex).
    #[must_use]
    pub fn with_tangents(mut self, tangents: Vec<f32>) -> Self {
        self.tangents = tangents;
        self
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if the surface has neither vertices nor indices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    /// True if the tangent buffer matches the vertex count.
    #[must_use]
    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty() && self.tangents.len() == self.positions.len() * TANGENT_STRIDE
    }
}

/// A mesh: primitive kind plus ordered surfaces, each with an optional material.
#[derive(Clone, Debug, Default)]
pub struct SourceMesh {
    primitive: PrimitiveKind,
    surfaces: Vec<SurfaceArrays>,
    materials: Vec<MaterialRef>,
}

impl SourceMesh {
    /// Creates an empty mesh of the given primitive kind.
    #[must_use]
    pub fn new(primitive: PrimitiveKind) -> Self {
        Self {
            primitive,
            surfaces: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Creates an empty triangle mesh.
    #[must_use]
    pub fn triangles() -> Self {
        Self::new(PrimitiveKind::Triangles)
    }

    /// Appends a surface.
    pub fn add_surface(&mut self, arrays: SurfaceArrays, material: MaterialRef) {
        self.surfaces.push(arrays);
        self.materials.push(material);
    }

    /// Builder form of [`SourceMesh::add_surface`].
    #[must_use]
    pub fn with_surface(mut self, arrays: SurfaceArrays, material: MaterialRef) -> Self {
        self.add_surface(arrays, material);
        self
    }

    /// Primitive kind.
    #[must_use]
    pub const fn primitive(&self) -> PrimitiveKind {
        self.primitive
    }

    /// Surface arrays in order.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceArrays] {
        &self.surfaces
    }

    /// Surface materials, parallel to [`SourceMesh::surfaces`].
    #[must_use]
    pub fn materials(&self) -> &[MaterialRef] {
        &self.materials
    }

    /// Number of surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// True if no surface has any vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.iter().all(|s| s.positions.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_counts() {
        let surface = SurfaceArrays::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            vec![0, 1, 2],
        );
        assert_eq!(surface.vertex_count(), 3);
        assert_eq!(surface.triangle_count(), 1);
        assert!(!surface.is_empty());
        assert!(!surface.has_tangents());
        assert!(surface.with_tangents(vec![1.0, 0.0, 0.0, 1.0].repeat(3)).has_tangents());
    }

    #[test]
    fn test_mesh_emptiness() {
        assert!(SourceMesh::triangles().is_empty());
        let mesh = SourceMesh::triangles().with_surface(SurfaceArrays::default(), None);
        assert!(mesh.is_empty());
        assert_eq!(mesh.surface_count(), 1);
        assert_eq!(mesh.materials().len(), 1);
    }

    #[test]
    fn test_bakeable_primitives() {
        assert!(PrimitiveKind::Triangles.is_bakeable());
        assert!(!PrimitiveKind::Points.is_bakeable());
    }
}
