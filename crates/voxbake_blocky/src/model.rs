//! Mesh-backed blocky model.
//!
//! [`MeshModel`] is the user-facing configuration of one library entry: which mesh,
//! how it is rotated, and how it is matched against cube sides. Baking produces a
//! [`BakedModel`] for the mesher; [`MeshModel::preview_mesh`] renders what it would
//! look like.

use voxbake_shared::{Axis, OrthoBasis, DEFAULT_SIDE_VERTEX_TOLERANCE, MAX_SURFACES};

use crate::bake::GeometryBaker;
use crate::baked::{BakedModel, DEFAULT_MODEL_COLOR};
use crate::config::BakeConfig;
use crate::error::{BakeDiagnostic, BakeError, BakeResult};
use crate::material::{MaterialIndexer, MaterialRef};
use crate::preview::{reconstruct, PreviewMesh};
use crate::source::SourceMesh;

/// Everything a library bake hands to each model.
#[derive(Debug)]
pub struct BakingContext<'a> {
    /// Output slot for the baked model
    pub model: &'a mut BakedModel,
    /// Material ids shared by the whole library
    pub material_indexer: &'a mut MaterialIndexer,
    /// Whether tangents are baked
    pub tangents_enabled: bool,
}

impl<'a> BakingContext<'a> {
    /// Creates a context.
    pub fn new(
        model: &'a mut BakedModel,
        material_indexer: &'a mut MaterialIndexer,
        tangents_enabled: bool,
    ) -> Self {
        Self {
            model,
            material_indexer,
            tangents_enabled,
        }
    }
}

/// A blocky model whose geometry comes from a triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshModel {
    mesh: Option<SourceMesh>,
    surface_count: usize,
    material_overrides: [MaterialRef; MAX_SURFACES],
    rotation: OrthoBasis,
    side_vertex_tolerance: f32,
    side_cutout_enabled: bool,
    color: [f32; 4],
}

impl Default for MeshModel {
    fn default() -> Self {
        Self {
            mesh: None,
            surface_count: 0,
            material_overrides: Default::default(),
            rotation: OrthoBasis::IDENTITY,
            side_vertex_tolerance: DEFAULT_SIDE_VERTEX_TOLERANCE,
            side_cutout_enabled: false,
            color: DEFAULT_MODEL_COLOR,
        }
    }
}

impl MeshModel {
    /// Creates a model with no mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model from a mesh.
    ///
    /// # Errors
    ///
    /// See [`MeshModel::set_mesh`].
    pub fn from_mesh(mesh: SourceMesh) -> BakeResult<Self> {
        let mut model = Self::new();
        model.set_mesh(mesh)?;
        Ok(model)
    }

    // ========================================================================
    // MESH
    // ========================================================================

    /// Assigns the source mesh.
    ///
    /// # Errors
    ///
    /// [`BakeError::UnsupportedPrimitive`] for point meshes. The current mesh is
    /// kept in that case.
    pub fn set_mesh(&mut self, mesh: SourceMesh) -> BakeResult<()> {
        if !mesh.primitive().is_bakeable() {
            tracing::error!(primitive = ?mesh.primitive(), "rejected mesh assignment");
            return Err(BakeError::UnsupportedPrimitive {
                primitive: mesh.primitive(),
            });
        }
        self.surface_count = mesh.surface_count().min(MAX_SURFACES);
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Removes the source mesh.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
        self.surface_count = 0;
    }

    /// Source mesh, if any.
    #[must_use]
    pub const fn mesh(&self) -> Option<&SourceMesh> {
        self.mesh.as_ref()
    }

    /// Surfaces that will be baked.
    #[must_use]
    pub const fn surface_count(&self) -> usize {
        self.surface_count
    }

    /// True if there is no mesh or it has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.as_ref().map_or(true, SourceMesh::is_empty)
    }

    // ========================================================================
    // MATERIALS
    // ========================================================================

    /// Replaces the material of one surface in previews. `None` clears it.
    ///
    /// # Errors
    ///
    /// [`BakeError::SurfaceIndexOutOfRange`] past [`MAX_SURFACES`].
    pub fn set_material_override(
        &mut self,
        surface: usize,
        material: MaterialRef,
    ) -> BakeResult<()> {
        let slot = self
            .material_overrides
            .get_mut(surface)
            .ok_or(BakeError::SurfaceIndexOutOfRange {
                index: surface,
                max: MAX_SURFACES,
            })?;
        *slot = material;
        Ok(())
    }

    /// Material override of one surface.
    #[must_use]
    pub fn material_override(&self, surface: usize) -> Option<&MaterialRef> {
        self.material_overrides.get(surface)
    }

    // ========================================================================
    // ROTATION
    // ========================================================================

    /// Sets the rotation by orthogonal basis index.
    ///
    /// # Errors
    ///
    /// [`BakeError::InvalidRotationIndex`] if `index >= 24`.
    pub fn set_mesh_ortho_rotation_index(&mut self, index: u8) -> BakeResult<()> {
        self.rotation =
            OrthoBasis::from_index(index).ok_or(BakeError::InvalidRotationIndex(index))?;
        Ok(())
    }

    /// Rotation as an orthogonal basis index.
    #[must_use]
    pub const fn mesh_ortho_rotation_index(&self) -> u8 {
        self.rotation.index()
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> OrthoBasis {
        self.rotation
    }

    /// Adds a quarter turn about `axis` to the rotation.
    pub fn rotate_90(&mut self, axis: Axis, clockwise: bool) {
        self.rotation = self.rotation.rotated_90(axis, clockwise);
    }

    /// Adds an arbitrary orthogonal rotation to the rotation.
    pub fn rotate_ortho(&mut self, basis: OrthoBasis) {
        self.rotation = basis.compose(self.rotation);
    }

    // ========================================================================
    // SIDES & COLOR
    // ========================================================================

    /// Sets the side tolerance, clamped to be non-negative.
    pub fn set_side_vertex_tolerance(&mut self, tolerance: f32) {
        self.side_vertex_tolerance = tolerance.max(0.0);
    }

    /// Side tolerance.
    #[must_use]
    pub const fn side_vertex_tolerance(&self) -> f32 {
        self.side_vertex_tolerance
    }

    /// Enables or disables side cutout.
    pub fn set_side_cutout_enabled(&mut self, enabled: bool) {
        self.side_cutout_enabled = enabled;
    }

    /// True if side cutout is enabled.
    #[must_use]
    pub const fn is_side_cutout_enabled(&self) -> bool {
        self.side_cutout_enabled
    }

    /// Sets the model tint.
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    /// Model tint.
    #[must_use]
    pub const fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Applies a config's rotation, tolerance and cutout settings.
    ///
    /// # Errors
    ///
    /// [`BakeError::InvalidRotationIndex`] from an invalid config; nothing is
    /// applied in that case.
    pub fn apply_config(&mut self, config: &BakeConfig) -> BakeResult<()> {
        config.validate()?;
        self.set_mesh_ortho_rotation_index(config.rotation_index)?;
        self.set_side_vertex_tolerance(config.side_vertex_tolerance);
        self.side_cutout_enabled = config.side_cutout_enabled;
        Ok(())
    }

    /// Bake settings for this model.
    #[must_use]
    pub fn bake_config(&self, tangents_enabled: bool) -> BakeConfig {
        BakeConfig {
            rotation_index: self.rotation.index(),
            side_vertex_tolerance: self.side_vertex_tolerance,
            side_cutout_enabled: self.side_cutout_enabled,
            tangents_enabled,
        }
    }

    // ========================================================================
    // BAKING
    // ========================================================================

    /// Bakes into `ctx.model`. Without a mesh the model is left empty.
    pub fn bake(&self, ctx: &mut BakingContext<'_>) -> Vec<BakeDiagnostic> {
        let baker = GeometryBaker::new(self.bake_config(ctx.tangents_enabled));

        let diagnostics = match &self.mesh {
            Some(mesh) => baker.bake_into(
                mesh.surfaces(),
                mesh.materials(),
                ctx.material_indexer,
                ctx.model,
            ),
            None => {
                ctx.model.clear();
                ctx.model.cutout_sides_enabled = self.side_cutout_enabled;
                Vec::new()
            }
        };

        ctx.model.color = self.color;
        diagnostics
    }

    /// Renders the baked model back into a mesh, with materials attached.
    ///
    /// Bakes without tangents into a private indexer, so previews never disturb
    /// library material ids.
    #[must_use]
    pub fn preview_mesh(&self) -> PreviewMesh {
        let Some(mesh) = &self.mesh else {
            return PreviewMesh::default();
        };

        let mut indexer = MaterialIndexer::new();
        let config = self.bake_config(false).with_side_cutout(false);
        let mut output =
            GeometryBaker::new(config).bake(mesh.surfaces(), mesh.materials(), &mut indexer);
        output.model.color = self.color;

        let mut preview = reconstruct(&output.model, false);
        for surface in &mut preview.surfaces {
            surface.material = match self.material_overrides.get(surface.source_surface) {
                Some(Some(material)) => Some(material.clone()),
                _ => indexer.get(surface.material_id).cloned().flatten(),
            };
        }
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{same_material, Material};
    use crate::procedural::ProceduralMeshes;
    use crate::source::{PrimitiveKind, SurfaceArrays};

    #[test]
    fn test_set_mesh_rejects_points() {
        let mut model = MeshModel::from_mesh(ProceduralMeshes::cube()).expect("triangle mesh");
        let points =
            SourceMesh::new(PrimitiveKind::Points).with_surface(SurfaceArrays::default(), None);

        assert_eq!(
            model.set_mesh(points),
            Err(BakeError::UnsupportedPrimitive {
                primitive: PrimitiveKind::Points
            })
        );
        // Previous mesh kept
        assert_eq!(model.mesh().map(SourceMesh::primitive), Some(PrimitiveKind::Triangles));
        assert_eq!(model.surface_count(), 1);
    }

    #[test]
    fn test_clear_mesh() {
        let mut model = MeshModel::from_mesh(ProceduralMeshes::cube()).expect("triangle mesh");
        model.clear_mesh();

        assert!(model.mesh().is_none());
        assert_eq!(model.surface_count(), 0);
        assert!(model.is_empty());
        assert!(model.preview_mesh().is_empty());
    }

    #[test]
    fn test_tolerance_is_clamped() {
        let mut model = MeshModel::new();
        model.set_side_vertex_tolerance(-0.1);
        assert_eq!(model.side_vertex_tolerance(), 0.0);
        model.set_side_vertex_tolerance(0.01);
        assert_eq!(model.side_vertex_tolerance(), 0.01);
    }

    #[test]
    fn test_rotation_index() {
        let mut model = MeshModel::new();
        assert_eq!(
            model.set_mesh_ortho_rotation_index(24),
            Err(BakeError::InvalidRotationIndex(24))
        );
        assert_eq!(model.mesh_ortho_rotation_index(), 0);

        model.rotate_90(Axis::Y, false);
        assert_eq!(model.mesh_ortho_rotation_index(), 16);
        model.rotate_90(Axis::Y, true);
        assert!(model.rotation().is_identity());

        model.rotate_ortho(OrthoBasis::quarter_turn(Axis::Z, false));
        assert_eq!(model.mesh_ortho_rotation_index(), 1);
    }

    #[test]
    fn test_material_override_bounds() {
        let mut model = MeshModel::new();
        assert!(model.set_material_override(1, Material::new("glass").into_ref()).is_ok());
        assert_eq!(
            model.set_material_override(MAX_SURFACES, None),
            Err(BakeError::SurfaceIndexOutOfRange {
                index: MAX_SURFACES,
                max: MAX_SURFACES
            })
        );
    }

    #[test]
    fn test_bake_without_mesh() {
        let model = MeshModel::new();
        let mut baked = BakedModel::new();
        let mut indexer = MaterialIndexer::new();
        let diagnostics = model.bake(&mut BakingContext::new(&mut baked, &mut indexer, true));

        assert!(diagnostics.is_empty());
        assert!(baked.empty);
        assert!(model.is_empty());
        assert!(model.preview_mesh().is_empty());
    }

    #[test]
    fn test_bake_copies_color_and_cutout() {
        let mut model = MeshModel::from_mesh(ProceduralMeshes::cube()).expect("triangle mesh");
        model.set_color([1.0, 0.0, 0.0, 1.0]);
        model.set_side_cutout_enabled(true);

        let mut baked = BakedModel::new();
        let mut indexer = MaterialIndexer::new();
        model.bake(&mut BakingContext::new(&mut baked, &mut indexer, false));

        assert_eq!(baked.color, [1.0, 0.0, 0.0, 1.0]);
        assert!(baked.cutout_sides_enabled);
        assert!(!baked.empty);
    }

    #[test]
    fn test_preview_applies_override() {
        let stone = Material::new("stone").into_ref();
        let glass = Material::new("glass").into_ref();
        let mut model = MeshModel::from_mesh(
            SourceMesh::triangles()
                .with_surface(ProceduralMeshes::slab().surfaces()[0].clone(), stone.clone())
                .with_surface(ProceduralMeshes::cross_plant().surfaces()[0].clone(), stone.clone()),
        )
        .expect("triangle mesh");
        model.set_material_override(1, glass.clone()).expect("in range");

        let preview = model.preview_mesh();
        assert_eq!(preview.surface_count(), 2);
        assert!(same_material(&preview.surfaces[0].material, &stone));
        assert!(same_material(&preview.surfaces[1].material, &glass));
        assert!(preview.surfaces.iter().all(|s| s.tangents.is_empty()));
    }

    #[test]
    fn test_apply_config() {
        let mut model = MeshModel::new();
        let config = BakeConfig::from_toml_str("rotation_index = 4\nside_cutout_enabled = true")
            .expect("valid");
        model.apply_config(&config).expect("valid");
        assert_eq!(model.mesh_ortho_rotation_index(), 4);
        assert!(model.is_side_cutout_enabled());
    }
}
