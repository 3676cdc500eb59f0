//! Geometry Baker
//!
//! Turns source surfaces into a [`BakedModel`]. Per surface:
//!
//! 1. Validate the arrays. A malformed surface is reported and skipped, never
//!    fatal to the rest of the model.
//! 2. Rotate working copies about the cube center by the configured basis.
//! 3. Copy, derive or drop tangents.
//! 4. Classify every triangle against the six cube sides and append it to that
//!    side's surface, or to the interior surface, remapping vertex indices so each
//!    destination only holds the vertices it uses.
//!
//! Baking is deterministic: the same input and config give the same output, bit
//! for bit. Source arrays are never modified.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, error, warn};
use voxbake_shared::math::{rotate_mesh_arrays, translate};
use voxbake_shared::{OrthoBasis, Vec2, Vec3, MAX_SURFACES, SIDE_COUNT, TANGENT_STRIDE};

use crate::baked::{BakedModel, BakedSideSurface, BakedSurface};
use crate::classify::triangle_side;
use crate::config::BakeConfig;
use crate::error::{BakeDiagnostic, BakeError, BakeResult, Severity};
use crate::material::{MaterialIndexer, MaterialRef};
use crate::source::{SourceMesh, SurfaceArrays};
use crate::tangents::generate_tangents_from_uvs;

/// Offset between cube-local space and rotation space.
const CUBE_CENTER: Vec3 = Vec3::splat(0.5);

// ============================================================================
// OUTPUT
// ============================================================================

/// Result of one bake: the model, plus everything worth telling the user.
#[derive(Clone, Debug, Default)]
pub struct BakeOutput {
    /// Baked model
    pub model: BakedModel,
    /// Diagnostics in the order they were found
    pub diagnostics: Vec<BakeDiagnostic>,
}

impl BakeOutput {
    /// True if any surface was skipped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(BakeDiagnostic::skips_surface)
    }

    /// Source surfaces that were skipped.
    #[must_use]
    pub fn skipped_surfaces(&self) -> Vec<usize> {
        let mut skipped: Vec<usize> = self
            .diagnostics
            .iter()
            .filter(|d| d.skips_surface())
            .filter_map(BakeDiagnostic::surface)
            .collect();
        skipped.dedup();
        skipped
    }
}

// ============================================================================
// BAKER
// ============================================================================

/// Bakes source surfaces with a fixed configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryBaker {
    config: BakeConfig,
}

impl GeometryBaker {
    /// Creates a baker.
    #[must_use]
    pub const fn new(config: BakeConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// Bakes `surfaces` into a fresh model.
    ///
    /// `materials[i]` is the material of `surfaces[i]`; missing entries mean no
    /// material. Never fails: problems are reported in the output diagnostics.
    pub fn bake(
        &self,
        surfaces: &[SurfaceArrays],
        materials: &[MaterialRef],
        indexer: &mut MaterialIndexer,
    ) -> BakeOutput {
        let mut output = BakeOutput::default();
        output.diagnostics = self.bake_into(surfaces, materials, indexer, &mut output.model);
        output
    }

    /// Bakes a whole mesh.
    ///
    /// # Errors
    ///
    /// [`BakeError::UnsupportedPrimitive`] if the mesh is not a triangle mesh.
    pub fn bake_mesh(
        &self,
        mesh: &SourceMesh,
        indexer: &mut MaterialIndexer,
    ) -> BakeResult<BakeOutput> {
        if !mesh.primitive().is_bakeable() {
            return Err(BakeError::UnsupportedPrimitive {
                primitive: mesh.primitive(),
            });
        }
        Ok(self.bake(mesh.surfaces(), mesh.materials(), indexer))
    }

    /// Bakes into an existing model, reusing its allocations. The model's color
    /// is left as is; everything else is overwritten.
    pub fn bake_into(
        &self,
        surfaces: &[SurfaceArrays],
        materials: &[MaterialRef],
        indexer: &mut MaterialIndexer,
        model: &mut BakedModel,
    ) -> Vec<BakeDiagnostic> {
        let mut diagnostics = Vec::new();

        model.clear();
        model.cutout_sides_enabled = self.config.side_cutout_enabled;

        let rotation = self.config.ortho_basis().unwrap_or_else(|| {
            report(
                &mut diagnostics,
                BakeDiagnostic::InvalidRotation {
                    index: self.config.rotation_index,
                },
            );
            OrthoBasis::IDENTITY
        });

        if surfaces.len() > MAX_SURFACES {
            report(
                &mut diagnostics,
                BakeDiagnostic::TooManySurfaces {
                    count: surfaces.len(),
                    max: MAX_SURFACES,
                },
            );
        }
        model.surface_count = surfaces.len().min(MAX_SURFACES);

        let tolerance = self.config.effective_tolerance();

        for (surface_index, arrays) in surfaces.iter().take(MAX_SURFACES).enumerate() {
            let Some(prepared) =
                self.prepare_surface(surface_index, arrays, rotation, &mut diagnostics)
            else {
                continue;
            };

            let material = materials.get(surface_index).cloned().flatten();
            let material_id = indexer.get_or_create_index(&material);

            distribute_triangles(surface_index, &prepared, material_id, tolerance, model);
        }

        model.empty = !(0..model.surface_count).any(|i| model.surface_has_geometry(i));

        debug!(
            surfaces = model.surface_count,
            triangles = model.triangle_count(),
            rotation = rotation.index(),
            diagnostics = diagnostics.len(),
            empty = model.empty,
            "baked blocky model"
        );

        diagnostics
    }

    /// Validates one surface and builds its rotated working arrays.
    fn prepare_surface<'a>(
        &self,
        surface_index: usize,
        arrays: &'a SurfaceArrays,
        rotation: OrthoBasis,
        diagnostics: &mut Vec<BakeDiagnostic>,
    ) -> Option<PreparedSurface<'a>> {
        if arrays.is_empty() {
            debug!(surface = surface_index, "mesh surface is empty, skipping");
            return None;
        }

        if let Err(diagnostic) = validate_surface(surface_index, arrays) {
            report(diagnostics, diagnostic);
            return None;
        }

        let generate_tangents = self.config.tangents_enabled && arrays.tangents.is_empty();
        if generate_tangents && arrays.uvs.is_empty() {
            report(
                diagnostics,
                BakeDiagnostic::MissingTangentBasis {
                    surface: surface_index,
                },
            );
            return None;
        }

        let mut positions = Cow::Borrowed(arrays.positions.as_slice());
        let mut normals = Cow::Borrowed(arrays.normals.as_slice());
        let mut tangents: Cow<'a, [f32]> = if self.config.tangents_enabled {
            Cow::Borrowed(arrays.tangents.as_slice())
        } else {
            Cow::Borrowed(&[])
        };

        if !rotation.is_identity() {
            let basis = rotation.basis();
            let positions = positions.to_mut();
            translate(positions, -CUBE_CENTER);
            rotate_mesh_arrays(positions, normals.to_mut(), tangents.to_mut(), &basis);
            translate(positions, CUBE_CENTER);
        }

        if generate_tangents {
            report(
                diagnostics,
                BakeDiagnostic::GeneratedTangents {
                    surface: surface_index,
                },
            );
            tangents = Cow::Owned(generate_tangents_from_uvs(
                &positions,
                &normals,
                &arrays.uvs,
                &arrays.indices,
            ));
        }

        let uvs = if arrays.uvs.is_empty() {
            Cow::Owned(vec![Vec2::ZERO; arrays.positions.len()])
        } else {
            Cow::Borrowed(arrays.uvs.as_slice())
        };

        Some(PreparedSurface {
            positions,
            normals,
            uvs,
            tangents,
            indices: &arrays.indices,
        })
    }
}

/// Bakes `surfaces` with `config` into a fresh model.
///
/// Shorthand for [`GeometryBaker::bake`].
pub fn bake_mesh_geometry(
    surfaces: &[SurfaceArrays],
    materials: &[MaterialRef],
    config: &BakeConfig,
    indexer: &mut MaterialIndexer,
) -> BakeOutput {
    GeometryBaker::new(*config).bake(surfaces, materials, indexer)
}

// ============================================================================
// INTERNALS
// ============================================================================

/// Validated, rotated view of one surface. Arrays are borrowed from the source
/// until something has to change them.
struct PreparedSurface<'a> {
    positions: Cow<'a, [Vec3]>,
    normals: Cow<'a, [Vec3]>,
    uvs: Cow<'a, [Vec2]>,
    /// Empty when tangents are not baked
    tangents: Cow<'a, [f32]>,
    indices: &'a [u32],
}

impl PreparedSurface<'_> {
    fn tangent(&self, index: usize) -> Option<&[f32]> {
        let start = index * TANGENT_STRIDE;
        self.tangents.get(start..start + TANGENT_STRIDE)
    }
}

fn report(diagnostics: &mut Vec<BakeDiagnostic>, diagnostic: BakeDiagnostic) {
    match diagnostic.severity() {
        Severity::Error => error!(surface = ?diagnostic.surface(), "{diagnostic}"),
        Severity::Warning => warn!(surface = ?diagnostic.surface(), "{diagnostic}"),
    }
    diagnostics.push(diagnostic);
}

/// Checks array shapes, first failure wins.
fn validate_surface(surface: usize, arrays: &SurfaceArrays) -> Result<(), BakeDiagnostic> {
    let vertex_count = arrays.positions.len();

    if arrays.indices.is_empty() {
        return Err(BakeDiagnostic::MissingIndexBuffer { surface });
    }
    if arrays.indices.len() % 3 != 0 {
        return Err(BakeDiagnostic::InvalidIndexCount {
            surface,
            count: arrays.indices.len(),
        });
    }
    if let Some(&index) = arrays.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(BakeDiagnostic::IndexOutOfRange {
            surface,
            index,
            max: i64::try_from(vertex_count).unwrap_or(i64::MAX) - 1,
        });
    }
    if arrays.normals.is_empty() {
        return Err(BakeDiagnostic::MissingNormals { surface });
    }
    if arrays.normals.len() != vertex_count {
        return Err(BakeDiagnostic::NormalCountMismatch {
            surface,
            positions: vertex_count,
            normals: arrays.normals.len(),
        });
    }
    if !arrays.uvs.is_empty() && arrays.uvs.len() != vertex_count {
        return Err(BakeDiagnostic::UvCountMismatch {
            surface,
            positions: vertex_count,
            uvs: arrays.uvs.len(),
        });
    }
    if !arrays.tangents.is_empty() && arrays.tangents.len() != vertex_count * TANGENT_STRIDE {
        return Err(BakeDiagnostic::TangentCountMismatch {
            surface,
            positions: vertex_count,
            values: arrays.tangents.len(),
        });
    }
    Ok(())
}

/// Splits a prepared surface between the interior and the six sides.
fn distribute_triangles(
    surface_index: usize,
    prepared: &PreparedSurface<'_>,
    material_id: u32,
    tolerance: f32,
    model: &mut BakedModel,
) {
    // Source index -> destination index, one table per destination
    let mut interior_remap: HashMap<u32, u32> = HashMap::new();
    let mut side_remaps: [HashMap<u32, u32>; SIDE_COUNT] = Default::default();

    let interior = &mut model.surfaces[surface_index];
    interior.material_id = material_id;

    for tri in prepared.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| prepared.positions[i as usize]);

        match triangle_side(a, b, c, tolerance) {
            Some(side) => {
                let dst = &mut model.sides_surfaces[side.index()][surface_index];
                let remap = &mut side_remaps[side.index()];
                for &src in tri {
                    let index = *remap
                        .entry(src)
                        .or_insert_with(|| push_side_vertex(dst, prepared, src as usize));
                    dst.indices.push(index);
                }
            }
            None => {
                for &src in tri {
                    let index = *interior_remap
                        .entry(src)
                        .or_insert_with(|| push_interior_vertex(interior, prepared, src as usize));
                    interior.indices.push(index);
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn push_interior_vertex(dst: &mut BakedSurface, src: &PreparedSurface<'_>, i: usize) -> u32 {
    let index = dst.positions.len() as u32;
    dst.positions.push(src.positions[i]);
    dst.normals.push(src.normals[i]);
    dst.uvs.push(src.uvs[i]);
    if let Some(tangent) = src.tangent(i) {
        dst.tangents.extend_from_slice(tangent);
    }
    index
}

#[allow(clippy::cast_possible_truncation)]
fn push_side_vertex(dst: &mut BakedSideSurface, src: &PreparedSurface<'_>, i: usize) -> u32 {
    let index = dst.positions.len() as u32;
    dst.positions.push(src.positions[i]);
    dst.uvs.push(src.uvs[i]);
    if let Some(tangent) = src.tangent(i) {
        dst.tangents.extend_from_slice(tangent);
    }
    index
}
