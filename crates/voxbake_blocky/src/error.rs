//! Error types for model baking.
//!
//! Two layers: [`BakeError`] is returned from configuration entry points and
//! rejects the operation outright. [`BakeDiagnostic`] is recorded while baking and
//! never aborts a model; a surface that trips one is skipped (or, for warnings,
//! baked in a degraded way) and the rest of the model carries on.

use thiserror::Error;

use crate::source::PrimitiveKind;

/// Hard errors from model configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BakeError {
    /// Config file failed to parse or validate.
    #[error("invalid bake configuration: {0}")]
    InvalidConfig(String),

    /// Mesh primitive cannot be baked into a blocky model.
    #[error("{primitive:?} meshes are not supported by blocky mesh models, a triangle mesh is required")]
    UnsupportedPrimitive {
        /// Primitive of the rejected mesh
        primitive: PrimitiveKind,
    },

    /// Orthogonal basis index outside `0..24`.
    #[error("orthogonal basis index {0} is out of range (expected 0..24)")]
    InvalidRotationIndex(u8),

    /// Per-surface setting addressed a surface the model cannot hold.
    #[error("surface index {index} is out of range (model supports {max} surfaces)")]
    SurfaceIndexOutOfRange {
        /// Requested surface
        index: usize,
        /// Number of supported surfaces
        max: usize,
    },
}

/// Result type for configuration operations.
pub type BakeResult<T> = Result<T, BakeError>;

/// How bad a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Output is degraded but present.
    Warning,
    /// Affected surface was skipped.
    Error,
}

/// Non-fatal problem found while baking one model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BakeDiagnostic {
    /// Positions without an index buffer.
    #[error("mesh surface {surface} is missing an index buffer. Indexed meshes are expected, index the mesh before assigning it")]
    MissingIndexBuffer {
        /// Surface index in the source mesh
        surface: usize,
    },

    /// Index count is not a multiple of 3.
    #[error("mesh surface {surface} has an invalid number of indices. Expected a multiple of 3 (for triangles), found {count}")]
    InvalidIndexCount {
        /// Surface index in the source mesh
        surface: usize,
        /// Number of indices found
        count: usize,
    },

    /// An index points past the vertex arrays.
    #[error("mesh surface {surface} has an invalid index. Maximum is {max}, found {index}")]
    IndexOutOfRange {
        /// Surface index in the source mesh
        surface: usize,
        /// First offending index
        index: u32,
        /// Largest valid index, or -1 when the surface has no vertices
        max: i64,
    },

    /// No normals at all.
    #[error("mesh surface {surface} is missing normals, this is not supported")]
    MissingNormals {
        /// Surface index in the source mesh
        surface: usize,
    },

    /// Normal count differs from position count.
    #[error("mesh surface {surface} has {normals} normals for {positions} vertices")]
    NormalCountMismatch {
        /// Surface index in the source mesh
        surface: usize,
        /// Vertex count
        positions: usize,
        /// Normal count
        normals: usize,
    },

    /// UV count differs from position count.
    #[error("mesh surface {surface} has {uvs} UVs for {positions} vertices")]
    UvCountMismatch {
        /// Surface index in the source mesh
        surface: usize,
        /// Vertex count
        positions: usize,
        /// UV count
        uvs: usize,
    },

    /// Tangent buffer is not 4 floats per vertex.
    #[error("mesh surface {surface} has {values} tangent values for {positions} vertices (expected 4 per vertex)")]
    TangentCountMismatch {
        /// Surface index in the source mesh
        surface: usize,
        /// Vertex count
        positions: usize,
        /// Number of floats in the tangent buffer
        values: usize,
    },

    /// Tangents requested but neither tangents nor UVs are available.
    #[error("mesh surface {surface} is missing tangents and UVs. The model won't be baked. You should consider providing a mesh with tangents, or at least UVs and normals, or turn off tangents baking")]
    MissingTangentBasis {
        /// Surface index in the source mesh
        surface: usize,
    },

    /// Tangents were derived from UVs.
    #[error("mesh surface {surface} does not have tangents. They were generated from UVs and normals, but this can be slow. You should consider providing a mesh with tangents, or at least disable tangents baking")]
    GeneratedTangents {
        /// Surface index in the source mesh
        surface: usize,
    },

    /// Surfaces past the model capacity were dropped.
    #[error("mesh has {count} surfaces, only the first {max} are baked")]
    TooManySurfaces {
        /// Surfaces in the source mesh
        count: usize,
        /// Model capacity
        max: usize,
    },

    /// Rotation index out of range, geometry baked unrotated.
    #[error("orthogonal basis index {index} is out of range, mesh baked without rotation")]
    InvalidRotation {
        /// Offending index
        index: u8,
    },
}

impl BakeDiagnostic {
    /// Severity of this diagnostic.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::GeneratedTangents { .. }
            | Self::TooManySurfaces { .. }
            | Self::InvalidRotation { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Source surface this diagnostic is about, if it concerns a single surface.
    #[must_use]
    pub const fn surface(&self) -> Option<usize> {
        match self {
            Self::MissingIndexBuffer { surface }
            | Self::InvalidIndexCount { surface, .. }
            | Self::IndexOutOfRange { surface, .. }
            | Self::MissingNormals { surface }
            | Self::NormalCountMismatch { surface, .. }
            | Self::UvCountMismatch { surface, .. }
            | Self::TangentCountMismatch { surface, .. }
            | Self::MissingTangentBasis { surface }
            | Self::GeneratedTangents { surface } => Some(*surface),
            Self::TooManySurfaces { .. } | Self::InvalidRotation { .. } => None,
        }
    }

    /// True if the affected surface was skipped.
    #[must_use]
    pub fn skips_surface(&self) -> bool {
        self.severity() == Severity::Error
    }
}
