//! # Baking Constants
//!
//! Limits shared by the baker and the chunk mesher consuming its output.
//!
//! **CRITICAL:** `MAX_SURFACES` fixes the shape of every baked model.
//! The chunk mesher indexes side geometry as `[side][surface]` and relies on it.

/// Maximum number of mesh surfaces (materials) a single model may bake.
pub const MAX_SURFACES: usize = 2;

/// Default distance under which a vertex counts as lying on a cube side.
pub const DEFAULT_SIDE_VERTEX_TOLERANCE: f32 = 0.001;

/// Values per tangent: xyz + bitangent sign.
pub const TANGENT_STRIDE: usize = 4;
