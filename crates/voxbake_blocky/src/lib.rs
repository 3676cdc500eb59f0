//! # VOXBAKE Blocky
//!
//! Bakes triangle meshes into blocky voxel models: geometry split by cube side so
//! a mesher can skip faces hidden by neighbors, with dense material ids shared
//! across a whole library.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  SourceMesh + BakeConfig                                     │
//! │       ↓                                                      │
//! │  validate → rotate (OrthoBasis) → tangents → classify/dedup  │
//! │       ↓                                    ↓                 │
//! │  BakedModel (interior + 6 × sides)   MaterialIndexer ids      │
//! │       ↓                                                      │
//! │  reconstruct → PreviewMesh                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! - A malformed surface is reported and skipped; the rest of the model bakes
//! - Baking never returns `Err`, callers always get a usable model
//! - Only configuration calls (`set_mesh`, config loading) return [`BakeError`]

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bake;
pub mod baked;
pub mod classify;
pub mod config;
pub mod error;
pub mod material;
pub mod model;
pub mod preview;
pub mod procedural;
pub mod source;
pub mod tangents;

pub use bake::{bake_mesh_geometry, BakeOutput, GeometryBaker};
pub use baked::{sides_are_empty, BakedModel, BakedSideSurface, BakedSurface, DEFAULT_MODEL_COLOR};
pub use classify::{side_mask, triangle_side};
pub use config::BakeConfig;
pub use error::{BakeDiagnostic, BakeError, BakeResult, Severity};
pub use material::{same_material, Material, MaterialIndexer, MaterialRef, SharedMaterialIndexer};
pub use model::{BakingContext, MeshModel};
pub use preview::{reconstruct, reconstruct_from_parts, PreviewMesh, PreviewSurface};
pub use procedural::{ProceduralMeshes, SurfaceBuilder};
pub use source::{PrimitiveKind, SourceMesh, SurfaceArrays};
pub use tangents::generate_tangents_from_uvs;

pub use voxbake_shared::{Axis, OrthoBasis, Side, Vec2, Vec3, MAX_SURFACES, SIDE_COUNT};
