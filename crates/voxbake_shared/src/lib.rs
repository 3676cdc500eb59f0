//! # VOXBAKE Shared
//!
//! Math and lookup tables used by the blocky model baker and its consumers.
//!
//! - [`math`]: `Vec3`/`Vec2`/`Basis3` and bulk buffer rotation
//! - [`ortho`]: the 24 axis-preserving rotations, addressed by index
//! - [`cube`]: the six cube sides in canonical order
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER know about meshes, materials or baked models.
//! If you need those, put them in `voxbake_blocky`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod cube;
pub mod math;
pub mod ortho;

pub use constants::{DEFAULT_SIDE_VERTEX_TOLERANCE, MAX_SURFACES, TANGENT_STRIDE};
pub use cube::{Side, SIDE_COUNT};
pub use math::{Basis3, Vec2, Vec3};
pub use ortho::{Axis, OrthoBasis, ORTHOGONAL_BASIS_COUNT, ORTHOGONAL_BASIS_IDENTITY_INDEX};
