//! Procedural Block Meshes
//!
//! Small library of block-shaped meshes built in code: full cube, slab, stairs,
//! cross-shaped plant. Used to seed libraries, and as fixtures for tests and
//! benchmarks.

use voxbake_shared::{Side, Vec2, Vec3};

use crate::source::{SourceMesh, SurfaceArrays};

/// Accumulates quads into one [`SurfaceArrays`].
#[derive(Debug, Default, Clone)]
pub struct SurfaceBuilder {
    arrays: SurfaceArrays,
}

impl SurfaceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad. Corners go counter-clockwise seen from the front; UVs are the
    /// unit square in the same order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.arrays.positions.len() as u32;
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        self.arrays.positions.extend(corners);
        self.arrays.normals.extend([normal; 4]);
        self.arrays.uvs.extend(uvs);
        self.arrays
            .indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Adds the face of the box `[min, max]` pointing toward `side`.
    pub fn add_box_face(&mut self, min: Vec3, max: Vec3, side: Side) {
        let axis = side.axis();
        let u_axis = axis.next();
        let v_axis = u_axis.next();
        let plane = if side.plane() > 0.5 { max.axis(axis) } else { min.axis(axis) };

        let corner = |u: bool, v: bool| {
            let mut c = [0.0; 3];
            c[axis.index()] = plane;
            c[u_axis.index()] = if u { max.axis(u_axis) } else { min.axis(u_axis) };
            c[v_axis.index()] = if v { max.axis(v_axis) } else { min.axis(v_axis) };
            Vec3::from_array(c)
        };

        // cross(u, v) points along +axis; flip the winding for negative sides
        let corners = if side.plane() > 0.5 {
            [corner(false, false), corner(true, false), corner(true, true), corner(false, true)]
        } else {
            [corner(false, false), corner(false, true), corner(true, true), corner(true, false)]
        };
        self.add_quad(corners, side.normal());
    }

    /// Adds all six faces of the box `[min, max]`.
    pub fn add_box(&mut self, min: Vec3, max: Vec3) {
        for side in Side::ALL {
            self.add_box_face(min, max, side);
        }
    }

    /// Finishes the surface.
    #[must_use]
    pub fn build(self) -> SurfaceArrays {
        self.arrays
    }
}

/// Built-in block meshes.
pub struct ProceduralMeshes;

impl ProceduralMeshes {
    /// Full unit cube, 4 vertices per face, with UVs.
    #[must_use]
    pub fn cube() -> SourceMesh {
        let mut builder = SurfaceBuilder::new();
        builder.add_box(Vec3::ZERO, Vec3::splat(1.0));
        SourceMesh::triangles().with_surface(builder.build(), None)
    }

    /// Unit cube sharing its 8 corners between faces. No UVs.
    #[must_use]
    pub fn welded_cube() -> SourceMesh {
        let positions: Vec<Vec3> = (0..8u8)
            .map(|i| {
                Vec3::new(f32::from(i & 1), f32::from((i >> 1) & 1), f32::from((i >> 2) & 1))
            })
            .collect();
        let normals = positions
            .iter()
            .map(|p| (*p - Vec3::splat(0.5)).normalized())
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 4, 6, 0, 6, 2, // -X
            1, 3, 7, 1, 7, 5, // +X
            0, 1, 5, 0, 5, 4, // -Y
            2, 6, 7, 2, 7, 3, // +Y
            0, 2, 3, 0, 3, 1, // -Z
            4, 5, 7, 4, 7, 6, // +Z
        ];
        SourceMesh::triangles().with_surface(SurfaceArrays::new(positions, normals, indices), None)
    }

    /// Bottom half slab. Its top face sits inside the cube.
    #[must_use]
    pub fn slab() -> SourceMesh {
        let mut builder = SurfaceBuilder::new();
        builder.add_box(Vec3::ZERO, Vec3::new(1.0, 0.5, 1.0));
        SourceMesh::triangles().with_surface(builder.build(), None)
    }

    /// Stairs ascending toward +Z.
    #[must_use]
    pub fn stairs() -> SourceMesh {
        let mut builder = SurfaceBuilder::new();
        builder.add_box(Vec3::ZERO, Vec3::new(1.0, 0.5, 1.0));
        builder.add_box(Vec3::new(0.0, 0.5, 0.5), Vec3::splat(1.0));
        SourceMesh::triangles().with_surface(builder.build(), None)
    }

    /// Two crossed diagonal quads, all interior.
    #[must_use]
    pub fn cross_plant() -> SourceMesh {
        let mut builder = SurfaceBuilder::new();
        let a = Vec3::new(-1.0, 0.0, 1.0).normalized();
        let b = Vec3::new(1.0, 0.0, 1.0).normalized();
        builder.add_quad(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            a,
        );
        builder.add_quad(
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            b,
        );
        SourceMesh::triangles().with_surface(builder.build(), None)
    }

    /// Gets all built-in meshes with their names.
    #[must_use]
    pub fn all() -> Vec<(&'static str, SourceMesh)> {
        vec![
            ("cube", Self::cube()),
            ("welded_cube", Self::welded_cube()),
            ("slab", Self::slab()),
            ("stairs", Self::stairs()),
            ("cross_plant", Self::cross_plant()),
        ]
    }

    /// Gets a mesh by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<SourceMesh> {
        match name {
            "cube" => Some(Self::cube()),
            "welded_cube" => Some(Self::welded_cube()),
            "slab" => Some(Self::slab()),
            "stairs" => Some(Self::stairs()),
            "cross_plant" => Some(Self::cross_plant()),
            _ => None,
        }
    }
}
