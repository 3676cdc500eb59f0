//! # Model Bake Benchmark
//!
//! A library of a few thousand models is baked on every load, so a single model
//! bake has to stay in the microsecond range.
//!
//! Run with: `cargo bench --package voxbake_blocky`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxbake_blocky::{
    reconstruct, BakeConfig, BakedModel, GeometryBaker, MaterialIndexer, MeshModel,
    ProceduralMeshes, SourceMesh, SurfaceBuilder, Vec3,
};

/// Mesh made of `n`³ small boxes filling the cube. Mostly interior geometry.
fn voxel_grid(n: u8) -> SourceMesh {
    let mut builder = SurfaceBuilder::new();
    let step = 1.0 / f32::from(n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = Vec3::new(f32::from(x), f32::from(y), f32::from(z)) * step;
                builder.add_box(min, min + Vec3::splat(step * 0.9));
            }
        }
    }
    SourceMesh::triangles().with_surface(builder.build(), None)
}

/// Benchmark: bake each built-in mesh.
fn bench_builtin_meshes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bake_builtin");
    let baker = GeometryBaker::new(BakeConfig::default());

    for (name, mesh) in ProceduralMeshes::all() {
        // The welded cube has no UVs to derive tangents from
        let baker = if name == "welded_cube" {
            GeometryBaker::new(BakeConfig::default().with_tangents(false))
        } else {
            baker
        };
        group.bench_with_input(BenchmarkId::from_parameter(name), &mesh, |b, mesh| {
            b.iter(|| {
                let mut indexer = MaterialIndexer::new();
                black_box(baker.bake(mesh.surfaces(), mesh.materials(), &mut indexer))
            });
        });
    }

    group.finish();
}

/// Benchmark: dense meshes, with and without derived tangents.
fn bench_dense_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("bake_dense");

    for n in [2u8, 4, 8] {
        let mesh = voxel_grid(n);
        for tangents in [false, true] {
            let baker = GeometryBaker::new(BakeConfig::default().with_tangents(tangents));
            let id = format!("{n}x{n}x{n}_tangents_{tangents}");
            group.bench_with_input(BenchmarkId::from_parameter(id), &mesh, |b, mesh| {
                b.iter(|| {
                    let mut indexer = MaterialIndexer::new();
                    black_box(baker.bake(mesh.surfaces(), mesh.materials(), &mut indexer))
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: rotated bake reusing one output model.
fn bench_rotated_bake_into(c: &mut Criterion) {
    let mesh = ProceduralMeshes::stairs();
    let baker = GeometryBaker::new(BakeConfig::default().with_rotation_index(17));
    let mut indexer = MaterialIndexer::new();
    let mut model = BakedModel::new();

    c.bench_function("bake_into_rotated_stairs", |b| {
        b.iter(|| {
            let diagnostics =
                baker.bake_into(mesh.surfaces(), mesh.materials(), &mut indexer, &mut model);
            black_box(diagnostics.len())
        });
    });
}

/// Benchmark: full preview path.
fn bench_preview(c: &mut Criterion) {
    let model = MeshModel::from_mesh(voxel_grid(4)).expect("triangle mesh");
    c.bench_function("preview_4x4x4", |b| {
        b.iter(|| black_box(model.preview_mesh()));
    });

    let mut indexer = MaterialIndexer::new();
    let baked = GeometryBaker::default()
        .bake(voxel_grid(4).surfaces(), &[], &mut indexer)
        .model;
    c.bench_function("reconstruct_4x4x4", |b| {
        b.iter(|| black_box(reconstruct(&baked, true)));
    });
}

criterion_group!(
    benches,
    bench_builtin_meshes,
    bench_dense_mesh,
    bench_rotated_bake_into,
    bench_preview,
);
criterion_main!(benches);
