use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3A;
use sheen::{
    bvh::BvhBuilder,
    material::MaterialId,
    mesh::Mesh,
};

fn bench_build(c: &mut Criterion) {
    // configuration of criterion
    let mut bench_group = c.benchmark_group("bvh_build");
    // filter noise more noise
    bench_group.noise_threshold(0.05);
    // smaller sig level to combat noise
    bench_group.significance_level(0.1);

    // a grid of cubes gives the builder something non-trivial to partition
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for x in 0..8 {
        for z in 0..8 {
            let cube = Mesh::cube(
                Vec3A::new(x as f32 * 2.0, 0.0, z as f32 * 2.0),
                1.0,
                MaterialId(0),
            );
            let base = vertices.len() as u32;
            vertices.extend_from_slice(cube.vertices());
            indices.extend(cube.indices().iter().map(|i| i + base));
        }
    }
    let mesh = Mesh::new(vertices, indices, MaterialId(0));
    let triangles = mesh.extract_triangles();

    for max_depth in [4u32, 8, 12] {
        bench_group.bench_with_input(
            BenchmarkId::from_parameter(max_depth),
            &max_depth,
            |b, &depth| {
                b.iter(|| BvhBuilder::new(triangles.clone(), depth).build());
            },
        );
    }

    bench_group.finish();
}

criterion_group! {benches, bench_build}
criterion_main!(benches);
