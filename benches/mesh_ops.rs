//! Benchmarks for mesh operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera::algo::bevel::Bevel;
use tessera::algo::conway::{ConwayNotation, Dual, Kis};
use tessera::algo::subdivide::{catmull_clark_subdivide, SubdivideOptions};
use tessera::mesh::EdgeTable;
use tessera::prelude::*;
use tessera::primitives;

fn create_grid_mesh(n: usize) -> Mesh {
    primitives::plane(n as f64, n as f64, n, n).unwrap()
}

fn bench_mesh_construction(c: &mut Criterion) {
    c.bench_function("build_grid_50x50", |b| {
        let (vertices, faces) = to_face_vertex(&create_grid_mesh(50));
        b.iter(|| build_from_polygons(&vertices, &faces).unwrap());
    });

    let mesh = create_grid_mesh(50);
    c.bench_function("edge_table_grid_50x50", |b| b.iter(|| EdgeTable::build(black_box(&mesh))));
}

fn bench_catmull_clark(c: &mut Criterion) {
    let mut group = c.benchmark_group("catmull_clark");
    let seed = primitives::cube(1.0);

    for iterations in [1, 3, 5] {
        group.bench_with_input(BenchmarkId::new("sequential", iterations), &iterations, |b, &k| {
            let options = SubdivideOptions::new(k).sequential();
            b.iter(|| {
                let mut mesh = seed.clone();
                catmull_clark_subdivide(&mut mesh, &options);
                mesh
            });
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", iterations), &iterations, |b, &k| {
            let options = SubdivideOptions::new(k);
            b.iter(|| {
                let mut mesh = seed.clone();
                catmull_clark_subdivide(&mut mesh, &options);
                mesh
            });
        });
    }
    group.finish();
}

fn bench_conway(c: &mut Criterion) {
    let seed = primitives::icosahedron(1.0);

    c.bench_function("dual_kis_icosahedron_x3", |b| {
        let pipeline = Pipeline::new().then(Kis).then(Dual);
        let repeat = Repeat::new(3, pipeline).unwrap();
        b.iter(|| {
            let mut mesh = seed.clone();
            mesh.apply(&repeat).unwrap();
            mesh
        });
    });

    c.bench_function("notation_tktI", |b| {
        let notation = ConwayNotation::parse("tktI").unwrap();
        b.iter(|| notation.build().unwrap());
    });
}

fn bench_bevel(c: &mut Criterion) {
    let mut seed = primitives::cube(1.0);
    catmull_clark_subdivide(&mut seed, &SubdivideOptions::new(3).sequential());
    let bevel = Bevel::new(0.2).unwrap();

    c.bench_function("bevel_cube_cc3", |b| {
        b.iter(|| {
            let mut mesh = seed.clone();
            mesh.apply(&bevel).unwrap();
            mesh
        });
    });
}

criterion_group!(benches, bench_mesh_construction, bench_catmull_clark, bench_conway, bench_bevel);
criterion_main!(benches);
