use std::hint::black_box;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use waypath_core::{NavModelConfig, create_nav_model, route_between};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../data")
        .join(name)
}

fn benchmark_routing(c: &mut Criterion) {
    let config = NavModelConfig {
        paths_path: data_file("campus_paths.geojson"),
        locations_path: data_file("campus_locations.csv"),
    };
    let model = create_nav_model(&config).expect("bundled campus data loads");
    let gate = Point::new(79.004_020, 21.103_063);
    let library = Point::new(79.007_840, 21.101_417);

    c.bench_function("build_campus_model", |b| {
        b.iter(|| {
            let model = create_nav_model(&config).expect("bundled campus data loads");
            black_box(model.graph.node_count())
        });
    });

    c.bench_function("snap_to_network", |b| {
        b.iter(|| black_box(model.graph.nearest_node(&gate)));
    });

    c.bench_function("route_gate_to_library", |b| {
        b.iter(|| {
            let route = route_between(&model, black_box(gate), black_box(library));
            black_box(route.distance)
        });
    });
}

criterion_group!(benches, benchmark_routing);
criterion_main!(benches);
