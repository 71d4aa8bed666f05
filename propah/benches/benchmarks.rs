use criterion::{criterion_group, criterion_main, Criterion};
use propah::{
    sweep, targets,
    terrain::{Area, Converter, Grid, GridSource, Header, Layer, Point, Region},
    Diffraction, Link, PathLossModel,
};
use std::sync::Arc;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// One arc-second elevation grid over a single degree, rolling
/// east-west.
fn elevation_source() -> GridSource<f32> {
    let n = 3600;
    let header = Header::new(n, n, -112.0, 45.0, 1.0 / 3600.0);
    let samples = (0..n * n)
        .map(|i| 1500.0 + 20.0 * ((i % n) as f32 / 60.0).sin())
        .collect();
    let grid = Grid::from_samples(header, samples).unwrap();
    GridSource::new(grid, Layer::Elevation, Arc::new(Converter::Identity))
}

fn path_loss(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let mut group = c.benchmark_group("Path Loss");

    let source = elevation_source();
    let link = Link::builder()
        .step_km(0.03)
        .tx_power_mw(4000.0)
        .freq_mhz(900.0)
        .build()
        .unwrap();
    let model = Diffraction::default();
    let tx = Point::new(45.5, -111.5).with_tower(30.0);
    let rx = tx.project(1.0, 5.0).with_tower(2.0);

    group.bench_function("single path", |b| {
        b.iter(|| model.path_loss(&tx, &rx, &source, &link).unwrap())
    });

    let region = Region::from(Area::around(&tx, 2.0));
    let receivers = targets(&region, 0.25, 2.0).unwrap();
    group.bench_function("sweep", |b| {
        b.iter(|| sweep(&model, &tx, &receivers, &source, &link))
    });
}

criterion_group!(benches, path_loss);
criterion_main!(benches);
