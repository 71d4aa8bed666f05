use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use terrain::{Area, Converter, Grid, GridSource, Header, Layer, Point, Source};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// One arc-second elevation grid over a single degree, with a gentle
/// north-east slope.
fn elevation_source() -> GridSource<f32> {
    let n = 3600;
    let header = Header::new(n, n, -112.0, 45.0, 1.0 / 3600.0);
    let samples = (0..n * n)
        .map(|i| 1000.0 + (i % n) as f32 * 0.1 + (n - i / n) as f32 * 0.1)
        .collect();
    let grid = Grid::from_samples(header, samples).unwrap();
    GridSource::new(grid, Layer::Elevation, Arc::new(Converter::Identity))
}

fn area_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Area Resolution");

    let source = elevation_source();
    let area = Area::around(&Point::new(45.5, -111.5), 5.0);

    group.bench_function("discrete", |b| b.iter(|| area.discrete(0.1).unwrap()));

    group.bench_function("discrete+resolve", |b| {
        b.iter(|| {
            let mut points = area.discrete(0.1).unwrap();
            source.resolve_all(&mut points).unwrap();
            points
        })
    });
}

criterion_group!(benches, area_resolution);
criterion_main!(benches);
