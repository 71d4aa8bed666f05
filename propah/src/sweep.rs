use crate::{Coverage, Link, PathLossModel, PropahError};
use log::debug;
use rayon::prelude::*;
use std::time::Instant;
use terrain::{Point, Region, Source};

/// Returns receiver points every `resolution_km` over `region`, each
/// with a `tower_height_m` antenna.
pub fn targets(region: &Region, resolution_km: f64, tower_height_m: f64) -> Result<Vec<Point>, PropahError> {
    Ok(region
        .discrete(resolution_km)?
        .into_iter()
        .map(|point| point.with_tower(tower_height_m))
        .collect())
}

/// Predicts coverage from `tx` at every point in `targets`, in
/// parallel.
///
/// Results are in the same order as `targets`.
pub fn sweep<M, S>(
    model: &M,
    tx: &Point,
    targets: &[Point],
    sources: &S,
    link: &Link,
) -> Vec<Result<Coverage, PropahError>>
where
    M: PathLossModel,
    S: Source + ?Sized,
{
    let now = Instant::now();
    let results: Vec<_> = targets
        .par_iter()
        .map(|rx| model.path_loss(tx, rx, sources, link))
        .collect();
    debug!(
        "swept {} targets from {tx}, duration: {:?}",
        targets.len(),
        now.elapsed()
    );
    results
}
