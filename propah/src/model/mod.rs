//! Path loss models.

mod climate;
mod diffraction;

pub use self::{climate::Itm, diffraction::Diffraction};

use crate::{Coverage, Link, PropahError};
use log::debug;
use std::time::Instant;
use terrain::{Line, Point, Source, C};

/// Predicts the signal a receiver hears from a transmitter.
pub trait PathLossModel: Sync {
    /// Returns the coverage at `rx` from `tx`, with ground properties
    /// looked up in `sources`.
    ///
    /// Tower heights are taken from the endpoints.
    fn path_loss<S: Source + ?Sized>(
        &self,
        tx: &Point,
        rx: &Point,
        sources: &S,
        link: &Link,
    ) -> Result<Coverage, PropahError>;
}

/// Returns a copy of `point` resolved against `sources`, and its
/// ground elevation.
pub(crate) fn resolve<S: Source + ?Sized>(point: &Point, sources: &S) -> Result<(Point, C), PropahError> {
    let mut point = *point;
    sources.resolve(&mut point)?;
    let elevation = elevation(&point)?;
    Ok((point, elevation))
}

pub(crate) fn elevation(point: &Point) -> Result<C, PropahError> {
    point.elevation.ok_or(PropahError::Unresolved {
        lat: point.lat,
        lon: point.lon,
    })
}

/// Returns the resolved samples `link.step_km()` apart from `tx`
/// toward `rx`.
pub(crate) fn profile<S: Source + ?Sized>(
    tx: &Point,
    rx: &Point,
    sources: &S,
    link: &Link,
) -> Result<Vec<Point>, PropahError> {
    let now = Instant::now();
    let mut path = Line::between(*tx, *rx).discrete(link.step_km())?;
    sources.resolve_all(&mut path)?;
    debug!(
        "profile {tx} -> {rx}, samples: {}, duration: {:?}",
        path.len(),
        now.elapsed()
    );
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::{
        fixtures::{endpoints, flat, link, FnSource},
        profile, resolve,
    };
    use crate::PropahError;
    use terrain::Point;

    #[test]
    fn test_profile() {
        let (tx, rx) = endpoints();
        let path = profile(&tx, &rx, &flat(1500.0), &link()).unwrap();
        assert_eq!(path.len(), 354);
        assert!(path.iter().all(|p| p.elevation == Some(1500.0)));
        assert!((path[0].lat - tx.lat).abs() < 1e-9);
    }

    #[test]
    fn test_unresolved() {
        let (tx, _) = endpoints();
        let nothing = FnSource(|_: &mut Point| {});
        let err = resolve(&tx, &nothing).unwrap_err();
        assert!(matches!(err, PropahError::Unresolved { lat, .. } if lat == tx.lat));

        let (resolved, elevation) = resolve(&tx, &flat(12.0)).unwrap();
        assert_eq!(elevation, 12.0);
        assert_eq!(resolved.tower_height, 10.0);
    }
}
