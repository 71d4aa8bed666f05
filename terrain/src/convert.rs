//! Geographic to planar coordinate conversion.
//!
//! # References
//!
//! 1. Snyder, J. P. (1987). Map Projections: A Working Manual, pp.
//!    98-103 (Albers Equal-Area Conic, ellipsoidal forms).

use crate::{constants::EARTH_RADIUS_KM, Point, C};
use geo::geometry::Coord;

/// Maps points into the planar space a grid is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Converter {
    /// `x` is longitude and `y` is latitude, both in degrees.
    #[default]
    Identity,

    /// Albers equal-area conic projection, in meters.
    Albers(AlbersConic),
}

impl Converter {
    pub fn convert(&self, point: &Point) -> Coord<C> {
        match self {
            Self::Identity => Coord::from(*point),
            Self::Albers(albers) => albers.convert(point),
        }
    }
}

impl From<AlbersConic> for Converter {
    fn from(albers: AlbersConic) -> Self {
        Self::Albers(albers)
    }
}

/// Clarke 1866 first eccentricity.
const ECCENTRICITY: C = 0.082_271_854;

/// Added to both axes so grid coordinates stay non-negative.
const FALSE_OFFSET_M: C = 80.0;

/// Albers equal-area conic projection on the Clarke 1866 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersConic {
    /// Cone constant.
    n: C,
    /// Snyder's `C`.
    c: C,
    /// Radius of the parallel through the origin.
    rho0: C,
    /// Central meridian in radians.
    lon0: C,
}

impl AlbersConic {
    /// Returns the projection with standard parallels `parallel_1` and
    /// `parallel_2` and origin (`origin_lat`, `origin_lon`), all in
    /// degrees.
    pub fn new(parallel_1: C, parallel_2: C, origin_lat: C, origin_lon: C) -> Self {
        let (phi1, phi2) = (parallel_1.to_radians(), parallel_2.to_radians());
        let (m1, m2) = (m_sq(phi1), m_sq(phi2));
        let (q1, q2) = (q(phi1), q(phi2));
        let n = (m1 - m2) / (q2 - q1);
        let c = m1 + n * q1;
        let rho0 = rho(c, n, q(origin_lat.to_radians()));
        Self {
            n,
            c,
            rho0,
            lon0: origin_lon.to_radians(),
        }
    }

    /// The USGS contiguous United States parameters used by NLCD and
    /// NED Albers grids.
    pub fn conus() -> Self {
        Self::new(29.5, 45.5, 23.0, -96.0)
    }

    pub fn convert(&self, point: &Point) -> Coord<C> {
        let rho = rho(self.c, self.n, q(point.lat.to_radians()));
        let theta = self.n * (point.lon.to_radians() - self.lon0);
        Coord {
            x: rho * theta.sin() + FALSE_OFFSET_M,
            y: self.rho0 - rho * theta.cos() + FALSE_OFFSET_M,
        }
    }
}

impl Default for AlbersConic {
    fn default() -> Self {
        Self::conus()
    }
}

/// Authalic latitude function.
fn q(phi: C) -> C {
    let e = ECCENTRICITY;
    let es = e * phi.sin();
    (1.0 - e * e) * (phi.sin() / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

/// Square of Snyder's `m`.
fn m_sq(phi: C) -> C {
    let es = ECCENTRICITY * phi.sin();
    phi.cos().powi(2) / (1.0 - es * es)
}

fn rho(c: C, n: C, q: C) -> C {
    EARTH_RADIUS_KM * 1000.0 * (c - n * q).sqrt() / n
}
