use crate::{constants::EARTH_RADIUS_KM, C};
use geo::geometry::Coord;
use std::{
    f64::consts::TAU,
    fmt::{self, Display},
};

/// Coarse land-use class derived from a land cover code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandUse {
    /// Any cover that does not attenuate beyond free space.
    Other,
    Forest,
    Residential,
    Commercial,
}

impl LandUse {
    /// Maps an NLCD land cover class code to a land-use class.
    pub fn from_nlcd(code: i32) -> Self {
        match code {
            41 | 42 | 43 | 90 | 91 | 93 => Self::Forest,
            22 => Self::Residential,
            23 | 24 => Self::Commercial,
            _ => Self::Other,
        }
    }
}

/// A location on the earth's surface and the ground properties
/// resolved for it.
///
/// Attributes start out as `None` and are filled in by
/// [`Source::resolve`](crate::Source::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Latitude in degrees.
    pub lat: C,

    /// Longitude in degrees.
    pub lon: C,

    /// Ground elevation in meters.
    pub elevation: Option<C>,

    /// Antenna height above ground in meters.
    pub tower_height: C,

    /// Vegetation canopy height in meters.
    pub veg_height: Option<C>,

    /// Raw vegetation type code.
    pub veg_type: Option<i32>,

    /// Vegetation cover in percent.
    pub veg_cover: Option<C>,

    pub land_use: Option<LandUse>,
}

impl Point {
    pub fn new(lat: C, lon: C) -> Self {
        Self {
            lat,
            lon,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tower(mut self, meters: C) -> Self {
        self.tower_height = meters;
        self
    }

    /// Returns ground elevation plus tower height, if elevation is
    /// resolved.
    pub fn antenna_elevation(&self) -> Option<C> {
        self.elevation.map(|elevation| elevation + self.tower_height)
    }

    /// Returns the great circle distance to `other` in kilometers.
    pub fn distance(&self, other: &Self) -> C {
        if self.lat == other.lat && self.lon == other.lon {
            return 0.0;
        }
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());
        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos();
        cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
    }

    /// Returns the initial bearing toward `other` in radians, clockwise
    /// from north, within `[0, 2π)`.
    pub fn bearing(&self, other: &Self) -> C {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());
        let dlon = lon2 - lon1;
        let bearing = (dlon.sin() * lat2.cos())
            .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos())
            .rem_euclid(TAU);
        if bearing < TAU {
            bearing
        } else {
            0.0
        }
    }

    /// Returns the point `distance_km` along the great circle leaving
    /// this point at `bearing` radians.
    ///
    /// Only the location is carried over to the new point.
    pub fn project(&self, bearing: C, distance_km: C) -> Self {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let ratio = distance_km / EARTH_RADIUS_KM;
        let lat2 = (lat1.sin() * ratio.cos() + lat1.cos() * ratio.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * ratio.sin() * lat1.cos()).atan2(ratio.cos() - lat1.sin() * lat2.sin());
        Self::new(lat2.to_degrees(), normalize_lon(lon2.to_degrees()))
    }

    /// Returns true if latitude and longitude are within their valid
    /// ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

fn normalize_lon(lon: C) -> C {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.8},{:.8})", self.lat, self.lon)
    }
}

impl From<Point> for Coord<C> {
    fn from(point: Point) -> Self {
        Coord {
            x: point.lon,
            y: point.lat,
        }
    }
}

impl From<Coord<C>> for Point {
    fn from(Coord { x, y }: Coord<C>) -> Self {
        Self::new(y, x)
    }
}
