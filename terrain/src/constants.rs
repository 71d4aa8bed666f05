use crate::C;

/// Equatorial radius of the Clarke 1866 ellipsoid in kilometers.
///
/// Used both as the sphere radius for great-circle math and as the
/// semi-major axis of the Albers projection.
pub const EARTH_RADIUS_KM: C = 6_378.206_4;
