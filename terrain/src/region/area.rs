use super::step_count;
use crate::{Point, TerrainError, C};
use geo::geometry::{Coord, Rect};
use log::debug;
use std::fmt::{self, Display};

/// A latitude/longitude aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    bottom_left: Point,
    top_right: Point,
}

impl Area {
    /// Returns an area with no extent.
    ///
    /// Adding a point to an empty area collapses it onto that point.
    pub fn empty() -> Self {
        Self {
            bottom_left: Point::new(C::INFINITY, C::INFINITY),
            top_right: Point::new(C::NEG_INFINITY, C::NEG_INFINITY),
        }
    }

    /// Returns the smallest area containing both corners.
    pub fn new(corner_a: &Point, corner_b: &Point) -> Self {
        let mut area = Self::empty();
        area.add(corner_a);
        area.add(corner_b);
        area
    }

    /// Returns the area whose corners lie `radius_km` from `center`
    /// toward the northeast and southwest.
    pub fn around(center: &Point, radius_km: C) -> Self {
        let top_right = center.project(45_f64.to_radians(), radius_km);
        let bottom_left = center.project(225_f64.to_radians(), radius_km);
        Self::new(&bottom_left, &top_right)
    }

    pub fn is_empty(&self) -> bool {
        self.bottom_left.lat > self.top_right.lat || self.bottom_left.lon > self.top_right.lon
    }

    pub fn bottom_left(&self) -> &Point {
        &self.bottom_left
    }

    pub fn top_right(&self) -> &Point {
        &self.top_right
    }

    /// Grows this area just enough to include `point`.
    pub fn add(&mut self, point: &Point) {
        self.bottom_left.lat = self.bottom_left.lat.min(point.lat);
        self.bottom_left.lon = self.bottom_left.lon.min(point.lon);
        self.top_right.lat = self.top_right.lat.max(point.lat);
        self.top_right.lon = self.top_right.lon.max(point.lon);
    }

    /// Returns true if `point` lies inside or on the edge of this area.
    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.bottom_left.lat
            && point.lat <= self.top_right.lat
            && point.lon >= self.bottom_left.lon
            && point.lon <= self.top_right.lon
    }

    pub fn bounding_rect(&self) -> Option<Rect<C>> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::new(
                Coord::from(self.bottom_left),
                Coord::from(self.top_right),
            ))
        }
    }

    /// Returns a row-major grid of points spaced roughly
    /// `resolution_km` apart, starting at the bottom-left corner.
    ///
    /// The spacing in degrees is measured once, northward from the
    /// bottom-left corner, and used for both axes. Points on the top
    /// and right edges are not emitted.
    pub fn discrete(&self, resolution_km: C) -> Result<Vec<Point>, TerrainError> {
        if !(resolution_km.is_finite() && resolution_km > 0.0) {
            return Err(TerrainError::InvalidResolution(resolution_km));
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let step = self.bottom_left.project(0.0, resolution_km).lat - self.bottom_left.lat;
        if step.is_nan() || step <= 0.0 {
            return Err(TerrainError::InvalidResolution(resolution_km));
        }

        let now = std::time::Instant::now();
        let (bl, tr) = (self.bottom_left, self.top_right);
        let rows = step_count(tr.lat - bl.lat, step, resolution_km)?;
        let cols = step_count(tr.lon - bl.lon, step, resolution_km)?;
        if u64::from(rows) * u64::from(cols) > u64::from(u32::MAX) {
            return Err(TerrainError::InvalidResolution(resolution_km));
        }
        let lats = steps(bl.lat, tr.lat, step, rows);
        let lons = steps(bl.lon, tr.lon, step, cols);
        let points: Vec<Point> = lats
            .flat_map(|lat| lons.clone().map(move |lon| Point::new(lat, lon)))
            .collect();
        debug!(
            "discretized {self} at {step:.6}°, points: {}, runtime: {:?}",
            points.len(),
            now.elapsed()
        );
        Ok(points)
    }
}

/// Yields `start + i * step` while below `end`, for at most
/// `count + 1` values of `i`.
fn steps(start: C, end: C, step: C, count: u32) -> impl Iterator<Item = C> + Clone {
    (0..=count)
        .map(move |i| start + C::from(i) * step)
        .take_while(move |value| *value < end)
}

impl Default for Area {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.bottom_left, self.top_right)
    }
}

#[cfg(test)]
mod tests {
    use super::Area;
    use crate::{Point, TerrainError};
    use approx::assert_relative_eq;

    #[test]
    fn test_add_grows_minimally() {
        let mut area = Area::empty();
        assert!(area.is_empty());
        assert!(!area.contains(&Point::new(0.0, 0.0)));
        assert!(area.bounding_rect().is_none());

        area.add(&Point::new(45.0, -111.0));
        assert!(!area.is_empty());
        assert!(area.contains(&Point::new(45.0, -111.0)));

        area.add(&Point::new(44.0, -110.0));
        assert_eq!(area.bottom_left(), &Point::new(44.0, -111.0));
        assert_eq!(area.top_right(), &Point::new(45.0, -110.0));
        assert!(area.contains(&Point::new(44.5, -110.5)));
        assert!(!area.contains(&Point::new(45.1, -110.5)));
    }

    #[test]
    fn test_new_orders_corners() {
        let area = Area::new(&Point::new(45.0, -110.0), &Point::new(44.0, -111.0));
        assert_eq!(area.bottom_left(), &Point::new(44.0, -111.0));
        assert_eq!(area.top_right(), &Point::new(45.0, -110.0));
        assert_eq!(
            area.to_string(),
            "[(44.00000000,-111.00000000),(45.00000000,-110.00000000)]"
        );
    }

    #[test]
    fn test_around() {
        let center = Point::new(45.5, -111.25);
        let area = Area::around(&center, 10.0);
        assert!(area.contains(&center));
        assert_relative_eq!(area.top_right().distance(&center), 10.0, epsilon = 1e-6);
        assert_relative_eq!(area.bottom_left().distance(&center), 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_discrete() {
        let area = Area::around(&Point::new(45.5, -111.25), 2.0);
        let points = area.discrete(0.1).unwrap();
        assert!(points.iter().all(|p| area.contains(p)));
        assert_eq!(points[0], *area.bottom_left());

        let step = area.bottom_left().project(0.0, 0.1).lat - area.bottom_left().lat;
        let rows = (area.top_right().lat - area.bottom_left().lat) / step;
        let cols = (area.top_right().lon - area.bottom_left().lon) / step;
        let expected = rows.ceil() * cols.ceil();
        assert_relative_eq!(points.len() as f64, expected);
    }

    #[test]
    fn test_discrete_rejects_bad_resolution() {
        let area = Area::around(&Point::new(45.5, -111.25), 2.0);
        assert!(matches!(
            area.discrete(0.0),
            Err(TerrainError::InvalidResolution(_))
        ));
        assert!(matches!(
            area.discrete(f64::NAN),
            Err(TerrainError::InvalidResolution(_))
        ));
        assert!(Area::empty().discrete(0.1).unwrap().is_empty());
    }

    #[test]
    fn test_discrete_rejects_unreachable_counts() {
        let area = Area::around(&Point::new(45.5, -111.25), 2.0);
        for resolution in [1e-7, 1e-300] {
            assert!(matches!(
                area.discrete(resolution),
                Err(TerrainError::InvalidResolution(_))
            ));
        }
    }
}
