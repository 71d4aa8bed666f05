use super::step_count;
use crate::{Point, TerrainError, C};
use geo::geometry::LineString;
use log::{debug, warn};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Upper bound on the points reserved ahead of discretizing.
const MAX_PREALLOC: u32 = 1 << 16;

/// An ordered polyline of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    points: Vec<Point>,
}

impl Line {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the single-segment line from `start` to `end`.
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    pub fn add(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the length of this line in kilometers.
    pub fn length(&self) -> C {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Returns points spaced `resolution_km` apart along this line,
    /// starting at the first vertex.
    ///
    /// The last emitted point lies less than `resolution_km` before
    /// the final vertex. The final vertex itself is only emitted for
    /// lines shorter than one step.
    pub fn discrete(&self, resolution_km: C) -> Result<Vec<Point>, TerrainError> {
        if !(resolution_km.is_finite() && resolution_km > 0.0) {
            return Err(TerrainError::InvalidResolution(resolution_km));
        }
        if self.points.len() < 2 {
            return Err(TerrainError::DegenerateLine(self.points.len()));
        }

        let length = self.length();
        let mut segments = self
            .points
            .windows(2)
            .map(|pair| Segment::new(&pair[0], &pair[1]));
        let Some(mut segment) = segments.next() else {
            return Err(TerrainError::DegenerateLine(self.points.len()));
        };

        let count = step_count(length, resolution_km, resolution_km)?;
        let mut discrete = Vec::with_capacity(count.min(MAX_PREALLOC) as usize);
        // Distance along the line at which the current segment starts.
        let mut segment_offset = 0.0;
        for step in 0..=count {
            let here = C::from(step) * resolution_km;
            if here >= length {
                break;
            }
            while here - segment_offset >= segment.length {
                match segments.next() {
                    Some(next) => {
                        segment_offset += segment.length;
                        segment = next;
                    }
                    // Rounding left us just past the final vertex.
                    None => break,
                }
            }
            discrete.push(
                segment
                    .start
                    .project(segment.bearing, here - segment_offset),
            );
        }
        Ok(discrete)
    }

    /// Returns false, lines have no interior.
    pub fn contains(&self, _point: &Point) -> bool {
        false
    }
}

struct Segment {
    start: Point,
    bearing: C,
    length: C,
}

impl Segment {
    fn new(start: &Point, end: &Point) -> Self {
        Self {
            start: *start,
            bearing: start.bearing(end),
            length: start.distance(end),
        }
    }
}

/// Route files.
impl Line {
    /// Parses a route, one whitespace separated `lat lon` pair per line.
    ///
    /// Blank lines, lines without two numbers, out of range
    /// coordinates, and the `-1 -1` terminator are skipped.
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<Self, TerrainError> {
        let mut line = Self::default();
        for (lineno, text) in rdr.lines().enumerate() {
            let text = text?;
            let mut fields = text.split_whitespace();
            let point = match (fields.next(), fields.next(), fields.next()) {
                (None, ..) => continue,
                (Some(lat), Some(lon), None) => match (lat.parse(), lon.parse()) {
                    (Ok(lat), Ok(lon)) => Point::new(lat, lon),
                    _ => {
                        warn!("skipping malformed route line {}: {text:?}", lineno + 1);
                        continue;
                    }
                },
                _ => {
                    warn!("skipping malformed route line {}: {text:?}", lineno + 1);
                    continue;
                }
            };
            if point.lat == -1.0 && point.lon == -1.0 {
                continue;
            }
            if !point.is_valid() {
                warn!("skipping out of range route point {point} on line {}", lineno + 1);
                continue;
            }
            line.add(point);
        }
        debug!("parsed route with {} points", line.points.len());
        Ok(line)
    }

    /// Reads the route file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

impl From<Vec<Point>> for Line {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<LineString<C>> for Line {
    fn from(line_string: LineString<C>) -> Self {
        Self::new(line_string.0.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Line;
    use crate::{Point, TerrainError};
    use approx::assert_relative_eq;
    use geo::line_string;

    fn route() -> Line {
        Line::new(vec![
            Point::new(45.52392, -111.24769),
            Point::new(45.49678, -111.27114),
            Point::new(45.49678, -111.20000),
            Point::new(45.55000, -111.20000),
        ])
    }

    #[test]
    fn test_length() {
        let line = route();
        let points = line.points();
        let expected = points[0].distance(&points[1])
            + points[1].distance(&points[2])
            + points[2].distance(&points[3]);
        assert_relative_eq!(line.length(), expected);
        assert_eq!(Line::new(vec![points[0]]).length(), 0.0);
    }

    #[test]
    fn test_discrete_count() {
        let line = route();
        for resolution in [0.01, 0.25, 1.0, 3.0] {
            let points = line.discrete(resolution).unwrap();
            let covered = points.len() as f64 * resolution;
            assert!(covered >= line.length());
            assert!(covered - line.length() < resolution);
        }
    }

    #[test]
    fn test_discrete_follows_segments() {
        let line = route();
        let points = line.discrete(0.05).unwrap();
        assert_relative_eq!(points[0].lat, line.points()[0].lat, epsilon = 1e-9);
        assert_relative_eq!(points[0].lon, line.points()[0].lon, epsilon = 1e-9);
        // Consecutive samples stay one step apart, corners cut at most
        // that much.
        for pair in points.windows(2) {
            assert!(pair[0].distance(&pair[1]) <= 0.05 + 1e-6);
        }
        let last = points.last().unwrap();
        assert!(last.distance(&line.points()[3]) < 0.05 + 1e-6);
    }

    #[test]
    fn test_discrete_skips_zero_length_segments() {
        let a = Point::new(45.0, -111.0);
        let b = Point::new(45.1, -111.0);
        let line = Line::new(vec![a, a, b, b]);
        let points = line.discrete(0.5).unwrap();
        assert_eq!(points.len(), (line.length() / 0.5).ceil() as usize);
        assert!(points.iter().all(|p| (p.lon + 111.0).abs() < 1e-9));
    }

    #[test]
    fn test_discrete_rejects_degenerate_lines() {
        let one = Line::new(vec![Point::new(45.0, -111.0)]);
        assert!(matches!(
            one.discrete(0.1),
            Err(TerrainError::DegenerateLine(1))
        ));
        assert!(matches!(
            route().discrete(-1.0),
            Err(TerrainError::InvalidResolution(_))
        ));
    }

    #[test]
    fn test_discrete_rejects_unreachable_counts() {
        for resolution in [1e-12, 1e-300] {
            assert!(matches!(
                route().discrete(resolution),
                Err(TerrainError::InvalidResolution(_))
            ));
        }
    }

    #[test]
    fn test_never_contains() {
        let line = route();
        assert!(!line.contains(&line.points()[0]));
    }

    #[test]
    fn test_from_reader() {
        let text = "45.52392\t-111.24769\n\
                    \n\
                    not a point\n\
                    45.49678 -111.27114\n\
                    91.0 0.0\n\
                    45.1 -111.2 7\n\
                    -1 -1\n";
        let line = Line::from_reader(text.as_bytes()).unwrap();
        assert_eq!(
            line.points(),
            &[
                Point::new(45.52392, -111.24769),
                Point::new(45.49678, -111.27114)
            ]
        );
    }

    #[test]
    fn test_from_line_string() {
        let line = Line::from(line_string![(x: -111.0, y: 45.0), (x: -110.0, y: 46.0)]);
        assert_eq!(
            line.points(),
            &[Point::new(45.0, -111.0), Point::new(46.0, -110.0)]
        );
    }
}
