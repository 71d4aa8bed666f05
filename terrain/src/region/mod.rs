mod area;
mod line;

pub use self::{area::Area, line::Line};
use crate::{Point, TerrainError, C};

/// A set of locations to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Area(Area),
    Line(Line),
}

impl Region {
    /// Returns sample points spaced roughly `resolution_km` apart.
    pub fn discrete(&self, resolution_km: C) -> Result<Vec<Point>, TerrainError> {
        match self {
            Self::Area(area) => area.discrete(resolution_km),
            Self::Line(line) => line.discrete(resolution_km),
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        match self {
            Self::Area(area) => area.contains(point),
            Self::Line(line) => line.contains(point),
        }
    }

    /// Extends this region with `point`.
    pub fn add(&mut self, point: Point) {
        match self {
            Self::Area(area) => area.add(&point),
            Self::Line(line) => line.add(point),
        }
    }
}

/// Returns how many `step` increments cover `span`.
///
/// Counts a `u32` step index cannot reach are rejected as an invalid
/// `resolution_km`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn step_count(span: C, step: C, resolution_km: C) -> Result<u32, TerrainError> {
    let count = (span / step).ceil().max(0.0);
    if count.is_finite() && count <= C::from(u32::MAX) {
        Ok(count as u32)
    } else {
        Err(TerrainError::InvalidResolution(resolution_km))
    }
}

impl From<Area> for Region {
    fn from(area: Area) -> Self {
        Self::Area(area)
    }
}

impl From<Line> for Region {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}
