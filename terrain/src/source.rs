use crate::{Converter, Layer, Point, TerrainError};
use rastergrid::{Grid, Sample};
use std::sync::Arc;

/// Something that knows ground properties for part of the world.
pub trait Source: Send + Sync {
    /// Returns true if `point` lies inside this source's coverage.
    fn contains(&self, point: &Point) -> bool;

    /// Fills in the attributes of `point` this source provides.
    ///
    /// Points outside this source's coverage are left untouched.
    fn resolve(&self, point: &mut Point) -> Result<(), TerrainError>;

    fn resolve_all(&self, points: &mut [Point]) -> Result<(), TerrainError> {
        points.iter_mut().try_for_each(|point| self.resolve(point))
    }
}

impl<T: Source + ?Sized> Source for Arc<T> {
    fn contains(&self, point: &Point) -> bool {
        (**self).contains(point)
    }

    fn resolve(&self, point: &mut Point) -> Result<(), TerrainError> {
        (**self).resolve(point)
    }
}

/// A raster grid holding one [`Layer`].
pub struct GridSource<S> {
    grid: Grid<S>,
    layer: Layer,
    converter: Arc<Converter>,
}

impl<S: Sample> GridSource<S> {
    /// Returns a source reading `layer` values from `grid`, which is
    /// indexed by points converted with `converter`.
    pub fn new(grid: Grid<S>, layer: Layer, converter: Arc<Converter>) -> Self {
        Self {
            grid,
            layer,
            converter,
        }
    }

    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

impl<S: Sample> Source for GridSource<S> {
    fn contains(&self, point: &Point) -> bool {
        self.grid.contains(self.converter.convert(point))
    }

    fn resolve(&self, point: &mut Point) -> Result<(), TerrainError> {
        let coord = self.converter.convert(point);
        if !self.grid.contains(coord) {
            return Ok(());
        }
        if let Some(value) = self.grid.get(coord)? {
            self.layer.apply(value, point);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GridSource, Source};
    use crate::{AlbersConic, Converter, LandUse, Layer, Point};
    use rastergrid::{Grid, Header};
    use std::sync::Arc;

    /// 2x2 degrees over 44..46 N, 112..110 W, one degree cells.
    fn elevation() -> GridSource<f32> {
        let header = Header::new(2, 2, -112.0, 44.0, 1.0).with_nodata(-9999.0);
        let grid = Grid::from_samples(header, vec![1000.0, 1100.0, 1200.0, -9999.0]).unwrap();
        GridSource::new(grid, Layer::Elevation, Arc::new(Converter::Identity))
    }

    #[test]
    fn test_resolve() {
        let source = elevation();
        let mut nw = Point::new(45.5, -111.5);
        let mut ne = Point::new(45.5, -110.5);
        let mut sw = Point::new(44.5, -111.5);
        source.resolve(&mut nw).unwrap();
        source.resolve(&mut ne).unwrap();
        source.resolve(&mut sw).unwrap();
        assert_eq!(nw.elevation, Some(1000.0));
        assert_eq!(ne.elevation, Some(1100.0));
        assert_eq!(sw.elevation, Some(1200.0));
    }

    #[test]
    fn test_nodata_and_outside_left_untouched() {
        let source = elevation();
        let mut se = Point::new(44.5, -110.5);
        source.resolve(&mut se).unwrap();
        assert_eq!(se.elevation, None);

        let mut outside = Point::new(47.0, -111.5);
        outside.elevation = Some(7.0);
        assert!(!source.contains(&outside));
        source.resolve(&mut outside).unwrap();
        assert_eq!(outside.elevation, Some(7.0));
    }

    #[test]
    fn test_resolve_all() {
        let source = elevation();
        let mut points = vec![Point::new(45.5, -111.5), Point::new(44.5, -111.5)];
        source.resolve_all(&mut points).unwrap();
        assert_eq!(points[0].elevation, Some(1000.0));
        assert_eq!(points[1].elevation, Some(1200.0));
    }

    #[test]
    fn test_cell_boundary_is_deterministic() {
        let header = Header::new(2, 2, -112.0, 44.0, 1.0);
        let grid = Grid::from_samples(header, vec![41_u8, 22, 23, 11]).unwrap();
        let source = GridSource::new(grid, Layer::LandUse, Arc::new(Converter::Identity));

        // The shared corner of all four cells resolves to the
        // north-east cell.
        let mut point = Point::new(45.0, -111.0);
        source.resolve(&mut point).unwrap();
        assert_eq!(point.land_use, Some(LandUse::Residential));
        assert_eq!(source.layer(), Layer::LandUse);
    }

    #[test]
    fn test_albers_indexed_grid() {
        let albers = AlbersConic::conus();
        let center = albers.convert(&Point::new(45.5, -111.25));
        let header = Header::new(3, 3, center.x - 45.0, center.y - 45.0, 30.0);
        let mut codes = vec![11_u8; 9];
        codes[4] = 41;
        let grid = Grid::from_samples(header, codes).unwrap();
        let source = GridSource::new(grid, Layer::LandUse, Arc::new(Converter::from(albers)));

        let mut point = Point::new(45.5, -111.25);
        assert!(source.contains(&point));
        source.resolve(&mut point).unwrap();
        assert_eq!(point.land_use, Some(LandUse::Forest));

        // A tenth of a degree away is well outside 90 m of coverage.
        assert!(!source.contains(&Point::new(45.6, -111.25)));
    }
}
