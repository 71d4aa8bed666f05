use crate::C;
use rastergrid::RasterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Raster(#[from] RasterError),

    #[error("invalid discretization resolution {0} km")]
    InvalidResolution(C),

    #[error("a line needs at least two points to discretize, got {0}")]
    DegenerateLine(usize),
}
