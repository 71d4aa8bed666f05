use terrain::{TerrainError, C};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropahError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: C },

    #[error("no elevation data for ({lat},{lon})")]
    Unresolved { lat: C, lon: C },

    #[error("{0}")]
    Terrain(#[from] TerrainError),
}
