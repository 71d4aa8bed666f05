//! Geodesic points and regions, and the ground data sources that
//! describe them.

mod constants;
mod convert;
mod error;
mod group;
mod layer;
mod point;
mod region;
mod source;

pub use crate::{
    constants::EARTH_RADIUS_KM,
    convert::{AlbersConic, Converter},
    error::TerrainError,
    group::SourceGroup,
    layer::{veg_cover, veg_height, Layer},
    point::{LandUse, Point},
    region::{Area, Line, Region},
    source::{GridSource, Source},
};
pub use rastergrid::{ByteGrid, FloatGrid, Grid, GridMode, Header, C};
