//! What a grid's cell values mean.

use crate::{LandUse, Point, C};

/// The ground property a grid provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Ground elevation in meters.
    Elevation,

    /// Vegetation type codes, also giving canopy cover.
    VegetationType,

    /// Vegetation height class codes.
    VegetationHeight,

    /// NLCD land cover classes.
    LandUse,
}

impl Layer {
    /// Writes `value` into the attribute of `point` this layer
    /// describes.
    ///
    /// Codes missing from a layer's table leave the derived attribute
    /// untouched.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(self, value: C, point: &mut Point) {
        let code = value as i32;
        match self {
            Self::Elevation => point.elevation = Some(value),
            Self::VegetationType => {
                point.veg_type = Some(code);
                if let Some(cover) = veg_cover(code) {
                    point.veg_cover = Some(cover);
                }
            }
            Self::VegetationHeight => {
                if let Some(height) = veg_height(code) {
                    point.veg_height = Some(height);
                }
            }
            Self::LandUse => point.land_use = Some(LandUse::from_nlcd(code)),
        }
    }
}

/// Returns the midpoint of the canopy cover band, in percent, for a
/// vegetation type code.
///
/// Tree (10x), shrub (11x) and herb (12x) codes share the same nine
/// ten-percent bands starting at 10-20 %.
pub fn veg_cover(code: i32) -> Option<C> {
    match code {
        101..=109 | 111..=119 | 121..=129 => Some(C::from(code % 10) * 10.0 + 5.0),
        _ => None,
    }
}

/// Returns the midpoint of the height band, in meters, for a
/// vegetation height code.
pub fn veg_height(code: i32) -> Option<C> {
    let height = match code {
        101 | 104 => 0.25,
        102 | 105 => 0.5,
        103 => 1.0,
        106 => 1.5,
        107 => 3.0,
        108 => 2.5,
        109 => 5.0,
        110 => 12.5,
        111 => 25.0,
        112 => 50.0,
        _ => return None,
    };
    Some(height)
}
