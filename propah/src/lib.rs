//! # Radio Frequency Propogation
//!
//! `propah` predicts the signal level a receiver hears from a
//! transmitter over real terrain.
//!
//! A [`PathLossModel`] walks the ground profile between the two
//! endpoints, resolved against any [`terrain::Source`], and returns a
//! [`Coverage`]. [`Diffraction`] is a line of sight model with
//! knife-edge diffraction, vegetation and land use loss. [`Itm`] hands
//! the profile to the Longley-Rice Irregular Terrain Model.
//! [`sweep`] runs either across many receivers in parallel.

mod coverage;
mod error;
pub mod fresnel;
pub mod knife_edge;
mod link;
pub mod loss;
mod model;
mod sweep;

pub use {
    crate::{
        coverage::{Coverage, Denial, LossDetail, TerrainLoss},
        error::PropahError,
        link::{Link, LinkBuilder},
        model::{Diffraction, Itm, PathLossModel},
        sweep::{sweep, targets},
    },
    itm, terrain,
};
