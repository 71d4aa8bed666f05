//! Free space and clutter attenuation.

use terrain::LandUse;

/// Loss applied when a path runs through more vegetation than the
/// canopy model covers.
pub const SATURATED_LOSS_DB: f64 = 16_777_216.0;

/// Canopy depth where the Weissberger model changes regime.
const VEG_SHALLOW_M: f64 = 14.0;

/// Canopy depth beyond which the Weissberger model does not apply.
const VEG_CEILING_M: f64 = 400.0;

/// Land-use loss curves are fitted per this many meters of clutter.
const LAND_USE_SPAN_M: f64 = 200.0;

/// Returns free space path loss (dB) over `distance_km` at `freq_mhz`.
pub fn free_space_loss(distance_km: f64, freq_mhz: f64) -> f64 {
    32.44 + 20.0 * freq_mhz.log10() + 20.0 * distance_km.log10()
}

/// Returns Weissberger's modified exponential decay loss (dB) through
/// `depth_m` meters of foliage.
pub fn vegetation_loss(depth_m: f64, freq_mhz: f64) -> f64 {
    let f = (freq_mhz / 1000.0).powf(0.284);
    if depth_m <= 0.0 {
        0.0
    } else if depth_m < VEG_SHALLOW_M {
        0.45 * f * depth_m
    } else if depth_m < VEG_CEILING_M {
        (1.33 * f * depth_m.powf(0.588)).max(0.45 * f * VEG_SHALLOW_M)
    } else {
        SATURATED_LOSS_DB
    }
}

/// Returns the TIA TR8 curve-fit loss (dB) through `depth_m` meters of
/// `land_use`.
pub fn land_use_loss(land_use: LandUse, depth_m: f64, freq_mhz: f64) -> f64 {
    let ln_f = freq_mhz.ln();
    let per_span = match land_use {
        LandUse::Forest => -9.484 + 2.776 * ln_f,
        LandUse::Residential => -9.735 + 3.196 * ln_f,
        LandUse::Commercial => -10.31 + 3.616 * ln_f,
        LandUse::Other => return 0.0,
    };
    per_span * depth_m / LAND_USE_SPAN_M
}
