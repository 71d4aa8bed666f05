use super::{elevation, profile, resolve, PathLossModel};
use crate::{
    fresnel::fresnel,
    knife_edge::{fresnel_kirchhoff, knife_edge_loss},
    loss::{free_space_loss, land_use_loss, vegetation_loss},
    Coverage, Denial, Link, LossDetail, PropahError, TerrainLoss,
};
use log::debug;
use terrain::{LandUse, Point, Source, EARTH_RADIUS_KM};

/// Radio horizon factor, kilometers per root meter of antenna
/// elevation.
const HORIZON_FACTOR: f64 = 3.569;

/// Line of sight model with knife-edge diffraction and clutter
/// attenuation.
///
/// Walks the profile between the endpoints against a straight line of
/// sight, dropped at the receiver for earth curvature. Any terrain
/// above the line denies coverage. Terrain inside the first Fresnel
/// zone costs the loss of its worst knife-edge. Canopy and land use
/// the line runs through are charged per meter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diffraction {
    /// Charge vegetation loss.
    pub vegetation: bool,
    /// Charge land use loss.
    pub land_use: bool,
}

impl Default for Diffraction {
    fn default() -> Self {
        Self {
            vegetation: true,
            land_use: true,
        }
    }
}

/// Drop (meters) of the earth's surface below a tangent plane
/// `distance_m` away.
fn curvature_drop(distance_m: f64) -> f64 {
    let distance_km = distance_m / 1000.0;
    distance_km * distance_km / (2.0 * EARTH_RADIUS_KM) * 1000.0
}

impl PathLossModel for Diffraction {
    fn path_loss<S: Source + ?Sized>(
        &self,
        tx: &Point,
        rx: &Point,
        sources: &S,
        link: &Link,
    ) -> Result<Coverage, PropahError> {
        let (tx, tx_ground) = resolve(tx, sources)?;
        let (rx, rx_ground) = resolve(rx, sources)?;
        let eirp_dbm = link.eirp_dbm();

        let distance_km = tx.distance(&rx);
        if distance_km == 0.0 {
            return Ok(Coverage::Received {
                level_dbm: eirp_dbm,
                loss_db: 0.0,
                detail: LossDetail::Terrain(TerrainLoss::default()),
            });
        }

        let start_elev = tx_ground + tx.tower_height;
        let horizon_km = HORIZON_FACTOR * start_elev.max(0.0).sqrt();
        if distance_km > horizon_km {
            debug!("{rx} is {distance_km:.3} km from {tx}, beyond the {horizon_km:.3} km horizon");
            return Ok(Coverage::Denied(Denial::BeyondHorizon {
                distance_km,
                horizon_km,
            }));
        }

        let distance_m = distance_km * 1000.0;
        let end_elev = rx_ground + rx.tower_height - curvature_drop(distance_m);
        let wavelen = link.wavelength_m();
        let step_m = link.step_km() * 1000.0;

        let path = profile(&tx, &rx, sources, link)?;
        #[allow(clippy::cast_precision_loss)]
        let samples = path.len() as f64;

        let mut loss = TerrainLoss::default();
        for (i, point) in path.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f64 / samples;
            let d1 = fraction * distance_m;
            let d2 = distance_m - d1;
            let ground = elevation(point)? - curvature_drop(d1);
            let sight = start_elev + (end_elev - start_elev) * fraction;

            if sight < ground {
                debug!("{tx} -> {rx} obstructed at {point}");
                return Ok(Coverage::Denied(Denial::Obstructed {
                    distance_km: d1 / 1000.0,
                }));
            }

            if sight - fresnel(1.0, wavelen, d1, distance_m) < ground {
                let v = fresnel_kirchhoff(start_elev, end_elev, ground, d1, d2, wavelen);
                loss.diffraction_db = loss.diffraction_db.max(knife_edge_loss(v));
            }

            if sight < ground + point.veg_height.unwrap_or(0.0) {
                loss.vegetation_depth_m += step_m;
            }

            match point.land_use {
                Some(LandUse::Forest) => loss.forest_depth_m += step_m,
                Some(LandUse::Residential) => loss.residential_depth_m += step_m,
                Some(LandUse::Commercial) => loss.commercial_depth_m += step_m,
                Some(LandUse::Other) | None => (),
            }
        }

        let freq_mhz = link.freq_mhz();
        loss.free_space_db = free_space_loss(distance_km, freq_mhz);
        if self.vegetation {
            loss.vegetation_db = vegetation_loss(loss.vegetation_depth_m, freq_mhz);
        }
        if self.land_use {
            loss.land_use_db = land_use_loss(LandUse::Forest, loss.forest_depth_m, freq_mhz)
                + land_use_loss(LandUse::Residential, loss.residential_depth_m, freq_mhz)
                + land_use_loss(LandUse::Commercial, loss.commercial_depth_m, freq_mhz);
        }

        let loss_db = loss.total_db();
        Ok(Coverage::Received {
            level_dbm: eirp_dbm - loss_db,
            loss_db,
            detail: LossDetail::Terrain(loss),
        })
    }
}
