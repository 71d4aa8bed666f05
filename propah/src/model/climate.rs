use super::{elevation, profile, resolve, PathLossModel};
use crate::{Coverage, Denial, Link, LossDetail, PropahError};
use itm::{p2p, P2pLoss, P2pParams, PointToPoint};
use log::debug;
use terrain::{Point, Source};

/// Longley-Rice Irregular Terrain Model predictions.
///
/// Terminal heights and frequency come from the endpoints and
/// [`Link`], overriding those in `params`.
pub struct Itm<M> {
    model: M,
    params: P2pParams,
}

impl<M: PointToPoint> Itm<M> {
    pub fn new(model: M) -> Self {
        Self::with_params(model, P2pParams::default())
    }

    pub fn with_params(model: M, params: P2pParams) -> Self {
        Self { model, params }
    }

    pub fn params(&self) -> &P2pParams {
        &self.params
    }
}

impl<M: PointToPoint> PathLossModel for Itm<M> {
    fn path_loss<S: Source + ?Sized>(
        &self,
        tx: &Point,
        rx: &Point,
        sources: &S,
        link: &Link,
    ) -> Result<Coverage, PropahError> {
        let (tx, _) = resolve(tx, sources)?;
        let (rx, _) = resolve(rx, sources)?;
        let eirp_dbm = link.eirp_dbm();

        let path = if tx.distance(&rx) == 0.0 {
            Vec::new()
        } else {
            profile(&tx, &rx, sources, link)?
        };
        if path.is_empty() {
            return Ok(Coverage::Received {
                level_dbm: eirp_dbm,
                loss_db: 0.0,
                detail: LossDetail::Itm {
                    mode: String::new(),
                },
            });
        }

        let terrain = path.iter().map(elevation).collect::<Result<Vec<_>, _>>()?;
        let params = P2pParams {
            tx_height_m: tx.tower_height,
            rx_height_m: rx.tower_height,
            freq_mhz: link.freq_mhz(),
            ..self.params
        };

        match p2p(&self.model, &params, link.step_km() * 1000.0, &terrain) {
            Ok(P2pLoss { loss_db, mode }) => Ok(Coverage::Received {
                level_dbm: eirp_dbm - loss_db,
                loss_db,
                detail: LossDetail::Itm { mode },
            }),
            Err(code) => {
                debug!("{tx} -> {rx} rejected: {code}");
                Ok(Coverage::Denied(Denial::Itm(code)))
            }
        }
    }
}
