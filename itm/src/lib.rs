//! The point-to-point mode of the Longley-Rice Irregular Terrain
//! Model, as an external collaborator.
//!
//! The model itself is not part of this crate. [`PointToPoint`]
//! describes its calling contract, [`ItmLibrary`] binds it from a
//! shared library at runtime, and [`p2p`] packs terrain profiles and
//! interprets return codes.

mod dylib;
mod error;
mod params;

pub use crate::{
    dylib::ItmLibrary,
    error::{ItmErrCode, ItmError},
    params::{Climate, P2pParams, Polarization},
};

/// Raw output of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct P2pOutput {
    /// Basic transmission loss (dB).
    pub loss_db: f64,

    /// Description of the propagation mode used.
    pub mode: String,

    /// Return code, 0 on success.
    pub err_code: i32,
}

/// A successful prediction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct P2pLoss {
    /// Basic transmission loss (dB).
    pub loss_db: f64,

    /// Description of the propagation mode used.
    pub mode: String,
}

/// An implementation of the point-to-point prediction.
pub trait PointToPoint: Send + Sync {
    /// Runs a prediction over `pfl`.
    ///
    /// `pfl[0]` holds the number of profile intervals, `pfl[1]` the
    /// distance between samples (meters) and the rest the elevation
    /// samples (meters) from transmitter to receiver.
    fn point_to_point(&self, pfl: &[f64], params: &P2pParams) -> P2pOutput;
}

impl<T: PointToPoint + ?Sized> PointToPoint for std::sync::Arc<T> {
    fn point_to_point(&self, pfl: &[f64], params: &P2pParams) -> P2pOutput {
        (**self).point_to_point(pfl, params)
    }
}

/// Returns the loss along `terrain`.
///
/// # Parameters
///
/// - `model`: prediction implementation
/// - `params`: terminal heights, frequency, ground and climate
/// - `step_size_m`: distance between each elevation sample (meters)
/// - `terrain`: elevation samples spaced `step_size_m` apart from eachother (meters)
pub fn p2p<M, T>(
    model: &M,
    params: &P2pParams,
    step_size_m: f64,
    terrain: &[T],
) -> Result<P2pLoss, ItmErrCode>
where
    M: PointToPoint + ?Sized,
    T: Copy,
    f64: From<T>,
{
    let pfl = {
        let mut pfl: Vec<f64> = Vec::with_capacity(terrain.len() + 2);
        // Two header elements, but the count is of intervals, not
        // samples.
        #[allow(clippy::cast_precision_loss)]
        pfl.push(terrain.len().saturating_sub(1) as f64);
        pfl.push(step_size_m);
        pfl.extend(terrain.iter().map(|elev| f64::from(*elev)));
        pfl
    };

    let P2pOutput {
        loss_db,
        mode,
        err_code,
    } = model.point_to_point(&pfl, params);
    ItmErrCode::from_retcode(err_code, P2pLoss { loss_db, mode })
}

#[cfg(test)]
mod tests {
    use super::{p2p, ItmErrCode, P2pOutput, P2pParams, PointToPoint};
    use std::sync::Mutex;

    /// Records the profile it was given and answers with a canned
    /// return code.
    struct Recorder {
        err_code: i32,
        pfl: Mutex<Vec<f64>>,
    }

    impl Recorder {
        fn new(err_code: i32) -> Self {
            Self {
                err_code,
                pfl: Mutex::new(Vec::new()),
            }
        }
    }

    impl PointToPoint for Recorder {
        fn point_to_point(&self, pfl: &[f64], params: &P2pParams) -> P2pOutput {
            *self.pfl.lock().unwrap() = pfl.to_vec();
            P2pOutput {
                loss_db: 100.0 + params.tx_height_m,
                mode: "Line-Of-Sight Mode".to_string(),
                err_code: self.err_code,
            }
        }
    }

    #[test]
    fn test_profile_packing() {
        let model = Recorder::new(0);
        let terrain: &[u16] = &[1692, 1692, 1693, 1694];
        let params = P2pParams {
            tx_height_m: 15.0,
            ..P2pParams::default()
        };
        let loss = p2p(&model, &params, 25.6, terrain).unwrap();
        assert_eq!(
            *model.pfl.lock().unwrap(),
            vec![3.0, 25.6, 1692.0, 1692.0, 1693.0, 1694.0]
        );
        assert_eq!(loss.loss_db, 115.0);
        assert_eq!(loss.mode, "Line-Of-Sight Mode");
    }

    #[test]
    fn test_return_codes() {
        let terrain: &[f32] = &[1.0, 2.0];
        let params = P2pParams::default();
        let cases = [
            (1, ItmErrCode::NearlyOutOfRange),
            (2, ItmErrCode::DefaultsSubstituted),
            (3, ItmErrCode::CombinationOutOfRange),
            (4, ItmErrCode::OutOfRange(4)),
            (-1, ItmErrCode::OutOfRange(-1)),
        ];
        for (code, expected) in cases {
            assert_eq!(
                p2p(&Recorder::new(code), &params, 10.0, terrain),
                Err(expected)
            );
        }
    }

    #[test]
    fn test_default_params() {
        let params = P2pParams::default();
        assert_eq!(params.epsilon, 15.0);
        assert_eq!(params.sigma, 0.005);
        assert_eq!(params.n0, 301.0);
        assert_eq!(params.climate as i32, 5);
        assert_eq!(params.polarization as i32, 0);
        assert_eq!(params.confidence, 0.9);
        assert_eq!(params.reliability, 0.9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_from_partial_config() {
        let params: P2pParams =
            serde_json::from_str(r#"{"epsilon": 4.0, "sigma": 0.001, "climate": "desert"}"#).unwrap();
        assert_eq!(params.epsilon, 4.0);
        assert_eq!(params.climate, super::Climate::Desert);
        assert_eq!(params.n0, 301.0);
    }
}
