//! Prediction outcomes.

use itm::ItmErrCode;

/// The outcome of predicting one transmitter to receiver path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Coverage {
    /// The receiver hears the transmitter.
    Received {
        /// Received signal level (dBm).
        level_dbm: f64,
        /// Total path loss (dB).
        loss_db: f64,
        detail: LossDetail,
    },

    /// No usable signal reaches the receiver.
    Denied(Denial),
}

impl Coverage {
    /// Returns the received signal level (dBm), or `None` if denied.
    pub fn level_dbm(&self) -> Option<f64> {
        match self {
            Self::Received { level_dbm, .. } => Some(*level_dbm),
            Self::Denied(_) => None,
        }
    }

    pub fn loss_db(&self) -> Option<f64> {
        match self {
            Self::Received { loss_db, .. } => Some(*loss_db),
            Self::Denied(_) => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

/// Why a path gets no coverage.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denial {
    /// The receiver lies beyond the transmitter's radio horizon.
    BeyondHorizon { distance_km: f64, horizon_km: f64 },

    /// Terrain rises above the line of sight `distance_km` from the
    /// transmitter.
    Obstructed { distance_km: f64 },

    /// The Longley-Rice model rejected the path.
    Itm(ItmErrCode),
}

/// Loss components of a received path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum LossDetail {
    Terrain(TerrainLoss),
    Itm {
        /// Propagation mode reported by the model.
        mode: String,
    },
}

/// Breakdown of a terrain diffraction prediction, losses in dB.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerrainLoss {
    pub free_space_db: f64,
    /// Worst single knife-edge.
    pub diffraction_db: f64,
    pub vegetation_db: f64,
    pub land_use_db: f64,
    /// Meters of path running through canopy.
    pub vegetation_depth_m: f64,
    pub forest_depth_m: f64,
    pub residential_depth_m: f64,
    pub commercial_depth_m: f64,
}

impl TerrainLoss {
    pub fn total_db(&self) -> f64 {
        self.free_space_db + self.diffraction_db + self.vegetation_db + self.land_use_db
    }
}
