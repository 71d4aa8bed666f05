use crate::{fresnel::freq_to_wavelen, PropahError};

/// Radio and sampling parameters shared by every path in a prediction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    step_km: f64,
    tx_power_mw: f64,
    antenna_gain_db: f64,
    freq_mhz: f64,
}

impl Link {
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    /// Distance between path samples in kilometers.
    pub fn step_km(&self) -> f64 {
        self.step_km
    }

    pub fn tx_power_mw(&self) -> f64 {
        self.tx_power_mw
    }

    pub fn antenna_gain_db(&self) -> f64 {
        self.antenna_gain_db
    }

    pub fn freq_mhz(&self) -> f64 {
        self.freq_mhz
    }

    pub fn tx_power_dbm(&self) -> f64 {
        10.0 * self.tx_power_mw.log10()
    }

    /// Transmit power plus antenna gain (dBm).
    pub fn eirp_dbm(&self) -> f64 {
        self.tx_power_dbm() + self.antenna_gain_db
    }

    pub fn wavelength_m(&self) -> f64 {
        freq_to_wavelen(self.freq_mhz * 1e6)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    step_km: Option<f64>,
    tx_power_mw: Option<f64>,
    antenna_gain_db: f64,
    freq_mhz: Option<f64>,
}

impl LinkBuilder {
    /// Distance between path samples in kilometers.
    #[must_use]
    pub fn step_km(self, step_km: f64) -> Self {
        Self {
            step_km: Some(step_km),
            ..self
        }
    }

    #[must_use]
    pub fn tx_power_mw(self, tx_power_mw: f64) -> Self {
        Self {
            tx_power_mw: Some(tx_power_mw),
            ..self
        }
    }

    /// Antenna gain in dB, zero if never set.
    #[must_use]
    pub fn antenna_gain_db(self, antenna_gain_db: f64) -> Self {
        Self {
            antenna_gain_db,
            ..self
        }
    }

    #[must_use]
    pub fn freq_mhz(self, freq_mhz: f64) -> Self {
        Self {
            freq_mhz: Some(freq_mhz),
            ..self
        }
    }

    pub fn build(self) -> Result<Link, PropahError> {
        let step_km = positive("step_km", self.step_km.ok_or(PropahError::Builder("step_km"))?)?;
        let tx_power_mw = positive(
            "tx_power_mw",
            self.tx_power_mw.ok_or(PropahError::Builder("tx_power_mw"))?,
        )?;
        let freq_mhz = positive("freq_mhz", self.freq_mhz.ok_or(PropahError::Builder("freq_mhz"))?)?;
        if !self.antenna_gain_db.is_finite() {
            return Err(PropahError::InvalidParameter {
                name: "antenna_gain_db",
                value: self.antenna_gain_db,
            });
        }
        Ok(Link {
            step_km,
            tx_power_mw,
            antenna_gain_db: self.antenna_gain_db,
            freq_mhz,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, PropahError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PropahError::InvalidParameter { name, value })
    }
}
