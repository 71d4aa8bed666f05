/// Antenna polarization.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarization {
    #[default]
    Horizontal = 0,
    Vertical = 1,
}

/// Radio climate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Climate {
    Equatorial = 1,
    ContinentalSubtropical = 2,
    MaritimeSubtropical = 3,
    Desert = 4,
    #[default]
    ContinentalTemperate = 5,
    MaritimeTemperateOverLand = 6,
    MaritimeTemperateOverSea = 7,
}

/// Inputs to a point-to-point prediction other than the terrain
/// profile.
///
/// Defaults describe average ground under a continental temperate
/// climate, with horizontal polarization at 90% confidence and
/// reliability.
///
/// # Suggested Surface Paramters
///
/// | Ground attribute | Ground Conductivity | Relative ground Permittivity |
/// |------------------|--------------------:|-----------------------------:|
/// | Poor ground      |               0.001 |                            4 |
/// | Average ground   |               0.005 |                           15 |
/// | Good ground      |                0.02 |                           25 |
/// | Fresh water      |                0.01 |                           25 |
/// | Sea water        |                 5.0 |                           25 |
///
/// See [Radio Mobile] for source of this table.
///
/// [Radio Mobile]: http://radiomobile.pe1mew.nl/?Calculations___ITM_model_propagation_settings
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct P2pParams {
    /// Transmitter height above ground (meters).
    pub tx_height_m: f64,

    /// Receiver height above ground (meters).
    pub rx_height_m: f64,

    /// Signal frequency (MHz).
    pub freq_mhz: f64,

    /// Relative ground permittivity.
    pub epsilon: f64,

    /// Ground conductivity (Siemens/meter).
    pub sigma: f64,

    /// Surface refractivity (N-Units, where 301 = 4/3 earth radius).
    pub n0: f64,

    pub climate: Climate,

    pub polarization: Polarization,

    /// Confidence fraction (0.0 < confidence < 1.0).
    pub confidence: f64,

    /// Reliability fraction (0.0 < reliability < 1.0).
    pub reliability: f64,
}

impl Default for P2pParams {
    fn default() -> Self {
        Self {
            tx_height_m: 0.0,
            rx_height_m: 0.0,
            freq_mhz: 900.0,
            epsilon: 15.0,
            sigma: 0.005,
            n0: 301.0,
            climate: Climate::ContinentalTemperate,
            polarization: Polarization::Horizontal,
            confidence: 0.9,
            reliability: 0.9,
        }
    }
}
