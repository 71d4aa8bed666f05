use std::ffi::c_int;

/// Non-zero return codes of a point-to-point prediction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ItmErrCode {
    #[error("some parameters are nearly out of range, results should be used with caution")]
    NearlyOutOfRange,
    #[error("default parameters have been substituted for impossible ones")]
    DefaultsSubstituted,
    #[error("a combination of parameters is out of range, results are probably invalid")]
    CombinationOutOfRange,
    #[error("some parameters are out of range (code {0}), results are probably invalid")]
    OutOfRange(i32),
}

impl ItmErrCode {
    pub fn from_retcode<T>(err_code: c_int, val: T) -> Result<T, ItmErrCode> {
        let err = match err_code {
            0 => return Ok(val),
            1 => ItmErrCode::NearlyOutOfRange,
            2 => ItmErrCode::DefaultsSubstituted,
            3 => ItmErrCode::CombinationOutOfRange,
            other => ItmErrCode::OutOfRange(other),
        };
        Err(err)
    }
}

/// Failures loading a point-to-point model implementation.
#[derive(Debug, thiserror::Error)]
pub enum ItmError {
    #[error("{0}")]
    Library(#[from] libloading::Error),
}
