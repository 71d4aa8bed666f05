use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("header is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value '{value}' for header field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("unsupported BIL sample depth of {0} bits")]
    Bits(u32),

    #[error("invalid data file len {actual} for {path:?}, expected {expected}")]
    DataLen {
        expected: u64,
        actual: u64,
        path: PathBuf,
    },

    #[error("sample count {actual} does not match header, expected {expected}")]
    SampleCount { expected: usize, actual: usize },

    #[error("grid file lock was poisoned")]
    Poisoned,
}
