//! Error types for the TEMPer sensor interface

use thiserror::Error;

/// Error type for TEMPer operations
#[derive(Error, Debug)]
pub enum TemperError {
    /// No TEMPer family device present at enumeration time
    #[error("No TEMPer sensor found")]
    SensorNotFound,

    /// Underlying HID transport error
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// `start` called while a polling worker is already active
    #[error("An acquisition is already running")]
    AcquisitionActive,

    /// Sensor model with no known decode formula (strict mode only)
    #[error("Unrecognized sensor model: {0}")]
    UnknownModel(String),

    /// Plot requested before any sample was acquired
    #[error("No samples have been acquired yet")]
    EmptyData,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart rendering error
    #[error("Plot rendering error: {0}")]
    Plot(String),
}

/// Result type for TEMPer operations
pub type Result<T> = std::result::Result<T, TemperError>;
