//! TEMPer USB thermometer acquisition library
//!
//! This library reads the TEMPer family of USB HID temperature sensors and
//! records timestamped readings across repeated start/stop acquisition runs,
//! for logging to CSV and rendering as an annotated PNG chart.
//!
//! # Quick Start
//!
//! ## Single Reading
//! ```no_run
//! use temper_logger::{find_sensor, read_temperature, DecodePolicy};
//!
//! let api = hidapi::HidApi::new()?;
//! let sensor = find_sensor(&api)?;
//! let sample = read_temperature(&api, &sensor, DecodePolicy::Lenient)?;
//!
//! println!("{}: {:.2} °C", sample.time.format("%H:%M:%S"), sample.temperature);
//! # Ok::<(), temper_logger::TemperError>(())
//! ```
//!
//! ## Periodic Acquisition
//! ```no_run
//! use temper_logger::{csv_format, Acquisition, DecodePolicy};
//! use std::time::Duration;
//!
//! let mut engine = Acquisition::new();
//!
//! // Poll at 1 Hz on a background thread
//! engine.start(1.0, DecodePolicy::Lenient)?;
//! std::thread::sleep(Duration::from_secs(10));
//! engine.stop();
//!
//! let data = engine.snapshot();
//! println!("collected {} samples over {} run(s)", data.len(), data.runs().len());
//! csv_format::write_log("temperature_log.csv", data.samples())?;
//! # Ok::<(), temper_logger::TemperError>(())
//! ```
//!
//! ## Multiple Runs in One Session
//! ```no_run
//! use temper_logger::{plot, Acquisition, DecodePolicy};
//! use std::time::Duration;
//!
//! let mut engine = Acquisition::new();
//!
//! // Samples accumulate across runs; each stop closes one run boundary,
//! // which the plot marks with a vertical line.
//! for _ in 0..3 {
//!     engine.start(1.0, DecodePolicy::Lenient)?;
//!     std::thread::sleep(Duration::from_secs(5));
//!     engine.stop();
//! }
//!
//! plot::render_plot("temperature_log.png", &engine.snapshot())?;
//! # Ok::<(), temper_logger::TemperError>(())
//! ```

pub mod acquisition;
pub mod csv_format;
pub mod error;
pub mod plot;
pub mod session;
pub mod store;
pub mod temper;

// Re-export public API
pub use acquisition::{Acquisition, AcquisitionState};
pub use error::{Result, TemperError};
pub use session::Session;
pub use store::{RunBoundary, Sample, SampleStore};
pub use temper::{
    decode_temperature, find_sensor, read_temperature, DecodePolicy, DeviceDescriptor,
};
