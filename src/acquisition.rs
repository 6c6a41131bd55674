//! Acquisition engine: start/stop state machine around a polling thread
//!
//! One engine instance owns the sample store and at most one background
//! polling worker. `start` spawns the worker, `stop` signals it through an
//! atomic flag and joins it, so no sample can land after `stop` returns.

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use hidapi::HidApi;
use log::{error, info};

use crate::error::{Result, TemperError};
use crate::store::{Sample, SampleStore};
use crate::temper::{find_sensor, read_temperature, DecodePolicy};

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Idle,
    Running,
}

/// Temperature acquisition engine
///
/// The store mutex is held only to append a sample or take a snapshot,
/// never across the per-period sleep or the device wait.
pub struct Acquisition {
    store: Arc<Mutex<SampleStore>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Acquisition {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(SampleStore::new())),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn state(&self) -> AcquisitionState {
        if self.worker.is_some() {
            AcquisitionState::Running
        } else {
            AcquisitionState::Idle
        }
    }

    /// Start acquiring from the first connected TEMPer sensor
    ///
    /// Re-enumerates the HID device list on every call, since the sensor may
    /// have been replugged since the last run.
    ///
    /// # Returns
    /// * `Err(TemperError::SensorNotFound)` - No sensor connected; the engine
    ///   stays idle and the caller may retry after reconnecting hardware
    /// * `Err(TemperError::AcquisitionActive)` - A run is already in progress
    pub fn start(&mut self, frequency_hz: f64, policy: DecodePolicy) -> Result<()> {
        if self.worker.is_some() {
            return Err(TemperError::AcquisitionActive);
        }

        let api = HidApi::new()?;
        let descriptor = find_sensor(&api)?;
        info!(
            "starting acquisition from {} at {frequency_hz} Hz",
            descriptor.model
        );

        self.start_with_source(frequency_hz, move || {
            read_temperature(&api, &descriptor, policy)
        })
    }

    /// Start acquiring from an arbitrary reading source
    ///
    /// The source is polled once per period on the background worker. Any
    /// error it returns is treated as the device disappearing mid-run, which
    /// is fatal: the error is reported and the process exits with a nonzero
    /// status rather than logging partial garbage.
    pub fn start_with_source<F>(&mut self, frequency_hz: f64, mut source: F) -> Result<()>
    where
        F: FnMut() -> Result<Sample> + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(TemperError::AcquisitionActive);
        }
        if !(frequency_hz > 0.0 && frequency_hz.is_finite()) {
            return Err(TemperError::InvalidParameter(format!(
                "frequency must be positive, got {frequency_hz} Hz"
            )));
        }

        // Plain inter-poll delay, not compensated for the cost of the poll
        // itself; the drift is negligible at 1 Hz sampling.
        let period = Duration::from_secs_f64(1.0 / frequency_hz);

        self.locked_store().begin_run(Local::now());
        self.running.store(true, Ordering::SeqCst);

        let store = Arc::clone(&self.store);
        let running = Arc::clone(&self.running);
        let worker = thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                match source() {
                    Ok(sample) => {
                        println!(
                            "    Timestamp: {}, Temperature: {:.2} °C",
                            sample.time.format("%H:%M:%S"),
                            sample.temperature
                        );
                        store.lock().expect("sample store mutex poisoned").push(sample);
                    }
                    Err(e) => {
                        error!("sensor failure during acquisition: {e}");
                        eprintln!("Fatal: lost the sensor mid-acquisition: {e}");
                        process::exit(1);
                    }
                }
                thread::sleep(period);
            }
        });
        self.worker = Some(worker);

        Ok(())
    }

    /// Stop the current run, if any
    ///
    /// Clears the running flag, waits for the worker to finish its current
    /// iteration and exit, then closes the run boundary. Idempotent: calling
    /// it while idle is a no-op.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("acquisition worker panicked");
            }
            info!("acquisition stopped");
        }
        self.locked_store().close_run();
    }

    /// Consistent snapshot of all samples and run boundaries
    pub fn snapshot(&self) -> SampleStore {
        self.locked_store().clone()
    }

    fn locked_store(&self) -> std::sync::MutexGuard<'_, SampleStore> {
        self.store.lock().expect("sample store mutex poisoned")
    }
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Acquisition {
    fn drop(&mut self) {
        self.stop();
    }
}
