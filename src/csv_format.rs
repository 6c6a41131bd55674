//! CSV log format for acquired temperature data
//!
//! Two columns, `Timestamp` (HH:MM:SS) and `Temperature (°C)` (two
//! decimals). Each write replaces the destination file with the full
//! cumulative history, so the log written at the last `stop` is always
//! complete on its own.

use std::path::Path;

use crate::error::Result;
use crate::store::Sample;

/// Column headers of the log file
pub const LOG_HEADER: [&str; 2] = ["Timestamp", "Temperature (°C)"];

/// Write all samples to `path`, overwriting any previous contents
pub fn write_log<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(LOG_HEADER)?;
    for sample in samples {
        writer.write_record([
            sample.time.format("%H:%M:%S").to_string(),
            format!("{:.2}", sample.temperature),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    #[test]
    fn test_round_trip_matches_in_memory_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temperature_log.csv");

        let start = Local::now();
        let samples: Vec<Sample> = (0..5)
            .map(|i| Sample::new(start + Duration::seconds(i), 20.0 + i as f64 * 0.25))
            .collect();
        write_log(&path, &samples).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers, vec!["Timestamp", "Temperature (°C)"]);

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), samples.len());
        for (row, sample) in rows.iter().zip(&samples) {
            assert_eq!(&row[0], sample.time.format("%H:%M:%S").to_string());
            assert_eq!(&row[1], format!("{:.2}", sample.temperature));
        }
    }

    #[test]
    fn test_rewrite_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temperature_log.csv");

        let start = Local::now();
        let long: Vec<Sample> = (0..10)
            .map(|i| Sample::new(start + Duration::seconds(i), 21.0))
            .collect();
        write_log(&path, &long).unwrap();
        write_log(&path, &long[..3]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn test_empty_store_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temperature_log.csv");
        write_log(&path, &[]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 2);
        assert_eq!(reader.records().count(), 0);
    }
}
