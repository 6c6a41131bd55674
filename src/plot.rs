//! PNG chart rendering for acquired temperature data
//!
//! Draws the cumulative time series as a line with point markers, plus a
//! vertical marker at the end of every completed run except the last one,
//! labelled with the ending run's stop time and the next run's start time.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{Result, TemperError};
use crate::store::SampleStore;

const PLOT_SIZE: (u32, u32) = (1000, 500);
const Y_PADDING: f64 = 0.1;
const X_TICKS: usize = 10;

fn draw_error<E: std::fmt::Display>(e: E) -> TemperError {
    TemperError::Plot(e.to_string())
}

/// Render the full sample history to a PNG file
///
/// # Returns
/// * `Err(TemperError::EmptyData)` - The store holds no samples yet
pub fn render_plot<P: AsRef<Path>>(path: P, store: &SampleStore) -> Result<()> {
    let samples = store.samples();
    if samples.is_empty() {
        return Err(TemperError::EmptyData);
    }

    let min_t = samples.iter().map(|s| s.temperature).fold(f64::INFINITY, f64::min);
    let max_t = samples.iter().map(|s| s.temperature).fold(f64::NEG_INFINITY, f64::max);
    let span = max_t - min_t;
    // Flat series still gets a visible band around the line.
    let pad = if span > 0.0 { Y_PADDING * span } else { 1.0 };
    let (y_lo, y_hi) = (min_t - pad, max_t + pad);

    let root = BitMapBackend::new(path.as_ref(), PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let x_hi = samples.len().saturating_sub(1).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption("Temperature Acquisition", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_hi, y_lo..y_hi)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .x_labels(X_TICKS)
        .x_label_formatter(&|index| {
            samples
                .get(*index)
                .map(|s| s.time.format("%H:%M:%S").to_string())
                .unwrap_or_default()
        })
        .x_desc("Timestamp")
        .y_desc("Temperature (°C)")
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().enumerate().map(|(i, s)| (i, s.temperature)),
            &BLUE,
        ))
        .map_err(draw_error)?;
    chart
        .draw_series(
            samples
                .iter()
                .enumerate()
                .map(|(i, s)| Circle::new((i, s.temperature), 2, BLUE.filled())),
        )
        .map_err(draw_error)?;

    // One marker per run boundary except the final one: the label pairs the
    // end of run i with the start of run i + 1.
    let runs = store.runs();
    for (i, run) in runs.iter().enumerate().take(runs.len().saturating_sub(1)) {
        let x = samples
            .partition_point(|s| s.time <= run.end)
            .saturating_sub(1);
        chart
            .draw_series(LineSeries::new([(x, y_lo), (x, y_hi)], &RED))
            .map_err(draw_error)?;

        let label_style = ("sans-serif", 14).into_font().color(&RED);
        let end_label = format!("End: {}", run.end.format("%H:%M:%S"));
        let start_label = format!("New Start: {}", runs[i + 1].begin.format("%H:%M:%S"));
        chart
            .draw_series(std::iter::once(Text::new(
                end_label,
                (x, y_lo + 0.95 * (y_hi - y_lo)),
                label_style.clone(),
            )))
            .map_err(draw_error)?;
        chart
            .draw_series(std::iter::once(Text::new(
                start_label,
                (x, y_lo + 0.85 * (y_hi - y_lo)),
                label_style,
            )))
            .map_err(draw_error)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_an_error_not_a_crash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let result = render_plot(&path, &SampleStore::new());
        assert!(matches!(result, Err(TemperError::EmptyData)));
        assert!(!path.exists());
    }
}
