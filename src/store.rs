//! In-memory sample buffer and run boundary bookkeeping

use chrono::{DateTime, Local};

/// One temperature reading
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Wall-clock instant of the reading
    pub time: DateTime<Local>,
    /// Degrees Celsius
    pub temperature: f64,
}

impl Sample {
    pub fn new(time: DateTime<Local>, temperature: f64) -> Self {
        Self { time, temperature }
    }
}

/// Begin/end instants of one start-to-stop acquisition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBoundary {
    pub begin: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Append-only sample buffer plus the boundaries of completed runs
///
/// Samples accumulate across runs; the log is cumulative for a whole
/// session. A run is opened with [`begin_run`](Self::begin_run) and closed
/// with [`close_run`](Self::close_run), which records the boundary ending at
/// the last sample of that run (or at its begin instant if the run produced
/// no samples).
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<Sample>,
    runs: Vec<RunBoundary>,
    /// Begin instant and sample count at the start of the open run
    open_run: Option<(DateTime<Local>, usize)>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a new run
    pub fn begin_run(&mut self, begin: DateTime<Local>) {
        debug_assert!(self.open_run.is_none(), "run already open");
        self.open_run = Some((begin, self.samples.len()));
    }

    /// Append a sample to the buffer
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Close the open run, if any
    ///
    /// Records one boundary per open run; calling this without an open run
    /// is a no-op, so a second `stop` in a row cannot corrupt the list.
    pub fn close_run(&mut self) {
        if let Some((begin, first_index)) = self.open_run.take() {
            let end = self.samples[first_index..]
                .last()
                .map(|sample| sample.time)
                .unwrap_or(begin);
            self.runs.push(RunBoundary { begin, end });
        }
    }

    /// All samples, in acquisition order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Boundaries of completed runs, in run order
    pub fn runs(&self) -> &[RunBoundary] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn test_close_run_ends_at_last_sample() {
        let begin = t0();
        let mut store = SampleStore::new();
        store.begin_run(begin);
        store.push(Sample::new(begin + Duration::seconds(1), 21.0));
        store.push(Sample::new(begin + Duration::seconds(2), 21.5));
        store.close_run();

        assert_eq!(store.runs().len(), 1);
        let run = store.runs()[0];
        assert_eq!(run.begin, begin);
        assert_eq!(run.end, begin + Duration::seconds(2));
        assert!(run.begin <= run.end);
    }

    #[test]
    fn test_empty_run_ends_at_begin() {
        let begin = t0();
        let mut store = SampleStore::new();
        store.begin_run(begin);
        store.close_run();

        assert_eq!(store.runs().len(), 1);
        assert_eq!(store.runs()[0].begin, begin);
        assert_eq!(store.runs()[0].end, begin);
    }

    #[test]
    fn test_close_without_open_run_is_noop() {
        let mut store = SampleStore::new();
        store.close_run();
        store.close_run();
        assert!(store.runs().is_empty());
    }

    #[test]
    fn test_second_run_only_sees_its_own_samples() {
        let begin = t0();
        let mut store = SampleStore::new();

        store.begin_run(begin);
        store.push(Sample::new(begin + Duration::seconds(1), 20.0));
        store.close_run();

        // Stopped gap, then a new run with no samples: its end must be its
        // own begin, not the previous run's last sample.
        let begin2 = begin + Duration::seconds(60);
        store.begin_run(begin2);
        store.close_run();

        assert_eq!(store.runs().len(), 2);
        assert_eq!(store.runs()[1].begin, begin2);
        assert_eq!(store.runs()[1].end, begin2);
    }

    #[test]
    fn test_timestamps_non_decreasing_across_runs() {
        let begin = t0();
        let mut store = SampleStore::new();
        for run in 0..3 {
            store.begin_run(begin + Duration::seconds(run * 10));
            for i in 0..4 {
                let time = begin + Duration::seconds(run * 10 + i);
                store.push(Sample::new(time, 20.0 + i as f64));
            }
            store.close_run();
        }

        assert_eq!(store.len(), 12);
        for pair in store.samples().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        for run in store.runs() {
            assert!(run.begin <= run.end);
        }
    }
}
