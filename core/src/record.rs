//! Timing primitives shared by the runner and the workloads.
//!
//! A [`BenchRecord`] is handed to every invocation of a function under test,
//! which appends one sample per measured region. Samples are kept in
//! microseconds as `f64` so sub-microsecond regions survive aggregation.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{Result, ensure};

/// Composite identity of one measured scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BenchKey {
    pub operation: String,
    pub size: usize,
    pub iterations: usize,
}

impl BenchKey {
    pub fn new(operation: impl Into<String>, size: usize, iterations: usize) -> Self {
        Self {
            operation: operation.into(),
            size,
            iterations,
        }
    }
}

impl fmt::Display for BenchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.operation, self.size, self.iterations)
    }
}

/// Monotonic stopwatch reporting elapsed microseconds.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_micros(&self) -> f64 {
        duration_micros(self.elapsed())
    }
}

pub fn duration_micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

/// Append-only elapsed-time samples, in microseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<f64>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample; negative and non-finite values are rejected.
    pub fn push(&mut self, micros: f64) -> Result<()> {
        ensure!(
            micros.is_finite() && micros >= 0.0,
            "invalid sample {micros}: expected a finite, non-negative duration in microseconds"
        );
        self.samples.push(micros);
        Ok(())
    }

    fn push_duration(&mut self, elapsed: Duration) {
        self.samples.push(duration_micros(elapsed));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }
}

/// One benchmark invocation: key, strategy label and the samples taken.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    key: BenchKey,
    desc: String,
    samples: SampleSet,
}

impl BenchRecord {
    pub fn new(key: BenchKey, desc: impl Into<String>) -> Self {
        Self {
            key,
            desc: desc.into(),
            samples: SampleSet::new(),
        }
    }

    pub fn key(&self) -> &BenchKey {
        &self.key
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.samples.push_duration(elapsed);
    }

    /// Appends an externally measured sample. Fails on negative or non-finite values.
    pub fn record_micros(&mut self, micros: f64) -> Result<()> {
        self.samples.push(micros)
    }

    /// Runs `f`, appends its wall-clock duration as one sample and returns its output.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let watch = Stopwatch::start();
        let out = f();
        self.record(watch.elapsed());
        out
    }
}
