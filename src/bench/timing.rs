//! Timing loop
//!
//! Each iteration calls the operation until the iteration has run for at least
//! its configured time, then records the call count and elapsed time. Warm-up
//! samples are discarded; the score is the average time per call over the
//! measurement iterations.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::bench::options::{BenchmarkSettings, IterationSettings, TimeUnit};
use crate::error::{BenchError, Result};

/// Upper bound on calls between two clock reads.
const MAX_BATCH: u64 = 1 << 16;

/// One iteration: how many calls ran in how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSample {
    pub operations: u64,
    pub elapsed: Duration,
}

impl IterationSample {
    /// Average time per call in nanoseconds.
    pub fn nanos_per_op(&self) -> f64 {
        if self.operations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.operations as f64
    }
}

/// Samples of a finished benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub warmup: Vec<IterationSample>,
    pub samples: Vec<IterationSample>,
}

/// Summary of per-iteration averages, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub operations: u64,
}

impl Statistics {
    pub fn from_samples(samples: &[IterationSample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let values: Vec<f64> = samples.iter().map(IterationSample::nanos_per_op).collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let stddev = if values.len() > 1 {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            stddev,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            operations: samples.iter().map(|s| s.operations).sum(),
        }
    }

    /// The same statistics converted to `unit`.
    pub fn in_unit(&self, unit: TimeUnit) -> Self {
        Self {
            mean: unit.from_nanos(self.mean),
            stddev: unit.from_nanos(self.stddev),
            min: unit.from_nanos(self.min),
            max: unit.from_nanos(self.max),
            operations: self.operations,
        }
    }
}

/// Runs one iteration of `op` for at least `min_time`.
///
/// The clock is read between batches; batch size follows the observed call
/// cost so the iteration overshoots `min_time` by at most about one batch.
pub async fn run_iteration<F, Fut>(min_time: Duration, op: &mut F) -> Result<IterationSample>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let start = Instant::now();
    let mut operations: u64 = 0;
    let mut batch: u64 = 1;

    loop {
        for _ in 0..batch {
            op().await?;
        }
        operations += batch;

        let elapsed = start.elapsed();
        if elapsed >= min_time {
            return Ok(IterationSample {
                operations,
                elapsed,
            });
        }

        let per_op = elapsed.as_nanos().max(1) as f64 / operations as f64;
        let remaining = (min_time - elapsed).as_nanos() as f64;
        let estimate = (remaining / per_op).ceil() as u64;
        batch = estimate.clamp(1, operations.min(MAX_BATCH));
    }
}

async fn run_phase<F, Fut>(
    phase: &str,
    settings: &IterationSettings,
    unit: TimeUnit,
    op: &mut F,
) -> Result<Vec<IterationSample>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut samples = Vec::with_capacity(settings.iterations as usize);
    for i in 1..=settings.iterations {
        let sample = run_iteration(settings.time, op).await?;
        debug!(
            "{} iteration {}: {:.3} {}",
            phase,
            i,
            unit.from_nanos(sample.nanos_per_op()),
            unit.per_op()
        );
        samples.push(sample);
    }
    Ok(samples)
}

/// Runs the warm-up phase, then the measurement phase.
pub async fn measure<F, Fut>(settings: &BenchmarkSettings, mut op: F) -> Result<Measurement>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if settings.measurement.iterations == 0 {
        return Err(BenchError::Benchmark(
            "measurement needs at least one iteration".into(),
        ));
    }

    let warmup = run_phase("Warmup", &settings.warmup, settings.unit, &mut op).await?;
    let samples = run_phase("Iteration", &settings.measurement, settings.unit, &mut op).await?;

    Ok(Measurement { warmup, samples })
}
