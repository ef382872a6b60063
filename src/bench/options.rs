//! Benchmark settings: time units, iteration settings, runner options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bench::operation::Operation;
use crate::config::config::BenchmarkConfig;

/// Unit a benchmark score is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    fn nanos_per_unit(self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1.0,
            TimeUnit::Microseconds => 1_000.0,
            TimeUnit::Milliseconds => 1_000_000.0,
            TimeUnit::Seconds => 1_000_000_000.0,
        }
    }

    /// Converts a nanosecond value into this unit.
    pub fn from_nanos(self, nanos: f64) -> f64 {
        nanos / self.nanos_per_unit()
    }

    pub fn convert(self, duration: Duration) -> f64 {
        self.from_nanos(duration.as_nanos() as f64)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        }
    }

    /// Score label for average-time mode, e.g. `us/op`.
    pub fn per_op(self) -> String {
        format!("{}/op", self.symbol())
    }
}

/// Iteration count and minimum duration of each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSettings {
    pub iterations: u32,
    pub time: Duration,
}

impl IterationSettings {
    pub fn new(iterations: u32, time: Duration) -> Self {
        Self { iterations, time }
    }
}

/// Warm-up, measurement and output unit of one benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkSettings {
    pub warmup: IterationSettings,
    pub measurement: IterationSettings,
    pub unit: TimeUnit,
}

/// Options for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerOptions {
    /// Name substrings; empty selects every benchmark.
    pub include: Vec<String>,
    /// Abort the run on the first error instead of skipping the benchmark.
    pub fail_on_error: bool,
    pub warmup_iterations: Option<u32>,
    pub measurement_iterations: Option<u32>,
    pub iteration_time: Option<Duration>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            fail_on_error: true,
            warmup_iterations: None,
            measurement_iterations: None,
            iteration_time: None,
        }
    }
}

impl RunnerOptions {
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            include: config.include.clone(),
            fail_on_error: config.fail_on_error,
            warmup_iterations: config.warmup_iterations,
            measurement_iterations: config.measurement_iterations,
            iteration_time: config.iteration_time_ms.map(Duration::from_millis),
        }
    }

    /// Short runs for tests and smoke checks.
    pub fn quick() -> Self {
        Self {
            warmup_iterations: Some(1),
            measurement_iterations: Some(2),
            iteration_time: Some(Duration::from_millis(2)),
            ..Self::default()
        }
    }

    pub fn selects(&self, operation: Operation) -> bool {
        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|pattern| operation.name().contains(pattern.as_str()))
    }

    /// Operation defaults with the global overrides applied.
    pub fn settings_for(&self, operation: Operation) -> BenchmarkSettings {
        let mut settings = operation.default_settings();
        if let Some(iterations) = self.warmup_iterations {
            settings.warmup.iterations = iterations;
        }
        if let Some(iterations) = self.measurement_iterations {
            settings.measurement.iterations = iterations;
        }
        if let Some(time) = self.iteration_time {
            settings.warmup.time = time;
            settings.measurement.time = time;
        }
        settings
    }
}
