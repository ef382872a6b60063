//! Benchmark results and their rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::bench::operation::Operation;
use crate::bench::options::{BenchmarkSettings, TimeUnit};
use crate::bench::timing::{Measurement, Statistics};
use crate::error::Result;

/// Average-time mode, the only mode the harness measures.
pub const MODE_AVERAGE_TIME: &str = "avgt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub benchmark: String,
    pub mode: String,
    pub samples: usize,
    pub score: f64,
    pub error: f64,
    pub min: f64,
    pub max: f64,
    pub unit: TimeUnit,
    pub operations: u64,
}

impl BenchmarkResult {
    pub fn from_measurement(
        operation: Operation,
        settings: &BenchmarkSettings,
        measurement: &Measurement,
    ) -> Self {
        let stats = Statistics::from_samples(&measurement.samples).in_unit(settings.unit);
        Self {
            benchmark: operation.name().to_string(),
            mode: MODE_AVERAGE_TIME.to_string(),
            samples: measurement.samples.len(),
            score: stats.mean,
            error: stats.stddev,
            min: stats.min,
            max: stats.max,
            unit: settings.unit,
            operations: stats.operations,
        }
    }
}

/// A benchmark skipped because it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkFailure {
    pub benchmark: String,
    pub message: String,
}

/// Results of one run against one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub backend: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub results: Vec<BenchmarkResult>,
    pub failures: Vec<BenchmarkFailure>,
}

impl BenchmarkReport {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn result(&self, operation: Operation) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.benchmark == operation.name())
    }

    /// Fixed-width table, one row per benchmark.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Backend: {}", self.backend);
        let _ = writeln!(
            out,
            "{:<24} {:>5} {:>5} {:>14} {:>12}  {}",
            "Benchmark", "Mode", "Cnt", "Score", "Error", "Units"
        );
        for r in &self.results {
            let _ = writeln!(
                out,
                "{:<24} {:>5} {:>5} {:>14.3} ± {:>10.3}  {}",
                r.benchmark,
                r.mode,
                r.samples,
                r.score,
                r.error,
                r.unit.per_op()
            );
        }
        for f in &self.failures {
            let _ = writeln!(out, "{:<24} FAILED: {}", f.benchmark, f.message);
        }
        out
    }

    /// Writes the reports of a run as a JSON array.
    pub fn write_json(reports: &[BenchmarkReport], path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl std::fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_table())
    }
}
