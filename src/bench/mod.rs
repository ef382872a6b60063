//! Benchmark Harness Module
//!
//! Measures average latency of record construction, mocked repository calls
//! and real repository calls. One harness is parameterized by the repository,
//! so the same trials run against every backend.

pub mod harness;
pub mod operation;
pub mod options;
pub mod report;
pub mod runner;
pub mod timing;

pub use harness::{Invocation, ResearchBenchmark};
pub use operation::Operation;
pub use options::{BenchmarkSettings, IterationSettings, RunnerOptions, TimeUnit};
pub use report::{BenchmarkFailure, BenchmarkReport, BenchmarkResult};
pub use runner::BenchmarkRunner;
