//! The six timed operations and their default settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bench::options::{BenchmarkSettings, IterationSettings, TimeUnit};

const WARMUP_ITERATIONS: u32 = 3;
const MEASUREMENT_ITERATIONS: u32 = 20;

/// A timed operation. Declaration order is run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Construct a record, nothing else.
    CreateObject,
    /// Construct a record and save it through the mocked repository.
    MockWriteObject,
    /// Construct a record and save it through the real repository.
    WriteObject,
    /// Read the captured id from memory.
    RetrieveKey,
    /// Find the captured id through the mocked repository.
    MockReadObject,
    /// Find the captured id through the real repository.
    ReadObject,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateObject,
        Operation::MockWriteObject,
        Operation::WriteObject,
        Operation::RetrieveKey,
        Operation::MockReadObject,
        Operation::ReadObject,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateObject => "BM1_CreateObject",
            Operation::MockWriteObject => "BM2_MockWriteObject",
            Operation::WriteObject => "BM3_WriteObject",
            Operation::RetrieveKey => "BM4_RetrieveKey",
            Operation::MockReadObject => "BM5_MockReadObject",
            Operation::ReadObject => "BM6_ReadObject",
        }
    }

    pub fn default_settings(self) -> BenchmarkSettings {
        let iteration_time = match self {
            Operation::CreateObject | Operation::RetrieveKey => Duration::from_millis(10),
            Operation::MockWriteObject | Operation::MockReadObject => Duration::from_millis(200),
            Operation::WriteObject | Operation::ReadObject => Duration::from_millis(1000),
        };
        let unit = match self {
            Operation::RetrieveKey => TimeUnit::Nanoseconds,
            _ => TimeUnit::Microseconds,
        };

        BenchmarkSettings {
            warmup: IterationSettings::new(WARMUP_ITERATIONS, iteration_time),
            measurement: IterationSettings::new(MEASUREMENT_ITERATIONS, iteration_time),
            unit,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
