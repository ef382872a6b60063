//! Runs every selected benchmark against one repository.
//!
//! Each benchmark is its own trial (setup, warm-up, measurement, teardown).
//! After the last trial the real store is cleared with `delete_all`, also when
//! the run is aborted.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::bench::harness::ResearchBenchmark;
use crate::bench::operation::Operation;
use crate::bench::options::RunnerOptions;
use crate::bench::report::{BenchmarkFailure, BenchmarkReport, BenchmarkResult};
use crate::bench::timing::measure;
use crate::error::Result;
use crate::storage::repository::ResearchRepository;

pub struct BenchmarkRunner {
    options: RunnerOptions,
}

impl BenchmarkRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn selected_operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.options.selects(*op))
            .collect()
    }

    pub async fn run(&self, repository: Arc<dyn ResearchRepository>) -> Result<BenchmarkReport> {
        let mut report = BenchmarkReport::new(repository.backend());
        info!(
            backend = repository.backend(),
            benchmarks = self.selected_operations().len(),
            "Benchmark run started"
        );

        let outcome = self.run_trials(&repository, &mut report).await;
        let cleanup = repository.delete_all().await;

        match (outcome, cleanup) {
            (Err(e), Err(cleanup_err)) => {
                error!("Cleanup after failed run also failed: {}", cleanup_err);
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), Err(cleanup_err)) => Err(cleanup_err),
            (Ok(()), Ok(())) => {
                report.finish();
                info!(
                    backend = %report.backend,
                    results = report.results.len(),
                    failures = report.failures.len(),
                    "Benchmark run finished"
                );
                Ok(report)
            }
        }
    }

    async fn run_trials(
        &self,
        repository: &Arc<dyn ResearchRepository>,
        report: &mut BenchmarkReport,
    ) -> Result<()> {
        for operation in self.selected_operations() {
            match self.run_trial(repository, operation).await {
                Ok(result) => {
                    info!(
                        "{}: {:.3} ± {:.3} {}",
                        result.benchmark,
                        result.score,
                        result.error,
                        result.unit.per_op()
                    );
                    report.results.push(result);
                }
                Err(e) if !self.options.fail_on_error => {
                    warn!("{} failed, skipping: {}", operation, e);
                    report.failures.push(BenchmarkFailure {
                        benchmark: operation.name().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("{} failed, aborting run: {}", operation, e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn run_trial(
        &self,
        repository: &Arc<dyn ResearchRepository>,
        operation: Operation,
    ) -> Result<BenchmarkResult> {
        let settings = self.options.settings_for(operation);
        let mut trial = ResearchBenchmark::new(repository.clone());
        trial.setup().await?;

        let measured = match trial.prepare(operation) {
            Ok(invocation) => measure(&settings, || invocation.call()).await,
            Err(e) => Err(e),
        };
        // the mock is released even when measurement failed
        let closed = trial.teardown();

        let measurement = measured?;
        closed?;
        Ok(BenchmarkResult::from_measurement(
            operation,
            &settings,
            &measurement,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::models::research::{Research, SAMPLE_NAME, SEED_NAME};
    use crate::storage::memory::InMemoryResearchRepository;
    use crate::storage::repository::MockResearchRepository;

    fn failing_writes() -> MockResearchRepository {
        let mut repo = MockResearchRepository::new();
        repo.expect_backend().return_const("mock-real");
        repo.expect_save()
            .withf(|r: &Research| r.name() == SEED_NAME)
            .returning(|r| Ok(r.clone()));
        repo.expect_save()
            .withf(|r: &Research| r.name() == SAMPLE_NAME)
            .returning(|_| Err(BenchError::Connection("connection reset".into())));
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo
    }

    #[tokio::test]
    async fn test_run_reports_selected_operations() {
        let repo = Arc::new(InMemoryResearchRepository::new());
        let runner = BenchmarkRunner::new(RunnerOptions::quick());

        let report = runner.run(repo.clone()).await.unwrap();

        assert_eq!(report.backend, "memory");
        assert_eq!(report.results.len(), Operation::ALL.len());
        assert!(report.failures.is_empty());
        assert!(report.results.iter().all(|r| r.samples == 2 && r.score > 0.0));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fail_on_error_aborts_and_cleans() {
        let mut repo = failing_writes();
        repo.expect_delete_all().times(1).returning(|| Ok(()));
        let runner = BenchmarkRunner::new(RunnerOptions::quick());

        let result = runner.run(Arc::new(repo)).await;

        assert!(matches!(result, Err(BenchError::Connection(_))));
    }

    #[tokio::test]
    async fn test_skip_failed_benchmark() {
        let mut repo = failing_writes();
        repo.expect_delete_all().times(1).returning(|| Ok(()));
        let options = RunnerOptions {
            fail_on_error: false,
            ..RunnerOptions::quick()
        };

        let report = BenchmarkRunner::new(options)
            .run(Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].benchmark, "BM3_WriteObject");
        assert_eq!(report.results.len(), Operation::ALL.len() - 1);
        assert!(report.result(Operation::WriteObject).is_none());
    }

    #[tokio::test]
    async fn test_cleanup_error_is_returned() {
        let mut repo = MockResearchRepository::new();
        repo.expect_backend().return_const("mock-real");
        repo.expect_delete_all()
            .times(1)
            .returning(|| Err(BenchError::KeyValue("READONLY".into())));
        let options = RunnerOptions {
            include: vec!["Nothing".into()],
            ..RunnerOptions::quick()
        };

        let result = BenchmarkRunner::new(options).run(Arc::new(repo)).await;

        assert!(matches!(result, Err(BenchError::KeyValue(_))));
    }
}
