//! Per-trial benchmark state.
//!
//! A trial is `setup` → any number of `invoke` calls → `teardown`. Setup seeds
//! one record into the real repository and keeps its id for the read
//! benchmarks; it also opens the mocked repository used by the mock benchmarks.

use std::hint::black_box;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::bench::operation::Operation;
use crate::error::{BenchError, Result};
use crate::models::research::Research;
use crate::storage::mock::MockedResearchRepository;
use crate::storage::repository::ResearchRepository;

pub struct ResearchBenchmark {
    repository: Arc<dyn ResearchRepository>,
    mocked: Option<MockedResearchRepository>,
    read_research_id: Option<Uuid>,
}

impl ResearchBenchmark {
    pub fn new(repository: Arc<dyn ResearchRepository>) -> Self {
        Self {
            repository,
            mocked: None,
            read_research_id: None,
        }
    }

    /// Saves the seed record, captures its id and opens the mocked repository.
    pub async fn setup(&mut self) -> Result<Uuid> {
        if self.mocked.is_some() {
            return Err(BenchError::Benchmark("trial already set up".into()));
        }

        let research = Research::seed();
        let id = research.id();
        self.repository.save(&research).await?;
        self.read_research_id = Some(id);
        self.mocked = Some(MockedResearchRepository::open());

        info!(backend = self.repository.backend(), %id, "Trial set up");
        Ok(id)
    }

    /// Closes the mocked repository. Errors from closing are returned.
    pub fn teardown(&mut self) -> Result<()> {
        let mocked = self
            .mocked
            .take()
            .ok_or_else(|| BenchError::Benchmark("teardown without setup".into()))?;
        mocked.close()
    }

    pub fn mocked(&self) -> Option<&MockedResearchRepository> {
        self.mocked.as_ref()
    }

    /// Resolves the trial state for `operation` once, so the timed loop only
    /// pays for the call itself. Fails when the trial is not set up.
    pub fn prepare(&self, operation: Operation) -> Result<Invocation<'_>> {
        match (&self.mocked, self.read_research_id) {
            (Some(mocked), Some(research_id)) => Ok(Invocation {
                operation,
                repository: self.repository.as_ref(),
                mocked,
                research_id,
            }),
            _ => Err(BenchError::Benchmark("trial not set up".into())),
        }
    }

    /// Runs one call of `operation`.
    pub async fn invoke(&self, operation: Operation) -> Result<()> {
        self.prepare(operation)?.call().await
    }
}

/// One benchmark operation bound to a set-up trial.
///
/// Each `call` still goes through one async call and the dispatch `match`;
/// that overhead is part of every score, including the `BM4_RetrieveKey`
/// baseline.
pub struct Invocation<'a> {
    operation: Operation,
    repository: &'a dyn ResearchRepository,
    mocked: &'a MockedResearchRepository,
    research_id: Uuid,
}

impl Invocation<'_> {
    /// Every produced value goes through `black_box`.
    pub async fn call(&self) -> Result<()> {
        match self.operation {
            Operation::CreateObject => {
                black_box(Research::sample());
            }
            Operation::MockWriteObject => {
                black_box(self.mocked.save(&Research::sample()).await?);
            }
            Operation::WriteObject => {
                black_box(self.repository.save(&Research::sample()).await?);
            }
            Operation::RetrieveKey => {
                black_box(black_box(self).research_id);
            }
            Operation::MockReadObject => {
                black_box(self.mocked.find_by_id(&self.research_id).await?);
            }
            Operation::ReadObject => {
                black_box(self.repository.find_by_id(&self.research_id).await?);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::research::{SAMPLE_NAME, SEED_NAME, SEED_WORD_LENGTH};
    use crate::storage::repository::MockResearchRepository;
    use mockall::predicate::eq;

    fn seeded_repository() -> MockResearchRepository {
        let mut repo = MockResearchRepository::new();
        repo.expect_backend().return_const("mock-real");
        repo.expect_save()
            .withf(|r: &Research| r.name() == SEED_NAME && r.word_length() == SEED_WORD_LENGTH)
            .times(1)
            .returning(|r| Ok(r.clone()));
        repo
    }

    #[tokio::test]
    async fn test_setup_saves_seed_once() {
        let mut trial = ResearchBenchmark::new(Arc::new(seeded_repository()));

        let id = trial.setup().await.unwrap();

        assert_eq!(trial.read_research_id, Some(id));
        assert!(trial.mocked().unwrap().is_open());
    }

    #[tokio::test]
    async fn test_setup_twice_fails() {
        let mut trial = ResearchBenchmark::new(Arc::new(seeded_repository()));
        trial.setup().await.unwrap();

        assert!(matches!(
            trial.setup().await,
            Err(BenchError::Benchmark(_))
        ));
    }

    #[tokio::test]
    async fn test_invoke_before_setup_fails() {
        let trial = ResearchBenchmark::new(Arc::new(MockResearchRepository::new()));
        assert!(matches!(
            trial.invoke(Operation::CreateObject).await,
            Err(BenchError::Benchmark(_))
        ));
    }

    #[tokio::test]
    async fn test_prepare_binds_captured_id() {
        let mut trial = ResearchBenchmark::new(Arc::new(seeded_repository()));
        assert!(matches!(
            trial.prepare(Operation::RetrieveKey),
            Err(BenchError::Benchmark(_))
        ));

        let id = trial.setup().await.unwrap();
        let invocation = trial.prepare(Operation::RetrieveKey).unwrap();

        assert_eq!(invocation.operation, Operation::RetrieveKey);
        assert_eq!(invocation.research_id, id);
        for _ in 0..3 {
            invocation.call().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_read_object_hits_real_repository() {
        let mut repo = seeded_repository();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        let mut trial = ResearchBenchmark::new(Arc::new(repo));
        trial.setup().await.unwrap();

        trial.invoke(Operation::ReadObject).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_id_receives_captured_id() {
        let id = Uuid::new_v4();
        let mut repo = MockResearchRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        let checked = ResearchBenchmark {
            repository: Arc::new(repo),
            mocked: Some(MockedResearchRepository::open()),
            read_research_id: Some(id),
        };

        checked.invoke(Operation::ReadObject).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_object_saves_sample() {
        let mut repo = seeded_repository();
        repo.expect_save()
            .withf(|r: &Research| r.name() == SAMPLE_NAME)
            .times(2)
            .returning(|r| Ok(r.clone()));
        let mut trial = ResearchBenchmark::new(Arc::new(repo));
        trial.setup().await.unwrap();

        trial.invoke(Operation::WriteObject).await.unwrap();
        trial.invoke(Operation::WriteObject).await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_operations_skip_real_repository() {
        // only the seed save is expected on the real repository
        let mut trial = ResearchBenchmark::new(Arc::new(seeded_repository()));
        trial.setup().await.unwrap();

        for op in [
            Operation::CreateObject,
            Operation::MockWriteObject,
            Operation::RetrieveKey,
            Operation::MockReadObject,
        ] {
            trial.invoke(op).await.unwrap();
        }

        assert_eq!(trial.mocked().unwrap().invocations(), 2);
    }

    #[tokio::test]
    async fn test_teardown_closes_mock() {
        let mut trial = ResearchBenchmark::new(Arc::new(seeded_repository()));
        trial.setup().await.unwrap();

        trial.teardown().unwrap();

        assert!(trial.mocked().is_none());
        assert!(matches!(trial.teardown(), Err(BenchError::Benchmark(_))));
        assert!(trial.invoke(Operation::MockWriteObject).await.is_err());
    }
}
