//! 内存存储
//!
//! 进程内的仓储实现，供测试和 criterion 基准使用。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::research::Research;
use crate::storage::repository::ResearchRepository;

/// 内存仓储实现
#[derive(Clone, Default)]
pub struct InMemoryResearchRepository {
    records: Arc<RwLock<HashMap<Uuid, Research>>>,
}

impl InMemoryResearchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResearchRepository for InMemoryResearchRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, research: &Research) -> Result<Research> {
        let mut records = self.records.write().await;
        records.insert(research.id(), research.clone());
        Ok(research.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Research>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut records = self.records.write().await;
        tracing::debug!("Deleting {} in-memory research records", records.len());
        records.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool> {
        Ok(self.records.write().await.remove(id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<Research>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let repo = InMemoryResearchRepository::new();
        let research = Research::seed();

        repo.save(&research).await.unwrap();
        repo.save(&research).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_fields() {
        let repo = InMemoryResearchRepository::new();
        let mut research = Research::seed();
        repo.save(&research).await.unwrap();

        research.set_word_length(1);
        repo.save(&research).await.unwrap();

        let found = repo.find_by_id(&research.id()).await.unwrap().unwrap();
        assert_eq!(found.word_length(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryResearchRepository::new();
        let research = Research::sample();
        repo.save(&research).await.unwrap();

        assert!(repo.delete_by_id(&research.id()).await.unwrap());
        assert!(!repo.delete_by_id(&research.id()).await.unwrap());
        assert!(!repo.exists_by_id(&research.id()).await.unwrap());
    }
}
