//! 存储工厂模块
//!
//! 根据配置创建相应的研究记录仓储。

use crate::config::config::{AppConfig, BackendKind};
use crate::error::{BenchError, Result};
use crate::storage::memory::InMemoryResearchRepository;
use crate::storage::repository::ResearchRepository;
use std::sync::Arc;

#[cfg(feature = "surrealdb")]
use crate::storage::surrealdb::{SurrealPool, SurrealResearchRepository};

#[cfg(feature = "redis")]
use crate::storage::redis::RedisResearchRepository;

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据后端类型创建仓储
    pub async fn create(
        config: &AppConfig,
        backend: BackendKind,
    ) -> Result<Arc<dyn ResearchRepository>> {
        match backend {
            BackendKind::Memory => Ok(Arc::new(InMemoryResearchRepository::new())),
            BackendKind::Document => Self::create_document(config).await,
            BackendKind::KeyValue => Self::create_key_value(config).await,
        }
    }

    /// 创建文档数据库仓储
    #[cfg(feature = "surrealdb")]
    async fn create_document(config: &AppConfig) -> Result<Arc<dyn ResearchRepository>> {
        let pool = SurrealPool::new(&config.document).await?;
        Ok(Arc::new(SurrealResearchRepository::new(pool)))
    }

    #[cfg(not(feature = "surrealdb"))]
    async fn create_document(_config: &AppConfig) -> Result<Arc<dyn ResearchRepository>> {
        Err(BenchError::Config(
            "SurrealDB feature is not enabled. Enable 'surrealdb' feature to use the document store."
                .into(),
        ))
    }

    /// 创建键值存储仓储
    #[cfg(feature = "redis")]
    async fn create_key_value(config: &AppConfig) -> Result<Arc<dyn ResearchRepository>> {
        let repo = RedisResearchRepository::connect(&config.key_value).await?;
        Ok(Arc::new(repo))
    }

    #[cfg(not(feature = "redis"))]
    async fn create_key_value(_config: &AppConfig) -> Result<Arc<dyn ResearchRepository>> {
        Err(BenchError::Config(
            "Redis feature is not enabled. Enable 'redis' feature to use the key-value store."
                .into(),
        ))
    }

    /// 检查存储是否可用
    ///
    /// 后端不可达时返回 `BenchError::Connection`，其余错误原样返回。
    pub async fn health_check(repo: &dyn ResearchRepository) -> Result<()> {
        match repo.count().await {
            Ok(_) => Ok(()),
            Err(e) if e.is_backend_unavailable() => Err(BenchError::Connection(format!(
                "{} backend is unreachable: {}",
                repo.backend(),
                e
            ))),
            Err(e) => Err(e),
        }
    }
}
