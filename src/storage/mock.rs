//! 模拟仓储
//!
//! 不访问任何后端，只记录调用次数并返回默认结果，
//! 用于把调用分发开销与真实 IO 开销分开测量。

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use uuid::Uuid;

use crate::error::{BenchError, Result};
use crate::models::research::Research;
use crate::storage::repository::ResearchRepository;

/// 模拟仓储
///
/// - `save` 原样返回参数
/// - `find_by_id` 返回 `None`
/// - 删除类操作不做任何事，`count` 为 0
///
/// 关闭后的任何调用都返回 [`BenchError::Mock`]。
#[derive(Debug)]
pub struct MockedResearchRepository {
    open: AtomicBool,
    invocations: AtomicU64,
}

impl MockedResearchRepository {
    /// 打开一个新的模拟仓储
    pub fn open() -> Self {
        Self {
            open: AtomicBool::new(true),
            invocations: AtomicU64::new(0),
        }
    }

    /// 释放模拟仓储，重复关闭返回错误
    pub fn close(&self) -> Result<()> {
        if self.open.swap(false, Ordering::SeqCst) {
            tracing::debug!(
                invocations = self.invocations(),
                "Mocked repository closed"
            );
            Ok(())
        } else {
            Err(BenchError::Mock("mocked repository already closed".into()))
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// 已记录的调用次数
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    fn record(&self, method: &str) -> Result<()> {
        if !self.is_open() {
            return Err(BenchError::Mock(format!(
                "mocked repository used after close: {}",
                method
            )));
        }
        self.invocations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[async_trait]
impl ResearchRepository for MockedResearchRepository {
    fn backend(&self) -> &'static str {
        "mock"
    }

    async fn save(&self, research: &Research) -> Result<Research> {
        self.record("save")?;
        Ok(research.clone())
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Research>> {
        self.record("find_by_id")?;
        Ok(None)
    }

    async fn delete_all(&self) -> Result<()> {
        self.record("delete_all")
    }

    async fn count(&self) -> Result<u64> {
        self.record("count")?;
        Ok(0)
    }

    async fn delete_by_id(&self, _id: &Uuid) -> Result<bool> {
        self.record("delete_by_id")?;
        Ok(false)
    }

    async fn find_all(&self) -> Result<Vec<Research>> {
        self.record("find_all")?;
        Ok(Vec::new())
    }
}
