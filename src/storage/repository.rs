use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::research::Research;

/// 研究记录仓储 trait
///
/// 文档存储、键值存储、内存存储与模拟仓储都实现该 trait，
/// 基准测试框架只通过它访问后端。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResearchRepository: Send + Sync {
    /// 后端名称，用于日志和报告
    fn backend(&self) -> &'static str;

    /// 按标识写入（存在则覆盖）
    async fn save(&self, research: &Research) -> Result<Research>;

    /// 根据 ID 获取记录
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Research>>;

    /// 删除全部记录
    async fn delete_all(&self) -> Result<()>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;

    /// 根据 ID 删除记录，返回是否删除了记录
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool>;

    /// 列出全部记录
    async fn find_all(&self) -> Result<Vec<Research>>;

    /// 检查记录是否存在
    async fn exists_by_id(&self, id: &Uuid) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
