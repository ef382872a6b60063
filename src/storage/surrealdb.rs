use crate::config::config::DocumentStoreConfig;
use crate::error::{BenchError, Result};
use crate::models::research::Research;
use crate::storage::repository::ResearchRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};
use uuid::Uuid;

/// 研究记录所在的表
pub const RESEARCH_TABLE: &str = "research";

/// SurrealDB 连接池
///
/// `Surreal` 本身可廉价克隆，所有克隆共享同一连接。
#[derive(Clone)]
pub struct SurrealPool {
    db: Surreal<Any>,
}

impl SurrealPool {
    /// 创建新的连接池
    pub async fn new(config: &DocumentStoreConfig) -> Result<Self> {
        let db: Surreal<Any> = connect(config.url.as_str())
            .await
            .map_err(|e| BenchError::Connection(format!("{}: {}", config.url, e)))?;

        // 内嵌引擎没有 root 用户，用户名为空时跳过认证
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        // 选择命名空间和数据库
        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        tracing::debug!(url = %config.url, ns = %config.namespace, db = %config.database, "SurrealDB connected");

        Ok(Self { db })
    }

    /// 获取数据库实例
    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}

/// 文档中的研究记录
///
/// 记录键是 UUID 字符串，文档体里另存一份 `researchId`，
/// 读取时不依赖 SurrealDB 的 RecordId 反序列化。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResearchDocument {
    research_id: String,
    name: String,
    word_length: i32,
    created_at: String,
}

impl From<&Research> for ResearchDocument {
    fn from(research: &Research) -> Self {
        Self {
            research_id: research.id().to_string(),
            name: research.name().to_string(),
            word_length: research.word_length(),
            created_at: research.created_at_rfc3339(),
        }
    }
}

impl TryFrom<ResearchDocument> for Research {
    type Error = BenchError;

    fn try_from(doc: ResearchDocument) -> Result<Self> {
        let id = Uuid::parse_str(&doc.research_id).map_err(|e| {
            BenchError::Serialization(format!("invalid research id {}: {}", doc.research_id, e))
        })?;
        let created_at = DateTime::parse_from_rfc3339(&doc.created_at)
            .map_err(|e| {
                BenchError::Serialization(format!("invalid createdAt {}: {}", doc.created_at, e))
            })?
            .with_timezone(&Utc);
        Ok(Research::from_parts(id, doc.name, doc.word_length, created_at))
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// 文档数据库仓储实现
#[derive(Clone)]
pub struct SurrealResearchRepository {
    pool: SurrealPool,
}

impl SurrealResearchRepository {
    pub fn new(pool: SurrealPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResearchRepository for SurrealResearchRepository {
    fn backend(&self) -> &'static str {
        "surrealdb"
    }

    async fn save(&self, research: &Research) -> Result<Research> {
        let db = self.pool.db();
        let stored: Option<ResearchDocument> = db
            .upsert((RESEARCH_TABLE, research.id().to_string()))
            .content(ResearchDocument::from(research))
            .await?;

        match stored {
            Some(doc) => Research::try_from(doc),
            None => Err(BenchError::Database(format!(
                "Failed to save research: {}",
                research.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Research>> {
        let db = self.pool.db();
        let result: Option<ResearchDocument> = db.select((RESEARCH_TABLE, id.to_string())).await?;
        result.map(Research::try_from).transpose()
    }

    async fn delete_all(&self) -> Result<()> {
        let db = self.pool.db();
        let deleted: Vec<ResearchDocument> = db.delete(RESEARCH_TABLE).await?;
        tracing::debug!("Deleted {} research documents", deleted.len());
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let db = self.pool.db();
        let rows: Vec<CountRow> = db
            .query("SELECT count() FROM type::table($table) GROUP ALL")
            .bind(("table", RESEARCH_TABLE))
            .await?
            .take(0)?;
        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool> {
        let db = self.pool.db();
        let result: Option<ResearchDocument> = db.delete((RESEARCH_TABLE, id.to_string())).await?;
        Ok(result.is_some())
    }

    async fn find_all(&self) -> Result<Vec<Research>> {
        let db = self.pool.db();
        let docs: Vec<ResearchDocument> = db.select(RESEARCH_TABLE).await?;
        docs.into_iter().map(Research::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trip() {
        let research = Research::seed();
        let doc = ResearchDocument::from(&research);
        assert_eq!(doc.research_id, research.id().to_string());

        let restored = Research::try_from(doc).unwrap();
        assert_eq!(restored, research);
        assert!(restored.same_fields(&research));
    }

    #[test]
    fn test_document_with_bad_id() {
        let mut doc = ResearchDocument::from(&Research::sample());
        doc.research_id = "not-a-uuid".into();
        assert!(matches!(
            Research::try_from(doc),
            Err(BenchError::Serialization(_))
        ));
    }
}
