//! 键值存储仓储
//!
//! 每条记录是一个哈希 `<keyspace>:<uuid>`，字段为 `id`、`name`、`wordLength`、`createdAt`；
//! 集合 `<keyspace>` 保存所有已写入的 id，`delete_all` 依据它批量删除。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, aio::MultiplexedConnection};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::config::KeyValueStoreConfig;
use crate::error::{BenchError, Result};
use crate::models::research::Research;
use crate::storage::repository::ResearchRepository;

const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_WORD_LENGTH: &str = "wordLength";
const FIELD_CREATED_AT: &str = "createdAt";

/// 键值存储仓储实现
#[derive(Clone)]
pub struct RedisResearchRepository {
    conn: MultiplexedConnection,
    keyspace: String,
}

impl RedisResearchRepository {
    /// 连接 Redis 并创建仓储
    pub async fn connect(config: &KeyValueStoreConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| BenchError::Config(format!("invalid redis url {}: {}", config.url, e)))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| BenchError::Connection(format!("{}: {}", config.url, e)))?;

        tracing::debug!(url = %config.url, keyspace = %config.keyspace, "Redis connected");

        Ok(Self::new(conn, config.keyspace.clone()))
    }

    pub fn new(conn: MultiplexedConnection, keyspace: impl Into<String>) -> Self {
        Self {
            conn,
            keyspace: keyspace.into(),
        }
    }

    fn record_key(&self, id: &Uuid) -> String {
        record_key(&self.keyspace, id)
    }

    fn record_key_str(&self, id: &str) -> String {
        format!("{}:{}", self.keyspace, id)
    }
}

/// 覆盖写入一条记录并登记到 id 集合
fn save_pipeline(keyspace: &str, research: &Research) -> redis::Pipeline {
    let key = record_key(keyspace, &research.id());
    let fields = encode_fields(research);

    let mut pipe = redis::pipe();
    // 旧字段先删掉，保证覆盖写入
    pipe.atomic()
        .del(&key)
        .ignore()
        .hset_multiple(&key, &fields)
        .ignore()
        .sadd(keyspace, research.id().to_string())
        .ignore();
    pipe
}

/// 删除集合里登记的所有记录以及集合本身
fn delete_all_pipeline(keyspace: &str, ids: &[String]) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for id in ids {
        pipe.del(format!("{}:{}", keyspace, id)).ignore();
    }
    pipe.del(keyspace).ignore();
    pipe
}

/// 记录哈希的键
pub fn record_key(keyspace: &str, id: &Uuid) -> String {
    format!("{}:{}", keyspace, id)
}

/// 把记录编码为哈希字段
pub fn encode_fields(research: &Research) -> Vec<(&'static str, String)> {
    vec![
        (FIELD_ID, research.id().to_string()),
        (FIELD_NAME, research.name().to_string()),
        (FIELD_WORD_LENGTH, research.word_length().to_string()),
        (FIELD_CREATED_AT, research.created_at_rfc3339()),
    ]
}

/// 从哈希字段解码记录，空哈希表示记录不存在
pub fn decode_fields(fields: HashMap<String, String>) -> Result<Option<Research>> {
    if fields.is_empty() {
        return Ok(None);
    }

    let field = |name: &str| {
        fields
            .get(name)
            .ok_or_else(|| BenchError::Serialization(format!("missing hash field: {}", name)))
    };

    let id = Uuid::parse_str(field(FIELD_ID)?)
        .map_err(|e| BenchError::Serialization(format!("invalid id: {}", e)))?;
    let word_length = field(FIELD_WORD_LENGTH)?
        .parse::<i32>()
        .map_err(|e| BenchError::Serialization(format!("invalid wordLength: {}", e)))?;
    let created_at = DateTime::parse_from_rfc3339(field(FIELD_CREATED_AT)?)
        .map_err(|e| BenchError::Serialization(format!("invalid createdAt: {}", e)))?
        .with_timezone(&Utc);

    Ok(Some(Research::from_parts(
        id,
        field(FIELD_NAME)?.as_str(),
        word_length,
        created_at,
    )))
}

#[async_trait]
impl ResearchRepository for RedisResearchRepository {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn save(&self, research: &Research) -> Result<Research> {
        let mut conn = self.conn.clone();
        let _: () = save_pipeline(&self.keyspace, research)
            .query_async(&mut conn)
            .await?;

        Ok(research.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Research>> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.record_key(id)).await?;
        decode_fields(fields)
    }

    async fn delete_all(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(&self.keyspace).await?;

        let _: () = delete_all_pipeline(&self.keyspace, &ids)
            .query_async(&mut conn)
            .await?;

        tracing::debug!("Deleted {} research hashes", ids.len());
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = conn.scard(&self.keyspace).await?;
        Ok(count)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool> {
        let mut conn = self.conn.clone();
        let (deleted, _removed): (u64, u64) = redis::pipe()
            .atomic()
            .del(self.record_key(id))
            .srem(&self.keyspace, id.to_string())
            .query_async(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn find_all(&self) -> Result<Vec<Research>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.smembers(&self.keyspace).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for id in &ids {
            pipe.hgetall(self.record_key_str(id));
        }
        let hashes: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

        let mut records = Vec::with_capacity(hashes.len());
        for fields in hashes {
            if let Some(research) = decode_fields(fields)? {
                records.push(research);
            }
        }
        Ok(records)
    }
}
