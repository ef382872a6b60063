//! 研究记录数据模型
//!
//! 基准测试唯一的实体类型。标识符在构造时生成，之后不再改变。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// 基准测试初始化时写入存储的记录名称
pub const SEED_NAME: &str = "Very Cool Research";
/// 基准测试初始化时写入存储的记录字数
pub const SEED_WORD_LENGTH: i32 = 20000;
/// 计时迭代中临时构造的记录名称
pub const SAMPLE_NAME: &str = "Cool Research";
/// 计时迭代中临时构造的记录字数
pub const SAMPLE_WORD_LENGTH: i32 = 5000;

/// 研究记录
///
/// 相等性只比较 `id`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    /// 记录唯一标识
    id: Uuid,

    /// 名称
    name: String,

    /// 字数
    word_length: i32,

    /// 创建时间
    created_at: DateTime<Utc>,
}

impl Research {
    /// 创建新记录，生成新的标识并记录当前时间
    pub fn new(name: impl Into<String>, word_length: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            word_length,
            created_at: Utc::now(),
        }
    }

    /// 基准测试初始化使用的种子记录
    pub fn seed() -> Self {
        Self::new(SEED_NAME, SEED_WORD_LENGTH)
    }

    /// 计时迭代使用的临时记录
    pub fn sample() -> Self {
        Self::new(SAMPLE_NAME, SAMPLE_WORD_LENGTH)
    }

    /// 从存储中的字段还原记录
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        word_length: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            word_length,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn word_length(&self) -> i32 {
        self.word_length
    }

    pub fn set_word_length(&mut self, word_length: i32) {
        self.word_length = word_length;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 存储用的时间字符串（纳秒精度，保证往返一致）
    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    /// 比较除标识外的全部字段
    pub fn same_fields(&self, other: &Research) -> bool {
        self.name == other.name
            && self.word_length == other.word_length
            && self.created_at == other.created_at
    }
}

impl PartialEq for Research {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Research {}

impl Hash for Research {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
