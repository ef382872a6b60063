use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// 文档数据库（SurrealDB）
    #[serde(alias = "surrealdb")]
    Document,
    /// 键值存储（Redis）
    #[serde(alias = "redis")]
    KeyValue,
    /// 进程内存储
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Document => write!(f, "document"),
            BackendKind::KeyValue => write!(f, "key_value"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

/// 文档数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentStoreConfig {
    /// SurrealDB 连接地址（ws://、http:// 或 mem://）
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过登录）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 键值存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValueStoreConfig {
    /// Redis 地址
    pub url: String,
    /// 记录键前缀，同时作为索引集合的键
    pub keyspace: String,
}

impl Default for KeyValueStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            keyspace: "Research".into(),
        }
    }
}

/// 基准测试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// 依次测试的后端
    pub backends: Vec<BackendKind>,
    /// 只运行名称包含任一子串的基准（为空时全部运行）
    pub include: Vec<String>,
    /// 出错时中止整个运行
    pub fail_on_error: bool,
    /// 覆盖全部基准的预热迭代次数
    pub warmup_iterations: Option<u32>,
    /// 覆盖全部基准的测量迭代次数
    pub measurement_iterations: Option<u32>,
    /// 覆盖全部基准的单次迭代时长（毫秒）
    pub iteration_time_ms: Option<u64>,
    /// JSON 报告输出路径
    pub report_path: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            backends: vec![BackendKind::Document, BackendKind::KeyValue],
            include: Vec::new(),
            fail_on_error: true,
            warmup_iterations: None,
            measurement_iterations: None,
            iteration_time_ms: None,
            report_path: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 文档数据库配置
    pub document: DocumentStoreConfig,
    /// 键值存储配置
    pub key_value: KeyValueStoreConfig,
    /// 基准测试配置
    pub benchmark: BenchmarkConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            document: DocumentStoreConfig {
                url: "ws://localhost:8000".into(),
                namespace: "research".into(),
                database: "bench".into(),
                username: "root".into(),
                password: "root".into(),
            },
            key_value: KeyValueStoreConfig {
                url: "redis://localhost:6379".into(),
                keyspace: "Research".into(),
            },
            benchmark: BenchmarkConfig::default(),
            logging: LoggingConfig {
                level: "info".into(),
                structured: false,
                log_dir: None,
            },
            environment: "development".into(),
        }
    }

    /// 只使用内存存储的快速配置
    pub fn in_memory() -> Self {
        let mut config = Self::development();
        config.environment = "test".into();
        config.benchmark.backends = vec![BackendKind::Memory];
        config
    }
}
