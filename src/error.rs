//! 错误处理模块
//!
//! 定义仓储层与基准测试框架共用的错误类型。

use thiserror::Error;

/// 基准测试错误类型
#[derive(Error, Debug)]
pub enum BenchError {
    /// 文档数据库错误
    #[error("数据库错误: {0}")]
    Database(String),

    /// 键值存储错误
    #[error("键值存储错误: {0}")]
    KeyValue(String),

    /// 连接错误
    #[error("连接错误: {0}")]
    Connection(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 模拟仓储使用错误
    #[error("模拟仓储错误: {0}")]
    Mock(String),

    /// 基准测试流程错误
    #[error("基准测试错误: {0}")]
    Benchmark(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for BenchError {
    fn from(e: std::io::Error) -> Self {
        BenchError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(e: serde_json::Error) -> Self {
        BenchError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for BenchError {
    fn from(e: figment::Error) -> Self {
        BenchError::Config(e.to_string())
    }
}

#[cfg(feature = "surrealdb")]
impl From<surrealdb::Error> for BenchError {
    fn from(e: surrealdb::Error) -> Self {
        BenchError::Database(e.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for BenchError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_refusal() || e.is_connection_dropped() {
            BenchError::Connection(e.to_string())
        } else {
            BenchError::KeyValue(e.to_string())
        }
    }
}

impl BenchError {
    /// 是否为后端不可用类错误
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, BenchError::Connection(_))
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: BenchError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, BenchError::Io(_)));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: BenchError = parse.unwrap_err().into();
        assert!(matches!(err, BenchError::Serialization(_)));
    }

    #[test]
    fn test_backend_unavailable() {
        assert!(BenchError::Connection("refused".into()).is_backend_unavailable());
        assert!(!BenchError::Mock("closed".into()).is_backend_unavailable());
    }
}
