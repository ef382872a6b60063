//! research-bench - 研究记录仓储与延迟基准测试
//!
//! 为同一种研究记录提供文档数据库（SurrealDB）与键值存储（Redis）两种持久化实现，
//! 并比较构造、模拟仓储调用与真实仓储调用的平均耗时。

pub mod bench;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
