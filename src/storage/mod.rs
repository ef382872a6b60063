//! 存储层模块
//!
//! 提供研究记录的持久化，支持 SurrealDB（文档）与 Redis（键值）。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

#[cfg(feature = "redis")]
pub mod redis;

pub mod factory;
pub mod memory;
pub mod mock;
pub mod repository;
