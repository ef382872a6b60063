//! 配置管理模块
//!
//! 提供存储后端、基准测试与日志配置的加载，支持 TOML 配置文件和环境变量覆盖。

pub mod config;
pub mod loader;
