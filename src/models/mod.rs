//! 核心数据模型模块
//!
//! 定义基准测试使用的研究记录。

pub mod research;

pub use research::*;
