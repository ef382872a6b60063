//! 日志初始化
//!
//! `RUST_LOG` 优先于配置中的日志级别；配置了日志目录时同时写入按天滚动的日志文件。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::LoggingConfig;
use crate::error::{BenchError, Result};

const DEFAULT_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "research-bench.log";

/// 构造日志过滤器
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let level = if config.level.is_empty() {
        DEFAULT_LEVEL
    } else {
        config.level.as_str()
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// 初始化全局日志
///
/// 返回的 guard 需要在进程结束前一直持有，否则文件日志可能丢失。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = if config.structured {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let (file, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| BenchError::Config(format!("logging already initialized: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();

        let first = init_tracing(&config);
        assert!(first.is_ok());
        assert!(first.unwrap().is_none());
        assert!(matches!(init_tracing(&config), Err(BenchError::Config(_))));
    }
}
