use crate::config::config::{AppConfig, BackendKind};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，嵌套键用 `__` 分隔，例如 `RESEARCH_BENCH_DOCUMENT__URL`
pub const ENV_PREFIX: &str = "RESEARCH_BENCH_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 开发环境默认值
    /// 2. ./research-bench.toml
    /// 3. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        let bench = &config.benchmark;

        if bench.backends.is_empty() {
            return Err(ConfigValidationError::NoBackends);
        }

        for backend in &bench.backends {
            match backend {
                BackendKind::Document if config.document.url.is_empty() => {
                    return Err(ConfigValidationError::MissingUrl(*backend));
                }
                BackendKind::KeyValue if config.key_value.url.is_empty() => {
                    return Err(ConfigValidationError::MissingUrl(*backend));
                }
                _ => {}
            }
        }

        if bench.backends.contains(&BackendKind::KeyValue) && config.key_value.keyspace.is_empty()
        {
            return Err(ConfigValidationError::EmptyKeyspace);
        }

        if bench.warmup_iterations == Some(0) || bench.measurement_iterations == Some(0) {
            return Err(ConfigValidationError::InvalidIterations);
        }

        if bench.iteration_time_ms == Some(0) {
            return Err(ConfigValidationError::InvalidIterationTime);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("未配置任何存储后端")]
    NoBackends,

    #[error("存储后端 {0} 的连接 URL 未配置")]
    MissingUrl(BackendKind),

    #[error("键值存储的 keyspace 不能为空")]
    EmptyKeyspace,

    #[error("迭代次数无效，必须大于 0")]
    InvalidIterations,

    #[error("迭代时长无效，必须大于 0")]
    InvalidIterationTime,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("research-bench.toml")
}
