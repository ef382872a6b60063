// Shared helpers for integration tests

#![allow(dead_code)]

use research_bench::config::config::{AppConfig, BackendKind};
use research_bench::storage::factory::StorageFactory;
use research_bench::storage::repository::ResearchRepository;
use std::sync::Arc;

/// Config whose document store is an embedded in-memory SurrealDB.
pub fn embedded_config() -> AppConfig {
    let mut config = AppConfig::in_memory();
    config.document.url = "mem://".into();
    config.document.username.clear();
    config.document.password.clear();
    config
}

pub async fn repository(backend: BackendKind) -> Arc<dyn ResearchRepository> {
    StorageFactory::create(&embedded_config(), backend)
        .await
        .expect("failed to create repository")
}

/// Redis URL for the ignored key-value tests.
pub fn redis_url() -> Option<String> {
    std::env::var("RESEARCH_BENCH_REDIS_URL").ok()
}
