use anyhow::Context;
use research_bench::bench::{BenchmarkReport, BenchmarkRunner, RunnerOptions};
use research_bench::config::loader::ConfigLoader;
use research_bench::logging::init_tracing;
use research_bench::storage::factory::StorageFactory;
use tracing::info;

// 单线程运行，所有计时调用按顺序执行
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _guard = init_tracing(&config.logging)?;
    ConfigLoader::validate(&config)?;
    info!(
        environment = %config.environment,
        backends = ?config.benchmark.backends,
        "Configuration loaded successfully"
    );

    let runner = BenchmarkRunner::new(RunnerOptions::from_config(&config.benchmark));
    let mut reports = Vec::with_capacity(config.benchmark.backends.len());

    for backend in &config.benchmark.backends {
        let repository = StorageFactory::create(&config, *backend)
            .await
            .with_context(|| format!("failed to open {} backend", backend))?;
        StorageFactory::health_check(repository.as_ref())
            .await
            .with_context(|| format!("{} backend failed its health check", backend))?;
        info!("Repository initialized: {}", repository.backend());

        let report = runner
            .run(repository)
            .await
            .with_context(|| format!("benchmark run against {} failed", backend))?;
        println!("{}", report);
        reports.push(report);
    }

    if let Some(path) = &config.benchmark.report_path {
        BenchmarkReport::write_json(&reports, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
