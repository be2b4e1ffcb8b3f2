use search_arena::adapters::inbound::FilesystemMapSource;
use search_arena::adapters::outbound::{init_combined_logger, JsonReportWriter, TableReportWriter};
use search_arena::application::BenchmarkService;
use search_arena::domains::benchmark::{ReportFormat, ReportSink};
use search_arena::common::ApplicationError;
use search_arena::Config;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());

    let (config, load_error) = match Config::from_file(&config_path).await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // The file sink installs the global `log` logger, so it goes first.
    let level = config.logging.filter.parse().unwrap_or(log::LevelFilter::Info);
    let logger = init_combined_logger(config.logging.file.as_deref(), level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match load_error {
        None => info!("Loaded configuration from {}", config_path),
        Some(e) => warn!("Could not load {} ({}); using defaults", config_path, e),
    }

    let maps = FilesystemMapSource::new(None);
    let mut service = BenchmarkService::from_config(&config, &maps, logger.clone())?;
    let stdout = io::stdout();

    if !config.benchmark.sweep_sizes.is_empty() {
        let report = service.run_size_sweep(&config.benchmark.sweep_sizes)?;
        let published = match config.benchmark.report_format {
            ReportFormat::Json => JsonReportWriter::new(stdout.lock()).publish_sweep(&report),
            ReportFormat::Table => TableReportWriter::new(stdout.lock()).publish_sweep(&report),
        };
        published.map_err(|e| ApplicationError::Report(e.to_string()))?;
        logger.info(&format!("Size sweep {} finished", report.run_id));
        return Ok(());
    }

    let report = service.run()?;
    let published = match config.benchmark.report_format {
        ReportFormat::Json => JsonReportWriter::new(stdout.lock()).publish(&report),
        ReportFormat::Table => TableReportWriter::new(stdout.lock()).publish(&report),
    };
    published.map_err(|e| ApplicationError::Report(e.to_string()))?;

    logger.info(&format!("Benchmark run {} finished", report.run_id));
    Ok(())
}
