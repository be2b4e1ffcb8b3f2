use crate::common::{DomainError, DomainResult};
use crate::domains::benchmark::ReportFormat;
use crate::domains::search::{SearchParams, Strategy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub benchmark: BenchmarkConfig,
    pub search: SearchParams,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: usize,
    pub num_islands: usize,
    pub min_island_size: usize,
    pub max_island_size: usize,
    /// ASCII map name; when set, every trial replays this board instead of generating one.
    pub map: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub trials: usize,
    pub step_cap: u64,
    pub seed: u64,
    pub strategies: Vec<Strategy>,
    pub report_format: ReportFormat,
    /// Board sizes for the scaling sweep; empty runs the single-board benchmark.
    pub sweep_sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    /// `EnvFilter` directive used when RUST_LOG is unset.
    pub filter: String,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let invalid = |reason: &str| {
            Err(DomainError::InvalidCommand {
                reason: reason.to_string(),
            })
        };
        if self.board.map.is_none() && self.board.size < 2 {
            return invalid("board.size must be at least 2");
        }
        if self.board.min_island_size > self.board.max_island_size {
            return invalid("board.min_island_size must not exceed board.max_island_size");
        }
        if self.benchmark.strategies.is_empty() {
            return invalid("benchmark.strategies must name at least one strategy");
        }
        if self.search.initial_temperature <= 0.0 {
            return invalid("search.initial_temperature must be positive");
        }
        if self.search.initial_radius == 0 {
            return invalid("search.initial_radius must be at least 1");
        }
        if self.search.initial_radius > self.search.radius_cap {
            return invalid("search.initial_radius must not exceed search.radius_cap");
        }
        if self.benchmark.sweep_sizes.iter().any(|&n| n < 2) {
            return invalid("benchmark.sweep_sizes must all be at least 2");
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 100,
            num_islands: 200,
            min_island_size: 10,
            max_island_size: 30,
            map: None,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            step_cap: 10_000,
            seed: 42,
            strategies: Strategy::ALL.to_vec(),
            report_format: ReportFormat::Table,
            sweep_sizes: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
