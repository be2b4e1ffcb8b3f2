use super::report::{BenchmarkReport, SizeSweepReport};
use crate::common::DomainResult;
use serde::{Deserialize, Serialize};

/// Port for publishing a finished benchmark run (stdout, files, ...).
pub trait ReportSink {
    fn publish(&mut self, report: &BenchmarkReport) -> DomainResult<()>;
    fn publish_sweep(&mut self, report: &SizeSweepReport) -> DomainResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}
