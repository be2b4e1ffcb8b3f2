use crate::common::{DomainError, DomainResult};
use crate::domains::benchmark::{BenchmarkReport, ReportSink, SizeSweepReport};
use std::io::Write;

/// Pretty-printed JSON of the whole report, records included.
pub struct JsonReportWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReportWriter<W> {
    fn publish(&mut self, report: &BenchmarkReport) -> DomainResult<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out).map_err(io_error)
    }

    fn publish_sweep(&mut self, report: &SizeSweepReport) -> DomainResult<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out).map_err(io_error)
    }
}

/// One line per strategy with the summary columns only.
pub struct TableReportWriter<W: Write> {
    out: W,
}

impl<W: Write> TableReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TableReportWriter<W> {
    fn publish(&mut self, report: &BenchmarkReport) -> DomainResult<()> {
        let board = &report.board;
        let header = match &board.map {
            Some(map) => format!("map {} ({}x{})", map, board.size, board.size),
            None => format!(
                "board {}x{}, {} islands of {}-{} cells",
                board.size, board.size, board.num_islands, board.min_island_size, board.max_island_size
            ),
        };
        let mut text = format!(
            "run {} | {} | {} trials, step cap {}\n",
            report.run_id, header, report.trials, report.step_cap
        );
        text.push_str(&format!(
            "{:<22} {:>7} {:>10} {:>10} {:>8} {:>12} {:>12}\n",
            "strategy", "solved", "mean ms", "mean ticks", "fastest", "mean h", "median h"
        ));
        for s in &report.summaries {
            text.push_str(&format!(
                "{:<22} {:>7} {:>10} {:>10} {:>8} {:>12.1} {:>12.1}\n",
                s.strategy.name(),
                format!("{}/{}", s.problems_solved, s.trials),
                fmt_optional(s.mean_solved_ms, 3),
                fmt_optional(s.mean_solved_ticks, 1),
                s.fastest_solutions,
                s.mean_heuristic_calls,
                s.median_heuristic_calls,
            ));
        }
        self.out.write_all(text.as_bytes()).map_err(io_error)
    }

    /// One line per board size and strategy, with the solved-time band.
    fn publish_sweep(&mut self, report: &SizeSweepReport) -> DomainResult<()> {
        let mut text = format!(
            "run {} | size sweep | {} trials per size, step cap {}\n",
            report.run_id, report.trials, report.step_cap
        );
        text.push_str(&format!(
            "{:>6} {:<22} {:>7} {:>10} {:>10} {:>10}\n",
            "size", "strategy", "solved", "mean ms", "band low", "band high"
        ));
        for point in &report.points {
            for s in &point.summaries {
                let band = s.solved_ms_band();
                text.push_str(&format!(
                    "{:>6} {:<22} {:>7} {:>10} {:>10} {:>10}\n",
                    point.board.size,
                    s.strategy.name(),
                    format!("{}/{}", s.problems_solved, s.trials),
                    fmt_optional(s.mean_solved_ms, 3),
                    fmt_optional(band.map(|(low, _)| low), 3),
                    fmt_optional(band.map(|(_, high)| high), 3),
                ));
            }
        }
        self.out.write_all(text.as_bytes()).map_err(io_error)
    }
}

fn fmt_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

fn io_error(e: std::io::Error) -> DomainError {
    DomainError::InfrastructureError(format!("report write failed: {}", e))
}
