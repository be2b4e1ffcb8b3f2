use crate::domains::search::Strategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One strategy's run on one trial board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub strategy: Strategy,
    pub solved: bool,
    pub ticks: u64,
    pub elapsed_ms: f64,
    pub heuristic_calls: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardParameters {
    pub size: usize,
    pub num_islands: usize,
    pub min_island_size: usize,
    pub max_island_size: usize,
    pub map: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub trials: usize,
    pub problems_solved: usize,
    /// Mean wall-clock time over solved trials only.
    pub mean_solved_ms: Option<f64>,
    /// Sample standard deviation of the same times; needs two solved trials.
    pub stdev_solved_ms: Option<f64>,
    pub mean_solved_ticks: Option<f64>,
    pub fastest_solutions: usize,
    pub mean_heuristic_calls: f64,
    pub median_heuristic_calls: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub board: BoardParameters,
    pub trials: usize,
    pub step_cap: u64,
    pub summaries: Vec<StrategySummary>,
    pub records: Vec<TrialRecord>,
}

impl BenchmarkReport {
    pub fn from_records(
        board: BoardParameters,
        trials: usize,
        step_cap: u64,
        strategies: &[Strategy],
        records: Vec<TrialRecord>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            board,
            trials,
            step_cap,
            summaries: summarize_trials(trials, strategies, &records),
            records,
        }
    }

    pub fn summary(&self, strategy: Strategy) -> Option<&StrategySummary> {
        self.summaries.iter().find(|s| s.strategy == strategy)
    }
}

/// Width of the solved-time band, as a fraction of one standard deviation.
pub const BAND_STDEV_FRACTION: f64 = 0.2;

impl StrategySummary {
    /// `mean ± 0.2·stdev` of the solved times, low end first.
    pub fn solved_ms_band(&self) -> Option<(f64, f64)> {
        let mean = self.mean_solved_ms?;
        let spread = self.stdev_solved_ms? * BAND_STDEV_FRACTION;
        Some((mean - spread, mean + spread))
    }
}

/// Summaries for one board size of a scaling sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeSweepPoint {
    pub board: BoardParameters,
    pub summaries: Vec<StrategySummary>,
}

impl SizeSweepPoint {
    pub fn summary(&self, strategy: Strategy) -> Option<&StrategySummary> {
        self.summaries.iter().find(|s| s.strategy == strategy)
    }
}

/// Same trials per board size, growing the board. Raw records are not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeSweepReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub trials: usize,
    pub step_cap: u64,
    pub points: Vec<SizeSweepPoint>,
}

impl SizeSweepReport {
    pub fn new(trials: usize, step_cap: u64, points: Vec<SizeSweepPoint>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            trials,
            step_cap,
            points,
        }
    }
}

/// One summary per strategy, in the order given.
pub fn summarize_trials(trials: usize, strategies: &[Strategy], records: &[TrialRecord]) -> Vec<StrategySummary> {
    let fastest = fastest_per_trial(trials, strategies, records);
    strategies
        .iter()
        .map(|strategy| summarize(*strategy, records, &fastest))
        .collect()
}

/// Winner of each trial: the strictly fastest solved run. Earlier strategies
/// in `strategies` keep ties.
fn fastest_per_trial(trials: usize, strategies: &[Strategy], records: &[TrialRecord]) -> Vec<Option<Strategy>> {
    (0..trials)
        .map(|trial| {
            let mut best: Option<(Strategy, f64)> = None;
            for strategy in strategies {
                let Some(record) = records
                    .iter()
                    .find(|r| r.trial == trial && r.strategy == *strategy && r.solved)
                else {
                    continue;
                };
                if best.map_or(true, |(_, ms)| record.elapsed_ms < ms) {
                    best = Some((*strategy, record.elapsed_ms));
                }
            }
            best.map(|(strategy, _)| strategy)
        })
        .collect()
}

fn summarize(strategy: Strategy, records: &[TrialRecord], fastest: &[Option<Strategy>]) -> StrategySummary {
    let own: Vec<&TrialRecord> = records.iter().filter(|r| r.strategy == strategy).collect();
    let solved: Vec<&TrialRecord> = own.iter().copied().filter(|r| r.solved).collect();
    let calls: Vec<f64> = own.iter().map(|r| r.heuristic_calls as f64).collect();
    let times: Vec<f64> = solved.iter().map(|r| r.elapsed_ms).collect();

    StrategySummary {
        strategy,
        trials: own.len(),
        problems_solved: solved.len(),
        mean_solved_ms: mean(times.iter().copied()),
        stdev_solved_ms: stdev(&times),
        mean_solved_ticks: mean(solved.iter().map(|r| r.ticks as f64)),
        fastest_solutions: fastest.iter().filter(|w| **w == Some(strategy)).count(),
        mean_heuristic_calls: mean(calls.iter().copied()).unwrap_or(0.0),
        median_heuristic_calls: median(calls).unwrap_or(0.0),
    }
}

pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Sample standard deviation (`n - 1` denominator).
pub fn stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let centre = mean(values.iter().copied())?;
    let squares: f64 = values.iter().map(|v| (v - centre).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}
