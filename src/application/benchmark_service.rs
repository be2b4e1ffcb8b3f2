// Benchmark Service - trials over shared boards, one strategy at a time
use crate::adapters::outbound::init_noop_logger;
use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::{BenchmarkConfig, BoardConfig, Config};
use crate::domains::benchmark::{
    summarize_trials, BenchmarkReport, BoardParameters, SizeSweepPoint, SizeSweepReport, TrialRecord,
};
use crate::domains::grid::{pick_endpoints, FixedMap, Grid, MapSource, Position, TerrainGenerator, TerrainSource};
use crate::domains::logger::DynLogger;
use crate::domains::search::{SearchAgent, SearchParams, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::arena::Arena;

pub struct BenchmarkService {
    terrain: Box<dyn TerrainSource>,
    board: BoardParameters,
    settings: BenchmarkConfig,
    params: SearchParams,
    logger: DynLogger,
}

impl BenchmarkService {
    pub fn new(
        terrain: Box<dyn TerrainSource>,
        board: BoardParameters,
        settings: BenchmarkConfig,
        params: SearchParams,
        logger: DynLogger,
    ) -> Self {
        Self {
            terrain,
            board,
            settings,
            params,
            logger,
        }
    }

    /// Replays `board.map` through `maps` when configured, otherwise
    /// generates fresh islands every trial.
    pub fn from_config(config: &Config, maps: &dyn MapSource, logger: DynLogger) -> ApplicationResult<Self> {
        config.validate()?;
        let BoardConfig {
            size,
            num_islands,
            min_island_size,
            max_island_size,
            map,
        } = config.board.clone();

        let (terrain, size) = match &map {
            Some(name) => {
                let grid = maps.load_map(name)?;
                logger.info(&format!("Loaded map {} ({}x{})", name, grid.size(), grid.size()));
                let size = grid.size();
                (Box::new(FixedMap::new(grid)) as Box<dyn TerrainSource>, size)
            }
            None => {
                let generator = TerrainGenerator::new(size, num_islands, min_island_size, max_island_size);
                (Box::new(generator) as Box<dyn TerrainSource>, size)
            }
        };

        let board = BoardParameters {
            size,
            num_islands,
            min_island_size,
            max_island_size,
            map,
        };
        Ok(Self::new(
            terrain,
            board,
            config.benchmark.clone(),
            config.search.clone(),
            logger,
        ))
    }

    pub fn run(&mut self) -> ApplicationResult<BenchmarkReport> {
        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        self.logger.info(&format!(
            "Running {} trials of {} strategies (step cap {})",
            self.settings.trials,
            self.settings.strategies.len(),
            self.settings.step_cap
        ));

        let records = collect_records(
            &self.settings,
            &self.params,
            &self.logger,
            self.terrain.as_mut(),
            &mut rng,
        )?;

        Ok(BenchmarkReport::from_records(
            self.board.clone(),
            self.settings.trials,
            self.settings.step_cap,
            &self.settings.strategies,
            records,
        ))
    }

    /// Repeats the benchmark on generated boards of each size in `sizes`,
    /// scaling the island count with the board area. The configured board
    /// and map are ignored; one RNG seeded from the settings drives every size.
    pub fn run_size_sweep(&self, sizes: &[usize]) -> ApplicationResult<SizeSweepReport> {
        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        let mut points = Vec::with_capacity(sizes.len());

        for &size in sizes {
            let mut terrain = TerrainGenerator::scaled(size);
            self.logger.info(&format!(
                "Sweep size {}x{}: {} islands, {} trials",
                size, size, terrain.num_islands, self.settings.trials
            ));
            let records = collect_records(&self.settings, &self.params, &self.logger, &mut terrain, &mut rng)?;

            points.push(SizeSweepPoint {
                board: BoardParameters {
                    size,
                    num_islands: terrain.num_islands,
                    min_island_size: terrain.min_island_size,
                    max_island_size: terrain.max_island_size,
                    map: None,
                },
                summaries: summarize_trials(self.settings.trials, &self.settings.strategies, &records),
            });
        }

        Ok(SizeSweepReport::new(self.settings.trials, self.settings.step_cap, points))
    }

    /// Runs one strategy alone on `grid` until it reaches its goal or the
    /// step cap. Only the ticks themselves are timed.
    pub fn run_trial(
        &self,
        trial: usize,
        strategy: Strategy,
        grid: Grid,
        start: Position,
        goal: Position,
        seed: u64,
    ) -> DomainResult<TrialRecord> {
        play_trial(&self.params, self.settings.step_cap, trial, strategy, grid, start, goal, seed)
    }
}

/// Every configured strategy on `settings.trials` boards drawn from `terrain`.
fn collect_records(
    settings: &BenchmarkConfig,
    params: &SearchParams,
    logger: &DynLogger,
    terrain: &mut dyn TerrainSource,
    rng: &mut StdRng,
) -> ApplicationResult<Vec<TrialRecord>> {
    let mut records = Vec::with_capacity(settings.trials * settings.strategies.len());

    for trial in 0..settings.trials {
        let grid = terrain.next_grid(rng)?;
        let (start, goal) = pick_endpoints(&grid, rng)?;
        tracing::debug!(trial, start = %start, goal = %goal, obstacles = grid.obstacle_count(), "trial board ready");

        let mut outcomes = Vec::with_capacity(settings.strategies.len());
        for &strategy in &settings.strategies {
            let seed = rng.gen::<u64>();
            let record = play_trial(params, settings.step_cap, trial, strategy, grid.clone(), start, goal, seed)?;
            outcomes.push(format!(
                "{}={}",
                strategy.name(),
                if record.solved { format!("{:.3}ms", record.elapsed_ms) } else { "unsolved".to_string() }
            ));
            records.push(record);
        }
        logger.info(&format!("Trial {}: {}", trial, outcomes.join(", ")));
    }
    Ok(records)
}

#[allow(clippy::too_many_arguments)]
fn play_trial(
    params: &SearchParams,
    step_cap: u64,
    trial: usize,
    strategy: Strategy,
    grid: Grid,
    start: Position,
    goal: Position,
    seed: u64,
) -> DomainResult<TrialRecord> {
    let mut arena = Arena::new(grid, init_noop_logger());
    let id = arena.spawn(strategy, start, goal, params, seed)?;

    let started = Instant::now();
    let ticks = arena.run_until_settled(step_cap);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let agent = arena
        .agent(id)
        .ok_or(DomainError::AgentNotFound { id })?;
    if let Some(projection) = arena.projection(id) {
        tracing::debug!(
            trial,
            strategy = strategy.name(),
            moves = projection.moves,
            stalled = projection.stalled_ticks,
            "trial finished"
        );
    }

    Ok(TrialRecord {
        trial,
        strategy,
        solved: agent.is_goal(),
        ticks,
        elapsed_ms,
        heuristic_calls: agent.heuristic_calls(),
    })
}
