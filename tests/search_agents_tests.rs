use search_arena::adapters::outbound::init_noop_logger;
use search_arena::application::Arena;
use search_arena::domains::grid::{AgentId, CellState, Grid, Position};
use search_arena::domains::search::{
    acceptance_probability, weighted_indices, Agent, AnnealingAgent, SearchAgent, SearchEvent, SearchParams, Strategy,
};

fn arena_with(map: &str) -> Arena {
    Arena::new(Grid::from_ascii(map).unwrap(), init_noop_logger())
}

fn open_arena(size: usize) -> Arena {
    Arena::new(Grid::new(size), init_noop_logger())
}

fn spawn(arena: &mut Arena, strategy: Strategy, start: (usize, usize), goal: (usize, usize)) -> AgentId {
    arena
        .spawn(strategy, start.into(), goal.into(), &SearchParams::default(), 7)
        .unwrap()
}

#[test]
fn heuristic_is_zero_at_goal_and_non_negative_elsewhere() {
    let params = SearchParams::default();
    let goal = Position::new(4, 4);
    for strategy in Strategy::ALL {
        let agent = strategy.spawn(AgentId(0), Position::new(0, 0), goal, &params, 1);
        assert!(agent.heuristic(None) >= 0.0, "{}", strategy);
        assert_eq!(agent.heuristic(Some(goal)), 0.0, "{}", strategy);
        assert!((agent.heuristic(Some(Position::new(1, 4))) - 3.0).abs() < 1e-12);
        assert_eq!(agent.heuristic_calls(), 3);
        assert_eq!(agent.name(), strategy.name());
    }
}

#[test]
fn best_first_walks_the_diagonal_of_an_open_board() {
    let mut arena = open_arena(5);
    let id = spawn(&mut arena, Strategy::BestFirst, (0, 0), (4, 4));

    let ticks = arena.run_until_settled(50);

    assert_eq!(ticks, 4);
    let agent = arena.agent(id).unwrap();
    assert!(agent.is_goal());
    assert_eq!(agent.position(), Position::new(4, 4));
    assert_eq!(arena.projection(id).unwrap().moves, 4);
    assert!(arena.projection(id).unwrap().reached_goal);
}

#[test]
fn best_first_never_queues_a_searched_cell() {
    let mut arena = arena_with(
        "......
         .####.
         .#....
         .#.##.
         .#....
         ......",
    );
    let id = spawn(&mut arena, Strategy::BestFirst, (0, 0), (4, 4));

    for _ in 0..40 {
        arena.tick_all();
        let Some(Agent::BestFirst(agent)) = arena.agent(id) else {
            panic!("expected a best-first agent");
        };
        for cell in agent.frontier() {
            assert!(!agent.searched().contains(cell), "{} is both queued and searched", cell);
        }
        if agent.is_goal() {
            break;
        }
    }
    assert!(arena.all_at_goal());
}

#[test]
fn greedy_only_ever_moves_closer() {
    let mut arena = open_arena(5);
    let id = spawn(&mut arena, Strategy::Greedy, (0, 0), (4, 4));
    let goal = Position::new(4, 4);

    let mut last = Position::new(0, 0).distance(&goal);
    for _ in 0..4 {
        arena.tick_all();
        let now = arena.agent(id).unwrap().position().distance(&goal);
        assert!(now < last);
        last = now;
    }
    assert!(arena.agent(id).unwrap().is_goal());
}

#[test]
fn greedy_stalls_for_good_at_a_local_optimum() {
    let mut arena = arena_with(
        "...
         ###
         ...",
    );
    let id = spawn(&mut arena, Strategy::Greedy, (0, 0), (2, 2));

    arena.tick_all();
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(0, 1));
    arena.tick_all();
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(0, 2));

    let executed = arena.run_until_settled(10);
    assert_eq!(executed, 10);

    let Some(Agent::Greedy(agent)) = arena.agent(id) else {
        panic!("expected a greedy agent");
    };
    assert!(agent.is_stalled());
    assert!(!agent.is_goal());
    assert_eq!(agent.position(), Position::new(0, 2));
    assert_eq!(arena.projection(id).unwrap().stalled_ticks, 1);
}

#[test]
fn greedy_walks_through_a_frontier_mark() {
    let mut arena = arena_with(
        "...
         .*.
         ...",
    );
    let id = spawn(&mut arena, Strategy::Greedy, (0, 0), (2, 2));

    arena.tick_all();
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(1, 1));
    arena.tick_all();
    assert!(arena.agent(id).unwrap().is_goal());
}

#[test]
fn adaptive_radius_jumps_two_cells_per_tick_on_open_ground() {
    let mut arena = open_arena(5);
    let id = spawn(&mut arena, Strategy::AdaptiveRadius, (0, 0), (4, 4));

    arena.tick_all();
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(2, 2));
    arena.tick_all();
    assert!(arena.agent(id).unwrap().is_goal());

    let Some(Agent::AdaptiveRadius(agent)) = arena.agent(id) else {
        panic!("expected an adaptive-radius agent");
    };
    assert_eq!(agent.radius(), 2);
}

#[test]
fn adaptive_radius_widens_until_it_sees_around_a_wall() {
    let mut arena = arena_with(
        ".....
         .....
         ###..
         .....
         .....",
    );
    let params = SearchParams {
        initial_radius: 1,
        ..SearchParams::default()
    };
    let id = arena
        .spawn(Strategy::AdaptiveRadius, Position::new(1, 0), Position::new(4, 0), &params, 0)
        .unwrap();

    let mut radii = Vec::new();
    for _ in 0..3 {
        arena.tick_all();
        let Some(Agent::AdaptiveRadius(agent)) = arena.agent(id) else {
            panic!("expected an adaptive-radius agent");
        };
        radii.push(agent.radius());
    }
    assert_eq!(radii, vec![2, 3, 4]);
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(3, 2));

    arena.tick_all();
    assert!(arena.agent(id).unwrap().is_goal());
    let projection = arena.projection(id).unwrap();
    assert_eq!(projection.radius_widenings, 3);
    assert_eq!(projection.stalled_ticks, 2);
    assert!(!projection.radius_capped);
}

#[test]
fn adaptive_radius_takes_the_first_improving_cell_after_widening() {
    let mut arena = arena_with(
        ".##.#.
         .#....
         ..###.
         .###..
         .####.
         .##..#",
    );
    let params = SearchParams {
        initial_radius: 1,
        ..SearchParams::default()
    };
    let id = arena
        .spawn(Strategy::AdaptiveRadius, Position::new(3, 4), Position::new(1, 3), &params, 0)
        .unwrap();

    arena.tick_all();

    // (1, 4) is closer to the goal, but (1, 5) is discovered first on the widened scan.
    assert_eq!(arena.agent(id).unwrap().position(), Position::new(1, 5));
    let Some(Agent::AdaptiveRadius(agent)) = arena.agent(id) else {
        panic!("expected an adaptive-radius agent");
    };
    assert_eq!(agent.radius(), 2);
    assert_eq!(arena.projection(id).unwrap().radius_widenings, 1);
}

#[test]
fn adaptive_radius_freezes_once_capped() {
    let mut arena = arena_with(
        ".#.
         ##.
         ...",
    );
    let params = SearchParams {
        initial_radius: 1,
        radius_cap: 3,
        ..SearchParams::default()
    };
    let id = arena
        .spawn(Strategy::AdaptiveRadius, Position::new(0, 0), Position::new(2, 2), &params, 0)
        .unwrap();

    arena.run_until_settled(6);

    let Some(Agent::AdaptiveRadius(agent)) = arena.agent(id) else {
        panic!("expected an adaptive-radius agent");
    };
    assert!(agent.is_capped());
    assert_eq!(agent.radius(), 3);
    assert_eq!(agent.position(), Position::new(0, 0));
    let projection = arena.projection(id).unwrap();
    assert_eq!(projection.radius_widenings, 2);
    assert!(projection.radius_capped);
    assert_eq!(projection.stalled_ticks, 2);
}

#[test]
fn acceptance_probability_follows_the_temperature() {
    assert_eq!(acceptance_probability(0.0, 10.0), 1.0);
    assert!((acceptance_probability(-10.0, 10.0) - (-1.0f64).exp()).abs() < 1e-12);
    assert!(acceptance_probability(-1.0, 100.0) > acceptance_probability(-1.0, 1.0));
    assert!(acceptance_probability(-1.0, 1.0) < 1.0);
}

#[test]
fn weighted_draw_never_offers_the_head() {
    let buckets = weighted_indices(9);
    assert_eq!(buckets.len(), 36);
    assert!(buckets.iter().all(|i| (1..9).contains(i)));
    assert_eq!(buckets.iter().filter(|i| **i == 1).count(), 8);
    assert_eq!(buckets.iter().filter(|i| **i == 8).count(), 1);
}

#[test]
fn annealing_is_reproducible_for_a_seed() {
    let walk = |seed: u64| {
        let mut arena = open_arena(9);
        let agent = AnnealingAgent::new(AgentId(0), Position::new(0, 0), Position::new(8, 8), 1000.0, 1000, seed);
        let id = arena.insert(Agent::Annealing(agent)).unwrap();
        (0..30)
            .map(|_| {
                arena.tick_all();
                arena.agent(id).unwrap().position()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(walk(11), walk(11));
}

/// Steps an annealing agent alone on an open board, collecting its events.
fn anneal(
    size: usize,
    temperature: f64,
    iteration_reset: u32,
    seed: u64,
    ticks: usize,
) -> (AnnealingAgent, Grid, Vec<SearchEvent>) {
    let mut grid = Grid::new(size);
    let start = Position::new(0, 0);
    grid.set_cell(start, CellState::Occupied(AgentId(0)));
    let goal = Position::new(size - 1, size - 1);
    let mut agent = AnnealingAgent::new(AgentId(0), start, goal, temperature, iteration_reset, seed);

    let mut events = Vec::new();
    for _ in 0..ticks {
        agent.step(&mut grid);
        events.extend_from_slice(agent.uncommitted_events());
        agent.mark_events_as_committed();
    }
    (agent, grid, events)
}

fn accepted_worse(events: &[SearchEvent]) -> Vec<(f64, f64)> {
    events
        .iter()
        .filter_map(|e| match e {
            SearchEvent::WorseMoveAccepted { delta, temperature, .. } => Some((*delta, *temperature)),
            _ => None,
        })
        .collect()
}

#[test]
fn annealing_near_zero_temperature_always_takes_the_best_neighbour() {
    for seed in [1, 2, 3, 4] {
        let (agent, grid, events) = anneal(30, 1e-9, 1000, seed, 20);

        // Every drawn candidate sits behind the head, so nothing beats it and
        // nothing worse is accepted: the walk is the open-board diagonal.
        assert!(accepted_worse(&events).is_empty(), "seed {}", seed);
        assert_eq!(agent.position(), Position::new(20, 20), "seed {}", seed);
        assert_eq!(grid.cell_state(Position::new(20, 20)), CellState::Occupied(AgentId(0)));
        assert_eq!(grid.cell_state(Position::new(0, 0)), CellState::Empty);
    }
}

#[test]
fn annealing_at_huge_temperature_accepts_every_worse_draw() {
    for seed in [1, 2, 3, 4] {
        let (agent, _, events) = anneal(30, 1e12, 1000, seed, 20);
        let accepted = accepted_worse(&events);

        // Every cell has at least three open neighbours, so a candidate is
        // drawn on every tick and accepted with probability close to one.
        assert_eq!(accepted.len(), 20, "seed {}", seed);
        assert!(accepted.iter().all(|(delta, _)| *delta <= 0.0));
        assert!(accepted.iter().any(|(delta, _)| *delta < 0.0));
        assert!(!agent.is_goal());
    }
}

#[test]
fn annealing_temperature_uses_the_counter_after_a_reset() {
    let (agent, _, events) = anneal(30, 1e12, 2, 9, 5);

    let temperatures: Vec<f64> = accepted_worse(&events).into_iter().map(|(_, t)| t).collect();
    // Counter runs 1, 2, then resets to 1 on the third tick before cooling.
    assert_eq!(temperatures, vec![1e12, 5e11, 1e12, 5e11, 1e12]);

    let resets = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::IterationsReset { .. }))
        .count();
    assert_eq!(resets, 2);
    assert_eq!(agent.iterations(), 2);
}

#[test]
fn annealing_pop_drops_the_head_of_the_frontier() {
    // Cold: the head (1, 1) is taken and removed; the tied pair keeps its order.
    let (agent, _, _) = anneal(30, 1e-9, 1000, 5, 1);
    assert_eq!(agent.position(), Position::new(1, 1));
    assert_eq!(agent.frontier(), &[Position::new(1, 0), Position::new(0, 1)]);

    // Hot: a worse cell is taken, yet it is the head that leaves the frontier.
    let (agent, _, events) = anneal(30, 1e12, 1000, 5, 1);
    assert_eq!(accepted_worse(&events).len(), 1);
    assert_ne!(agent.position(), Position::new(1, 1));
    assert_eq!(agent.frontier().len(), 2);
    assert!(!agent.frontier().contains(&Position::new(1, 1)));
    assert!(agent.frontier().contains(&agent.position()));
}

#[test]
fn annealing_iteration_counter_resets() {
    let mut arena = open_arena(9);
    let agent = AnnealingAgent::new(AgentId(0), Position::new(0, 0), Position::new(8, 8), 100.0, 2, 3);
    let id = arena.insert(Agent::Annealing(agent)).unwrap();

    for _ in 0..3 {
        arena.tick_all();
    }

    let Some(Agent::Annealing(agent)) = arena.agent(id) else {
        panic!("expected an annealing agent");
    };
    assert_eq!(agent.iterations(), 2);
    assert_eq!(agent.temperature(), 100.0);
    assert_eq!(agent.current_temperature(), 50.0);
    assert_eq!(arena.projection(id).unwrap().iteration_resets, 1);
    assert_eq!(arena.projection(id).unwrap().moves, 3);
}

#[test]
fn bidirectional_anchors_meet_in_the_middle() {
    let mut arena = open_arena(5);
    let id = spawn(&mut arena, Strategy::Bidirectional, (0, 0), (4, 4));

    arena.tick_all();
    let agent = arena.agent(id).unwrap();
    assert_eq!(agent.position(), Position::new(1, 1));
    assert_eq!(agent.goal(), Position::new(3, 3));

    arena.tick_all();
    let agent = arena.agent(id).unwrap();
    assert!(agent.is_goal());
    assert_eq!(agent.position(), Position::new(2, 2));
    assert_eq!(agent.goal(), Position::new(2, 2));
    assert_eq!(arena.grid().empty_cells().len(), 24);
}

#[test]
fn bidirectional_collapses_onto_a_frontier_mark() {
    let mut arena = arena_with(
        ".....
         .*...
         .....
         .....
         .....",
    );
    let id = spawn(&mut arena, Strategy::Bidirectional, (0, 0), (4, 4));

    arena.tick_all();

    let agent = arena.agent(id).unwrap();
    assert!(agent.is_goal());
    assert_eq!(agent.position(), Position::new(1, 1));
    let projection = arena.projection(id).unwrap();
    assert_eq!(projection.meetings, 1);
    assert!(projection.reached_goal);
}

#[test]
fn bidirectional_adjacent_anchors_converge_in_one_tick() {
    let mut arena = open_arena(3);
    let id = spawn(&mut arena, Strategy::Bidirectional, (0, 0), (0, 1));

    arena.tick_all();

    let agent = arena.agent(id).unwrap();
    assert!(agent.is_goal());
    assert_eq!(agent.position(), agent.goal());
}

#[test]
fn bidirectional_reverse_heuristic_targets_the_forward_anchor() {
    let Agent::Bidirectional(agent) =
        Strategy::Bidirectional.spawn(AgentId(0), Position::new(0, 0), Position::new(3, 4), &SearchParams::default(), 0)
    else {
        panic!("expected a bidirectional agent");
    };
    assert_eq!(agent.reverse_heuristic(None), 5.0);
    assert_eq!(agent.reverse_heuristic(Some(Position::new(0, 2))), 2.0);
    assert_eq!(agent.occupied_cells(), vec![Position::new(0, 0), Position::new(3, 4)]);
}

#[test]
fn deterministic_strategies_solve_an_open_board() {
    for strategy in [
        Strategy::BestFirst,
        Strategy::Greedy,
        Strategy::AdaptiveRadius,
        Strategy::Bidirectional,
    ] {
        let mut arena = open_arena(8);
        let id = spawn(&mut arena, strategy, (0, 0), (7, 7));
        let ticks = arena.run_until_settled(100);
        assert!(arena.agent(id).unwrap().is_goal(), "{} did not settle", strategy);
        assert!(ticks <= 7, "{} took {} ticks", strategy, ticks);
    }
}
