use search_arena::adapters::inbound::FilesystemMapSource;
use search_arena::common::DomainError;
use search_arena::domains::grid::{pick_endpoints, CellState, FixedMap, Grid, MapSource, Position, TerrainGenerator, TerrainSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_filesystem_map_source_loads_ascii_maps() {
    let dir = tempdir().unwrap();
    let base = dir.path().to_path_buf();
    let maps = FilesystemMapSource::new(Some(base.clone()));
    assert_eq!(maps.base(), base.as_path());

    fs::write(base.join("walls.txt"), "\n  ..#\n  .*.\n  #..\n\n").unwrap();

    let grid = maps.load_map("walls.txt").unwrap();
    assert_eq!(grid.size(), 3);
    assert_eq!(grid.cell_state(Position::new(0, 2)), CellState::Obstacle);
    assert_eq!(grid.cell_state(Position::new(1, 1)), CellState::FrontierMark);
    assert_eq!(grid.obstacle_count(), 2);
    assert_eq!(grid.to_ascii(), "..#\n.*.\n#..\n");
}

#[test]
fn test_filesystem_map_source_reports_missing_and_bad_files() {
    let dir = tempdir().unwrap();
    let maps = FilesystemMapSource::new(Some(dir.path().to_path_buf()));

    let err = maps.load_map("missing.txt").unwrap_err();
    assert!(matches!(err, DomainError::InfrastructureError(_)));

    fs::write(dir.path().join("bad.txt"), "..\n.x\n").unwrap();
    let err = maps.load_map("bad.txt").unwrap_err();
    assert!(matches!(err, DomainError::InvalidMap { .. }));
}

#[test]
fn test_grid_edges_read_as_obstacles() {
    let mut grid = Grid::new(3);
    assert_eq!(grid.cell_state(Position::new(3, 0)), CellState::Obstacle);
    assert!(!grid.is_traversable(Position::new(0, 3)));
    assert!(grid.check_bounds(Position::new(2, 2)).is_ok());
    assert!(matches!(
        grid.check_bounds(Position::new(2, 3)),
        Err(DomainError::OutOfBounds { size: 3, .. })
    ));

    grid.set_cell(Position::new(7, 7), CellState::Obstacle);
    assert_eq!(grid.obstacle_count(), 0);
    assert_eq!(grid.offset(Position::new(0, 0), -1, 0), None);
    assert_eq!(grid.offset(Position::new(0, 0), 1, 2), Some(Position::new(1, 2)));
}

#[test]
fn test_position_distance_is_euclidean() {
    let a = Position::new(0, 0);
    assert_eq!(a.distance(&Position::new(3, 4)), 5.0);
    assert_eq!(Position::new(3, 4).distance(&a), 5.0);
    assert_eq!(a.distance(&a), 0.0);
    assert_eq!(Position::from((2, 1)).to_string(), "(2, 1)");
}

#[test]
fn test_terrain_generator_is_seeded() {
    let terrain = TerrainGenerator::new(20, 10, 3, 6);
    let first = terrain.generate(&mut StdRng::seed_from_u64(9));
    let second = terrain.generate(&mut StdRng::seed_from_u64(9));

    assert_eq!(first, second);
    assert_eq!(first.size(), 20);
    assert!(first.obstacle_count() >= 1);
    assert!(first.obstacle_count() <= 10 * 6);
    assert_eq!(first.empty_cells().len() + first.obstacle_count(), 400);
}

#[test]
fn test_terrain_generator_without_islands_is_open() {
    let mut terrain = TerrainGenerator::new(6, 0, 1, 2);
    let grid = terrain.next_grid(&mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(grid, Grid::new(6));
}

#[test]
fn test_fixed_map_replays_the_same_board() {
    let grid = Grid::from_ascii("#..\n...\n..#").unwrap();
    let mut source = FixedMap::new(grid.clone());
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(source.next_grid(&mut rng).unwrap(), grid);
    assert_eq!(source.next_grid(&mut rng).unwrap(), grid);
}

#[test]
fn test_pick_endpoints_chooses_distinct_empty_cells() {
    let grid = Grid::from_ascii("#.#\n###\n#.#").unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..10 {
        let (start, goal) = pick_endpoints(&grid, &mut rng).unwrap();
        assert_ne!(start, goal);
        assert_eq!(grid.cell_state(start), CellState::Empty);
        assert_eq!(grid.cell_state(goal), CellState::Empty);
    }

    let crowded = Grid::from_ascii("##\n#.").unwrap();
    let err = pick_endpoints(&crowded, &mut rng).unwrap_err();
    assert!(matches!(err, DomainError::InvalidMap { .. }));
}

#[test]
fn test_shipped_corridor_map_is_solvable() {
    let maps = FilesystemMapSource::new(Some(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/maps")));
    let grid = maps.load_map("corridor.txt").unwrap();
    assert_eq!(grid.size(), 12);

    let mut arena = search_arena::application::Arena::new(grid, search_arena::adapters::outbound::init_noop_logger());
    let id = arena
        .spawn(
            search_arena::domains::search::Strategy::BestFirst,
            Position::new(0, 0),
            Position::new(11, 11),
            &Default::default(),
            0,
        )
        .unwrap();
    arena.run_until_settled(144);
    assert!(search_arena::domains::search::SearchAgent::is_goal(arena.agent(id).unwrap()));
}
