mod common;

use std::collections::HashSet;

use common::{generate_maze, passage_edges, select_endpoints, solve_and_trace};
use rustmaze::{Cell, Phase};

/// Ascii dump of a finished run, printed next to failing asserts
fn visualize(maze: &rustmaze::Maze) -> String {
    format!(
        "\nPath length: {} cells, solver steps: {}\n\n{}",
        maze.solve_path().len(),
        maze.solve_steps(),
        maze.to_ascii()
    )
}

#[test]
fn test_full_cycle_produces_a_valid_path() {
    for seed in [3, 21, 77] {
        let mut maze = generate_maze(21, 15, seed);
        let start = Cell::new(1, 1);
        let end = Cell::new(19, 13);
        select_endpoints(&mut maze, start, end);
        solve_and_trace(&mut maze);

        let path = maze.solve_path();
        assert!(!path.is_empty(), "seed {} produced no path", seed);
        assert_eq!(*path.last().unwrap(), end, "{}", visualize(&maze));

        // No walls, no revisits, start excluded
        let mut seen = HashSet::new();
        for &cell in path {
            assert!(!maze.grid.is_wall(cell), "path runs through a wall {:?}", cell);
            assert!(seen.insert(cell), "path revisits {:?}", cell);
        }
        assert!(!path.contains(&start), "{}", visualize(&maze));

        // Chained: first link adjacent to the start, then one grid move
        // per entry
        let mut previous = start;
        for &cell in path {
            let dist = (cell.x - previous.x).abs() + (cell.y - previous.y).abs();
            assert_eq!(dist, 1, "{:?} -> {:?} is not a grid move", previous, cell);
            previous = cell;
        }

        println!("{}", visualize(&maze));
    }
}

#[test]
fn test_solver_step_count_stays_within_the_pass_bound() {
    for seed in [11, 29, 63] {
        let mut maze = generate_maze(21, 21, seed);
        let start = Cell::new(1, 1);
        let end = Cell::new(19, 19);
        select_endpoints(&mut maze, start, end);

        let edges = passage_edges(&maze) as u64;
        let steps = solve_and_trace(&mut maze);

        // Every entrance is walked at most twice before the backtrack rule
        // forces retreat; the slack absorbs re-walks around paired junctions
        let bound = 2 * edges + 4 * (maze.grid.width + maze.grid.height) as u64;
        assert!(
            steps <= bound,
            "seed {}: {} steps exceeds bound {}",
            seed,
            steps,
            bound
        );
    }
}

#[test]
fn test_reconstruction_across_sizes_and_seeds() {
    for (cols, rows, seed) in [(9, 9, 1), (15, 11, 2), (27, 19, 3), (33, 25, 4)] {
        let mut maze = generate_maze(cols, rows, seed);
        let end = Cell::new(maze.grid.width - 2, maze.grid.height - 2);
        select_endpoints(&mut maze, Cell::new(1, 1), end);
        solve_and_trace(&mut maze);

        assert_eq!(
            *maze.solve_path().last().unwrap(),
            end,
            "{}x{} seed {} failed:{}",
            cols,
            rows,
            seed,
            visualize(&maze)
        );
    }
}

#[test]
fn test_same_start_and_end_is_a_zero_length_solve() {
    let mut maze = generate_maze(9, 9, 13);
    let cell = Cell::new(1, 1);
    select_endpoints(&mut maze, cell, cell);
    solve_and_trace(&mut maze);

    assert!(maze.solve_path().is_empty());
    assert_eq!(maze.solve_steps(), 1);
    assert_eq!(maze.phase(), Phase::Completed);
}

#[test]
fn test_border_gap_endpoints_are_usable() {
    let mut maze = generate_maze(9, 9, 4);
    // (0, 1) is a boundary wall next to the carved cell (1, 1); picking it
    // opens it as a maze entrance
    select_endpoints(&mut maze, Cell::new(0, 1), Cell::new(7, 7));
    assert!(!maze.grid.is_wall_at(0, 1));

    solve_and_trace(&mut maze);
    assert_eq!(*maze.solve_path().last().unwrap(), Cell::new(7, 7));
}

#[test]
fn test_completed_cycles_back_to_idle() {
    let mut maze = generate_maze(9, 9, 2);
    select_endpoints(&mut maze, Cell::new(1, 1), Cell::new(7, 7));
    solve_and_trace(&mut maze);

    assert!(maze.advance_phase());
    assert_eq!(maze.phase(), Phase::Idle);
    assert_eq!(maze.grid.passage_count(), 0);
    assert!(maze.solve_path().is_empty());

    // A fresh cycle starts from the discarded state
    assert!(maze.advance_phase());
    assert_eq!(maze.phase(), Phase::Generation);
    assert!(maze.generation_head().is_some());
}
