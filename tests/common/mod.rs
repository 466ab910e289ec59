use rustmaze::{Cell, Maze};

pub const HALF_SIZE: f32 = 10.0;

/// World coordinate of the center of cell index `i`
pub fn cell_world(index: i32) -> f32 {
    index as f32 * HALF_SIZE * 2.0
}

/// Build a maze engine and run generation to completion
pub fn generate_maze(cols: i32, rows: i32, seed: u64) -> Maze {
    let mut maze = Maze::new(cols, rows, HALF_SIZE, Some(seed));
    assert!(maze.advance_phase()); // Idle -> Generation

    let mut guard = 0;
    while !maze.is_generation_complete() {
        maze.update(0.0, 0.0, false);
        guard += 1;
        assert!(guard < 1_000_000, "generation did not terminate");
    }
    maze
}

/// Click a cell through the selection coordinator
pub fn click_cell(maze: &mut Maze, cell: Cell) {
    maze.update(cell_world(cell.x), cell_world(cell.y), true);
}

/// Drive the selection phase: pick start and end
pub fn select_endpoints(maze: &mut Maze, start: Cell, end: Cell) {
    assert!(maze.advance_phase()); // Generation -> CellSelection
    click_cell(maze, start);
    click_cell(maze, end);
    assert!(maze.is_selection_complete(), "endpoints were not picked up");
}

/// Run Solving and Completed to the end; returns the solver step count
pub fn solve_and_trace(maze: &mut Maze) -> u64 {
    assert!(maze.advance_phase()); // CellSelection -> Solving
    let mut guard = 0;
    while !maze.is_solving_complete() {
        maze.update(0.0, 0.0, false);
        guard += 1;
        assert!(guard < 1_000_000, "solving did not terminate");
    }
    let steps = maze.solve_steps();

    assert!(maze.advance_phase()); // Solving -> Completed
    guard = 0;
    while !maze.is_completion_complete() {
        maze.update(0.0, 0.0, false);
        guard += 1;
        assert!(guard < 1_000_000, "path reconstruction did not terminate");
    }
    steps
}

/// Count adjacent passage pairs (the carved connections at cell level)
pub fn passage_edges(maze: &Maze) -> usize {
    let grid = &maze.grid;
    let mut edges = 0;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.is_wall_at(x, y) {
                continue;
            }
            if !grid.is_wall_at(x + 1, y) {
                edges += 1;
            }
            if !grid.is_wall_at(x, y + 1) {
                edges += 1;
            }
        }
    }
    edges
}
