use std::collections::HashMap;

use crate::grid::{Cell, Direction, Grid};

/// Replays the solving trace from the start cell, following entrances that
/// were passed exactly once, to recover the solution path for display.
pub struct PathTracer {
    current_cell: Cell,
    current_direction: Direction,
    path: Vec<Cell>,
    complete: bool,
}

impl PathTracer {
    /// `start_direction` is the direction the solver finally left the
    /// start cell in; the start cell has no arrival entrance to follow.
    pub fn new(start: Cell, start_direction: Direction) -> Self {
        PathTracer {
            current_cell: start,
            current_direction: start_direction,
            path: Vec::new(),
            complete: false,
        }
    }

    /// One replay move: straight through corridors, and through the unique
    /// once-passed entrance at junctions. Appends the visited cell, end
    /// cell included.
    pub fn step(&mut self, grid: &Grid, entrances: &HashMap<Cell, u32>, end: Cell) {
        if self.complete {
            return;
        }
        if self.current_cell == end {
            self.complete = true;
            return;
        }

        let cell = self.current_cell;
        let mut movable = grid.movable_directions(cell);

        let next = if movable.len() <= 2 {
            if movable.len() == 2 {
                movable.retain(|&d| d != self.current_direction.inverse());
            }
            // The start cell was never entered, so a side branch can
            // survive the retain; straight ahead is the recorded exit.
            if movable.contains(&self.current_direction) {
                self.current_direction
            } else {
                *movable
                    .first()
                    .expect("a path cell always has at least one open side")
            }
        } else {
            // Twice-passed entrances are explored dead branches; exactly
            // one remaining exit was passed once.
            movable.retain(|&d| d != self.current_direction.inverse());
            movable
                .iter()
                .copied()
                .find(|&d| {
                    grid.neighbor(cell, d, 1)
                        .map(|e| entrances.get(&e).copied().unwrap_or(0) == 1)
                        .unwrap_or(false)
                })
                .expect("a junction on the solve path has a once-passed exit")
        };

        self.current_direction = next;
        if let Some(moved) = grid.neighbor(cell, next, 1) {
            self.current_cell = moved;
            self.path.push(moved);
        }

        if self.current_cell == end {
            self.complete = true;
        }
    }

    pub fn token(&self) -> Cell {
        self.current_cell
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
