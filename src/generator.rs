use rand::seq::IndexedRandom;
use rand::Rng;

use crate::grid::{Cell, Direction, Grid};

/// Iterative randomized depth-first maze carver.
///
/// Carves a spanning tree over the odd-indexed cells, one step per call, so
/// the host loop can draw a frame between steps instead of waiting out a
/// full recursive carve.
pub struct Generator {
    stack: Vec<Cell>,
    complete: bool,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            stack: Vec::new(),
            complete: false,
        }
    }

    /// Pick a random odd-indexed start cell, open it and push it.
    ///
    /// Resamples until both coordinates are odd; Grid::new guarantees at
    /// least one such cell exists.
    pub fn start<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) {
        self.stack.clear();
        self.complete = false;

        let start = loop {
            let x = rng.random_range(0..grid.width);
            let y = rng.random_range(0..grid.height);
            if x % 2 == 1 && y % 2 == 1 {
                break Cell::new(x, y);
            }
        };

        grid.set_wall(start, false);
        self.stack.push(start);
    }

    /// One carving step: pop the head, then either tunnel two cells toward
    /// a random unvisited neighbor (re-pushing the head so it can be
    /// backtracked to later) or leave the head popped as the implicit
    /// backtrack.
    pub fn step<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) {
        let Some(current) = self.stack.pop() else {
            self.complete = true;
            return;
        };

        // Unvisited = still a wall, probed two cells out so a one-cell
        // wall remains between carved cells.
        let unvisited: Vec<Cell> = Direction::ALL
            .iter()
            .filter_map(|&direction| grid.neighbor(current, direction, 2))
            .filter(|&neighbor| grid.is_wall(neighbor))
            .collect();

        if let Some(&next) = unvisited.choose(rng) {
            self.stack.push(current);

            let wall = Cell::new((current.x + next.x) / 2, (current.y + next.y) / 2);
            grid.set_wall(wall, false);
            grid.set_wall(next, false);
            self.stack.push(next);
        }

        if self.stack.is_empty() {
            self.complete = true;
        }
    }

    /// Stack top, i.e. the cell the next step carves from
    pub fn head(&self) -> Option<Cell> {
        self.stack.last().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
