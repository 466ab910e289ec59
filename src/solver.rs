use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::grid::{Cell, Direction, Grid};

/// Tremaux's algorithm: walks a token from the start cell toward the end
/// cell, counting how often each junction entrance is passed. Entrances
/// passed exactly once end up marking the solution path; explored dead
/// branches accumulate a count of two.
pub struct Solver {
    current_cell: Cell,
    current_direction: Option<Direction>,
    start_direction: Option<Direction>,
    passed_entrances: HashMap<Cell, u32>,
    junctions: Vec<Cell>,
    complete: bool,
}

impl Solver {
    /// Fresh solve starting at `start`; bookkeeping from any earlier run
    /// is discarded.
    pub fn new(start: Cell) -> Self {
        Solver {
            current_cell: start,
            current_direction: None,
            start_direction: None,
            passed_entrances: HashMap::new(),
            junctions: Vec::new(),
            complete: false,
        }
    }

    /// One token move. `start` and `end` are the latched endpoints.
    pub fn step<R: Rng>(&mut self, grid: &Grid, start: Cell, end: Cell, rng: &mut R) {
        if self.complete {
            return;
        }
        if self.current_cell == end {
            // Zero-length solve: both clicks landed on the same cell.
            self.fix_adjacent_junctions(grid);
            self.complete = true;
            return;
        }

        let cell = self.current_cell;
        let movable = grid.movable_directions(cell);

        let next = if movable.len() <= 2 {
            self.corridor_direction(movable)
        } else {
            self.junction_direction(grid, cell, &movable, rng)
        };

        if cell == start {
            // The start cell has no arrival entrance of its own; the path
            // reconstruction needs to know which way the walk left it.
            self.start_direction = Some(next);
        }
        self.current_direction = Some(next);
        if let Some(moved) = grid.neighbor(cell, next, 1) {
            self.current_cell = moved;
        }

        if self.current_cell == end {
            self.fix_adjacent_junctions(grid);
            self.complete = true;
        }
    }

    /// In a corridor there is nothing to decide: go forward, or turn back
    /// out of a dead end.
    fn corridor_direction(&self, mut movable: Vec<Direction>) -> Direction {
        if movable.len() == 2 {
            if let Some(current) = self.current_direction {
                movable.retain(|&d| d != current.inverse());
            }
        }
        *movable
            .first()
            .expect("a reachable cell always has at least one open side")
    }

    fn junction_direction<R: Rng>(
        &mut self,
        grid: &Grid,
        cell: Cell,
        movable: &[Direction],
        rng: &mut R,
    ) -> Direction {
        if !self.junctions.contains(&cell) {
            self.junctions.push(cell);
        }

        // The entrance we arrived through gets its pass recorded now; the
        // one we leave through is recorded just before moving. Absent only
        // when the start cell itself is a junction.
        let arrival = self
            .current_direction
            .and_then(|d| grid.neighbor(cell, d.inverse(), 1));
        if let Some(entrance) = arrival {
            self.pass_entrance(entrance);
        }

        let mut unpassed = Vec::new();
        let mut only_passed_arrival = true;
        let mut all_passed = true;
        for &direction in movable {
            let Some(entrance) = grid.neighbor(cell, direction, 1) else {
                continue;
            };
            if self.pass_count(entrance) == 0 {
                unpassed.push(direction);
                all_passed = false;
            } else if arrival != Some(entrance) {
                only_passed_arrival = false;
            }
        }

        let next = if only_passed_arrival && !unpassed.is_empty() {
            *unpassed.choose(rng).expect("unpassed checked non-empty")
        } else if all_passed && arrival.map(|e| self.pass_count(e) < 2).unwrap_or(false) {
            self.current_direction
                .expect("all entrances passed implies an arrival direction")
                .inverse()
        } else {
            // Uniform choice among the least-passed entrances
            let min = movable
                .iter()
                .filter_map(|&d| grid.neighbor(cell, d, 1))
                .map(|e| self.pass_count(e))
                .min()
                .expect("a junction has at least three open sides");
            let least: Vec<Direction> = movable
                .iter()
                .copied()
                .filter(|&d| {
                    grid.neighbor(cell, d, 1)
                        .map(|e| self.pass_count(e) == min)
                        .unwrap_or(false)
                })
                .collect();
            *least.choose(rng).expect("least checked non-empty")
        };

        if let Some(entrance) = grid.neighbor(cell, next, 1) {
            self.pass_entrance(entrance);
        }
        next
    }

    /// Two junctions two cells apart each record a pass on their shared
    /// entrance during their own junction bookkeeping, so a connector that
    /// was walked once ends up counted twice. Reset those to one so the
    /// path reconstruction recognizes the solution edge.
    fn fix_adjacent_junctions(&mut self, grid: &Grid) {
        for i in 0..self.junctions.len() {
            for j in (i + 1)..self.junctions.len() {
                let a = self.junctions[i];
                let b = self.junctions[j];
                if (a.x - b.x).abs() > 2 || (a.y - b.y).abs() > 2 {
                    continue;
                }

                let shared = Cell::new((a.x + b.x) / 2, (a.y + b.y) / 2);
                if grid.is_wall(shared) {
                    continue;
                }
                if let Some(count) = self.passed_entrances.get_mut(&shared) {
                    if *count == 2 {
                        *count = 1;
                    }
                }
            }
        }
    }

    fn pass_entrance(&mut self, entrance: Cell) {
        *self.passed_entrances.entry(entrance).or_insert(0) += 1;
    }

    /// Times the solver has passed through `entrance`; unknown cells are 0
    pub fn pass_count(&self, entrance: Cell) -> u32 {
        self.passed_entrances.get(&entrance).copied().unwrap_or(0)
    }

    pub fn entrances(&self) -> &HashMap<Cell, u32> {
        &self.passed_entrances
    }

    pub fn junctions(&self) -> &[Cell] {
        &self.junctions
    }

    pub fn token(&self) -> Cell {
        self.current_cell
    }

    pub fn start_direction(&self) -> Option<Direction> {
        self.start_direction
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
