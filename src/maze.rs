use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::completion::PathTracer;
use crate::generator::Generator;
use crate::grid::{Cell, Direction, Grid};
use crate::phase::Phase;
use crate::selection::{Selection, SelectionPhase};
use crate::solver::Solver;

/// The maze engine: grid, phase machine and the per-phase algorithms,
/// advanced one bounded step per `update` call so the host loop can
/// interleave rendering between steps.
pub struct Maze {
    pub grid: Grid,
    phase: Phase,
    generator: Generator,
    selection: Selection,
    solver: Option<Solver>,
    tracer: Option<PathTracer>,
    solve_start: Option<Cell>,
    solve_end: Option<Cell>,
    solve_steps: u64,
    cell_half_size: f32,
    rng: StdRng,

    // Activity flags; only one is normally set at a time, but update()
    // checks each independently in fixed order.
    generating: bool,
    selecting: bool,
    solving: bool,
    completing: bool,
}

impl Maze {
    /// `width`/`height` are corrected to odd by the grid. A fixed `seed`
    /// makes the whole run reproducible; None draws from OS entropy.
    pub fn new(width: i32, height: i32, cell_half_size: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Maze {
            grid: Grid::new(width, height),
            phase: Phase::Idle,
            generator: Generator::new(),
            selection: Selection::new(),
            solver: None,
            tracer: None,
            solve_start: None,
            solve_end: None,
            solve_steps: 0,
            cell_half_size,
            rng,
            generating: false,
            selecting: false,
            solving: false,
            completing: false,
        }
    }

    /// Move to the next phase and run its entry action. Refused while the
    /// current phase is still incomplete.
    pub fn advance_phase(&mut self) -> bool {
        if !self.is_phase_complete() {
            return false;
        }

        self.phase = self.phase.next();
        self.generating = false;
        self.selecting = false;
        self.solving = false;
        self.completing = false;

        match self.phase {
            Phase::Idle => self.reset(),
            Phase::Generation => {
                self.reset();
                self.generator.start(&mut self.grid, &mut self.rng);
                self.generating = true;
            }
            Phase::CellSelection => {
                self.selection = Selection::new();
                self.selecting = true;
            }
            Phase::Solving => {
                self.start_solving();
            }
            Phase::Completed => {
                self.start_completion();
            }
        }
        true
    }

    /// One engine tick: step whichever phase is active and incomplete.
    /// The pointer and click only matter during cell selection.
    pub fn update(&mut self, pointer_x: f32, pointer_y: f32, clicked: bool) {
        if self.generating && !self.generator.is_complete() {
            self.generator.step(&mut self.grid, &mut self.rng);
        }
        if self.selecting && !self.selection.is_complete() {
            self.selection
                .update(&mut self.grid, pointer_x, pointer_y, clicked, self.cell_half_size);
        }
        if self.solving {
            if let Some(solver) = self.solver.as_mut() {
                if !solver.is_complete() {
                    if let (Some(start), Some(end)) = (self.solve_start, self.solve_end) {
                        solver.step(&self.grid, start, end, &mut self.rng);
                        self.solve_steps += 1;
                    }
                }
            }
        }
        if self.completing {
            if let (Some(tracer), Some(solver), Some(end)) =
                (self.tracer.as_mut(), self.solver.as_ref(), self.solve_end)
            {
                if !tracer.is_complete() {
                    tracer.step(&self.grid, solver.entrances(), end);
                }
            }
        }
    }

    /// Discard the carved maze and every derived collection
    fn reset(&mut self) {
        self.grid.reset();
        self.generator = Generator::new();
        self.selection = Selection::new();
        self.solver = None;
        self.tracer = None;
        self.solve_start = None;
        self.solve_end = None;
        self.solve_steps = 0;
    }

    fn start_solving(&mut self) {
        let start = self
            .selection
            .start_cell
            .expect("selection completed with a start cell");
        let end = self
            .selection
            .end_cell
            .expect("selection completed with an end cell");

        self.solve_start = Some(start);
        self.solve_end = Some(end);
        self.solve_steps = 0;
        self.solver = Some(Solver::new(start));
        self.solving = true;
    }

    fn start_completion(&mut self) {
        let solver = self
            .solver
            .as_ref()
            .expect("solving phase ran before completion");
        let start = self.solve_start.expect("endpoints latched before solving");

        // start_direction is only absent for a zero-length solve, where
        // the tracer completes on its first step without moving.
        let direction = solver.start_direction().unwrap_or(Direction::Up);
        self.tracer = Some(PathTracer::new(start, direction));
        self.completing = true;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completion predicate of the phase currently active
    pub fn is_phase_complete(&self) -> bool {
        match self.phase {
            Phase::Idle => true,
            Phase::Generation => self.is_generation_complete(),
            Phase::CellSelection => self.is_selection_complete(),
            Phase::Solving => self.is_solving_complete(),
            Phase::Completed => self.is_completion_complete(),
        }
    }

    pub fn is_generation_complete(&self) -> bool {
        self.generator.is_complete()
    }

    pub fn is_selection_complete(&self) -> bool {
        self.selection.is_complete()
    }

    pub fn is_solving_complete(&self) -> bool {
        self.solver.as_ref().map(|s| s.is_complete()).unwrap_or(false)
    }

    pub fn is_completion_complete(&self) -> bool {
        self.tracer.as_ref().map(|t| t.is_complete()).unwrap_or(false)
    }

    /// Carving head, shown while generation runs
    pub fn generation_head(&self) -> Option<Cell> {
        if self.generating {
            self.generator.head()
        } else {
            None
        }
    }

    pub fn pointed_cell(&self) -> Option<Cell> {
        self.selection.pointed_cell
    }

    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    pub fn solve_start_cell(&self) -> Option<Cell> {
        self.selection.start_cell
    }

    pub fn solve_end_cell(&self) -> Option<Cell> {
        self.selection.end_cell
    }

    /// Entrance pass counts, populated while solving and kept for the
    /// completion replay
    pub fn entrance_pass_counts(&self) -> Option<&HashMap<Cell, u32>> {
        self.solver.as_ref().map(|s| s.entrances())
    }

    pub fn solver_token(&self) -> Option<Cell> {
        if self.solving {
            self.solver.as_ref().map(|s| s.token())
        } else {
            None
        }
    }

    pub fn tracer_token(&self) -> Option<Cell> {
        if self.completing {
            self.tracer.as_ref().map(|t| t.token())
        } else {
            None
        }
    }

    pub fn solve_path(&self) -> &[Cell] {
        self.tracer.as_ref().map(|t| t.path()).unwrap_or(&[])
    }

    pub fn solve_steps(&self) -> u64 {
        self.solve_steps
    }

    pub fn junction_count(&self) -> usize {
        self.solver.as_ref().map(|s| s.junctions().len()).unwrap_or(0)
    }

    /// Ascii rendering of the maze with endpoints and the solve path
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let cell = Cell::new(x, y);
                let symbol = if Some(cell) == self.selection.start_cell {
                    'S'
                } else if Some(cell) == self.selection.end_cell {
                    'E'
                } else if self.solve_path().contains(&cell) {
                    '*'
                } else if self.grid.is_wall(cell) {
                    '█'
                } else {
                    '.'
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}
