use crate::grid::{Cell, Grid};

/// Which endpoint the next qualifying click will latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    SelectingStart,
    SelectingEnd,
}

/// Maps the pointer to a pickable cell and latches the solve endpoints.
pub struct Selection {
    pub start_cell: Option<Cell>,
    pub end_cell: Option<Cell>,
    pub pointed_cell: Option<Cell>,
    phase: SelectionPhase,
    complete: bool,
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            start_cell: None,
            end_cell: None,
            pointed_cell: None,
            phase: SelectionPhase::SelectingStart,
            complete: false,
        }
    }

    /// Re-resolve the pointed cell for this tick and handle a click.
    ///
    /// `world_x`/`world_y` are grid-local coordinates with the center of
    /// cell (i, j) at (i, j) * 2 * half_size; any camera math is the
    /// host's business.
    pub fn update(
        &mut self,
        grid: &mut Grid,
        world_x: f32,
        world_y: f32,
        clicked: bool,
        half_size: f32,
    ) {
        let cell_size = half_size * 2.0;
        let raw_x = ((world_x + half_size) / cell_size).floor() as i32;
        let raw_y = ((world_y + half_size) / cell_size).floor() as i32;

        // A pointer outside the grid never picks, even though the indices
        // get clamped for the lookups below.
        let inside = grid.in_bounds(raw_x, raw_y);
        let x = raw_x.clamp(0, grid.width - 1);
        let y = raw_y.clamp(0, grid.height - 1);

        let candidate = Cell::new(x, y);
        if inside && self.is_pickable(grid, candidate) {
            self.pointed_cell = Some(candidate);
        } else {
            self.pointed_cell = None;
        }

        if !clicked || self.complete {
            return;
        }
        let Some(picked) = self.pointed_cell else {
            return;
        };

        // Border gap cells count as walls until picked; open them so the
        // solver can stand on them.
        grid.set_wall(picked, false);
        match self.phase {
            SelectionPhase::SelectingStart => {
                self.start_cell = Some(picked);
                self.phase = SelectionPhase::SelectingEnd;
            }
            SelectionPhase::SelectingEnd => {
                self.end_cell = Some(picked);
                self.complete = true;
            }
        }
    }

    /// A cell is pickable if it is a passage, or a boundary cell whose
    /// inward neighbors (one per extreme axis) are all passages; the
    /// latter are the entrance/exit gaps of the maze.
    fn is_pickable(&self, grid: &Grid, cell: Cell) -> bool {
        if !grid.is_wall(cell) {
            return true;
        }

        let on_boundary = cell.x == 0
            || cell.x == grid.width - 1
            || cell.y == 0
            || cell.y == grid.height - 1;
        if !on_boundary {
            return false;
        }

        let mut inward_wall = false;
        if cell.x == 0 && grid.is_wall_at(cell.x + 1, cell.y) {
            inward_wall = true;
        }
        if cell.x == grid.width - 1 && grid.is_wall_at(cell.x - 1, cell.y) {
            inward_wall = true;
        }
        if cell.y == 0 && grid.is_wall_at(cell.x, cell.y + 1) {
            inward_wall = true;
        }
        if cell.y == grid.height - 1 && grid.is_wall_at(cell.x, cell.y - 1) {
            inward_wall = true;
        }

        !inward_wall
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_pointing(&self) -> bool {
        self.pointed_cell.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
