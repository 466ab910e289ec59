/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// One of the four cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed probe order used by every neighbor scan
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector of this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The opposite direction (negated unit vector)
    pub fn inverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Grid structure storing the maze wall map
/// Cell values: true = wall, false = passage
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell set to wall.
    ///
    /// Even dimensions are decremented to the next odd value; the carve
    /// works on odd-indexed cells with one-cell walls between them.
    /// Panics if the corrected grid is smaller than 3x3, which would leave
    /// no odd-indexed cell to start carving from.
    pub fn new(width: i32, height: i32) -> Self {
        let width = if width % 2 == 0 { width - 1 } else { width };
        let height = if height % 2 == 0 { height - 1 } else { height };
        assert!(
            width >= 3 && height >= 3,
            "maze grid must be at least 3x3, got {}x{}",
            width,
            height
        );

        Grid {
            width,
            height,
            cells: vec![true; (width * height) as usize],
        }
    }

    /// Reset every cell back to wall
    pub fn reset(&mut self) {
        self.cells.fill(true);
    }

    /// Convert (x, y) coordinates to a cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.width
    }

    /// Convert a cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.width, id / self.width)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Check if the cell at (x, y) is a wall; out of bounds counts as wall
    pub fn is_wall_at(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[self.get_id(x, y) as usize]
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.is_wall_at(cell.x, cell.y)
    }

    /// Set the wall flag of a single cell; out-of-bounds writes are ignored
    pub fn set_wall(&mut self, cell: Cell, wall: bool) {
        if self.in_bounds(cell.x, cell.y) {
            let id = self.get_id(cell.x, cell.y);
            self.cells[id as usize] = wall;
        }
    }

    /// The cell `stride` steps away in `direction`, or None past the edge
    pub fn neighbor(&self, cell: Cell, direction: Direction, stride: i32) -> Option<Cell> {
        let (dx, dy) = direction.delta();
        let nx = cell.x + dx * stride;
        let ny = cell.y + dy * stride;
        if self.in_bounds(nx, ny) {
            Some(Cell::new(nx, ny))
        } else {
            None
        }
    }

    /// Directions whose adjacent neighbor exists and is a passage,
    /// in the fixed probe order
    pub fn movable_directions(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| {
                self.neighbor(cell, direction, 1)
                    .map(|n| !self.is_wall(n))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Count of passage cells
    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| !wall).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_dimensions_are_decremented() {
        let grid = Grid::new(20, 16);
        assert_eq!(grid.width, 19);
        assert_eq!(grid.height, 15);
    }

    #[test]
    fn test_odd_dimensions_are_kept() {
        let grid = Grid::new(21, 15);
        assert_eq!(grid.width, 21);
        assert_eq!(grid.height, 15);
    }

    #[test]
    #[should_panic]
    fn test_degenerate_grid_is_rejected() {
        Grid::new(2, 10);
    }

    #[test]
    fn test_neighbor_stops_at_edges() {
        let grid = Grid::new(5, 5);
        let corner = Cell::new(0, 0);
        assert_eq!(grid.neighbor(corner, Direction::Up, 1), None);
        assert_eq!(grid.neighbor(corner, Direction::Left, 1), None);
        assert_eq!(grid.neighbor(corner, Direction::Down, 1), Some(Cell::new(0, 1)));
        assert_eq!(grid.neighbor(corner, Direction::Right, 2), Some(Cell::new(2, 0)));
        assert_eq!(grid.neighbor(Cell::new(4, 4), Direction::Down, 1), None);
        assert_eq!(grid.neighbor(Cell::new(1, 3), Direction::Down, 2), None);
    }

    #[test]
    fn test_movable_directions_ignore_walls() {
        let mut grid = Grid::new(5, 5);
        let center = Cell::new(2, 2);
        assert!(grid.movable_directions(center).is_empty());

        grid.set_wall(Cell::new(2, 1), false);
        grid.set_wall(Cell::new(3, 2), false);
        assert_eq!(
            grid.movable_directions(center),
            vec![Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn test_direction_inverse_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.inverse().inverse(), direction);
            let (dx, dy) = direction.delta();
            let (ix, iy) = direction.inverse().delta();
            assert_eq!((dx + ix, dy + iy), (0, 0));
        }
    }
}
