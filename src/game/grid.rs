use super::state::Position;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    /// Occupied by a snake segment
    Snake,
    /// Never placed by the game itself
    Apple,
}

/// Fixed-size play area with a ring of walls around it.
///
/// The grid only stores cells. Keeping it in sync with the snake body is the
/// job of [`Snake`](super::state::Snake).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid whose outermost rows and columns are walls
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        };

        for x in 0..width {
            grid.set(x, 0, Cell::Wall);
            grid.set(x, height.saturating_sub(1), Cell::Wall);
        }
        for y in 0..height {
            grid.set(0, y, Cell::Wall);
            grid.set(width.saturating_sub(1), y, Cell::Wall);
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies on the grid
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Read a cell. Anything off the grid reads as a wall.
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.index(pos).map_or(Cell::Wall, |i| self.cells[i])
    }

    /// Overwrite a cell. Writes off the grid are dropped.
    pub fn set_cell_at(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.contains(pos), "write outside grid at {pos:?}");
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Number of cells currently holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over every position, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
