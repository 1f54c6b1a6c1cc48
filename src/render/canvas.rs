use crate::game::{Cell, GameState};

/// What a single cell should look like on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    Body,
    Head,
    Tail,
    Apple,
}

impl CellKind {
    pub fn from_cell(cell: Cell, is_head: bool, is_tail: bool) -> Self {
        match cell {
            Cell::Empty => CellKind::Empty,
            Cell::Wall => CellKind::Wall,
            Cell::Apple => CellKind::Apple,
            Cell::Snake if is_head => CellKind::Head,
            Cell::Snake if is_tail => CellKind::Tail,
            Cell::Snake => CellKind::Body,
        }
    }
}

/// Drawing surface that receives the grid one cell at a time
pub trait DrawCell {
    fn draw_cell(&mut self, x: i32, y: i32, cell: Cell, is_head: bool, is_tail: bool);
}

/// Hand every grid cell to `canvas`, row by row from the top left
pub fn paint_grid<D: DrawCell + ?Sized>(state: &GameState, canvas: &mut D) {
    let head = state.snake.head();
    let tail = state.snake.tail();

    for pos in state.grid.positions() {
        let cell = state.grid.cell_at(pos);
        let on_snake = cell == Cell::Snake;
        canvas.draw_cell(
            pos.x,
            pos.y,
            cell,
            on_snake && head == Some(pos),
            on_snake && tail == Some(pos),
        );
    }
}
