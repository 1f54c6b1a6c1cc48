use log::debug;

use super::{
    action::Direction,
    grid::{Cell, Grid},
};
use crate::error::SnakeError;
use crate::list::SequenceList;

/// Number of segments a fresh snake is built with
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// What happens when the head enters a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Free cell, the move goes ahead
    None,
    /// Wall or snake, the game ends
    Fatal,
    /// Reserved for apples; nothing produces it and the snake never grows
    Food,
    /// Cell kind the rules do not cover
    Unknown,
}

impl Collision {
    pub fn classify(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Collision::None,
            Cell::Wall | Cell::Snake => Collision::Fatal,
            Cell::Apple => Collision::Unknown,
        }
    }
}

/// The snake in the game.
///
/// The body is kept head first in a [`SequenceList`]. Every segment is
/// mirrored as a [`Cell::Snake`] on the grid and every mutation here updates
/// both sides.
#[derive(Debug, Clone)]
pub struct Snake {
    body: SequenceList<Position>,
    heading: Direction,
}

impl Snake {
    /// Place a new snake with its head at `head`, trailing away from `heading`
    pub fn initialize(
        grid: &mut Grid,
        head: Position,
        heading: Direction,
    ) -> Result<Self, SnakeError> {
        let (back_dx, back_dy) = heading.reverse().delta();
        let segments: Vec<Position> = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| head.moved_by(back_dx * i, back_dy * i))
            .collect();

        if let Some(blocked) = segments
            .iter()
            .find(|&&pos| grid.cell_at(pos) != Cell::Empty)
        {
            return Err(SnakeError::SpawnBlocked {
                x: blocked.x,
                y: blocked.y,
            });
        }

        let mut body = SequenceList::with_capacity(INITIAL_SNAKE_LENGTH);
        for pos in segments {
            body.push_back(pos);
            grid.set_cell_at(pos, Cell::Snake);
        }

        debug!("snake placed at {head:?} heading {}", heading.label());
        Ok(Self { body, heading })
    }

    pub fn head(&self) -> Option<Position> {
        self.body.head().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.tail().copied()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Cell the head would enter on the next tick
    pub fn next_head_position(&self) -> Option<Position> {
        self.head().map(|head| head.moved_in_direction(self.heading))
    }

    /// Classify what entering `pos` would mean
    pub fn classify_collision(&self, grid: &Grid, pos: Position) -> Collision {
        Collision::classify(grid.cell_at(pos))
    }

    /// Move the snake so that its head is at `new_head`.
    ///
    /// The move is committed unconditionally; collisions must be checked
    /// before calling this. The tail node is recycled as the new head, so the
    /// length stays the same and nothing is allocated.
    pub fn advance(&mut self, grid: &mut Grid, new_head: Position) -> Result<(), SnakeError> {
        let tail = self.tail().ok_or(SnakeError::HeadlessSnake)?;
        grid.set_cell_at(tail, Cell::Empty);

        self.body.rotate_tail_to_head();
        let head = self.body.head_mut().ok_or(SnakeError::HeadlessSnake)?;
        *head = new_head;

        grid.set_cell_at(new_head, Cell::Snake);
        Ok(())
    }

    /// Change heading unless `proposed` points straight back.
    ///
    /// Returns whether the heading was changed.
    pub fn set_heading(&mut self, proposed: Direction) -> bool {
        if self.heading.is_opposite(proposed) {
            return false;
        }
        self.heading = proposed;
        true
    }

    /// Release every segment and clear its cell, returning how many there were
    pub fn teardown(&mut self, grid: &mut Grid) -> usize {
        let mut released = 0;
        while let Some(pos) = self.body.remove_at(0) {
            if grid.cell_at(pos) == Cell::Snake {
                grid.set_cell_at(pos, Cell::Empty);
            }
            released += 1;
        }
        released
    }
}

/// Stage of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title animation, waiting for a key
    Intro,
    Playing,
    Terminated,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub phase: Phase,
    pub ticks: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(grid: Grid, snake: Snake) -> Self {
        Self {
            grid,
            snake,
            phase: Phase::Intro,
            ticks: 0,
        }
    }

    /// Leave the intro and start playing
    pub fn begin(&mut self) {
        if self.phase == Phase::Intro {
            self.phase = Phase::Playing;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// End the session and release the snake body
    pub fn teardown(&mut self) -> usize {
        self.phase = Phase::Terminated;
        self.snake.teardown(&mut self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every body segment is a snake cell and no snake cell is outside the body
    fn assert_body_matches_grid(snake: &Snake, grid: &Grid) {
        for pos in snake.segments() {
            assert_eq!(grid.cell_at(pos), Cell::Snake, "segment {pos:?}");
        }
        assert_eq!(grid.count(Cell::Snake), snake.len());
    }

    fn snake_at(grid: &mut Grid, x: i32, y: i32, heading: Direction) -> Snake {
        Snake::initialize(grid, Position::new(x, y), heading).unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_initialization() {
        let mut grid = Grid::new(10, 10);
        let snake = snake_at(&mut grid, 5, 5, Direction::Right);

        assert_eq!(snake.len(), 3);
        let body: Vec<Position> = snake.segments().collect();
        assert_eq!(
            body,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        assert_body_matches_grid(&snake, &grid);
        assert_eq!(grid.count(Cell::Empty), 8 * 8 - 3);
    }

    #[test]
    fn test_snake_trails_opposite_heading() {
        let cases = [
            (Direction::Left, (6, 5), (7, 5)),
            (Direction::Up, (5, 6), (5, 7)),
            (Direction::Down, (5, 4), (5, 3)),
        ];

        for (heading, second, third) in cases {
            let mut grid = Grid::new(12, 12);
            let snake = snake_at(&mut grid, 5, 5, heading);
            let body: Vec<Position> = snake.segments().collect();
            assert_eq!(body[1], Position::new(second.0, second.1));
            assert_eq!(body[2], Position::new(third.0, third.1));
            assert_body_matches_grid(&snake, &grid);
        }
    }

    #[test]
    fn test_initialize_into_wall_fails() {
        let mut grid = Grid::new(10, 10);
        let result = Snake::initialize(&mut grid, Position::new(2, 5), Direction::Right);

        assert_eq!(result.unwrap_err(), SnakeError::SpawnBlocked { x: 0, y: 5 });
        assert_eq!(grid.count(Cell::Snake), 0);
    }

    #[test]
    fn test_next_head_position() {
        let mut grid = Grid::new(10, 10);
        let mut snake = snake_at(&mut grid, 5, 5, Direction::Right);
        assert_eq!(snake.next_head_position(), Some(Position::new(6, 5)));

        snake.set_heading(Direction::Down);
        assert_eq!(snake.next_head_position(), Some(Position::new(5, 6)));
        // pure: nothing moved
        assert_eq!(snake.head(), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_advance_moves_one_cell() {
        let mut grid = Grid::new(10, 10);
        let mut snake = snake_at(&mut grid, 5, 5, Direction::Right);

        snake.advance(&mut grid, Position::new(6, 5)).unwrap();

        let body: Vec<Position> = snake.segments().collect();
        assert_eq!(
            body,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
        assert_eq!(grid.cell_at(Position::new(3, 5)), Cell::Empty);
        assert_eq!(snake.tail(), Some(Position::new(4, 5)));
        assert_body_matches_grid(&snake, &grid);
    }

    #[test]
    fn test_advance_changes_exactly_two_cells() {
        let mut grid = Grid::new(12, 12);
        let mut snake = snake_at(&mut grid, 5, 5, Direction::Right);
        let turns = [
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
        ];

        for turn in turns {
            snake.set_heading(turn);
            let before = grid.clone();
            let old_tail = snake.tail().unwrap();
            let next = snake.next_head_position().unwrap();
            assert_eq!(snake.classify_collision(&grid, next), Collision::None);

            snake.advance(&mut grid, next).unwrap();

            assert_eq!(snake.len(), 3);
            let changed: Vec<Position> = grid
                .positions()
                .filter(|&p| grid.cell_at(p) != before.cell_at(p))
                .collect();
            assert_eq!(changed.len(), 2);
            assert!(changed.contains(&old_tail));
            assert!(changed.contains(&next));
            assert_eq!(grid.cell_at(old_tail), Cell::Empty);
            assert_eq!(grid.cell_at(next), Cell::Snake);
            assert_body_matches_grid(&snake, &grid);
        }
    }

    #[test]
    fn test_set_heading_rejects_reverse() {
        for current in Direction::ALL {
            for proposed in Direction::ALL {
                let mut grid = Grid::new(12, 12);
                let mut snake = snake_at(&mut grid, 5, 5, current);

                let applied = snake.set_heading(proposed);

                if proposed == current.reverse() {
                    assert!(!applied);
                    assert_eq!(snake.heading(), current);
                } else {
                    assert!(applied);
                    assert_eq!(snake.heading(), proposed);
                }
            }
        }
    }

    #[test]
    fn test_classify_collision() {
        let mut grid = Grid::new(10, 10);
        let snake = snake_at(&mut grid, 5, 5, Direction::Right);

        assert_eq!(
            snake.classify_collision(&grid, Position::new(0, 5)),
            Collision::Fatal
        );
        assert_eq!(
            snake.classify_collision(&grid, Position::new(4, 5)),
            Collision::Fatal
        );
        assert_eq!(
            snake.classify_collision(&grid, Position::new(6, 5)),
            Collision::None
        );

        grid.set_cell_at(Position::new(7, 7), Cell::Apple);
        assert_eq!(
            snake.classify_collision(&grid, Position::new(7, 7)),
            Collision::Unknown
        );
    }

    #[test]
    fn test_head_next_to_wall_is_fatal() {
        let mut grid = Grid::new(10, 10);
        let snake = snake_at(&mut grid, 1, 5, Direction::Left);

        let next = snake.next_head_position().unwrap();
        assert_eq!(next, Position::new(0, 5));
        assert_eq!(grid.cell_at(next), Cell::Wall);
        assert_eq!(snake.classify_collision(&grid, next), Collision::Fatal);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut grid = Grid::new(10, 10);
        let mut snake = snake_at(&mut grid, 5, 5, Direction::Right);

        assert_eq!(snake.teardown(&mut grid), 3);
        assert!(snake.is_empty());
        assert_eq!(grid.count(Cell::Snake), 0);
        assert_eq!(snake.head(), None);
        assert_eq!(
            snake.advance(&mut grid, Position::new(6, 5)),
            Err(SnakeError::HeadlessSnake)
        );
    }

    #[test]
    fn test_phase_transitions() {
        let mut grid = Grid::new(10, 10);
        let snake = snake_at(&mut grid, 5, 5, Direction::Right);
        let mut state = GameState::new(grid, snake);

        assert_eq!(state.phase, Phase::Intro);
        state.begin();
        assert!(state.is_playing());

        assert_eq!(state.teardown(), 3);
        assert!(state.is_terminated());

        // no way back from the end
        state.begin();
        assert!(state.is_terminated());
    }
}
