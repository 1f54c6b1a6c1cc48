use log::{debug, info, warn};

use super::{
    action::Action,
    config::{GameConfig, MAX_GRID_SIZE},
    grid::{Cell, Grid},
    state::{Collision, GameState, Phase, Position, Snake},
};
use crate::error::SnakeError;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Player asked to stop
    Quit,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// How the target cell was classified
    pub collision: Collision,
    /// Set once the game ends
    pub reason: Option<TerminationReason>,
}

impl StepResult {
    fn running(collision: Collision) -> Self {
        Self {
            terminated: false,
            collision,
            reason: None,
        }
    }

    fn ended(collision: Collision, reason: TerminationReason) -> Self {
        Self {
            terminated: true,
            collision,
            reason: Some(reason),
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Build a fresh grid with the snake in the middle
    pub fn reset(&self) -> Result<GameState, SnakeError> {
        self.config.validate()?;

        let center = self.center()?;
        let mut grid = Grid::new(self.config.grid_width, self.config.grid_height);
        let snake = Snake::initialize(&mut grid, center, self.config.initial_heading)?;

        Ok(GameState::new(grid, snake))
    }

    /// Middle cell of the configured grid
    fn center(&self) -> Result<Position, SnakeError> {
        let too_large = || SnakeError::GridTooLarge {
            width: self.config.grid_width,
            height: self.config.grid_height,
            max: MAX_GRID_SIZE,
        };
        let width = i32::try_from(self.config.grid_width).map_err(|_| too_large())?;
        let height = i32::try_from(self.config.grid_height).map_err(|_| too_large())?;
        Ok(Position::new((width - 1) / 2, (height - 1) / 2))
    }

    /// Execute one tick.
    ///
    /// The head is moved first and the polled `action` is applied afterwards,
    /// so a heading change takes effect on the following tick. A fatal
    /// collision ends the game without moving the snake.
    pub fn step(&self, state: &mut GameState, action: Action) -> Result<StepResult, SnakeError> {
        if state.phase != Phase::Playing {
            return Ok(StepResult {
                terminated: state.is_terminated(),
                collision: Collision::None,
                reason: None,
            });
        }

        let next = state
            .snake
            .next_head_position()
            .ok_or(SnakeError::HeadlessSnake)?;
        let collision = state.snake.classify_collision(&state.grid, next);
        state.ticks += 1;

        match collision {
            Collision::Fatal => {
                let reason = match state.grid.cell_at(next) {
                    Cell::Snake => TerminationReason::SelfCollision,
                    _ => TerminationReason::Wall,
                };
                info!(
                    "collided with {:?} at ({}, {}) after {} ticks",
                    reason, next.x, next.y, state.ticks
                );
                state.phase = Phase::Terminated;
                return Ok(StepResult::ended(collision, reason));
            }
            Collision::Unknown => {
                warn!("unexpected cell {:?} at ({}, {})", state.grid.cell_at(next), next.x, next.y);
            }
            Collision::None | Collision::Food => {}
        }

        state.snake.advance(&mut state.grid, next)?;
        debug!("tick {}: head at ({}, {})", state.ticks, next.x, next.y);

        match action {
            Action::Quit => {
                info!("quit requested after {} ticks", state.ticks);
                state.phase = Phase::Terminated;
                Ok(StepResult::ended(collision, TerminationReason::Quit))
            }
            Action::Move(direction) => {
                if !state.snake.set_heading(direction) {
                    debug!("ignored reverse turn to {}", direction.label());
                }
                Ok(StepResult::running(collision))
            }
            Action::Continue => Ok(StepResult::running(collision)),
        }
    }
}
