//! Core game logic module for Snake
//!
//! Grid, snake and per-tick rules, with no I/O or rendering dependencies.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, MAX_GRID_SIZE, MIN_GRID_SIZE, TICK_DURATION};
pub use engine::{GameEngine, StepResult, TerminationReason};
pub use grid::{Cell, Grid};
pub use state::{Collision, GameState, Phase, Position, Snake, INITIAL_SNAKE_LENGTH};
