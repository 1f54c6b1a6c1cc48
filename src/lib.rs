//! Grid Snake - a minimal terminal snake game
//!
//! This library provides:
//! - A generic doubly linked list with O(1) tail-to-head rotation (list module)
//! - Core game logic: grid, snake and per-tick rules (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering and the intro animation (render module)
//! - The real-time keyboard session (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod list;
pub mod modes;
pub mod render;

pub use error::SnakeError;
pub use list::SequenceList;
