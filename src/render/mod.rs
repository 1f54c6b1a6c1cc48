//! Terminal rendering
//!
//! The grid reaches the screen through the [`DrawCell`] seam, so the game
//! state never depends on ratatui.

pub mod canvas;
pub mod intro;
pub mod renderer;

pub use canvas::{paint_grid, CellKind, DrawCell};
pub use intro::IntroScreen;
pub use renderer::Renderer;
