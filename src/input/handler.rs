use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    /// Ctrl+C, leaves the program from any screen
    Interrupt,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Interrupt;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Move(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Move(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Move(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Move(Direction::Right))
            }

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                KeyAction::GameAction(Action::Quit)
            }

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
