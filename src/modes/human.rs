use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::error::SnakeError;
use crate::game::{Action, GameConfig, GameEngine, GameState, StepResult, TICK_DURATION};
use crate::input::{InputHandler, KeyAction};
use crate::render::{IntroScreen, Renderer};

type Screen = Terminal<CrosstermBackend<Stdout>>;

/// Frame rate of the intro animation
const INTRO_FRAME: Duration = Duration::from_millis(16);

/// Keyboard-driven game session: intro, play, teardown
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    intro: IntroScreen,
    renderer: Renderer,
    input_handler: InputHandler,
    pending_action: Option<Action>,
    interrupted: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        let engine = GameEngine::new(config);
        let state = engine.reset()?;

        Ok(Self {
            engine,
            state,
            intro: IntroScreen::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pending_action: None,
            interrupted: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_phases(&mut terminal).await;
        self.finish();

        // Restore the terminal even if the game loop failed
        let restored = self.cleanup_terminal(&mut terminal);

        result.and(restored)
    }

    /// Release the snake once play is over; returns the number of segments freed
    fn finish(&mut self) -> usize {
        let released = self.state.teardown();
        info!(
            "game over after {} ticks, released {} segments",
            self.state.ticks, released
        );
        released
    }

    async fn run_phases(&mut self, terminal: &mut Screen) -> Result<()> {
        let mut events = EventStream::new();

        self.run_intro(terminal, &mut events).await?;
        if self.interrupted {
            return Ok(());
        }

        self.state.begin();
        self.run_game_loop(terminal, &mut events).await
    }

    async fn run_intro(&mut self, terminal: &mut Screen, events: &mut EventStream) -> Result<()> {
        let mut frame_timer = interval(INTRO_FRAME);

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if self.handle_intro_key(key) {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => {
                            self.interrupted = true;
                            break;
                        }
                    }
                }

                _ = frame_timer.tick() => {
                    self.intro.tick();
                    terminal.draw(|frame| {
                        self.renderer.render_intro(frame, &self.intro);
                    }).context("Failed to draw intro")?;
                }
            }
        }

        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    async fn run_game_loop(&mut self, terminal: &mut Screen, events: &mut EventStream) -> Result<()> {
        let mut tick_timer = tick_timer();
        // the first tick of an interval completes at once
        tick_timer.tick().await;

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.interrupted = true,
                    }
                }

                _ = tick_timer.tick() => {
                    let result = self.update_game()?;
                    self.draw(terminal)?;
                    if result.terminated {
                        break;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.interrupted = true;
                }
            }

            if self.interrupted {
                break;
            }
        }

        Ok(())
    }

    /// Returns true when the intro should end
    fn handle_intro_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if self.input_handler.handle_key_event(key) == KeyAction::Interrupt {
            self.interrupted = true;
            return true;
        }

        self.intro.title_visible()
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => {
                // a pending quit is not overridden by later keys
                if self.pending_action != Some(Action::Quit) {
                    self.pending_action = Some(action);
                }
            }
            KeyAction::Interrupt => self.interrupted = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<StepResult> {
        let action = self.pending_action.take().unwrap_or(Action::Continue);
        let result = self.engine.step(&mut self.state, action)?;

        if let Some(reason) = result.reason {
            debug!("stopping: {reason:?}");
        }

        Ok(result)
    }

    fn draw(&self, terminal: &mut Screen) -> Result<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, &self.state))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(&mut self, terminal: &mut Screen) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Game clock; a late tick pushes the following ones back instead of bursting
fn tick_timer() -> Interval {
    let mut timer = interval(TICK_DURATION);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

fn setup_terminal() -> Result<Screen> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    enter_screen().inspect_err(|_| leave_screen())
}

fn enter_screen() -> Result<Screen> {
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo a half-finished setup
fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Phase, Position, TerminationReason};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn playing_mode() -> HumanMode {
        let mut mode = HumanMode::new(GameConfig::small()).unwrap();
        mode.state.begin();
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.state().phase, Phase::Intro);
        assert_eq!(mode.state().snake.len(), 3);
    }

    #[test]
    fn test_initialization_rejects_small_grid() {
        let err = HumanMode::new(GameConfig::new(4, 4)).err().unwrap();
        assert!(matches!(err, SnakeError::GridTooSmall { .. }));
    }

    #[test]
    fn test_intro_ignores_keys_until_title() {
        let mut mode = HumanMode::new(GameConfig::small()).unwrap();
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);

        assert!(!mode.handle_intro_key(space));

        while !mode.intro.title_visible() {
            mode.intro.tick();
        }
        assert!(mode.handle_intro_key(space));
        assert!(!mode.interrupted);
    }

    #[test]
    fn test_intro_interrupt() {
        let mut mode = HumanMode::new(GameConfig::small()).unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(mode.handle_intro_key(ctrl_c));
        assert!(mode.interrupted);
    }

    #[test]
    fn test_key_press_is_applied_on_next_tick() {
        let mut mode = playing_mode();
        let head = mode.state.snake.head().unwrap();

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.pending_action, Some(Action::Move(Direction::Up)));

        let result = mode.update_game().unwrap();
        assert!(!result.terminated);
        assert_eq!(mode.pending_action, None);
        assert_eq!(mode.state.snake.head(), Some(head.moved_by(1, 0)));
        assert_eq!(mode.state.snake.heading(), Direction::Up);
    }

    #[test]
    fn test_latest_direction_wins() {
        let mut mode = playing_mode();

        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Down));

        assert_eq!(mode.pending_action, Some(Action::Move(Direction::Down)));
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut mode = playing_mode();

        mode.handle_event(key(KeyCode::Esc));
        mode.handle_event(key(KeyCode::Left));

        let result = mode.update_game().unwrap();
        assert!(result.terminated);
        assert_eq!(result.reason, Some(TerminationReason::Quit));
    }

    #[test]
    fn test_runs_into_wall_and_tears_down() {
        let mut mode = playing_mode();

        let mut ticks = 0;
        while !mode.update_game().unwrap().terminated {
            ticks += 1;
            assert!(ticks < 100, "snake never hit the wall");
        }

        assert!(mode.state.is_terminated());
        assert_eq!(mode.state.snake.head(), Some(Position::new(8, 4)));
        assert_eq!(mode.finish(), 3);
        assert!(mode.state.snake.is_empty());
        assert_eq!(mode.state.grid.count(Cell::Snake), 0);
    }

    #[test]
    fn test_finish_after_interrupted_intro() {
        let mut mode = HumanMode::new(GameConfig::small()).unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(mode.handle_intro_key(ctrl_c));

        assert_eq!(mode.finish(), 3);
        assert!(mode.state.is_terminated());
        assert_eq!(mode.state.grid.count(Cell::Snake), 0);
    }

    #[tokio::test]
    async fn test_tick_timer_delays_missed_ticks() {
        let timer = tick_timer();
        assert_eq!(timer.period(), TICK_DURATION);
        assert_eq!(timer.missed_tick_behavior(), MissedTickBehavior::Delay);
    }
}
