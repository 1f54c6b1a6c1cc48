use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::canvas::{paint_grid, CellKind, DrawCell};
use super::intro::{IntroScreen, INTRO_HEIGHT, INTRO_WIDTH};
use crate::game::{Cell, GameState};

/// Rows reserved above the grid
pub const STATUS_BAR_HEIGHT: u16 = 1;

const EMPTY_COLOR: Color = Color::Black;
const WALL_COLOR: Color = Color::Rgb(140, 36, 36);
const BODY_COLOR: Color = Color::Rgb(184, 135, 122);
const HEAD_COLOR: Color = Color::Rgb(230, 90, 210);
const TAIL_COLOR: Color = Color::Rgb(199, 150, 177);
const APPLE_COLOR: Color = Color::Red;
const RULE_COLOR: Color = Color::Rgb(201, 207, 0);

const TITLE: &str = "S N A K E";
const CREDITS: &str = "a game by Tekn0";
const PROMPT: &str = "press any key";

/// Palette entry for a cell
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Empty => EMPTY_COLOR,
        CellKind::Wall => WALL_COLOR,
        CellKind::Body => BODY_COLOR,
        CellKind::Head => HEAD_COLOR,
        CellKind::Tail => TAIL_COLOR,
        CellKind::Apple => APPLE_COLOR,
    }
}

/// Collects cells into styled terminal lines, two columns per cell
#[derive(Default)]
struct GridPainter {
    lines: Vec<Line<'static>>,
    row: Vec<Span<'static>>,
    row_y: Option<i32>,
}

impl GridPainter {
    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.row.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.row)));
        }
        self.lines
    }
}

impl DrawCell for GridPainter {
    fn draw_cell(&mut self, _x: i32, y: i32, cell: Cell, is_head: bool, is_tail: bool) {
        if self.row_y != Some(y) {
            if !self.row.is_empty() {
                self.lines.push(Line::from(std::mem::take(&mut self.row)));
            }
            self.row_y = Some(y);
        }

        let color = cell_color(CellKind::from_cell(cell, is_head, is_tail));
        self.row.push(Span::styled("  ", Style::default().bg(color)));
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
                Constraint::Min(0),                    // Game area
            ])
            .split(frame.area());

        frame.render_widget(self.render_status(state), chunks[0]);

        let grid = Paragraph::new(self.grid_lines(state)).alignment(Alignment::Center);
        frame.render_widget(grid, chunks[1]);
    }

    pub fn render_intro(&self, frame: &mut Frame, intro: &IntroScreen) {
        let area = centered(frame.area(), INTRO_WIDTH, INTRO_HEIGHT + 2);
        let intro_text = Paragraph::new(self.intro_lines(intro));
        frame.render_widget(intro_text, area);
    }

    /// The grid as terminal lines, one line per row
    pub fn grid_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let mut painter = GridPainter::default();
        paint_grid(state, &mut painter);
        painter.finish()
    }

    fn render_status(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                format!(" {TITLE} "),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Heading: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.heading().label(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn intro_lines(&self, intro: &IntroScreen) -> Vec<Line<'static>> {
        let show_title = intro.title_visible();
        let rule = || {
            let symbol = if show_title { "─" } else { " " };
            Line::from(Span::styled(
                symbol.repeat(INTRO_WIDTH as usize),
                Style::default().fg(RULE_COLOR),
            ))
        };

        let mut lines = vec![rule()];
        for y in 0..INTRO_HEIGHT {
            let caption = match y {
                y if show_title && y == INTRO_HEIGHT / 2 - 2 => Some(TITLE),
                y if show_title && y == INTRO_HEIGHT / 2 - 1 => Some(CREDITS),
                y if show_title && y == INTRO_HEIGHT / 2 + 1 => Some(PROMPT),
                _ => None,
            };

            let spans = (0..INTRO_WIDTH)
                .map(|x| {
                    let bg = intro.pixel(x, y).unwrap_or(EMPTY_COLOR);
                    let ch = caption.and_then(|text| caption_char(text, x)).unwrap_or(' ');
                    Span::styled(
                        ch.to_string(),
                        Style::default().fg(Color::White).bg(bg),
                    )
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(spans));
        }
        lines.push(rule());
        lines
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Character of `text` at column `x` when centered in the intro box
fn caption_char(text: &str, x: u16) -> Option<char> {
    let len = text.chars().count() as u16;
    let start = INTRO_WIDTH.saturating_sub(len) / 2;
    let offset = x.checked_sub(start)?;
    text.chars().nth(offset as usize)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
