use anyhow::{Context, Result};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Renderer;
use crate::game::{DisplayConfig, GameConfig, Palette, Rgb, SnakeState, Snapshot};
use crate::metrics::GameMetrics;

const HEAD_GLYPH: char = '█';
const BODY_GLYPH: char = '▓';
const FOOD_GLYPH: char = '●';
const EMPTY_GLYPH: char = '·';

/// Text shown above the board, derived from the game state alone
pub fn headline(snapshot: &Snapshot) -> String {
    match snapshot.state {
        SnakeState::Idle => "Snake".to_string(),
        SnakeState::Playing => format!("Score: {}", snapshot.score),
        SnakeState::Lost => "You lost!".to_string(),
        SnakeState::Won => "You won!".to_string(),
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[derive(Debug, Clone, Copy)]
enum Tile {
    Head(Color),
    Body(Color),
    Food(Color),
}

/// Lays out one frame: headline, board, footer
pub struct BoardView {
    display: DisplayConfig,
    palette: Palette,
}

impl BoardView {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            display: config.display,
            palette: config.colors.clone(),
        }
    }

    pub fn draw(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(snapshot), chunks[0]);

        let (cell_width, cell_height) = self.cell_size(snapshot.grid_size);
        let side = snapshot.grid_size.max(0) as u16;
        let board_area = centered(
            chunks[1],
            side.saturating_mul(cell_width).saturating_add(2),
            side.saturating_mul(cell_height).saturating_add(2),
        );
        frame.render_widget(self.render_board(snapshot), board_area);

        frame.render_widget(self.render_footer(snapshot, metrics), chunks[2]);
    }

    /// Terminal columns and rows used by one grid cell
    fn cell_size(&self, grid_size: i32) -> (u16, u16) {
        let side = grid_size.max(1) as u16;
        (
            (self.display.width / side).max(1),
            (self.display.height / side).max(1),
        )
    }

    fn render_header(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline(snapshot),
                Style::default()
                    .fg(to_color(self.palette.text))
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_board(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let size = snapshot.grid_size.max(0) as usize;
        let mut tiles: Vec<Option<Tile>> = vec![None; size * size];
        let index = |x: i32, y: i32| -> Option<usize> {
            if x < 0 || y < 0 || x as usize >= size || y as usize >= size {
                return None;
            }
            Some(y as usize * size + x as usize)
        };

        if let Some(food) = snapshot.food {
            if let Some(i) = index(food.position.x, food.position.y) {
                tiles[i] = Some(Tile::Food(to_color(food.color)));
            }
        }
        // Tail to head, so the head is drawn on top of stacked segments.
        for (n, segment) in snapshot.segments.iter().enumerate().rev() {
            if let Some(i) = index(segment.position.x, segment.position.y) {
                let color = to_color(segment.color);
                tiles[i] = Some(if n == 0 {
                    Tile::Head(color)
                } else {
                    Tile::Body(color)
                });
            }
        }

        let (cell_width, cell_height) = self.cell_size(snapshot.grid_size);
        let grid_style = Style::default().fg(to_color(self.palette.grid));
        let mut lines = Vec::with_capacity(size * cell_height as usize);

        for row in tiles.chunks(size.max(1)) {
            let spans: Vec<Span> = row
                .iter()
                .map(|tile| match tile {
                    Some(Tile::Head(color)) => Span::styled(
                        fill(HEAD_GLYPH, HEAD_GLYPH, cell_width),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                    Some(Tile::Body(color)) => Span::styled(
                        fill(BODY_GLYPH, BODY_GLYPH, cell_width),
                        Style::default().fg(*color),
                    ),
                    Some(Tile::Food(color)) => Span::styled(
                        fill(FOOD_GLYPH, ' ', cell_width),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled(fill(EMPTY_GLYPH, ' ', cell_width), grid_style),
                })
                .collect();
            let line = Line::from(spans);
            for _ in 0..cell_height {
                lines.push(line.clone());
            }
        }

        let border_color = if snapshot.state.is_over() {
            Color::Red
        } else {
            to_color(self.palette.text)
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(to_color(self.palette.background))),
        )
    }

    fn render_footer(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let controls = if snapshot.state.is_over() {
            Line::from(vec![
                Span::styled("Any key", Style::default().fg(Color::Green)),
                Span::raw(" to play again | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        let stats = Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::raw(metrics.high_score.to_string()),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::raw(metrics.games_played.to_string()),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::raw(metrics.format_time()),
        ]);

        Paragraph::new(vec![controls, stats]).alignment(Alignment::Center)
    }
}

fn fill(first: char, rest: char, width: u16) -> String {
    let mut cell = String::with_capacity(width as usize * 3);
    cell.push(first);
    for _ in 1..width {
        cell.push(rest);
    }
    cell
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
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

/// Draws snapshots onto a ratatui terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    view: BoardView,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, config: &GameConfig) -> Self {
        Self {
            terminal,
            view: BoardView::new(config),
        }
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()> {
        let view = &self.view;
        self.terminal
            .draw(|frame| view.draw(frame, snapshot, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}
