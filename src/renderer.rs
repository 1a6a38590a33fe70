use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::config::{
    GridSize, Theme, BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPH_SNAKE_TAIL,
};
use crate::game::{ControlMode, EndReason, Game, GameStatus};
use crate::point::Point;

/// Draws the world after each tick.
///
/// Implementations read state and never mutate it; the driver picks one at
/// startup from configuration.
pub trait Renderer {
    fn render(&mut self, game: &Game) -> io::Result<()>;
}

/// Renders nothing. Used for headless runs where only the log and the final
/// summary matter.
#[derive(Debug, Default)]
pub struct HeadlessRenderer;

impl Renderer for HeadlessRenderer {
    fn render(&mut self, _game: &Game) -> io::Result<()> {
        Ok(())
    }
}

/// Ratatui renderer owning the terminal session for one run.
///
/// Raw mode and the alternate screen are entered on construction and
/// restored on drop, so a panic hook only needs [`restore_terminal`].
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    theme: &'static Theme,
    best_score: u32,
}

impl TuiRenderer {
    pub fn new(theme: &'static Theme, best_score: u32) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self {
                terminal,
                theme,
                best_score,
            }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Updates the best score shown in the HUD.
    pub fn set_best_score(&mut self, best_score: u32) {
        self.best_score = best_score;
    }
}

impl Renderer for TuiRenderer {
    fn render(&mut self, game: &Game) -> io::Result<()> {
        let theme = self.theme;
        let best_score = self.best_score;
        self.terminal
            .draw(|frame| draw_frame(frame, game, theme, best_score))?;
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Best-effort terminal restore, shared by drop and the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

fn draw_frame(frame: &mut Frame<'_>, game: &Game, theme: &Theme, best_score: u32) {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(frame, hud_area, game, theme, best_score);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, game, theme);
    render_snake(frame, inner, game, theme);

    match game.status {
        GameStatus::Paused => render_pause_overlay(frame, play_area, theme),
        GameStatus::GameOver | GameStatus::Victory => {
            render_end_overlay(frame, play_area, game, theme, best_score);
        }
        GameStatus::Playing => {}
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &Game, theme: &Theme, best_score: u32) {
    let bounds = game.snake.bounds();
    let mode = match game.control() {
        ControlMode::Autopilot => "autopilot",
        ControlMode::Manual => "manual",
    };
    let line = format!(
        " score {}  best {}  length {}  {}x{}  {}",
        game.snake.score(),
        best_score,
        game.snake.length(),
        bounds.width,
        bounds.height,
        mode,
    );

    frame.render_widget(
        Paragraph::new(Line::from(line)).style(Style::new().fg(theme.hud_fg)),
        area,
    );
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, game: &Game, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, game.snake.bounds(), game.snake.food()) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &Game, theme: &Theme) {
    let bounds = game.snake.bounds();
    let last = game.snake.segments().last().copied();

    let buffer = frame.buffer_mut();
    for segment in game.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let (glyph, color) = if Some(*segment) == last {
            (GLYPH_SNAKE_TAIL, theme.snake_tail)
        } else {
            (GLYPH_SNAKE_BODY, theme.snake_body)
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }

    if let Some((x, y)) = logical_to_terminal(inner, bounds, game.snake.head()) {
        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_HEAD,
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn render_pause_overlay(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_rect(area, 24, 5);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[p] resume  [q] quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.overlay_fg))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn render_end_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    game: &Game,
    theme: &Theme,
    best_score: u32,
) {
    let popup = centered_rect(area, 32, 8);
    frame.render_widget(Clear, popup);

    let title = match game.status {
        GameStatus::Victory => " board cleared ",
        _ => " game over ",
    };
    let cause = match game.end_reason {
        Some(EndReason::WallCollision) => "hit the wall",
        Some(EndReason::BodyCollision) => "ran into itself",
        Some(EndReason::NoPath) => "no route to food",
        None => "every cell covered",
    };
    let score = game.snake.score();

    let lines = vec![
        Line::from(cause.to_owned()),
        Line::from(format!("score {score}")),
        Line::from(format!("best {}", best_score.max(score))),
        Line::from(""),
        Line::from("press any key"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.overlay_fg))
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Point) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
