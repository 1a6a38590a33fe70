use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use thiserror::Error;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Smallest board side that still leaves room for the food margin.
pub const MIN_GRID_DIM: u16 = 4;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Startup options resolved from the command line.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Start from a random cell and heading instead of the board center.
    pub random_init: bool,
    /// Seed for food placement and random starts; `None` draws from entropy.
    pub seed: Option<u64>,
    pub tick_interval: Duration,
}

/// Rejected startup options.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("board {0}x{1} is too small, both sides must be at least {MIN_GRID_DIM}")]
    BoardTooSmall(u16, u16),
}

impl GameConfig {
    /// Checks that the board leaves room for the snake and the food margin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width < MIN_GRID_DIM || self.grid.height < MIN_GRID_DIM {
            return Err(ConfigError::BoardTooSmall(self.grid.width, self.grid.height));
        }
        Ok(())
    }
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Solid block color for the snake head.
    pub snake_head: Color,
    /// Solid block color for body segments.
    pub snake_body: Color,
    /// Solid block color for the tail segment.
    pub snake_tail: Color,
    /// Solid block color for food.
    pub food: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_fg: Color,
    pub overlay_fg: Color,
}

/// Classic blue snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::White,
    snake_body: Color::Blue,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_fg: Color::White,
    overlay_fg: Color::Green,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    border_fg: Color::Cyan,
    border_bg: Color::DarkGray,
    hud_fg: Color::Cyan,
    overlay_fg: Color::Cyan,
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN];

/// Looks a theme up by its name, ignoring case.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph drawn for the snake head.
pub const GLYPH_SNAKE_HEAD: &str = "█";

/// Glyph drawn for body segments.
pub const GLYPH_SNAKE_BODY: &str = "▓";

/// Glyph drawn for the last body segment.
pub const GLYPH_SNAKE_TAIL: &str = "░";

/// Glyph drawn for food.
pub const GLYPH_FOOD: &str = "●";
