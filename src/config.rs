use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Difficulty chosen once per session; fixes starting speed and obstacle count.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Tick interval a fresh session starts with.
    #[must_use]
    pub fn initial_speed_ms(self) -> u64 {
        match self {
            Self::Easy => 220,
            Self::Medium => 140,
            Self::Hard => 80,
        }
    }

    /// Number of obstacles kept on the board.
    #[must_use]
    pub fn obstacle_count(self) -> usize {
        match self {
            Self::Easy => 5,
            Self::Medium => 10,
            Self::Hard => 18,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Next entry in menu order, saturating at the last one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    /// Previous entry in menu order, saturating at the first one.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::Easy | Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty(value.to_owned())),
        }
    }
}

/// What the presenter does once the game-over message has been shown.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverAction {
    #[default]
    Menu,
    Restart,
}

impl FromStr for GameOverAction {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "menu" => Ok(Self::Menu),
            "restart" => Ok(Self::Restart),
            _ => Err(ConfigError::UnknownGameOverAction(value.to_owned())),
        }
    }
}

/// Colors for every element drawn on the board and in the HUD.
#[derive(Debug)]
pub struct Palette {
    pub board_bg: Color,
    pub border: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub obstacle: Color,
    pub accent: Color,
    pub muted: Color,
}

pub const PALETTE: Palette = Palette {
    board_bg: Color::Rgb(0x23, 0x29, 0x46),
    border: Color::Rgb(0xb8, 0xc1, 0xec),
    snake_head: Color::Rgb(0xf6, 0xc1, 0x77),
    snake_body: Color::Rgb(0xee, 0xbb, 0xc3),
    snake_tail: Color::Rgb(0xb8, 0xc1, 0xec),
    food: Color::Rgb(0xd0, 0x3a, 0x36),
    obstacle: Color::Rgb(0x5c, 0x63, 0x70),
    accent: Color::Rgb(0xf6, 0xc1, 0x77),
    muted: Color::DarkGray,
};

/// Every logical cell is drawn two terminal columns wide.
pub const GLYPH_CELL: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "◖◗";
pub const GLYPH_OBSTACLE: &str = "▒▒";
pub const GLYPH_LIFE: &str = "♥";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest board that holds the initial body and a non-empty obstacle interior.
pub const MIN_GRID_WIDTH: u16 = 8;
pub const MIN_GRID_HEIGHT: u16 = 6;

/// Head cell of a freshly spawned snake; never used for obstacles.
pub const SPAWN_ANCHOR: Position = Position { x: 5, y: 5 };

/// Length of the initial horizontal body, head included.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

pub const STARTING_LIVES: u32 = 3;

/// Fastest allowed tick interval in milliseconds.
pub const MIN_SPEED_MS: u64 = 60;

/// Tick interval reduction per food eaten.
pub const SPEED_STEP_MS: u64 = 5;

/// Obstacles move every time the score reaches a multiple of this.
pub const OBSTACLE_REGEN_SCORE_INTERVAL: u32 = 5;

/// Distance kept between obstacles and the board edge.
pub const OBSTACLE_EDGE_MARGIN: i32 = 2;

/// Pause between losing a life and respawning.
pub const LIFE_LOST_PAUSE_MS: u64 = 1200;

/// How long the game-over message stays up.
pub const GAME_OVER_DELAY_MS: u64 = 2500;
