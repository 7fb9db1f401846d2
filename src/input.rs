use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Cell offset of one step in this direction (y grows downwards).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    Confirm,
    SelectDifficulty(Difficulty),
    ReturnToMenu,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Key to intent table. Keys not listed here are ignored.
pub const KEY_BINDINGS: &[(KeyCode, GameInput)] = &[
    (KeyCode::Up, GameInput::Direction(Direction::Up)),
    (KeyCode::Down, GameInput::Direction(Direction::Down)),
    (KeyCode::Left, GameInput::Direction(Direction::Left)),
    (KeyCode::Right, GameInput::Direction(Direction::Right)),
    (KeyCode::Char('w'), GameInput::Direction(Direction::Up)),
    (KeyCode::Char('s'), GameInput::Direction(Direction::Down)),
    (KeyCode::Char('a'), GameInput::Direction(Direction::Left)),
    (KeyCode::Char('d'), GameInput::Direction(Direction::Right)),
    (KeyCode::Char('p'), GameInput::TogglePause),
    (KeyCode::Char(' '), GameInput::TogglePause),
    (KeyCode::Enter, GameInput::Confirm),
    (KeyCode::Char('1'), GameInput::SelectDifficulty(Difficulty::Easy)),
    (KeyCode::Char('2'), GameInput::SelectDifficulty(Difficulty::Medium)),
    (KeyCode::Char('3'), GameInput::SelectDifficulty(Difficulty::Hard)),
    (KeyCode::Esc, GameInput::ReturnToMenu),
    (KeyCode::Char('m'), GameInput::ReturnToMenu),
    (KeyCode::Char('q'), GameInput::Quit),
];

/// Maps one key event to an intent, or `None` for unbound keys.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == code)
        .map(|(_, input)| *input)
}

/// Reads keyboard events from the terminal.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for a bound key press.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
