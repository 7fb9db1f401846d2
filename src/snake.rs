use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Neighbouring position one step in `direction`, possibly off the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body and heading.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    /// Heading for the next move.
    direction: Direction,
    /// Heading of the last move actually made.
    moved_direction: Direction,
}

impl Snake {
    /// Straight horizontal body with its head at `head`, trailing to the left.
    #[must_use]
    pub fn initial(head: Position, direction: Direction) -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| Position {
                x: head.x - offset as i32,
                y: head.y,
            })
            .collect();

        Self {
            body,
            direction,
            moved_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
            moved_direction: direction,
        }
    }

    /// Turns the snake unless `requested` would reverse it onto itself.
    ///
    /// Checked against both the pending heading and the heading of the last
    /// move, so two quick turns between ticks cannot fold the head back into
    /// the neck.
    pub fn set_direction(&mut self, requested: Direction) {
        if direction_change_is_valid(self.direction, requested)
            && direction_change_is_valid(self.moved_direction, requested)
        {
            self.direction = requested;
        }
    }

    /// Where the head would land on the next move.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Pushes `new_head`; the tail is kept when `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.moved_direction = self.direction;
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
