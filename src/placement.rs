use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Random draws tried before falling back to enumerating the free cells.
pub const MAX_REJECTION_SAMPLES: usize = 64;

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Region {
    pub min: Position,
    pub max: Position,
}

impl Region {
    /// The whole board.
    #[must_use]
    pub fn full(bounds: GridSize) -> Self {
        Self {
            min: Position::new(0, 0),
            max: Position::new(i32::from(bounds.width) - 1, i32::from(bounds.height) - 1),
        }
    }

    /// The board shrunk by `margin` cells on every side.
    #[must_use]
    pub fn interior(bounds: GridSize, margin: i32) -> Self {
        Self {
            min: Position::new(margin, margin),
            max: Position::new(
                i32::from(bounds.width) - 1 - margin,
                i32::from(bounds.height) - 1 - margin,
            ),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    /// Iterates row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Position::new(x, y)))
    }
}

/// Picks a uniformly random cell of `region` for which `is_blocked` is false.
///
/// Rejection sampling is tried first; when every draw lands on a blocked cell
/// the free cells are enumerated and one of them is chosen, so the call always
/// terminates. Returns `None` when the region has no free cell.
pub fn sample_free_cell<R, F>(rng: &mut R, region: Region, is_blocked: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if region.is_empty() {
        return None;
    }

    for _ in 0..MAX_REJECTION_SAMPLES {
        let candidate = Position::new(
            rng.gen_range(region.min.x..=region.max.x),
            rng.gen_range(region.min.y..=region.max.y),
        );
        if !is_blocked(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Position> = region.cells().filter(|cell| !is_blocked(*cell)).collect();
    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}
