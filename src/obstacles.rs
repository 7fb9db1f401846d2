use std::collections::HashSet;

use rand::Rng;

use crate::config::{GridSize, OBSTACLE_EDGE_MARGIN, SPAWN_ANCHOR};
use crate::placement::{Region, sample_free_cell};
use crate::snake::{Position, Snake};

/// Blocked cells scattered over the board interior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obstacles {
    cells: HashSet<Position>,
}

impl Obstacles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Builds a fresh set of up to `count` distinct obstacles.
    ///
    /// Cells are drawn from the interior region, away from the edges, and never
    /// land on the snake, the spawn anchor, or `food`. When the interior has
    /// fewer free cells than `count`, the set holds every free cell instead.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        count: usize,
        snake: &Snake,
        food: Option<Position>,
    ) -> Self {
        let region = Region::interior(bounds, OBSTACLE_EDGE_MARGIN);
        let mut cells = HashSet::with_capacity(count);

        while cells.len() < count {
            let next = sample_free_cell(rng, region, |cell| {
                cells.contains(&cell)
                    || snake.occupies(cell)
                    || cell == SPAWN_ANCHOR
                    || Some(cell) == food
            });

            match next {
                Some(cell) => {
                    cells.insert(cell);
                }
                None => {
                    log::warn!(
                        "board interior only fits {} of {count} obstacles",
                        cells.len()
                    );
                    break;
                }
            }
        }

        Self { cells }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}
