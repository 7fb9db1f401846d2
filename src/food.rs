use rand::Rng;

use crate::config::GridSize;
use crate::obstacles::Obstacles;
use crate::placement::{Region, sample_free_cell};
use crate::snake::{Position, Snake};

/// Picks a food cell anywhere on the board that is neither snake nor obstacle.
///
/// Returns `None` when the board has no free cell left.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    obstacles: &Obstacles,
) -> Option<Position> {
    sample_free_cell(rng, Region::full(bounds), |cell| {
        snake.occupies(cell) || obstacles.contains(cell)
    })
}
