use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{
    Difficulty, GridSize, MIN_SPEED_MS, OBSTACLE_REGEN_SCORE_INTERVAL, SPAWN_ANCHOR,
    SPEED_STEP_MS, STARTING_LIVES,
};
use crate::food;
use crate::input::Direction;
use crate::obstacles::Obstacles;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    /// A life was just lost; waiting for `reset_after_life`.
    LifeLost,
    GameOver,
    /// The snake filled every free cell.
    Victory,
}

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfCollision,
    Obstacle,
}

impl Collision {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "bit yourself",
            Self::Obstacle => "hit an obstacle",
        }
    }
}

/// Result of one `step`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Nothing happened because the game is not in play.
    Idle,
    Moved,
    Ate { obstacles_moved: bool },
    LifeLost(Collision),
    GameOver(Collision),
    Victory,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub obstacles: Obstacles,
    pub food: Option<Position>,
    pub score: u32,
    pub lives: u32,
    /// Milliseconds until the next tick.
    pub speed_ms: u64,
    pub tick_count: u64,
    pub status: GameStatus,
    pub last_collision: Option<Collision>,
    difficulty: Difficulty,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Starts a session with an entropy-seeded RNG.
    #[must_use]
    pub fn new(difficulty: Difficulty, bounds: GridSize) -> Self {
        Self::with_rng(difficulty, bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(difficulty: Difficulty, bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(difficulty, bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, bounds: GridSize, rng: StdRng) -> Self {
        let mut state = Self {
            snake: Snake::initial(SPAWN_ANCHOR, Direction::Right),
            obstacles: Obstacles::new(),
            food: None,
            score: 0,
            lives: STARTING_LIVES,
            speed_ms: difficulty.initial_speed_ms(),
            tick_count: 0,
            status: GameStatus::Playing,
            last_collision: None,
            difficulty,
            bounds,
            rng,
        };
        state.generate_obstacles();
        state.spawn_food();
        state
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// False once the session has ended.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    /// Replaces the obstacle set with freshly sampled cells.
    pub fn generate_obstacles(&mut self) {
        self.obstacles = Obstacles::generate(
            &mut self.rng,
            self.bounds,
            self.difficulty.obstacle_count(),
            &self.snake,
            self.food,
        );
    }

    /// Moves food to a random free cell. Returns false when none is left.
    pub fn spawn_food(&mut self) -> bool {
        self.food = food::spawn_position(&mut self.rng, self.bounds, &self.snake, &self.obstacles);
        self.food.is_some()
    }

    /// Turns the snake unless the request is a direct reversal.
    pub fn set_direction(&mut self, requested: Direction) {
        self.snake.set_direction(requested);
    }

    /// Advances simulation by one gameplay tick.
    pub fn step(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.next_head_position();
        if let Some(collision) = self.collision_at(new_head) {
            return self.lose_life(collision);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);
        self.tick_count += 1;

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.speed_ms = self
            .speed_ms
            .saturating_sub(SPEED_STEP_MS)
            .max(MIN_SPEED_MS);

        if !self.spawn_food() {
            info!("board full at score {}", self.score);
            self.status = GameStatus::Victory;
            return TickOutcome::Victory;
        }

        let obstacles_moved = self.score % OBSTACLE_REGEN_SCORE_INTERVAL == 0;
        if obstacles_moved {
            self.generate_obstacles();
            debug!("obstacles moved at score {}", self.score);
        }

        TickOutcome::Ate { obstacles_moved }
    }

    fn collision_at(&self, position: Position) -> Option<Collision> {
        if !position.is_within_bounds(self.bounds) {
            Some(Collision::Wall)
        } else if self.snake.occupies(position) {
            Some(Collision::SelfCollision)
        } else if self.obstacles.contains(position) {
            Some(Collision::Obstacle)
        } else {
            None
        }
    }

    /// Takes one life; ends the session when none remain.
    pub fn lose_life(&mut self, cause: Collision) -> TickOutcome {
        self.lives = self.lives.saturating_sub(1);
        self.last_collision = Some(cause);

        if self.lives > 0 {
            info!("life lost ({}), {} left", cause.describe(), self.lives);
            self.status = GameStatus::LifeLost;
            TickOutcome::LifeLost(cause)
        } else {
            info!("game over ({}) with score {}", cause.describe(), self.score);
            self.status = GameStatus::GameOver;
            TickOutcome::GameOver(cause)
        }
    }

    /// Respawns the snake after a lost life; score, lives and speed carry over.
    pub fn reset_after_life(&mut self) {
        if self.status != GameStatus::LifeLost {
            return;
        }

        self.snake = Snake::initial(SPAWN_ANCHOR, Direction::Right);
        self.food = None;
        self.generate_obstacles();
        if self.spawn_food() {
            self.status = GameStatus::Playing;
        } else {
            self.status = GameStatus::Victory;
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => {}
        }
    }
}
