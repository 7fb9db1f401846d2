//! Drives a [`GameState`] through menus, ticks and the timed transitions
//! between lives and sessions.
//!
//! Exactly one timer is pending at any time. Every timer carries the
//! generation it was scheduled in; starting a game or returning to the menu
//! bumps the generation, so a timer left over from an earlier session is
//! discarded instead of touching the new state.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::{Difficulty, GAME_OVER_DELAY_MS, GameOverAction, LIFE_LOST_PAUSE_MS};
use crate::game::{GameState, GameStatus};
use crate::input::{Direction, GameInput};
use crate::settings::Settings;

/// What the pending timer will do when it fires.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimerKind {
    Tick,
    ResumeAfterLife,
    GameOverTimeout,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScheduledEvent {
    pub kind: TimerKind,
    pub due: Instant,
    pub generation: u64,
}

/// Which screen is showing.
#[derive(Debug, Clone)]
pub enum Screen {
    Menu { selected: Difficulty },
    Game(GameState),
}

/// Tells the main loop whether to keep going.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    screen: Screen,
    settings: Settings,
    generation: u64,
    pending: Option<ScheduledEvent>,
    games_started: u64,
}

impl Session {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Menu {
                selected: settings.difficulty,
            },
            settings,
            generation: 0,
            pending: None,
            games_started: 0,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Game(state) => Some(state),
            Screen::Menu { .. } => None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pending(&self) -> Option<ScheduledEvent> {
        self.pending
    }

    /// When the main loop next needs to call [`Session::update`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|event| event.due)
    }

    /// Builds a fresh game and schedules its first tick.
    pub fn start(&mut self, difficulty: Difficulty, now: Instant) {
        self.generation += 1;
        self.games_started += 1;

        let grid = self.settings.grid;
        let state = match self.settings.seed {
            // Each restart gets its own layout, reproducible from the base seed.
            Some(seed) => GameState::new_with_seed(
                difficulty,
                grid,
                seed.wrapping_add(self.games_started - 1),
            ),
            None => GameState::new(difficulty, grid),
        };

        info!(
            "starting {difficulty} game on {grid} (generation {})",
            self.generation
        );
        self.schedule(TimerKind::Tick, now, state.speed_ms);
        self.screen = Screen::Game(state);
    }

    /// Drops the current game and shows the difficulty menu.
    pub fn return_to_menu(&mut self) {
        self.generation += 1;
        self.pending = None;

        let selected = match &self.screen {
            Screen::Game(state) => state.difficulty(),
            Screen::Menu { selected } => *selected,
        };
        self.screen = Screen::Menu { selected };
    }

    /// Pauses the running game; its next tick is withdrawn.
    pub fn pause(&mut self) {
        if let Screen::Game(state) = &mut self.screen {
            if state.status == GameStatus::Playing {
                state.pause();
                self.pending = None;
            }
        }
    }

    /// Resumes a paused game, ticking again one interval from `now`.
    pub fn resume(&mut self, now: Instant) {
        let Screen::Game(state) = &mut self.screen else {
            return;
        };
        if state.status != GameStatus::Paused {
            return;
        }

        state.resume();
        let speed_ms = state.speed_ms;
        self.schedule(TimerKind::Tick, now, speed_ms);
    }

    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Control {
        if input == GameInput::Quit {
            return Control::Quit;
        }

        match &mut self.screen {
            Screen::Menu { selected } => match input {
                GameInput::Direction(Direction::Up | Direction::Left) => {
                    *selected = selected.previous();
                }
                GameInput::Direction(Direction::Down | Direction::Right) => {
                    *selected = selected.next();
                }
                GameInput::SelectDifficulty(difficulty) => self.start(difficulty, now),
                GameInput::Confirm | GameInput::TogglePause => {
                    let difficulty = *selected;
                    self.start(difficulty, now);
                }
                GameInput::ReturnToMenu | GameInput::Quit => {}
            },
            Screen::Game(state) => match input {
                GameInput::Direction(direction) => state.set_direction(direction),
                GameInput::TogglePause => match state.status {
                    GameStatus::Playing => self.pause(),
                    GameStatus::Paused => self.resume(now),
                    _ => {}
                },
                GameInput::Confirm if !state.is_running() => self.after_game_over(now),
                GameInput::ReturnToMenu => self.return_to_menu(),
                GameInput::Confirm | GameInput::SelectDifficulty(_) | GameInput::Quit => {}
            },
        }

        Control::Continue
    }

    /// Fires the pending timer if it is due.
    pub fn update(&mut self, now: Instant) {
        let Some(event) = self.pending else {
            return;
        };
        if now < event.due {
            return;
        }
        self.pending = None;

        if event.generation != self.generation {
            debug!(
                "discarding stale {:?} from generation {} (current {})",
                event.kind, event.generation, self.generation
            );
            return;
        }

        match event.kind {
            TimerKind::Tick => {
                if let Screen::Game(state) = &mut self.screen {
                    state.step();
                }
                self.schedule_follow_up(event.due, now);
            }
            TimerKind::ResumeAfterLife => {
                if let Screen::Game(state) = &mut self.screen {
                    state.reset_after_life();
                }
                self.schedule_follow_up(event.due, now);
            }
            TimerKind::GameOverTimeout => self.after_game_over(now),
        }
    }

    /// Schedules whatever the game's status calls for next, counted from `base`
    /// so a late wake-up does not stretch the interval.
    fn schedule_follow_up(&mut self, base: Instant, now: Instant) {
        let Screen::Game(state) = &self.screen else {
            return;
        };

        let (kind, delay_ms) = match state.status {
            GameStatus::Playing => (TimerKind::Tick, state.speed_ms),
            GameStatus::LifeLost => (TimerKind::ResumeAfterLife, LIFE_LOST_PAUSE_MS),
            GameStatus::GameOver | GameStatus::Victory => {
                (TimerKind::GameOverTimeout, GAME_OVER_DELAY_MS)
            }
            GameStatus::Paused => return,
        };

        // Fell behind by a whole interval: start counting again from now.
        let base = if base + Duration::from_millis(delay_ms) <= now {
            now
        } else {
            base
        };
        self.schedule(kind, base, delay_ms);
    }

    fn after_game_over(&mut self, now: Instant) {
        let Screen::Game(state) = &self.screen else {
            return;
        };
        let difficulty = state.difficulty();

        match self.settings.on_game_over {
            GameOverAction::Menu => self.return_to_menu(),
            GameOverAction::Restart => self.start(difficulty, now),
        }
    }

    fn schedule(&mut self, kind: TimerKind, base: Instant, delay_ms: u64) {
        self.pending = Some(ScheduledEvent {
            kind,
            due: base + Duration::from_millis(delay_ms),
            generation: self.generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Control, Screen, ScheduledEvent, Session, TimerKind};
    use crate::config::{
        Difficulty, GAME_OVER_DELAY_MS, GameOverAction, GridSize, LIFE_LOST_PAUSE_MS,
    };
    use crate::game::GameStatus;
    use crate::input::{Direction, GameInput};
    use crate::obstacles::Obstacles;
    use crate::settings::Settings;
    use crate::snake::{Position, Snake};

    fn settings(on_game_over: GameOverAction) -> Settings {
        Settings {
            grid: GridSize::default(),
            seed: Some(21),
            on_game_over,
            ..Settings::default()
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn game_mut(session: &mut Session) -> &mut crate::game::GameState {
        match &mut session.screen {
            Screen::Game(state) => state,
            Screen::Menu { .. } => panic!("expected a running game"),
        }
    }

    #[test]
    fn session_starts_in_menu_with_configured_difficulty() {
        let session = Session::new(Settings {
            difficulty: Difficulty::Hard,
            ..settings(GameOverAction::Menu)
        });

        assert!(matches!(
            session.screen(),
            Screen::Menu {
                selected: Difficulty::Hard
            }
        ));
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn menu_navigation_then_confirm_starts_game() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let now = Instant::now();

        session.handle_input(GameInput::Direction(Direction::Down), now);
        session.handle_input(GameInput::Confirm, now);

        let game = session.game().expect("game should be running");
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(
            session.next_deadline(),
            Some(now + ms(Difficulty::Hard.initial_speed_ms()))
        );
    }

    #[test]
    fn tick_fires_only_when_due_and_reschedules_at_current_speed() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        {
            let state = game_mut(&mut session);
            state.obstacles = Obstacles::new();
            state.snake = Snake::initial(Position::new(5, 5), Direction::Right);
            state.food = Some(Position::new(6, 5));
        }

        session.update(start + ms(100));
        assert_eq!(session.game().map(|g| g.tick_count), Some(0));

        let fired_at = start + ms(220);
        session.update(fired_at);

        let game = session.game().expect("game should be running");
        assert_eq!(game.score, 1);
        assert_eq!(game.speed_ms, 215);
        assert_eq!(session.next_deadline(), Some(fired_at + ms(215)));
    }

    #[test]
    fn pause_withholds_ticks_until_resume() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Medium, start);

        session.handle_input(GameInput::TogglePause, start);
        assert!(session.next_deadline().is_none());

        session.update(start + ms(10_000));
        let game = session.game().expect("game should be running");
        assert_eq!(game.status, GameStatus::Paused);
        assert_eq!(game.tick_count, 0);

        let resumed = start + ms(20_000);
        session.handle_input(GameInput::TogglePause, resumed);
        assert_eq!(session.next_deadline(), Some(resumed + ms(140)));
    }

    #[test]
    fn lost_life_respawns_after_pause() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        game_mut(&mut session).snake =
            Snake::from_segments(vec![Position::new(0, 0)], Direction::Up);

        let crash = start + ms(220);
        session.update(crash);
        assert_eq!(
            session.game().map(|g| g.status),
            Some(GameStatus::LifeLost)
        );
        assert_eq!(
            session.pending().map(|event| event.kind),
            Some(TimerKind::ResumeAfterLife)
        );

        let respawn = crash + ms(LIFE_LOST_PAUSE_MS);
        session.update(respawn);
        let game = session.game().expect("game should be running");
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.lives, 2);
        assert_eq!(session.next_deadline(), Some(respawn + ms(220)));
    }

    #[test]
    fn game_over_returns_to_menu_after_delay() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Medium, start);
        {
            let state = game_mut(&mut session);
            state.lives = 1;
            state.snake = Snake::from_segments(vec![Position::new(0, 0)], Direction::Up);
        }

        let crash = start + ms(140);
        session.update(crash);
        assert_eq!(
            session.game().map(|g| g.status),
            Some(GameStatus::GameOver)
        );

        session.update(crash + ms(GAME_OVER_DELAY_MS));
        assert!(matches!(
            session.screen(),
            Screen::Menu {
                selected: Difficulty::Medium
            }
        ));
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn game_over_can_restart_with_fresh_state() {
        let mut session = Session::new(settings(GameOverAction::Restart));
        let start = Instant::now();
        session.start(Difficulty::Hard, start);
        {
            let state = game_mut(&mut session);
            state.lives = 1;
            state.score = 12;
            state.snake = Snake::from_segments(vec![Position::new(0, 0)], Direction::Left);
        }

        let crash = start + ms(80);
        session.update(crash);
        session.update(crash + ms(GAME_OVER_DELAY_MS));

        let game = session.game().expect("restarted game");
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.lives, 3);
        assert_eq!(game.speed_ms, Difficulty::Hard.initial_speed_ms());
    }

    #[test]
    fn stale_timer_from_previous_generation_is_discarded() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        let stale_generation = session.generation();

        session.return_to_menu();
        session.start(Difficulty::Easy, start);
        {
            let state = game_mut(&mut session);
            state.lives = 1;
            state.snake = Snake::from_segments(vec![Position::new(0, 0)], Direction::Up);
        }

        session.pending = Some(ScheduledEvent {
            kind: TimerKind::Tick,
            due: start,
            generation: stale_generation,
        });
        session.update(start + ms(1));

        let game = session.game().expect("game should be running");
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.lives, 1);
        assert!(session.pending().is_none());
    }

    #[test]
    fn escape_returns_to_menu_and_quit_stops() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let now = Instant::now();
        session.handle_input(GameInput::SelectDifficulty(Difficulty::Easy), now);
        assert!(session.game().is_some());

        assert_eq!(
            session.handle_input(GameInput::ReturnToMenu, now),
            Control::Continue
        );
        assert!(session.game().is_none());
        assert!(session.next_deadline().is_none());

        assert_eq!(session.handle_input(GameInput::Quit, now), Control::Quit);
    }

    #[test]
    fn direction_input_reaches_the_game() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let now = Instant::now();
        session.start(Difficulty::Easy, now);

        session.handle_input(GameInput::Direction(Direction::Left), now);
        assert_eq!(
            session.game().map(|g| g.snake.direction()),
            Some(Direction::Right)
        );

        session.handle_input(GameInput::Direction(Direction::Down), now);
        assert_eq!(
            session.game().map(|g| g.snake.direction()),
            Some(Direction::Down)
        );
    }

    /// Leaves only `free` open around a one-cell snake at the origin heading right.
    fn fill_board_except(session: &mut Session, free: Position) {
        let state = game_mut(session);
        let bounds = state.bounds();
        let snake_cell = Position::new(0, 0);
        let blocked = (0..i32::from(bounds.height))
            .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Position::new(x, y)))
            .filter(|cell| *cell != snake_cell && *cell != free);

        state.obstacles = Obstacles::from_cells(blocked);
        state.snake = Snake::from_segments(vec![snake_cell], Direction::Right);
        state.food = Some(free);
    }

    #[test]
    fn filling_the_board_waits_then_returns_to_menu() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        fill_board_except(&mut session, Position::new(1, 0));

        let due = start + ms(220);
        session.update(due);

        assert_eq!(session.game().map(|g| g.status), Some(GameStatus::Victory));
        assert_eq!(
            session.pending().map(|event| (event.kind, event.due)),
            Some((TimerKind::GameOverTimeout, due + ms(GAME_OVER_DELAY_MS)))
        );

        session.update(due + ms(GAME_OVER_DELAY_MS - 1));
        assert!(session.game().is_some());

        session.update(due + ms(GAME_OVER_DELAY_MS));
        assert!(matches!(
            session.screen(),
            Screen::Menu {
                selected: Difficulty::Easy
            }
        ));
    }

    #[test]
    fn filling_the_board_restarts_when_configured() {
        let mut session = Session::new(settings(GameOverAction::Restart));
        let start = Instant::now();
        session.start(Difficulty::Medium, start);
        fill_board_except(&mut session, Position::new(1, 0));

        let due = start + ms(140);
        session.update(due);
        session.update(due + ms(GAME_OVER_DELAY_MS));

        let game = session.game().expect("restarted game");
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.obstacles.len(), Difficulty::Medium.obstacle_count());
    }

    #[test]
    fn confirm_skips_game_over_delay_and_drops_old_timeout() {
        let mut session = Session::new(settings(GameOverAction::Restart));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        {
            let state = game_mut(&mut session);
            state.lives = 1;
            state.snake = Snake::from_segments(vec![Position::new(0, 0)], Direction::Up);
        }

        let crash = start + ms(220);
        session.update(crash);
        let old_generation = session.generation();
        assert_eq!(
            session.pending().map(|event| event.kind),
            Some(TimerKind::GameOverTimeout)
        );

        let pressed = crash + ms(100);
        session.handle_input(GameInput::Confirm, pressed);

        let game = session.game().expect("restarted game");
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.lives, 3);
        assert!(session.generation() > old_generation);
        let pending = session.pending().expect("first tick scheduled");
        assert_eq!(pending.kind, TimerKind::Tick);
        assert_eq!(pending.due, pressed + ms(220));
        assert_eq!(pending.generation, session.generation());

        // Passing the old game-over deadline must not end the new game.
        let generation = session.generation();
        session.update(crash + ms(GAME_OVER_DELAY_MS));
        assert_eq!(session.generation(), generation);
        assert!(session.game().is_some_and(|game| game.is_running()));
    }

    #[test]
    fn confirm_is_ignored_while_playing() {
        let mut session = Session::new(settings(GameOverAction::Restart));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        let generation = session.generation();

        session.handle_input(GameInput::Confirm, start + ms(5));

        assert_eq!(session.generation(), generation);
        assert_eq!(session.next_deadline(), Some(start + ms(220)));
    }

    #[test]
    fn late_wake_up_keeps_tick_cadence() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        {
            let state = game_mut(&mut session);
            state.obstacles = Obstacles::new();
            state.snake = Snake::initial(Position::new(5, 5), Direction::Right);
            state.food = Some(Position::new(0, 0));
        }

        session.update(start + ms(230));
        assert_eq!(session.next_deadline(), Some(start + ms(440)));

        session.update(start + ms(445));
        assert_eq!(session.next_deadline(), Some(start + ms(660)));
        assert_eq!(session.game().map(|g| g.tick_count), Some(2));
    }

    #[test]
    fn wake_up_a_whole_interval_late_counts_from_now() {
        let mut session = Session::new(settings(GameOverAction::Menu));
        let start = Instant::now();
        session.start(Difficulty::Easy, start);
        {
            let state = game_mut(&mut session);
            state.obstacles = Obstacles::new();
            state.snake = Snake::initial(Position::new(5, 5), Direction::Right);
            state.food = Some(Position::new(0, 0));
        }

        let late = start + ms(1_000);
        session.update(late);

        assert_eq!(session.next_deadline(), Some(late + ms(220)));
    }
}
