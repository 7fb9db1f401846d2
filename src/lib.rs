//! Snake with lives, difficulty levels and obstacles that move as the score grows.
//!
//! [`game::GameState`] holds the rules; [`session::Session`] drives it with
//! timers and input; [`renderer`] draws either of them with ratatui.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod obstacles;
pub mod placement;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
