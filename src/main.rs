use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;
use obstacle_snake::error::AppError;
use obstacle_snake::input::InputHandler;
use obstacle_snake::logging;
use obstacle_snake::renderer;
use obstacle_snake::session::{Control, Session};
use obstacle_snake::settings::{Cli, Settings};
use obstacle_snake::terminal_runtime::TerminalSession;

/// Upper bound on how long one input poll may block, so resizes redraw promptly.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("obstacle-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<(), AppError> {
    let settings = Settings::load(cli)?;
    logging::init(&settings.log_file, settings.verbose)?;
    info!(
        "settings: grid {}, difficulty {}, seed {:?}, after game over {:?}",
        settings.grid, settings.difficulty, settings.seed, settings.on_game_over
    );

    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, Session::new(settings))?;
    info!("bye");
    Ok(())
}

fn run(terminal: &mut TerminalSession, mut session: Session) -> Result<(), AppError> {
    let mut input = InputHandler::new();

    if session.settings().skip_menu {
        let difficulty = session.settings().difficulty;
        session.start(difficulty, Instant::now());
    }

    loop {
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session))?;

        let timeout = session
            .next_deadline()
            .map_or(MAX_POLL_INTERVAL, |due| {
                due.saturating_duration_since(Instant::now())
                    .min(MAX_POLL_INTERVAL)
            });

        if let Some(game_input) = input.poll_input(timeout)? {
            if session.handle_input(game_input, Instant::now()) == Control::Quit {
                break;
            }
        }

        session.update(Instant::now());
    }

    Ok(())
}
