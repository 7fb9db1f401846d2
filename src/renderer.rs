use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    GLYPH_CELL, GLYPH_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE_TAIL, GameOverAction, GridSize, PALETTE,
};
use crate::game::{GameState, GameStatus};
use crate::session::{Screen, Session};
use crate::snake::Position;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{
    render_difficulty_menu, render_game_over_menu, render_life_lost, render_pause_menu,
    render_victory_menu,
};

/// Terminal columns used by one logical cell.
const CELL_WIDTH: u16 = 2;

/// Renders the full frame for the current screen.
pub fn render(frame: &mut Frame<'_>, session: &Session) {
    let area = frame.area();
    let grid = session.settings().grid;

    let Some(board_area) = board_rect(area, grid) else {
        render_too_small(frame, area, grid);
        return;
    };

    match session.screen() {
        Screen::Menu { selected } => {
            render_board_frame(frame, board_area);
            render_difficulty_menu(frame, board_area, *selected);
        }
        Screen::Game(state) => {
            render_game(frame, board_area, state, session.settings().on_game_over);
        }
    }
}

fn render_game(
    frame: &mut Frame<'_>,
    board_area: Rect,
    state: &GameState,
    on_game_over: GameOverAction,
) {
    let inner = render_board_frame(frame, board_area);
    render_obstacles(frame, inner, state);
    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    let hud_area = Rect {
        x: board_area.x,
        y: board_area.bottom(),
        width: board_area.width,
        height: HUD_HEIGHT,
    };
    render_hud(frame, hud_area, state);

    match state.status {
        GameStatus::Paused => render_pause_menu(frame, board_area),
        GameStatus::LifeLost => {
            render_life_lost(frame, board_area, state.lives, state.last_collision);
        }
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board_area,
            state.score,
            state.last_collision,
            on_game_over,
        ),
        GameStatus::Victory => render_victory_menu(frame, board_area, state.score, on_game_over),
        GameStatus::Playing => {}
    }
}

/// Centers the bordered board, leaving room for the HUD beneath it.
fn board_rect(area: Rect, grid: GridSize) -> Option<Rect> {
    let width = grid.width.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = grid.height.checked_add(2)?;

    if area.width < width || area.height < height.saturating_add(HUD_HEIGHT) {
        return None;
    }

    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height - HUD_HEIGHT) / 2;
    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

fn render_board_frame(frame: &mut Frame<'_>, board_area: Rect) -> Rect {
    let block = Block::bordered()
        .border_style(Style::new().fg(PALETTE.border))
        .style(Style::new().bg(PALETTE.board_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    inner
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let style = Style::new().fg(PALETTE.obstacle).bg(PALETTE.board_bg);
    let buffer = frame.buffer_mut();

    for cell in state.obstacles.iter() {
        if let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *cell) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some(food) = state.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(PALETTE.food).bg(PALETTE.board_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let head = state.snake.head();
    let tail = state.snake.tail();
    let has_tail = state.snake.len() > 1;

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                GLYPH_CELL,
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else if has_tail && *segment == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(PALETTE.snake_tail));
        } else {
            buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(PALETTE.snake_body));
        }
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);

    let needed = format!(
        "need {}x{}",
        u32::from(grid.width) * u32::from(CELL_WIDTH) + 2,
        u32::from(grid.height) + 2 + u32::from(HUD_HEIGHT)
    );
    frame.render_widget(
        Paragraph::new(vec![Line::from("Terminal too small"), Line::from(needed)])
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.accent)),
        middle,
    );
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{board_rect, logical_to_terminal, render};
    use crate::config::{Difficulty, GridSize};
    use crate::session::Session;
    use crate::settings::Settings;
    use crate::snake::Position;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(1, 1, 20, 10);
        let bounds = GridSize {
            width: 10,
            height: 10,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(3, 2)),
            Some((7, 3))
        );
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(-1, 2)), None);
    }

    #[test]
    fn board_needs_room_for_hud() {
        let grid = GridSize {
            width: 10,
            height: 8,
        };

        assert!(board_rect(Rect::new(0, 0, 22, 10), grid).is_none());
        assert!(board_rect(Rect::new(0, 0, 22, 20), grid).is_some());
    }

    #[test]
    fn menu_screen_lists_difficulties() {
        let session = Session::new(Settings::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &session))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("Easy"));
        assert!(text.contains("Medium"));
        assert!(text.contains("Hard"));
    }

    #[test]
    fn game_screen_shows_score_and_lives() {
        let mut session = Session::new(Settings {
            seed: Some(3),
            ..Settings::default()
        });
        session.start(Difficulty::Easy, Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &session))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("Score 0"));
        assert!(text.contains("Lives"));
    }

    #[test]
    fn tiny_terminal_shows_warning() {
        let session = Session::new(Settings::default());
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &session))
            .expect("draw should succeed");

        assert!(buffer_text(&terminal).contains("too small"));
    }
}
