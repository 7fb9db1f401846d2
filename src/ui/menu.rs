use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{Difficulty, GameOverAction, PALETTE};
use crate::game::Collision;

/// Draws the difficulty selector as a centered popup.
pub fn render_difficulty_menu(frame: &mut Frame<'_>, area: Rect, selected: Difficulty) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(PALETTE.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = Vec::with_capacity(Difficulty::ALL.len() + 2);
    for (index, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let marker = if difficulty == selected { ">" } else { " " };
        let text = format!(
            "{marker} [{}] {:<6} {:>3} ms  {:>2} obstacles",
            index + 1,
            difficulty.label(),
            difficulty.initial_speed_ms(),
            difficulty.obstacle_count(),
        );
        let style = if difficulty == selected {
            Style::default()
                .fg(PALETTE.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        body.push(Line::styled(text, style));
    }
    body.push(Line::from(""));
    body.push(Line::from("[Enter] Start   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" difficulty ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD move · P pause · Esc menu"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.muted)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Esc] Menu   [Q] Quit"),
    ];
    render_popup(frame, area, " pause ", lines);
}

/// Shown during the pause between losing a life and respawning.
pub fn render_life_lost(
    frame: &mut Frame<'_>,
    area: Rect,
    lives: u32,
    cause: Option<Collision>,
) {
    let lines = vec![
        Line::styled(
            format!("Life lost! {lives} left"),
            Style::default()
                .fg(PALETTE.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(cause.map_or("", Collision::describe)),
    ];
    render_popup(frame, area, " ouch ", lines);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    cause: Option<Collision>,
    on_game_over: GameOverAction,
) {
    let lines = vec![
        Line::styled(
            "GAME OVER",
            Style::default()
                .fg(PALETTE.food)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(cause.map_or("", Collision::describe)),
        Line::from(""),
        Line::from(next_step_hint(on_game_over)),
    ];
    render_popup(frame, area, " game over ", lines);
}

/// Draws the board-full screen as a centered popup.
pub fn render_victory_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    on_game_over: GameOverAction,
) {
    let lines = vec![
        Line::styled(
            "BOARD CLEARED",
            Style::default()
                .fg(PALETTE.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from(next_step_hint(on_game_over)),
    ];
    render_popup(frame, area, " victory ", lines);
}

fn next_step_hint(on_game_over: GameOverAction) -> &'static str {
    match on_game_over {
        GameOverAction::Menu => "[Enter] Back to menu",
        GameOverAction::Restart => "[Enter] Play again",
    }
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'_>>) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
