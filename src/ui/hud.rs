use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{GLYPH_LIFE, PALETTE, STARTING_LIVES};
use crate::game::GameState;

/// Rows reserved below the board.
pub const HUD_HEIGHT: u16 = 2;

const HUD_INNER_MARGIN_X: u16 = 1;

/// Renders score and lives on the first row, difficulty and speed on the second.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) {
    let area = inset_horizontal(area, HUD_INNER_MARGIN_X);
    if area.height == 0 {
        return;
    }

    let score = format!("Score {}", state.score);
    let lives = lives_text(state.lives);
    let top = spread_line(
        Span::styled(
            score,
            Style::new().fg(PALETTE.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(lives, Style::new().fg(PALETTE.food)),
        usize::from(area.width),
    );
    frame.render_widget(Paragraph::new(top), Rect { height: 1, ..area });

    if area.height < 2 {
        return;
    }

    let bottom = spread_line(
        Span::styled(
            format!("{} · {} obstacles", state.difficulty(), state.obstacles.len()),
            Style::new().fg(PALETTE.muted),
        ),
        Span::styled(
            format!("{} ms/tick", state.speed_ms),
            Style::new().fg(PALETTE.muted),
        ),
        usize::from(area.width),
    );
    frame.render_widget(
        Paragraph::new(bottom),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// "Lives ♥ ♥ ♡"-style text; spent lives are shown hollow.
fn lives_text(lives: u32) -> String {
    let mut text = String::from("Lives");
    for index in 0..STARTING_LIVES.max(lives) {
        text.push(' ');
        text.push_str(if index < lives { GLYPH_LIFE } else { "♡" });
    }
    text
}

/// Places `left` flush left and `right` flush right within `width` columns.
fn spread_line(left: Span<'static>, right: Span<'static>, width: usize) -> Line<'static> {
    let used = left.content.width() + right.content.width();
    let gap = width.saturating_sub(used).max(1);
    Line::from(vec![left, Span::raw(" ".repeat(gap)), right])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
