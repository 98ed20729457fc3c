use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::THEME;
use crate::session::Snapshot;

/// Renders the one-line HUD and returns the remaining area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(snapshot)).alignment(Alignment::Left),
        hud_area,
    );

    play_area
}

fn hud_line(snapshot: &Snapshot) -> Line<'static> {
    let best = snapshot.high_score.max(snapshot.score);
    let mut spans = Vec::new();
    for (label, value) in [
        ("Length", snapshot.snake.len().to_string()),
        ("Score", snapshot.score.to_string()),
        ("Best", best.to_string()),
        ("Tick", format!("{}ms", snapshot.tick_interval_ms)),
    ] {
        if !spans.is_empty() {
            spans.push(Span::styled("  ", Style::new().fg(THEME.hud_label)));
        }
        spans.push(Span::styled(
            format!("{label} "),
            Style::new().fg(THEME.hud_label),
        ));
        spans.push(Span::styled(
            value,
            Style::new()
                .fg(THEME.hud_value)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::session::Snapshot;

    use super::hud_line;

    #[test]
    fn hud_shows_live_score_as_best_when_ahead() {
        let snapshot = Snapshot {
            snake: vec![Position::new(3, 3), Position::new(2, 3)],
            food: Position::new(8, 8),
            direction: Direction::Right,
            score: 120,
            high_score: 100,
            games_played: 2,
            paused: false,
            game_over: false,
            end_reason: None,
            new_high_score: false,
            tick_interval_ms: 130,
            grid: GridSize::default(),
        };

        let text: String = hud_line(&snapshot)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();

        assert_eq!(text, "Length 2  Score 120  Best 120  Tick 130ms");
    }
}
