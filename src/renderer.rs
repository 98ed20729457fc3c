use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, THEME,
};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::score::Records;
use crate::session::Snapshot;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// What the front end is currently showing.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Start { records: Records },
    Playing(&'a Snapshot),
}

/// Renders the full frame for `view`.
pub fn render(frame: &mut Frame<'_>, view: View<'_>) {
    let area = frame.area();

    let snapshot = match view {
        View::Start { records } => {
            render_start_menu(frame, area, records);
            return;
        }
        View::Playing(snapshot) => snapshot,
    };

    let board = render_hud(frame, area, snapshot);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(THEME.border_fg).bg(THEME.border_bg));
    let play_area = board_rect(board, snapshot.grid);
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    if snapshot.game_over {
        render_game_over_menu(frame, play_area, snapshot);
    } else if snapshot.paused {
        render_pause_menu(frame, play_area);
    }
}

/// Shrinks `area` to the grid plus its border, anchored top-left.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    Rect {
        x: area.x,
        y: area.y,
        width: area.width.min(grid.width.saturating_add(2)),
        height: area.height.min(grid.height.saturating_add(2)),
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, snapshot.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(THEME.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let last = snapshot.snake.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    // Tail first so the head wins if segments ever overlap on screen.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(snapshot.direction),
                Style::new()
                    .fg(THEME.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(THEME.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(THEME.snake_body))
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.in_bounds(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
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
    use ratatui::layout::Rect;

    use crate::grid::{GridSize, Position};

    use super::{board_rect, logical_to_terminal};

    #[test]
    fn cells_map_inside_inner_area() {
        let inner = Rect::new(1, 1, 20, 20);
        let grid = GridSize::default();

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(19, 19)),
            Some((20, 20))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(20, 0)), None);
    }

    #[test]
    fn clipped_terminal_drops_offscreen_cells() {
        let inner = Rect::new(0, 0, 5, 5);

        assert_eq!(
            logical_to_terminal(inner, GridSize::default(), Position::new(7, 2)),
            None
        );
    }

    #[test]
    fn board_fits_grid_and_border() {
        let board = board_rect(Rect::new(0, 0, 80, 40), GridSize::default());

        assert_eq!(board, Rect::new(0, 0, 22, 22));
    }
}
