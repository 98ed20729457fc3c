use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::Direction;

/// Ordered snake body, head at the front.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// the body trailing away from `direction`.
    #[must_use]
    pub fn straight(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().offset();
        let body = (0..length.max(1))
            .map(|step| {
                let step = i32::try_from(step).unwrap_or(i32::MAX);
                Position {
                    x: head.x + dx * step,
                    y: head.y + dy * step,
                }
            })
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the cell the head would enter moving one step in `direction`.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Position {
        self.head().offset(direction.offset())
    }

    /// Prepends `new_head`, dropping the tail unless the snake `grew`.
    pub fn advance(&mut self, new_head: Position, grew: bool) {
        self.body.push_front(new_head);
        if !grew {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if `cell` hits any current segment.
    ///
    /// The tail counts even though it would move away this tick, so the
    /// head can never step into the cell the tail occupies right now.
    #[must_use]
    pub fn self_collides(&self, cell: Position) -> bool {
        self.occupies(cell)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
