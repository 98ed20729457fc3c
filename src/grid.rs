use thiserror::Error;

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MIN_GRID_DIMENSION};

/// Errors raised when building a grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    TooSmall { width: u16, height: u16, min: u16 },
}

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Validates and creates a grid of `width` by `height` cells.
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(GridError::TooSmall {
                width,
                height,
                min: MIN_GRID_DIMENSION,
            });
        }

        Ok(Self { width, height })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `position` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn in_bounds(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Grid position in logical cell coordinates.
///
/// Signed so that a head which stepped past an edge is still representable
/// and can be rejected by [`GridSize::in_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
