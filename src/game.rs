use crate::config::{
    INITIAL_SNAKE_LENGTH, MIN_TICK_INTERVAL_MS, POINTS_PER_FOOD, POINTS_PER_SPEED_STEP,
    SPEED_STEP_MS,
};
use crate::food::FoodSpawner;
use crate::grid::{GridSize, Position};
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake filled every cell, leaving nowhere to place food.
    BoardCleared,
}

/// Result of one call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was paused or already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Returns the tick interval for `score` on top of `base_ms`.
#[must_use]
pub fn tick_interval_for_score(base_ms: u64, score: u32) -> u64 {
    let speed_reduction_ms = u64::from(score / POINTS_PER_SPEED_STEP) * SPEED_STEP_MS;
    base_ms
        .saturating_sub(speed_reduction_ms)
        .max(MIN_TICK_INTERVAL_MS)
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    direction: Direction,
    pending_direction: Direction,
    base_tick_interval_ms: u64,
    tick_interval_ms: u64,
    bounds: GridSize,
    spawner: FoodSpawner,
}

impl GameState {
    /// Creates a state with a spawner seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize, base_tick_interval_ms: u64) -> Self {
        Self::with_spawner(bounds, base_tick_interval_ms, FoodSpawner::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, base_tick_interval_ms: u64, seed: u64) -> Self {
        Self::with_spawner(bounds, base_tick_interval_ms, FoodSpawner::from_seed(seed))
    }

    fn with_spawner(bounds: GridSize, base_tick_interval_ms: u64, mut spawner: FoodSpawner) -> Self {
        let min_head_x = i32::try_from(INITIAL_SNAKE_LENGTH - 1).unwrap_or(0);
        let start = Position {
            x: i32::from(bounds.width / 2).max(min_head_x),
            y: i32::from(bounds.height / 2),
        };
        let snake = Snake::straight(start, Direction::Right, INITIAL_SNAKE_LENGTH);
        // A validated grid always has more cells than the starting snake.
        let food = spawner.spawn(bounds, &snake).unwrap_or(start);
        let tick_interval_ms = tick_interval_for_score(base_tick_interval_ms, 0);

        Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            end_reason: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            base_tick_interval_ms,
            tick_interval_ms,
            bounds,
            spawner,
        }
    }

    /// Replaces the snake and its heading, e.g. to set up a test scenario.
    pub fn place_snake(&mut self, snake: Snake, direction: Direction) {
        self.snake = snake;
        self.direction = direction;
        self.pending_direction = direction;
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        self.direction = self.pending_direction;
        let new_head = self.snake.next_head(self.direction);

        if !self.bounds.in_bounds(new_head) {
            return self.end(EndReason::WallCollision);
        }

        if self.snake.self_collides(new_head) {
            return self.end(EndReason::SelfCollision);
        }

        let grew = new_head == self.food;
        self.snake.advance(new_head, grew);

        let outcome = if grew {
            self.score += POINTS_PER_FOOD;
            match self.spawner.spawn(self.bounds, &self.snake) {
                Some(food) => {
                    self.food = food;
                    TickOutcome::Ate
                }
                None => self.end(EndReason::BoardCleared),
            }
        } else {
            TickOutcome::Moved
        };

        self.tick_interval_ms = tick_interval_for_score(self.base_tick_interval_ms, self.score);
        outcome
    }

    /// Requests a new heading for the next tick.
    ///
    /// Reversals of the current heading are dropped. Returns whether the
    /// request was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status == GameStatus::GameOver
            || !direction_change_is_valid(self.direction, direction)
        {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Flips between running and paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => GameStatus::GameOver,
        };
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
        TickOutcome::Ended(reason)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub fn base_tick_interval_ms(&self) -> u64 {
        self.base_tick_interval_ms
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
