use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::Difficulty;
use crate::game::{EndReason, GameState, GameStatus, TickOutcome};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::scheduler::TickScheduler;
use crate::score::{Records, ScoreStore};

/// Construction options for a [`GameSession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub grid: GridSize,
    /// Seed for food placement; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Read-only view of the running game for renderers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub paused: bool,
    pub game_over: bool,
    pub end_reason: Option<EndReason>,
    /// True once the finished game beat the previous best.
    pub new_high_score: bool,
    pub tick_interval_ms: u64,
    pub grid: GridSize,
}

/// Owns the game lifecycle: commands in, ticks, records, snapshots out.
#[derive(Debug)]
pub struct GameSession<S, T> {
    store: S,
    scheduler: T,
    records: Records,
    grid: GridSize,
    seeds: StdRng,
    game: Option<GameState>,
    new_high_score: bool,
}

impl<S: ScoreStore, T: TickScheduler> GameSession<S, T> {
    /// Loads records from `store`. No game runs until
    /// [`GameSession::start_new_session`] is called.
    pub fn new(store: S, scheduler: T, options: SessionOptions) -> Self {
        let records = store.load().unwrap_or_else(|error| {
            warn!(%error, "failed to load records, starting fresh");
            Records::default()
        });
        let seeds = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            store,
            scheduler,
            records,
            grid: options.grid,
            seeds,
            game: None,
            new_high_score: false,
        }
    }

    /// Replaces any current game with a fresh one and arms the ticker.
    pub fn start_new_session(&mut self, initial_speed_ms: u64) {
        let seed = self.seeds.gen_range(0..=u64::MAX);
        let game = GameState::new_with_seed(self.grid, initial_speed_ms, seed);
        debug!(initial_speed_ms, grid = ?self.grid, "starting new game");

        self.scheduler
            .arm(Duration::from_millis(game.tick_interval_ms()));
        self.game = Some(game);
        self.new_high_score = false;
    }

    /// Starts a new game at the stored difficulty.
    pub fn start_at_selected_difficulty(&mut self) {
        self.start_new_session(self.records.difficulty().speed_ms());
    }

    /// Stores `difficulty` as the starting speed for future games.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.records.difficulty_speed_ms = difficulty.speed_ms();
        self.persist();
    }

    /// Forwards a direction request; reversals are ignored.
    pub fn submit_direction(&mut self, direction: Direction) {
        if let Some(game) = self.game.as_mut() {
            game.steer(direction);
        }
    }

    /// Toggles pause, cancelling or re-arming the ticker to match.
    pub fn submit_pause_toggle(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        game.toggle_pause();
        match game.status {
            GameStatus::Paused => self.scheduler.cancel(),
            GameStatus::Running => self
                .scheduler
                .arm(Duration::from_millis(game.tick_interval_ms())),
            GameStatus::GameOver => {}
        }
    }

    /// Applies exactly one simulation tick.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(game) = self.game.as_mut() else {
            return TickOutcome::Idle;
        };

        let interval_before = game.tick_interval_ms();
        let outcome = game.tick();

        match outcome {
            TickOutcome::Ended(reason) => {
                let score = game.score;
                self.scheduler.cancel();
                self.finish_game(score, reason);
            }
            TickOutcome::Moved | TickOutcome::Ate => {
                let interval = game.tick_interval_ms();
                if interval != interval_before {
                    debug!(interval_ms = interval, "tick interval changed");
                    self.scheduler.arm(Duration::from_millis(interval));
                }
            }
            TickOutcome::Idle => {}
        }

        outcome
    }

    fn finish_game(&mut self, score: u32, reason: EndReason) {
        let previous_best = self.records.high_score;
        self.new_high_score = self.records.record_game(score);
        debug!(score, ?reason, games_played = self.records.games_played, "game over");
        if self.new_high_score {
            info!(score, previous_best, "new high score");
        }

        self.persist();
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.records) {
            warn!(%error, "failed to save records");
        }
    }

    /// Returns the observable state of the current game, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        let game = self.game.as_ref()?;

        Some(Snapshot {
            snake: game.snake.segments().copied().collect(),
            food: game.food,
            direction: game.direction(),
            score: game.score,
            high_score: self.records.high_score,
            games_played: self.records.games_played,
            paused: game.status == GameStatus::Paused,
            game_over: game.is_game_over(),
            end_reason: game.end_reason,
            new_high_score: self.new_high_score,
            tick_interval_ms: game.tick_interval_ms(),
            grid: game.bounds(),
        })
    }

    #[must_use]
    pub fn records(&self) -> Records {
        self.records
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Mutable access to the current game, e.g. to stage a test scenario.
    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::Difficulty;
    use crate::game::{EndReason, TickOutcome};
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::scheduler::{ManualScheduler, TickScheduler};
    use crate::score::{MemoryStore, Records, ScoreStore, StoreError};
    use crate::snake::Snake;

    use super::{GameSession, SessionOptions};

    fn options() -> SessionOptions {
        SessionOptions {
            grid: GridSize::default(),
            seed: Some(17),
        }
    }

    fn session_with(records: Records) -> (GameSession<MemoryStore, ManualScheduler>, MemoryStore) {
        let store = MemoryStore::new(records);
        let session = GameSession::new(store.clone(), ManualScheduler::new(), options());
        (session, store)
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<Records, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk unavailable")))
        }

        fn save(&mut self, _records: &Records) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk unavailable")))
        }
    }

    #[test]
    fn commands_before_start_are_ignored() {
        let (mut session, _) = session_with(Records::default());

        session.submit_direction(Direction::Up);
        session.submit_pause_toggle();

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(session.snapshot().is_none());
        assert!(!session.scheduler().is_armed());
    }

    #[test]
    fn starting_arms_scheduler_at_initial_speed() {
        let (mut session, _) = session_with(Records::default());

        session.start_new_session(Difficulty::Easy.speed_ms());

        assert_eq!(
            session.scheduler().interval(),
            Some(Duration::from_millis(200))
        );
        let snapshot = session.snapshot().expect("game should be running");
        assert_eq!(snapshot.snake.len(), 3);
        assert!(!snapshot.paused);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn pause_cancels_and_resume_rearms() {
        let (mut session, _) = session_with(Records::default());
        session.start_new_session(140);

        session.submit_pause_toggle();
        assert!(!session.scheduler().is_armed());
        assert!(session.snapshot().expect("game exists").paused);
        assert_eq!(session.tick(), TickOutcome::Idle);

        session.submit_pause_toggle();
        assert_eq!(
            session.scheduler().interval(),
            Some(Duration::from_millis(140))
        );
        assert_eq!(session.tick(), TickOutcome::Moved);
    }

    #[test]
    fn interval_change_rearms_scheduler() {
        let (mut session, _) = session_with(Records::default());
        session.start_new_session(200);
        let game = session.game_mut().expect("game exists");
        game.score = 90;
        game.food = Position::new(11, 10);
        let arms_before = session.scheduler().arm_count;

        assert_eq!(session.tick(), TickOutcome::Ate);

        assert_eq!(session.scheduler().arm_count, arms_before + 1);
        assert_eq!(
            session.scheduler().interval(),
            Some(Duration::from_millis(190))
        );
    }

    #[test]
    fn game_over_records_high_score_and_game_count() {
        let (mut session, store) = session_with(Records {
            high_score: 100,
            games_played: 4,
            ..Records::default()
        });
        session.start_new_session(140);
        let game = session.game_mut().expect("game exists");
        game.score = 150;
        game.place_snake(
            Snake::from_segments(vec![Position::new(19, 5), Position::new(18, 5)]),
            Direction::Right,
        );

        assert_eq!(
            session.tick(),
            TickOutcome::Ended(EndReason::WallCollision)
        );

        let stored = store.records();
        assert_eq!(stored.high_score, 150);
        assert_eq!(stored.games_played, 5);
        assert!(!session.scheduler().is_armed());

        let snapshot = session.snapshot().expect("finished game stays observable");
        assert!(snapshot.game_over);
        assert!(snapshot.new_high_score);
        assert_eq!(snapshot.high_score, 150);
    }

    #[test]
    fn ticks_after_game_over_change_nothing() {
        let (mut session, store) = session_with(Records::default());
        session.start_new_session(140);
        session
            .game_mut()
            .expect("game exists")
            .place_snake(Snake::from_segments(vec![Position::new(0, 0)]), Direction::Up);

        session.tick();
        assert_eq!(session.tick(), TickOutcome::Idle);
        session.submit_pause_toggle();

        assert_eq!(store.records().games_played, 1);
        assert!(!session.scheduler().is_armed());
    }

    #[test]
    fn lower_score_keeps_previous_best() {
        let (mut session, store) = session_with(Records {
            high_score: 500,
            ..Records::default()
        });
        session.start_new_session(140);
        session
            .game_mut()
            .expect("game exists")
            .place_snake(Snake::from_segments(vec![Position::new(0, 0)]), Direction::Left);

        session.tick();

        assert_eq!(store.records().high_score, 500);
        assert!(!session.snapshot().expect("game exists").new_high_score);
    }

    #[test]
    fn selected_difficulty_is_persisted_and_used() {
        let (mut session, store) = session_with(Records::default());

        session.select_difficulty(Difficulty::Hard);
        session.start_at_selected_difficulty();

        assert_eq!(store.records().difficulty_speed_ms, 90);
        assert_eq!(
            session.snapshot().expect("game exists").tick_interval_ms,
            90
        );
    }

    #[test]
    fn unreadable_store_starts_from_zero() {
        let mut session = GameSession::new(BrokenStore, ManualScheduler::new(), options());

        assert_eq!(session.records(), Records::default());

        session.start_new_session(140);
        session
            .game_mut()
            .expect("game exists")
            .place_snake(Snake::from_segments(vec![Position::new(0, 0)]), Direction::Up);
        // Save failure is logged, not fatal.
        session.tick();
        assert_eq!(session.records().games_played, 1);
    }

    #[test]
    fn new_session_replaces_finished_game() {
        let (mut session, _) = session_with(Records::default());
        session.start_new_session(140);
        session
            .game_mut()
            .expect("game exists")
            .place_snake(Snake::from_segments(vec![Position::new(0, 0)]), Direction::Up);
        session.tick();

        session.start_new_session(140);

        let snapshot = session.snapshot().expect("game exists");
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.score, 0);
        assert!(session.scheduler().is_armed());
    }
}
