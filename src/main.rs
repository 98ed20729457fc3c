use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use snake::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, Difficulty};
use snake::game::GameState;
use snake::grid::GridSize;
use snake::input::{GameInput, InputHandler};
use snake::renderer::{self, View};
use snake::scheduler::IntervalTimer;
use snake::score::{JsonFileStore, ScoreStore};
use snake::session::{GameSession, SessionOptions};
use snake::terminal_runtime::TerminalGuard;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a fixed grid in your terminal")]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting difficulty; stored for later runs.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Write logs to this file (filtered by RUST_LOG, default `info`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

type Session = GameSession<JsonFileStore, IntervalTimer>;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let grid = GridSize::new(cli.width, cli.height)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let store = JsonFileStore::at_default_path();
    info!(path = %store.path().display(), "using records file");
    if let Err(error) = store.load() {
        eprintln!("Warning: could not read records, starting fresh: {error}");
    }

    let mut session = GameSession::new(
        store,
        IntervalTimer::new(),
        SessionOptions {
            grid,
            seed: cli.seed,
        },
    );
    if let Some(difficulty) = cli.difficulty {
        session.select_difficulty(difficulty.into());
    }

    run(&mut session)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run(session: &mut Session) -> io::Result<()> {
    let mut terminal = TerminalGuard::enter()?;
    let mut input = InputHandler::new(FRAME_INTERVAL);
    let mut on_start_screen = true;

    loop {
        let snapshot = session.snapshot();
        let records = session.records();
        terminal.draw(|frame| {
            let view = match &snapshot {
                Some(snapshot) if !on_start_screen => View::Playing(snapshot),
                _ => View::Start { records },
            };
            renderer::render(frame, view);
        })?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }

            handle_input(session, &mut on_start_screen, game_input);
        }

        if session.scheduler_mut().poll_due(Instant::now()) {
            session.tick();
        }
    }

    Ok(())
}

fn handle_input(session: &mut Session, on_start_screen: &mut bool, input: GameInput) {
    if *on_start_screen {
        match input {
            GameInput::Confirm => {
                session.start_at_selected_difficulty();
                *on_start_screen = false;
            }
            GameInput::CycleDifficulty => {
                let next = session.records().difficulty().next();
                session.select_difficulty(next);
            }
            _ => {}
        }
        return;
    }

    let game_over = session.game().is_some_and(GameState::is_game_over);

    match input {
        GameInput::Direction(direction) => session.submit_direction(direction),
        GameInput::Pause => session.submit_pause_toggle(),
        GameInput::Confirm if game_over => session.start_at_selected_difficulty(),
        GameInput::Confirm | GameInput::CycleDifficulty | GameInput::Quit => {}
    }
}
