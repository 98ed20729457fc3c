use ratatui::style::Color;
use ratatui::symbols::border;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest accepted grid dimension.
pub const MIN_GRID_DIMENSION: u16 = 3;

/// Segment count of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Score granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Score needed per speed step.
pub const POINTS_PER_SPEED_STEP: u32 = 100;

/// Tick interval reduction per speed step in milliseconds.
pub const SPEED_STEP_MS: u64 = 10;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Selectable starting speeds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Base tick interval in milliseconds.
    #[must_use]
    pub fn speed_ms(self) -> u64 {
        match self {
            Self::Easy => 200,
            Self::Medium => 140,
            Self::Hard => 90,
        }
    }

    /// Maps a stored speed back to its difficulty.
    #[must_use]
    pub fn from_speed_ms(speed_ms: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.speed_ms() == speed_ms)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Returns the next difficulty, wrapping after `Hard`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Colors applied to all visual elements of the terminal front end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Magenta,
    border_fg: Color::Cyan,
    border_bg: Color::Black,
    hud_label: Color::DarkGray,
    hud_value: Color::Cyan,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_SNAKE_TAIL: &str = "▪";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
