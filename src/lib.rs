//! Tick-driven Snake simulation core.
//!
//! The library owns the game rules. Front ends feed commands into a
//! [`session::GameSession`] and draw its [`session::Snapshot`]; the bundled
//! terminal front end lives in [`renderer`], [`ui`] and [`terminal_runtime`].

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
