//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts feed it input events and clock readings, and read back a draw list.

pub mod action;
pub mod config;
pub mod draw;
pub mod engine;
pub mod food;
pub mod level;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, InputEvent};
pub use config::GameConfig;
pub use draw::{CellKind, DrawCell, DrawList, Hud, Overlay};
pub use engine::{GameLoop, Phase, TickReport};
pub use food::{BigFood, Food};
pub use level::Level;
pub use state::{CollisionType, MoveOutcome, Position, Snake};
