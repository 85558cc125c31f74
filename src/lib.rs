//! Snake Arcade - a grid snake game with bonus food and levels
//!
//! This library provides:
//! - Core game logic (game module)
//! - High score persistence (persistence module)
//! - Terminal rendering of the draw list (render module)
//! - Key mapping (input module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod render;
