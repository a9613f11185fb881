//! Snake Arcade - the classic Snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the menu/pause/game-over flow (game module)
//! - Key mapping (input module)
//! - TUI rendering and particle effects (render module)
//! - Session statistics (metrics module)
//! - The interactive run loop (modes module)

pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
