//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The run loop feeds it discrete input events once per frame and reads the
//! board back through [`Game`]'s getters.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod machine;
pub mod state;
pub mod tick;

// Re-export commonly used types
pub use action::{Direction, InputEvent};
pub use config::{GameConfig, SpeedLevel, TickPolicy};
pub use engine::{GameEngine, StepInfo};
pub use food::place_food;
pub use machine::{Effect, Game, Phase};
pub use state::{CollisionType, GameState, Grid, Position, Snake};
pub use tick::TickDriver;
