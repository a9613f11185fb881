use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::state::{Grid, Position, Snake};

/// Difficulty selected on the menu, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a level, clamping out-of-range values
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One level faster, saturating at `MAX`
    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level slower, saturating at `MIN`
    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Snake moves per second at this level (5..=25)
    pub fn ticks_per_second(self) -> u32 {
        u32::from(self.0) * 5
    }

    /// Frames between two advances when the loop runs at `fps`
    pub fn frames_per_tick(self, fps: u32) -> u32 {
        (fps / self.ticks_per_second()).max(1)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl From<u8> for SpeedLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<SpeedLevel> for u8 {
    fn from(level: SpeedLevel) -> Self {
        level.0
    }
}

/// How the snake's advance is paced against the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickPolicy {
    /// Advance every `fps / speed` frames; speed follows the speed level
    FrameCount,
    /// Advance once more than `interval_ms` has passed since the last advance
    WallClock { interval_ms: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Where the head starts after a reset
    pub initial_head: Position,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    pub initial_direction: Direction,
    /// Rings of cells along the border where food never spawns
    pub food_margin: usize,
    /// Score added per food eaten
    pub food_reward: u32,
    /// Rate at which the run loop calls update/render
    pub frames_per_second: u32,
    pub tick_policy: TickPolicy,
    pub speed_level: SpeedLevel,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::deluxe()
    }
}

impl GameConfig {
    /// Largest accepted grid side, in cells
    pub const MAX_GRID_SIDE: usize = 1_000;

    /// The decorated variant: menu-selected speed, food kept off the border
    pub fn deluxe() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_head: Position::new(10, 10),
            initial_snake_length: 3,
            initial_direction: Direction::Right,
            food_margin: 1,
            food_reward: 10,
            frames_per_second: 60,
            tick_policy: TickPolicy::FrameCount,
            speed_level: SpeedLevel::default(),
        }
    }

    /// The minimal variant: fixed 100ms ticks, food anywhere
    pub fn classic() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_head: Position::new(5, 5),
            food_margin: 0,
            tick_policy: TickPolicy::WallClock { interval_ms: 100 },
            ..Self::deluxe()
        }
    }

    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_head: Position::new(5, 5),
            ..Self::new(10, 10)
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// The snake every round starts with
    pub fn initial_snake(&self) -> Snake {
        Snake::new(
            self.initial_head,
            self.initial_direction,
            self.initial_snake_length,
        )
    }

    /// Reject configurations the game cannot start from
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 4 && self.grid_height >= 4,
            "grid must be at least 4x4, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= Self::MAX_GRID_SIDE && self.grid_height <= Self::MAX_GRID_SIDE,
            "grid must be at most {max}x{max}, got {}x{}",
            self.grid_width,
            self.grid_height,
            max = Self::MAX_GRID_SIDE
        );
        ensure!(
            self.food_margin.saturating_mul(2) < self.grid_width.min(self.grid_height),
            "food margin {} leaves no room on a {}x{} grid",
            self.food_margin,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );
        ensure!(self.frames_per_second > 0, "frames per second must be positive");
        if let TickPolicy::WallClock { interval_ms } = self.tick_policy {
            ensure!(interval_ms > 0, "tick interval must be positive");
        }

        let grid = self.grid();
        let snake = self.initial_snake();
        ensure!(
            snake.body.iter().all(|&cell| grid.in_bounds(cell)),
            "initial snake at ({}, {}) with length {} does not fit the grid",
            self.initial_head.x,
            self.initial_head.y,
            self.initial_snake_length
        );

        let placement_area =
            (self.grid_width - 2 * self.food_margin) * (self.grid_height - 2 * self.food_margin);
        ensure!(
            self.initial_snake_length < placement_area,
            "initial snake of length {} leaves no room for food",
            self.initial_snake_length
        );

        Ok(())
    }
}
