use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A discrete, edge-triggered input handed to the game once per frame.
///
/// Which events a phase reacts to is decided by [`crate::game::Game::update`];
/// everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Start a round, resume, or start over after a game over
    Confirm,
    /// Back out: leave the menu, or return to it from pause/game over
    Cancel,
    /// Toggle pause while playing (also resumes from pause)
    Pause,
    SpeedUp,
    SpeedDown,
    /// Request a new heading for the next tick
    Turn(Direction),
    /// Leave the game from any screen
    Quit,
}
