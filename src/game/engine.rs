use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use super::{
    config::GameConfig,
    food::place_food,
    state::{CollisionType, GameState, Grid, Position, Snake},
};

/// Outcome of advancing the snake by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Cell the head moved into, or tried to move into on a collision
    pub new_head: Position,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Food was eaten and no free cell is left for the next one
    pub board_cleared: bool,
}

impl StepInfo {
    /// Whether this step ended the round
    pub fn ended_round(&self) -> bool {
        self.collision_type.is_some() || self.board_cleared
    }
}

/// Moves the snake, resolves collisions and places food
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = self.config.initial_snake();
        let grid = self.config.grid();
        let food = match self.spawn_food(&snake, grid) {
            Some(food) => food,
            // Unreachable for a validated config: the initial snake is
            // shorter than the placement area.
            None => {
                let margin = self.config.food_margin as i32;
                let corner = Position::new(margin, margin);
                warn!("no free cell for the first food, placing it at the margin corner");
                debug_assert!(!snake.occupies(corner), "fallback food placed on the snake");
                corner
            }
        };

        GameState::new(snake, food, grid)
    }

    /// Advance the snake one cell along its pending heading.
    ///
    /// Collisions are checked against the body as it is before the move, so
    /// stepping onto the current tail cell counts as hitting yourself. A
    /// colliding move leaves the snake untouched.
    pub fn advance(&mut self, state: &mut GameState) -> StepInfo {
        if !state.is_alive {
            return StepInfo {
                new_head: state.snake.head(),
                ate_food: false,
                collision_type: None,
                board_cleared: false,
            };
        }

        let new_head = state.snake.commit_direction();

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            debug!(?collision_type, x = new_head.x, y = new_head.y, "snake collided");

            return StepInfo {
                new_head,
                ate_food: false,
                collision_type: Some(collision_type),
                board_cleared: false,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.push_head(new_head, ate_food);
        state.steps += 1;

        let mut board_cleared = false;
        if ate_food {
            state.score += self.config.food_reward;
            match self.spawn_food(&state.snake, state.grid) {
                Some(food) => {
                    debug!(score = state.score, x = food.x, y = food.y, "food eaten, new food placed");
                    state.food = food;
                }
                None => {
                    debug!(score = state.score, "food eaten, board cleared");
                    state.is_alive = false;
                    board_cleared = true;
                }
            }
        }

        StepInfo {
            new_head,
            ate_food,
            collision_type: None,
            board_cleared,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn spawn_food(&mut self, snake: &Snake, grid: Grid) -> Option<Position> {
        place_food(snake, grid, self.config.food_margin, &mut self.rng)
    }
}
