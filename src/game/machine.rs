//! Menu / playing / paused / game-over flow around the engine.
//!
//! Transitions (anything not listed is ignored):
//!
//! | From     | Event                | To        | Side effect          |
//! |----------|----------------------|-----------|----------------------|
//! | Menu     | Confirm              | Playing   |                      |
//! | Menu     | SpeedUp / SpeedDown  | Menu      | adjust speed level   |
//! | Menu     | Cancel               | terminate |                      |
//! | Playing  | Pause                | Paused    |                      |
//! | Playing  | Turn                 | Playing   | queue heading        |
//! | Playing  | tick, collision      | GameOver  | board frozen         |
//! | Playing  | tick                 | Playing   | snake advanced       |
//! | Paused   | Confirm / Pause      | Playing   |                      |
//! | Paused   | Cancel               | Menu      | reset                |
//! | GameOver | Confirm              | Playing   | reset                |
//! | GameOver | Cancel               | Menu      | reset                |
//! | any      | Quit                 | terminate |                      |

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use super::{
    action::InputEvent,
    config::{GameConfig, SpeedLevel},
    engine::{GameEngine, StepInfo},
    state::{GameState, Grid, Position},
    tick::TickDriver,
};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// What the run loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing observable changed
    None,
    /// The phase changed or the snake moved
    Continue,
    /// Leave the run loop
    Terminate,
}

impl Effect {
    fn merge(self, other: Effect) -> Effect {
        match (self, other) {
            (Effect::Terminate, _) | (_, Effect::Terminate) => Effect::Terminate,
            (Effect::Continue, _) | (_, Effect::Continue) => Effect::Continue,
            _ => Effect::None,
        }
    }
}

/// The whole game: board, phase, speed and pacing
pub struct Game {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    speed_level: SpeedLevel,
    ticker: TickDriver,
    last_step: Option<StepInfo>,
    advanced: bool,
}

impl Game {
    /// Create a game, rejecting configurations it cannot start from
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::with_engine(GameEngine::new(config)?))
    }

    /// Create a game whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::with_engine(GameEngine::with_seed(config, seed)?))
    }

    fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let speed_level = engine.config().speed_level;
        let ticker = TickDriver::new(engine.config());

        Self {
            engine,
            state,
            phase: Phase::Menu,
            speed_level,
            ticker,
            last_step: None,
            advanced: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Snake cells, head first
    pub fn snake(&self) -> &[Position] {
        &self.state.snake.body
    }

    pub fn food(&self) -> Position {
        self.state.food
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Cells moved this round
    pub fn steps(&self) -> u32 {
        self.state.steps
    }

    pub fn grid(&self) -> Grid {
        self.state.grid
    }

    pub fn speed_level(&self) -> SpeedLevel {
        self.speed_level
    }

    /// Outcome of the most recent advance, cleared on reset
    pub fn last_step(&self) -> Option<&StepInfo> {
        self.last_step.as_ref()
    }

    /// Whether the latest [`Game::update`] moved the snake
    pub fn advanced_this_frame(&self) -> bool {
        self.advanced
    }

    /// Run one frame: apply this frame's input events in order, then let the
    /// tick driver advance the snake if the game is still playing.
    pub fn update(&mut self, events: &[InputEvent], now: Instant) -> Effect {
        let mut effect = Effect::None;
        self.advanced = false;

        for &event in events {
            if event == InputEvent::Quit {
                info!("quit requested");
                return Effect::Terminate;
            }

            let was_playing = self.phase == Phase::Playing;
            effect = effect.merge(self.handle_event(event));
            if effect == Effect::Terminate {
                return effect;
            }
            if was_playing && self.phase != Phase::Playing {
                return effect;
            }
        }

        if self.phase == Phase::Playing {
            effect = effect.merge(self.tick(now));
        }

        effect
    }

    fn handle_event(&mut self, event: InputEvent) -> Effect {
        match self.phase {
            Phase::Menu => self.on_menu(event),
            Phase::Playing => self.on_playing(event),
            Phase::Paused => self.on_paused(event),
            Phase::GameOver => self.on_game_over(event),
        }
    }

    fn on_menu(&mut self, event: InputEvent) -> Effect {
        match event {
            InputEvent::Confirm => self.enter(Phase::Playing),
            InputEvent::SpeedUp => self.set_speed(self.speed_level.faster()),
            InputEvent::SpeedDown => self.set_speed(self.speed_level.slower()),
            InputEvent::Cancel => {
                info!("leaving from the menu");
                Effect::Terminate
            }
            _ => Effect::None,
        }
    }

    fn on_playing(&mut self, event: InputEvent) -> Effect {
        match event {
            InputEvent::Pause => self.enter(Phase::Paused),
            InputEvent::Turn(direction) => {
                if !self.state.snake.set_pending_direction(direction) {
                    debug!(?direction, "reversal ignored");
                }
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn on_paused(&mut self, event: InputEvent) -> Effect {
        match event {
            InputEvent::Confirm | InputEvent::Pause => self.enter(Phase::Playing),
            InputEvent::Cancel => {
                self.reset();
                self.enter(Phase::Menu)
            }
            _ => Effect::None,
        }
    }

    fn on_game_over(&mut self, event: InputEvent) -> Effect {
        match event {
            InputEvent::Confirm => {
                self.reset();
                self.enter(Phase::Playing)
            }
            InputEvent::Cancel => {
                self.reset();
                self.enter(Phase::Menu)
            }
            _ => Effect::None,
        }
    }

    fn tick(&mut self, now: Instant) -> Effect {
        if !self.ticker.on_frame(self.speed_level, now) {
            return Effect::None;
        }

        let info = self.engine.advance(&mut self.state);
        if info.ended_round() {
            info!(
                score = self.state.score,
                collision = ?info.collision_type,
                board_cleared = info.board_cleared,
                "round over"
            );
            self.phase = Phase::GameOver;
        }
        self.last_step = Some(info);
        self.advanced = true;

        Effect::Continue
    }

    fn set_speed(&mut self, level: SpeedLevel) -> Effect {
        if level == self.speed_level {
            return Effect::None;
        }
        debug!(level = level.get(), "speed level changed");
        self.speed_level = level;
        Effect::Continue
    }

    fn enter(&mut self, phase: Phase) -> Effect {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        Effect::Continue
    }

    fn reset(&mut self) {
        self.state = self.engine.reset();
        self.ticker.reset();
        self.last_step = None;
        debug!("board reset");
    }
}
