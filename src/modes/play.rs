use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::game::{Effect, Game, GameConfig, InputEvent};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::{ParticleField, Renderer};

/// Interactive terminal session: owns the game and drives it one frame at a
/// time.
pub struct PlayMode {
    game: Game,
    metrics: GameMetrics,
    particles: ParticleField,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Input collected since the previous frame
    pending_events: Vec<InputEvent>,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let grid = config.grid();
        let (game, particles) = match seed {
            Some(seed) => (
                Game::with_seed(config, seed)?,
                ParticleField::with_seed(grid, seed),
            ),
            None => (Game::new(config)?, ParticleField::new(grid)),
        };

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            particles,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_events: Vec::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            width = self.game.grid().width,
            height = self.game.grid().height,
            policy = ?self.game.config().tick_policy,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        if let Err(err) = &result {
            error!(error = %err, "game loop failed");
        }

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            rounds = self.metrics.rounds_played,
            best_score = self.metrics.best_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One update and one draw per frame
        let fps = u64::from(self.game.config().frames_per_second.max(1));
        let mut frame_timer = interval(Duration::from_micros(1_000_000 / fps));
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Buffer terminal events until the next frame
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    self.frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics, &self.particles);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release or repeat
            if key.kind != KeyEventKind::Press {
                return;
            }

            if let Some(input) = self.input_handler.handle_key_event(key, self.game.phase()) {
                self.pending_events.push(input);
            }
        }
    }

    /// Hand the buffered input to the game and update everything that
    /// follows from it
    fn frame(&mut self, now: Instant) {
        let before = self.game.phase();
        let effect = self.game.update(&self.pending_events, now);
        self.pending_events.clear();

        if effect == Effect::Terminate {
            self.should_quit = true;
            return;
        }

        self.metrics
            .observe(before, self.game.phase(), self.game.score(), now);

        if self.game.advanced_this_frame() {
            if let Some(step) = self.game.last_step().filter(|step| step.ate_food) {
                self.particles.burst(step.new_head);
            }
        }
        self.particles.update();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Position, SpeedLevel};
    use crate::render::particles::ParticleKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::default(), Some(1)).unwrap();
        assert_eq!(mode.game.phase(), Phase::Menu);
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_key_presses_are_buffered_until_frame() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(1)).unwrap();

        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press));
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Release));
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Repeat));
        assert_eq!(mode.pending_events, vec![InputEvent::SpeedUp]);
        assert_eq!(mode.game.speed_level(), SpeedLevel::new(2));

        mode.frame(Instant::now());

        assert!(mode.pending_events.is_empty());
        assert_eq!(mode.game.speed_level(), SpeedLevel::new(3));
    }

    #[test]
    fn test_escape_on_menu_quits() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(1)).unwrap();
        mode.handle_event(key(KeyCode::Esc, KeyEventKind::Press));

        mode.frame(Instant::now());

        assert!(mode.should_quit);
    }

    #[test]
    fn test_eating_spawns_a_burst() {
        let config = GameConfig {
            frames_per_second: 25,
            speed_level: SpeedLevel::new(5),
            ..GameConfig::default()
        };
        let mut mode = PlayMode::new(config, Some(4)).unwrap();
        mode.handle_event(key(KeyCode::Enter, KeyEventKind::Press));
        mode.frame(Instant::now());
        assert_eq!(mode.game.phase(), Phase::Playing);

        let score_before = mode.game.score();
        let bursts_before = burst_count(&mode);
        let ahead = mode.game.snake()[0].moved_by(1, 0);
        mode.game.state_mut().food = ahead;

        mode.frame(Instant::now());

        assert_eq!(mode.game.snake()[0], ahead);
        assert_eq!(mode.game.score(), score_before + 10);
        assert!(burst_count(&mode) > bursts_before);
    }

    fn burst_count(mode: &PlayMode) -> usize {
        mode.particles
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Burst)
            .count()
    }

    #[test]
    fn test_rounds_are_counted() {
        let config = GameConfig {
            frames_per_second: 25,
            speed_level: SpeedLevel::new(5),
            initial_head: Position::new(37, 10),
            ..GameConfig::default()
        };
        let mut mode = PlayMode::new(config, Some(9)).unwrap();
        mode.handle_event(key(KeyCode::Enter, KeyEventKind::Press));

        // Heading right from x=37 the wall is three cells away
        for _ in 0..5 {
            mode.frame(Instant::now());
        }

        assert_eq!(mode.game.phase(), Phase::GameOver);
        assert_eq!(mode.metrics.rounds_played, 1);
    }
}
