use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Game, Phase, Position, TickPolicy};
use crate::metrics::GameMetrics;
use crate::render::particles::{ParticleField, ParticleKind};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        game: &Game,
        metrics: &GameMetrics,
        particles: &ParticleField,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        match game.phase() {
            Phase::Menu => {
                let menu = self.render_menu(game);
                frame.render_widget(menu, game_area);
            }
            Phase::Playing => {
                let grid = self.render_grid(game, particles);
                frame.render_widget(grid, game_area);
            }
            Phase::Paused => {
                let grid = self.render_grid(game, particles);
                frame.render_widget(grid, game_area);
                let popup = centered_rect(40, 30, game_area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_pause(), popup);
            }
            Phase::GameOver => {
                let grid = self.render_grid(game, particles);
                frame.render_widget(grid, game_area);
                let popup = centered_rect(50, 40, game_area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(game), popup);
            }
        }

        let controls = self.render_controls(game.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, game: &Game, particles: &ParticleField) -> Paragraph<'_> {
        let grid = game.grid();
        let snake = game.snake();
        let head = snake[0];
        let food = game.food();

        let mut sparks = vec![None; grid.cell_count()];
        for particle in particles.particles() {
            let cell = particle.cell();
            if grid.in_bounds(cell) {
                let index = cell.y as usize * grid.width + cell.x as usize;
                // Bursts win over the backdrop
                if sparks[index] != Some(ParticleKind::Burst) {
                    sparks[index] = Some(particle.kind);
                }
            }
        }

        let mut lines = Vec::with_capacity(grid.height);
        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    match sparks[y * grid.width + x] {
                        Some(ParticleKind::Burst) => {
                            Span::styled("* ", Style::default().fg(Color::Yellow))
                        }
                        Some(ParticleKind::Ambient) => {
                            Span::styled("· ", Style::default().fg(Color::Blue))
                        }
                        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, game: &Game, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(game.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(game.speed_level().get().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_menu(&self, game: &Game) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled("CONTROLS", Style::default().fg(Color::Yellow))),
            Line::from("Arrow keys / WASD - move"),
            Line::from("Space - pause"),
            Line::from("Enter - start"),
            Line::from("Esc - exit"),
            Line::from(""),
        ];

        if game.config().tick_policy == TickPolicy::FrameCount {
            text.push(Line::from(vec![
                Span::raw("Speed: "),
                Span::styled(
                    game.speed_level().get().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (↑/↓ to change)", Style::default().fg(Color::Gray)),
            ]));
            text.push(Line::from(""));
        }

        text.push(Line::from(Span::styled(
            "Press ENTER to start",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue)),
        )
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Enter/Space - resume"),
            Line::from("Esc - main menu"),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, game: &Game) -> Paragraph<'_> {
        let cleared = game.last_step().is_some_and(|step| step.board_cleared);
        let (title, color) = if cleared {
            ("BOARD CLEARED", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Moves: ", Style::default().fg(Color::Yellow)),
                Span::styled(game.steps().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::styled(" - new game", Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::styled(" - main menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let spans = match phase {
            Phase::Menu => vec![
                Span::styled("Enter", key),
                Span::raw(" start | "),
                Span::styled("↑↓", key),
                Span::raw(" speed | "),
                Span::styled("Esc", key),
                Span::raw(" exit"),
            ],
            Phase::Playing => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Space", key),
                Span::raw(" pause"),
            ],
            Phase::Paused => vec![
                Span::styled("Space", key),
                Span::raw(" resume | "),
                Span::styled("Esc", key),
                Span::raw(" menu"),
            ],
            Phase::GameOver => vec![
                Span::styled("Enter", key),
                Span::raw(" play again | "),
                Span::styled("Esc", key),
                Span::raw(" menu"),
            ],
        };

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangle of the given percentages centred inside `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
