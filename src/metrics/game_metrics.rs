use std::time::{Duration, Instant};

use crate::game::Phase;

/// Per-session statistics shown in the header. Nothing here outlives the
/// process.
pub struct GameMetrics {
    /// Time spent in the playing phase this round; pauses don't count
    pub round_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    last_frame: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            last_frame: None,
        }
    }

    /// Feed one frame's phase change into the statistics
    pub fn observe(&mut self, before: Phase, after: Phase, score: u32, now: Instant) {
        if after == Phase::Playing && matches!(before, Phase::Menu | Phase::GameOver) {
            self.on_round_start();
        }
        if after == Phase::GameOver && before != Phase::GameOver {
            self.on_round_over(score);
        }

        if before == Phase::Playing {
            if let Some(last) = self.last_frame {
                self.round_time += now.saturating_duration_since(last);
            }
        }
        self.last_frame = Some(now);
    }

    pub fn on_round_start(&mut self) {
        self.round_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
