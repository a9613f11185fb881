//! Paces snake advances against the frame loop

use std::time::{Duration, Instant};

use super::config::{GameConfig, SpeedLevel, TickPolicy};

/// Decides, frame by frame, whether the snake advances
#[derive(Debug, Clone)]
pub struct TickDriver {
    policy: TickPolicy,
    frames_per_second: u32,
    frame_count: u32,
    last_advance: Option<Instant>,
}

impl TickDriver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            policy: config.tick_policy,
            frames_per_second: config.frames_per_second,
            frame_count: 0,
            last_advance: None,
        }
    }

    /// Forget any progress toward the next advance
    pub fn reset(&mut self) {
        self.frame_count = 0;
        self.last_advance = None;
    }

    /// Account for one playing frame and report whether the snake moves now.
    ///
    /// Under the wall-clock policy the first frame after a reset starts the
    /// clock instead of advancing.
    pub fn on_frame(&mut self, level: SpeedLevel, now: Instant) -> bool {
        match self.policy {
            TickPolicy::FrameCount => {
                self.frame_count += 1;
                if self.frame_count < level.frames_per_tick(self.frames_per_second) {
                    return false;
                }
                self.frame_count = 0;
                true
            }
            TickPolicy::WallClock { interval_ms } => {
                let Some(last) = self.last_advance else {
                    self.last_advance = Some(now);
                    return false;
                };
                if now.saturating_duration_since(last) <= Duration::from_millis(interval_ms) {
                    return false;
                }
                self.last_advance = Some(now);
                true
            }
        }
    }
}
