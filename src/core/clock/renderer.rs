//! Countdown line rendering.

use crate::core::clock::state::{ClockView, Phase, RoundOrigin};

#[derive(Clone)]
pub struct ClockRenderer {
    final_round: u32,
}

impl ClockRenderer {
    pub fn new(final_round: u32) -> Self {
        Self { final_round }
    }

    pub fn render(&self, view: &ClockView) -> String {
        let round = format!("Round {}/{}", view.round, self.final_round);
        let round = match view.origin {
            // Not confirmed by the server yet
            RoundOrigin::Stored | RoundOrigin::Default if view.phase != Phase::Initializing => {
                format!("{round}?")
            }
            _ => round,
        };

        match view.phase {
            Phase::Initializing => format!("{round} • syncing..."),
            Phase::Running if view.syncing => {
                format!("{round} • {} left • syncing...", format_countdown(view.seconds_left))
            }
            Phase::Running => format!("{round} • {} left", format_countdown(view.seconds_left)),
            Phase::Expiring => format!("{round} • time's up"),
            Phase::Terminated => format!("{round} • stopped"),
        }
    }
}

/// Formats seconds as `m:ss`
pub fn format_countdown(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
