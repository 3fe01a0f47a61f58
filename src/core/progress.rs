//! Countdown progress bar

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use super::clock::{ClockRenderer, ClockView, Phase};
use super::config::{CONNECTING_MESSAGE, PROGRESS_CHARS, PROGRESS_TEMPLATE};

/// Creates a progress bar style configuration
/// Returns a ProgressStyle configured with the application's visual styling
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}

/// Progress bar that drains as a round's countdown runs down
pub struct CountdownBar {
    bar: ProgressBar,
    renderer: ClockRenderer,
}

impl CountdownBar {
    pub fn new(game_id: &str, final_round: u32) -> Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(create_progress_style()?);
        bar.set_prefix(format!("📈 {game_id}"));
        bar.set_message(CONNECTING_MESSAGE);
        Ok(Self {
            bar,
            renderer: ClockRenderer::new(final_round),
        })
    }

    /// Redraws the bar from a clock view.
    ///
    /// The bar length grows to the largest countdown seen, so a fresh round
    /// or a server correction starts it full again.
    pub fn update(&self, view: &ClockView) {
        if view.phase == Phase::Running && view.seconds_left > self.bar.length().unwrap_or(0) {
            self.bar.set_length(view.seconds_left);
        }
        let total = self.bar.length().unwrap_or(0);
        self.bar.set_position(total.saturating_sub(view.seconds_left));
        self.bar.set_message(self.renderer.render(view));
    }

    /// Leaves the final line on screen
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
