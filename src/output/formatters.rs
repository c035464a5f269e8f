//! Formatting utilities for terminal output

use crate::core::{CODE_LENGTH, GuessBuffer, Score};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

/// Score badge colored by outcome
#[must_use]
pub fn score_badge(score: Score) -> ColoredString {
    let badge = format!("{:>5}", score.to_string());
    if score.is_homerun() {
        badge.bright_green().bold()
    } else if score.is_strike() {
        badge.red()
    } else if score.hits > 0 {
        badge.green()
    } else {
        badge.yellow()
    }
}

/// The guess being typed, padded with placeholders, e.g. `8 1 _`
#[must_use]
pub fn guess_slots(guess: &GuessBuffer) -> String {
    (0..CODE_LENGTH)
        .map(|i| {
            guess
                .digits()
                .get(i)
                .map_or_else(|| "_".to_string(), u8::to_string)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a text bar string
#[must_use]
pub fn create_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress bar used by long-running commands
#[must_use]
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
    )
    .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░"));
    pb.set_style(style);
    pb
}
