//! Minimax guess selection
//!
//! Minimizes the worst-case number of codes left after a guess.

mod calculator;
mod selector;

pub use calculator::{calculate_max_remaining, group_by_score};
pub use selector::select_best_guess;
