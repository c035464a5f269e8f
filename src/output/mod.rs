//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_evaluation, print_history, print_reward_tables,
    print_score, print_settlement,
};
