//! Command implementations

pub mod benchmark;
pub mod score;
pub mod simple;

pub use benchmark::{BenchmarkResult, play_out, run_benchmark};
pub use score::{ScoreReport, score_guess};
pub use simple::{Input, parse_input, play_lines, run_simple};
