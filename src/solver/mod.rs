//! Solving algorithms
//!
//! Automatic players used to benchmark the game's reward schedules.

mod engine;
pub mod minimax;
pub mod strategy;

pub use engine::{Solver, all_codes};
pub use strategy::{
    FirstCandidateStrategy, MinimaxStrategy, RandomStrategy, Strategy, StrategyType,
};
