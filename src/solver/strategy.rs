//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use crate::core::Code;

/// A strategy for selecting the next guess
pub trait Strategy {
    /// Select a guess from `guess_pool` given the codes still consistent
    /// with the history
    ///
    /// Returns `None` if nothing can be chosen.
    fn select_guess(&self, guess_pool: &[Code], candidates: &[Code]) -> Option<Code>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Worst-case minimization (default)
    Minimax(MinimaxStrategy),
    /// First consistent code in order
    First(FirstCandidateStrategy),
    /// Random consistent code
    Random(RandomStrategy),
}

impl Strategy for StrategyType {
    fn select_guess(&self, guess_pool: &[Code], candidates: &[Code]) -> Option<Code> {
        match self {
            Self::Minimax(s) => s.select_guess(guess_pool, candidates),
            Self::First(s) => s.select_guess(guess_pool, candidates),
            Self::Random(s) => s.select_guess(guess_pool, candidates),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "minimax", "first", "random".
    /// Defaults to minimax if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "first" => Self::First(FirstCandidateStrategy),
            "random" => Self::Random(RandomStrategy),
            _ => Self::Minimax(MinimaxStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Minimax(_) => "minimax",
            Self::First(_) => "first",
            Self::Random(_) => "random",
        }
    }
}

/// Pure minimax strategy
///
/// Searches the whole pool, so it may play a code that cannot be the secret
/// when that splits the candidates better.
pub struct MinimaxStrategy;

impl Strategy for MinimaxStrategy {
    fn select_guess(&self, guess_pool: &[Code], candidates: &[Code]) -> Option<Code> {
        if candidates.is_empty() {
            return None;
        }
        super::minimax::select_best_guess(guess_pool, candidates).map(|(best, _)| best)
    }
}

/// Always plays the first code that is still consistent
pub struct FirstCandidateStrategy;

impl Strategy for FirstCandidateStrategy {
    fn select_guess(&self, _guess_pool: &[Code], candidates: &[Code]) -> Option<Code> {
        candidates.first().copied()
    }
}

/// Random strategy
///
/// Randomly selects from the remaining candidates.
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn select_guess(&self, _guess_pool: &[Code], candidates: &[Code]) -> Option<Code> {
        use rand::prelude::IndexedRandom;

        candidates.choose(&mut rand::rng()).copied()
    }
}
