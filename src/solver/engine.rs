//! Solver driver
//!
//! Narrows the 720 possible secrets down with the score history and lets a
//! strategy pick the next guess.

use super::strategy::Strategy;
use crate::core::{Code, DIGIT_COUNT, GuessResult, Score};

/// Every possible secret, in ascending order
///
/// # Examples
/// ```
/// use wld_baseball::solver::all_codes;
///
/// let codes = all_codes();
/// assert_eq!(codes.len(), 720);
/// assert_eq!(codes[0].to_string(), "012");
/// assert_eq!(codes[719].to_string(), "987");
/// ```
#[must_use]
pub fn all_codes() -> Vec<Code> {
    let mut codes = Vec::with_capacity(720);
    for a in 0..DIGIT_COUNT {
        for b in 0..DIGIT_COUNT {
            for c in 0..DIGIT_COUNT {
                if let Ok(code) = Code::new(&[a, b, c]) {
                    codes.push(code);
                }
            }
        }
    }
    codes
}

/// Hit/foul/strike solver
///
/// Coordinates the solving process using a given strategy.
pub struct Solver<S: Strategy> {
    strategy: S,
    pool: Vec<Code>,
}

impl<S: Strategy> Solver<S> {
    /// Create a solver that may guess any of the 720 codes
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            pool: all_codes(),
        }
    }

    /// Get the next guess given the scores seen so far
    ///
    /// Returns `None` if no code is consistent with the history.
    pub fn next_guess(&self, history: &[GuessResult]) -> Option<Code> {
        let candidates = self.candidates(history);

        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => self.strategy.select_guess(&self.pool, &candidates),
        }
    }

    /// Codes that would have produced every observed score
    #[must_use]
    pub fn candidates(&self, history: &[GuessResult]) -> Vec<Code> {
        self.pool
            .iter()
            .filter(|candidate| {
                history
                    .iter()
                    .all(|seen| Score::calculate(candidate, &seen.guess) == seen.score)
            })
            .copied()
            .collect()
    }

    /// Count how many codes remain given the history
    #[must_use]
    pub fn count_candidates(&self, history: &[GuessResult]) -> usize {
        self.candidates(history).len()
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::strategy::{FirstCandidateStrategy, MinimaxStrategy};

    fn code(digits: [u8; 3]) -> Code {
        Code::new(&digits).unwrap()
    }

    #[test]
    fn all_codes_are_distinct_and_sorted() {
        let codes = all_codes();
        assert_eq!(codes.len(), 720);
        assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn first_guess_with_empty_history() {
        let solver = Solver::new(FirstCandidateStrategy);
        assert_eq!(solver.next_guess(&[]), Some(code([0, 1, 2])));
        assert_eq!(solver.count_candidates(&[]), 720);
    }

    #[test]
    fn history_filters_candidates() {
        let solver = Solver::new(FirstCandidateStrategy);
        let secret = code([8, 1, 5]);
        let history = [GuessResult::evaluate(&secret, code([8, 5, 2]))];

        let candidates = solver.candidates(&history);
        assert!(candidates.contains(&secret));
        assert!(candidates.len() < 720);
        assert!(
            candidates
                .iter()
                .all(|c| Score::calculate(c, &code([8, 5, 2])) == history[0].score)
        );
    }

    #[test]
    fn homerun_leaves_only_the_secret() {
        let solver = Solver::new(MinimaxStrategy);
        let secret = code([3, 9, 4]);
        let history = [GuessResult::evaluate(&secret, secret)];
        assert_eq!(solver.candidates(&history), vec![secret]);
        assert_eq!(solver.next_guess(&history), Some(secret));
    }

    #[test]
    fn contradictory_history_has_no_guess() {
        let solver = Solver::new(FirstCandidateStrategy);
        let history = [
            GuessResult {
                guess: code([1, 2, 3]),
                score: Score::HOMERUN,
            },
            GuessResult {
                guess: code([4, 5, 6]),
                score: Score::HOMERUN,
            },
        ];
        assert_eq!(solver.next_guess(&history), None);
    }

    #[test]
    fn minimax_converges_on_secrets() {
        let solver = Solver::new(MinimaxStrategy);

        for secret in [code([8, 1, 5]), code([0, 1, 2]), code([9, 7, 6])] {
            let mut history = Vec::new();
            while history.last().is_none_or(|r: &GuessResult| !r.score.is_homerun()) {
                let guess = solver.next_guess(&history).unwrap();
                history.push(GuessResult::evaluate(&secret, guess));
                assert!(history.len() <= 9);
            }
        }
    }
}
