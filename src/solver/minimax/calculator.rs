//! Worst-case partition size for a guess
//!
//! Given a guess and the codes still consistent with the history, counts how
//! many candidates fall into each possible score and reports the largest group.

use crate::core::{Code, Score};
use rustc_hash::FxHashMap;

/// Largest number of candidates that could remain after `guess`
///
/// # Examples
/// ```
/// use wld_baseball::core::Code;
/// use wld_baseball::solver::minimax::calculate_max_remaining;
///
/// let guess = Code::new(&[1, 2, 3]).unwrap();
/// let candidates = vec![
///     Code::new(&[1, 2, 3]).unwrap(),
///     Code::new(&[4, 5, 6]).unwrap(),
/// ];
///
/// // One homerun, one strike: the worst case leaves a single code
/// assert_eq!(calculate_max_remaining(&guess, &candidates), 1);
/// ```
#[must_use]
pub fn calculate_max_remaining(guess: &Code, candidates: &[Code]) -> usize {
    let mut buckets = [0_usize; Score::SLOTS];
    for candidate in candidates {
        buckets[Score::calculate(candidate, guess).index()] += 1;
    }
    buckets.into_iter().max().unwrap_or(0)
}

/// Group candidates by the score `guess` would receive against each of them
#[must_use]
pub fn group_by_score(guess: &Code, candidates: &[Code]) -> FxHashMap<Score, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates {
        *counts.entry(Score::calculate(candidate, guess)).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::all_codes;

    fn code(digits: [u8; 3]) -> Code {
        Code::new(&digits).unwrap()
    }

    #[test]
    fn empty_candidates_leave_nothing() {
        assert_eq!(calculate_max_remaining(&code([1, 2, 3]), &[]), 0);
    }

    #[test]
    fn disjoint_guess_keeps_everything_together() {
        let candidates = [code([1, 2, 3]), code([3, 2, 1]), code([2, 1, 3])];
        assert_eq!(calculate_max_remaining(&code([7, 8, 9]), &candidates), 3);
    }

    #[test]
    fn first_guess_worst_case_over_all_codes() {
        let codes = all_codes();
        let groups = group_by_score(&code([0, 1, 2]), &codes);

        // 7 * 6 * 5 codes share no digit with the guess
        assert_eq!(groups[&Score::calculate(&code([7, 8, 9]), &code([0, 1, 2]))], 210);
        assert_eq!(groups.values().sum::<usize>(), 720);
        assert_eq!(calculate_max_remaining(&code([0, 1, 2]), &codes), 252);
    }

    #[test]
    fn grouping_matches_worst_case() {
        let codes = all_codes();
        let guess = code([4, 7, 1]);
        let worst = group_by_score(&guess, &codes).into_values().max();
        assert_eq!(worst, Some(calculate_max_remaining(&guess, &codes)));
    }
}
