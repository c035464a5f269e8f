//! Minimax-based guess selection
//!
//! Picks the guess that minimizes the worst-case number of remaining candidates.

use super::calculator::calculate_max_remaining;
use crate::core::Code;
use rayon::prelude::*;

/// Select the best guess by minimizing worst-case remaining candidates
///
/// Ties go to a guess that could itself be the secret, then to the earliest
/// guess in the pool. Returns the chosen guess and its worst case, or `None`
/// if the pool is empty.
///
/// # Examples
/// ```
/// use wld_baseball::core::Code;
/// use wld_baseball::solver::minimax::select_best_guess;
///
/// let pool = vec![
///     Code::new(&[7, 8, 9]).unwrap(),
///     Code::new(&[1, 2, 3]).unwrap(),
/// ];
/// let candidates = vec![
///     Code::new(&[1, 2, 3]).unwrap(),
///     Code::new(&[3, 2, 1]).unwrap(),
/// ];
///
/// let (best, worst) = select_best_guess(&pool, &candidates).unwrap();
/// assert_eq!(best, Code::new(&[1, 2, 3]).unwrap());
/// assert_eq!(worst, 1);
/// ```
#[must_use]
pub fn select_best_guess(guess_pool: &[Code], candidates: &[Code]) -> Option<(Code, usize)> {
    guess_pool
        .par_iter()
        .map(|guess| {
            let max_remaining = calculate_max_remaining(guess, candidates);
            let consistent = candidates.contains(guess);
            (*guess, max_remaining, consistent)
        })
        .min_by_key(|&(_, max, consistent)| (max, !consistent))
        .map(|(guess, max, _)| (guess, max))
}
