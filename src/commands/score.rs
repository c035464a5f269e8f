//! Score command
//!
//! Evaluates a single guess against a chosen secret.

use crate::core::{Code, GuessResult, Score};
use crate::solver::minimax::group_by_score;
use crate::solver::{FirstCandidateStrategy, Solver, all_codes};

/// Result of scoring one guess
#[derive(Debug)]
pub struct ScoreReport {
    pub secret: Code,
    pub result: GuessResult,
    /// Codes that would still be possible after seeing this score
    pub candidates_left: usize,
    /// How this guess splits all 720 codes by score, largest group first
    pub breakdown: Vec<(Score, usize)>,
}

/// Score `guess` against `secret`
///
/// # Errors
///
/// Returns an error if either code is not three distinct digits.
///
/// # Examples
/// ```
/// use wld_baseball::commands::score_guess;
///
/// let report = score_guess("815", "852").unwrap();
/// assert_eq!((report.result.score.hits, report.result.score.fouls), (1, 1));
/// ```
pub fn score_guess(secret: &str, guess: &str) -> Result<ScoreReport, String> {
    let secret = Code::parse(secret).map_err(|e| format!("Invalid secret: {e}"))?;
    let guess = Code::parse(guess).map_err(|e| format!("Invalid guess: {e}"))?;

    let result = GuessResult::evaluate(&secret, guess);
    let candidates_left = Solver::new(FirstCandidateStrategy).count_candidates(&[result]);

    let mut breakdown: Vec<_> = group_by_score(&guess, &all_codes()).into_iter().collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.index().cmp(&b.0.index())));

    Ok(ScoreReport {
        secret,
        result,
        candidates_left,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_leaves_codes_without_guessed_digits() {
        let report = score_guess("815", "234").unwrap();
        assert!(report.result.score.is_strike());
        assert_eq!(report.candidates_left, 210);
    }

    #[test]
    fn breakdown_partitions_every_code() {
        let report = score_guess("815", "234").unwrap();
        assert_eq!(report.breakdown.iter().map(|(_, n)| n).sum::<usize>(), 720);

        let strikes = report
            .breakdown
            .iter()
            .find(|(score, _)| score.is_strike())
            .map(|&(_, count)| count);
        assert_eq!(strikes, Some(report.candidates_left));
        assert_eq!(report.breakdown[0].1, 252);
        assert!(report.breakdown.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn homerun_leaves_one_code() {
        let report = score_guess("815", "815").unwrap();
        assert!(report.result.score.is_homerun());
        assert_eq!(report.candidates_left, 1);
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(score_guess("811", "123").unwrap_err().starts_with("Invalid secret"));
        assert!(score_guess("815", "12").unwrap_err().starts_with("Invalid guess"));
    }
}
