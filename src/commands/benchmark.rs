//! Benchmark command
//!
//! Lets a solver play real sessions against many secrets and reports how the
//! reward schedules would pay out for that kind of play.

use crate::core::Code;
use crate::game::{GameMode, GameResult, RewardResolver, RewardSchedule, Rules, Session};
use crate::output::formatters::create_progress_bar;
use crate::solver::{Solver, Strategy};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_games: usize,
    pub homeruns: usize,
    pub strikeouts: usize,
    /// Innings needed, over homeruns only
    pub average_innings: f64,
    pub min_innings: usize,
    pub max_innings: usize,
    /// Innings needed -> number of homeruns
    pub distribution: FxHashMap<usize, usize>,
    /// Average daily reward per game under each schedule
    pub average_rewards: Vec<(RewardSchedule, f64)>,
    pub max_guesses: usize,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play one secret to the end with the solver choosing every guess
///
/// The session is left in progress only if the solver runs out of guesses,
/// which cannot happen against a consistent history.
pub fn play_out<S: Strategy>(solver: &Solver<S>, secret: Code, rules: Rules) -> Session {
    let mut session = Session::new(GameMode::Daily, secret, rules);

    while session.is_in_progress() {
        let Some(guess) = solver.next_guess(session.guesses()) else {
            break;
        };
        for &digit in guess.digits() {
            session.press_digit(digit);
        }
        if session.swing().is_none() {
            break;
        }
    }

    session
}

/// Run the solver against every secret in parallel
pub fn run_benchmark<S: Strategy + Sync>(
    solver: &Solver<S>,
    secrets: &[Code],
    rules: Rules,
    resolver: &RewardResolver,
) -> BenchmarkResult {
    let start = Instant::now();
    let pb = create_progress_bar(secrets.len() as u64);

    let outcomes: Vec<(Option<GameResult>, usize)> = secrets
        .par_iter()
        .map(|&secret| {
            let session = play_out(solver, secret, rules);
            pb.inc(1);
            (session.result(), session.guesses().len())
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
    let mut strikeouts = 0;
    for &(result, innings) in &outcomes {
        match result {
            Some(GameResult::Homerun) => *distribution.entry(innings).or_insert(0) += 1,
            Some(GameResult::Strikeout) => strikeouts += 1,
            None => {}
        }
    }

    let homeruns: usize = distribution.values().sum();
    let total_innings: usize = distribution.iter().map(|(innings, n)| innings * n).sum();
    let total_games = outcomes.len();

    let average_rewards = RewardSchedule::ALL
        .iter()
        .map(|&schedule| {
            let paid: u64 = outcomes
                .iter()
                .map(|&(result, innings)| resolver.resolve_with(schedule, result, innings))
                .sum();
            (schedule, ratio(paid as f64, total_games))
        })
        .collect();

    let duration = start.elapsed();

    BenchmarkResult {
        total_games,
        homeruns,
        strikeouts,
        average_innings: ratio(total_innings as f64, homeruns),
        min_innings: distribution.keys().min().copied().unwrap_or(0),
        max_innings: distribution.keys().max().copied().unwrap_or(0),
        distribution,
        average_rewards,
        max_guesses: rules.max_guesses,
        duration,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{FirstCandidateStrategy, MinimaxStrategy, all_codes};

    fn secrets(n: usize) -> Vec<Code> {
        all_codes().into_iter().step_by(37).take(n).collect()
    }

    #[test]
    fn play_out_reaches_homerun() {
        let solver = Solver::new(FirstCandidateStrategy);
        let secret = Code::new(&[8, 1, 5]).unwrap();
        let session = play_out(&solver, secret, Rules::default());

        assert_eq!(session.result(), Some(GameResult::Homerun));
        assert_eq!(session.guesses().last().map(|r| r.guess), Some(secret));
    }

    #[test]
    fn play_out_strikes_out_with_one_inning() {
        let solver = Solver::new(FirstCandidateStrategy);
        let rules = Rules {
            max_guesses: 1,
            ..Rules::default()
        };
        let session = play_out(&solver, Code::new(&[9, 8, 7]).unwrap(), rules);
        assert_eq!(session.result(), Some(GameResult::Strikeout));
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let solver = Solver::new(MinimaxStrategy);
        let result = run_benchmark(&solver, &secrets(8), Rules::default(), &RewardResolver::default());

        assert_eq!(result.total_games, 8);
        assert_eq!(result.homeruns + result.strikeouts, 8);
        assert_eq!(result.distribution.values().sum::<usize>(), result.homeruns);
        assert!(result.average_innings >= result.min_innings as f64);
        assert!(result.average_innings <= result.max_innings as f64);
        assert!(result.max_innings <= 9);
    }

    #[test]
    fn benchmark_reports_both_schedules() {
        let solver = Solver::new(FirstCandidateStrategy);
        let result = run_benchmark(&solver, &secrets(5), Rules::default(), &RewardResolver::default());

        let schedules: Vec<_> = result.average_rewards.iter().map(|(s, _)| *s).collect();
        assert_eq!(schedules, RewardSchedule::ALL);
        assert!(result.average_rewards.iter().all(|(_, avg)| *avg >= 1.0));
    }

    #[test]
    fn benchmark_empty_secret_list() {
        let solver = Solver::new(FirstCandidateStrategy);
        let result = run_benchmark(&solver, &[], Rules::default(), &RewardResolver::default());

        assert_eq!(result.total_games, 0);
        assert_eq!(result.homeruns, 0);
        assert_eq!(result.average_innings, 0.0);
    }
}
