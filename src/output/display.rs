//! Display functions for command results

use super::formatters::{create_bar, score_badge};
use crate::commands::{BenchmarkResult, ScoreReport};
use crate::core::GuessResult;
use crate::game::{GameResult, RewardSchedule, RewardTables, Session, Settlement};
use colored::Colorize;

/// Print one scored guess with its commentary
pub fn print_score(inning: usize, result: &GuessResult, commentary: &str) {
    println!(
        "  {:>2}. {}  {}  {}",
        inning.to_string().bright_black(),
        result.guess.to_string().bright_white().bold(),
        score_badge(result.score),
        commentary.italic()
    );
}

/// Print the evaluation of a single guess against a secret
pub fn print_evaluation(report: &ScoreReport) {
    let result = &report.result;
    println!(
        "\nSecret {} / guess {}",
        report.secret.to_string().bright_yellow().bold(),
        result.guess.to_string().bright_white().bold()
    );
    println!(
        "  Hits: {}  Fouls: {}  Strikes: {}   [{}]",
        result.score.hits.to_string().green(),
        result.score.fouls.to_string().yellow(),
        result.score.strikes.to_string().red(),
        score_badge(result.score)
    );
    println!(
        "  Codes still possible after this score: {}",
        report.candidates_left
    );

    println!("\n  How {} splits all codes:", result.guess);
    for (score, count) in &report.breakdown {
        let marker = if *score == result.score { " <" } else { "" };
        println!("    {}  {count:>4}{marker}", score_badge(*score));
    }
}

/// Print every guess made so far, e.g. after resuming a session
pub fn print_history(session: &Session) {
    if session.guesses().is_empty() {
        return;
    }
    println!("\n  Scoreboard:");
    for (i, result) in session.guesses().iter().enumerate() {
        println!(
            "  {:>2}. {}  {}",
            (i + 1).to_string().bright_black(),
            result.guess.to_string().bright_white().bold(),
            score_badge(result.score)
        );
    }
    if !session.revealed_hints().is_empty() {
        let hints: Vec<String> = session
            .revealed_hints()
            .iter()
            .map(u8::to_string)
            .collect();
        println!("  Not in the secret: {}", hints.join(", ").bright_black());
    }
}

/// Print how a session was settled
pub fn print_settlement(settlement: &Settlement) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match settlement.result {
        Some(GameResult::Homerun) => println!(
            "{}",
            format!("    HOMERUN in inning {}!", settlement.final_inning)
                .bright_green()
                .bold()
        ),
        Some(GameResult::Strikeout) => println!("{}", "    STRIKEOUT".red().bold()),
        None => println!("{}", "    GAME ABANDONED".yellow().bold()),
    }
    println!("{}", "═".repeat(60).bright_cyan());

    println!("\n  Mode:         {}", settlement.mode.title());
    println!("  Innings:      {}", settlement.final_inning);
    println!(
        "  Reward:       {}",
        format!("+{} WGT", settlement.reward).green()
    );
    if settlement.hints_used > 0 {
        println!(
            "  Hints:        {} ({})",
            settlement.hints_used,
            format!("-{} WGT", settlement.hint_charge).red()
        );
    }
    let delta = settlement.net_delta();
    let net = format!("{delta:+} WGT");
    println!(
        "  Net:          {}",
        if delta < 0 { net.red() } else { net.green() }
    );
    println!(
        "  Balance:      {} → {}",
        settlement.balance_before,
        settlement.balance_after.to_string().bright_yellow().bold()
    );
    println!();
}

/// Print both reward tables side by side
pub fn print_reward_tables(tables: &RewardTables, active: RewardSchedule) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "REWARD TABLES (WGT per homerun)".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let header = |schedule: RewardSchedule| {
        let name = format!("{:>16}", schedule.as_str());
        if schedule == active {
            name.bright_yellow().bold()
        } else {
            name.normal()
        }
    };
    println!(
        "\n  Inning {}{}",
        header(RewardSchedule::DailyChallenge),
        header(RewardSchedule::WgtMode)
    );

    let innings = tables.daily_challenge.len().max(tables.wgt_mode.len());
    for inning in 1..=innings {
        println!(
            "  {inning:>6} {:>16}{:>16}",
            tables.daily_challenge.reward_for_inning(inning),
            tables.wgt_mode.reward_for_inning(inning)
        );
    }
    println!("\n  Strikeouts and abandoned games pay nothing.");
}

/// Print the result of a benchmark
pub fn print_benchmark_result(strategy: &str, result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n{}", "Performance:".bright_cyan().bold());
    println!("   Strategy:         {strategy}");
    println!("   Secrets played:   {}", result.total_games);
    println!(
        "   Homeruns:         {}",
        result.homeruns.to_string().green()
    );
    if result.strikeouts > 0 {
        println!(
            "   Strikeouts:       {}",
            result.strikeouts.to_string().red()
        );
    }
    println!(
        "   Average innings:  {}",
        format!("{:.2}", result.average_innings)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        result.min_innings.to_string().green()
    );
    println!(
        "   Worst case:       {}",
        result.max_innings.to_string().yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n{}", "Distribution:".bright_cyan().bold());
    for innings in 1..=result.max_guesses {
        if let Some(&count) = result.distribution.get(&innings) {
            let pct = (count as f64 / result.total_games as f64) * 100.0;
            let bar = create_bar(pct, 100.0, 40);
            println!("   {innings}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }

    println!("\n{}", "Average reward per game:".bright_cyan().bold());
    for (schedule, average) in &result.average_rewards {
        println!(
            "   {:<16} {}",
            schedule.as_str(),
            format!("{average:.2} WGT").bright_yellow()
        );
    }
}
