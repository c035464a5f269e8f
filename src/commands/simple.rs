//! Simple interactive CLI mode
//!
//! Line-based game without the TUI: type three digits to swing.

use crate::core::Code;
use crate::game::{GameEngine, GameMode, HintOutcome};
use crate::output::{print_history, print_score, print_settlement};
use crate::storage::{RewardLedger, SessionRepository};
use anyhow::{Context, Result};
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// What the player typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Swing(Code),
    Hint,
    GiveUp,
    Quit,
}

/// Parse one line of player input
///
/// # Errors
///
/// Returns a message describing why the line is neither a command nor a
/// valid three-digit guess.
pub fn parse_input(line: &str) -> Result<Input, String> {
    match line.trim().to_lowercase().as_str() {
        "hint" | "h" => Ok(Input::Hint),
        "giveup" | "give up" | "g" => Ok(Input::GiveUp),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        text => Code::parse(text).map(Input::Swing).map_err(|e| e.to_string()),
    }
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple<S, L, R>(engine: &mut GameEngine<S, L, R>, mode: GameMode) -> Result<()>
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let stdin = io::stdin();
    play_lines(engine, mode, &mut stdin.lock())
}

/// Game loop over any line source
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn play_lines<S, L, R, B>(
    engine: &mut GameEngine<S, L, R>,
    mode: GameMode,
    input: &mut B,
) -> Result<()>
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
    B: BufRead,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  WLD Baseball - Simple Mode                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Guess the 3-digit secret code (distinct digits 0-9).");
    println!("  Hit: right digit, right spot   Foul: right digit, wrong spot");
    println!("  Strike: nothing matched\n");
    println!("Commands: 'hint', 'giveup', 'quit'\n");
    println!("Player: {}\n", engine.player());

    loop {
        let session = engine.start(mode);
        let max = session.rules().max_guesses;
        println!("{}", format!("⚾ {}", mode.title()).bright_cyan().bold());
        print_history(session);
        println!("\n  {}\n", engine.commentary().italic());

        while engine.session().is_some_and(|s| s.is_in_progress()) {
            let inning = engine.session().map_or(1, |s| s.inning());
            let Some(line) = prompt(input, &format!("Inning {inning}/{max}"))? else {
                return Ok(());
            };

            match parse_input(&line) {
                Ok(Input::Quit) => {
                    if mode.is_persistent() {
                        println!("\nYour daily game is saved. See you soon!\n");
                    } else {
                        println!("\nThanks for playing!\n");
                    }
                    return Ok(());
                }
                Ok(Input::Hint) => {
                    if engine.use_hint() == HintOutcome::Unavailable {
                        println!("  Hints are only available in the Daily Challenge.");
                    } else {
                        println!("  {}", engine.commentary().italic());
                    }
                }
                Ok(Input::GiveUp) => {
                    if engine.give_up().is_none() && mode.is_persistent() {
                        println!("\nGame left. Your progress is kept for later today.\n");
                    }
                }
                Ok(Input::Swing(code)) => swing(engine, code),
                Err(message) => println!("  {}", message.red()),
            }
        }

        if let Some(settlement) = engine.settlement() {
            print_settlement(settlement);
        }

        let Some(answer) = prompt(input, "Play again? (yes/no)")? else {
            return Ok(());
        };
        if !matches!(answer.to_lowercase().as_str(), "yes" | "y") {
            println!("\nThanks for playing!\n");
            return Ok(());
        }
        engine.leave();
    }
}

fn swing<S, L, R>(engine: &mut GameEngine<S, L, R>, code: Code)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let Some(session) = engine.session() else {
        return;
    };
    if let Some(digit) = code
        .digits()
        .iter()
        .find(|&&d| !session.is_digit_available(d))
    {
        println!(
            "  {}",
            format!("{digit} has been ruled out by a hint").red()
        );
        return;
    }

    while engine.backspace() {}
    for &digit in code.digits() {
        engine.press_digit(digit);
    }
    if let Some(result) = engine.swing() {
        let inning = engine.session().map_or(0, |s| s.guesses().len());
        print_score(inning, &result, engine.commentary());
    }
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<B: BufRead>(input: &mut B, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush().context("flushing stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameResult, PlayerContext};
    use crate::storage::{MemoryLedger, MemoryRepository};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn engine() -> GameEngine<MemoryRepository, MemoryLedger, StdRng> {
        let mut engine = GameEngine::new(
            GameConfig::default(),
            PlayerContext::new("tester", 0),
            MemoryRepository::new(),
            MemoryLedger::new(1).with_balance("tester", 5),
            StdRng::seed_from_u64(11),
        );
        engine.refresh_balance();
        engine
    }

    #[test]
    fn parses_commands_and_guesses() {
        assert_eq!(parse_input(" HINT "), Ok(Input::Hint));
        assert_eq!(parse_input("giveup"), Ok(Input::GiveUp));
        assert_eq!(parse_input("q"), Ok(Input::Quit));
        assert_eq!(
            parse_input("8 1 5"),
            Ok(Input::Swing(Code::new(&[8, 1, 5]).unwrap()))
        );
        assert!(parse_input("881").is_err());
        assert!(parse_input("12").is_err());
    }

    #[test]
    fn quitting_daily_keeps_the_save() {
        let mut engine = engine();
        let mut lines = Cursor::new("quit\n");
        play_lines(&mut engine, GameMode::Daily, &mut lines).unwrap();
        assert_eq!(engine.repository().len(), 1);
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let mut engine = engine();
        let mut lines = Cursor::new("123\n");
        play_lines(&mut engine, GameMode::Practice, &mut lines).unwrap();
        assert!(engine.session().is_some_and(|s| s.guesses().len() <= 1));
    }

    #[test]
    fn nine_misses_strike_out() {
        let mut engine = engine();
        engine.start(GameMode::Practice);
        let secret = *engine.session().unwrap().secret();
        let miss: String = (0..10)
            .filter(|d| !secret.contains(*d))
            .take(3)
            .map(|d| d.to_string())
            .collect();
        engine.leave();

        // Same seed, same secret
        let mut engine = self::engine();
        let script = format!("{}no\n", format!("{miss}\n").repeat(9));
        play_lines(&mut engine, GameMode::Practice, &mut Cursor::new(script)).unwrap();

        let settlement = engine.settlement().unwrap();
        assert_eq!(settlement.result, Some(GameResult::Strikeout));
        assert_eq!(settlement.final_inning, 9);
    }
}
