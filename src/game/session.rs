//! Session state machine
//!
//! A session is one game against one secret:
//!
//! ```text
//! InProgress ──homerun──▶ Over(Homerun)
//!     │      ──9th miss─▶ Over(Strikeout)
//!     └──────give up────▶ Abandoned
//! ```
//!
//! All operations are local and infallible. Input that does not apply to the
//! current state is ignored and reported through the return value.

use super::config::Rules;
use super::secret::{SecretGenerator, pick_absent_digit};
use crate::core::{Code, GuessBuffer, GuessResult, Score};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Daily challenge: persisted, hints available, pays WGT
    Daily,
    /// Free play: never persisted, no hints, no rewards
    Practice,
}

impl GameMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Practice => "practice",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily Challenge",
            Self::Practice => "Practice Mode",
        }
    }

    /// Only daily sessions survive a restart
    #[must_use]
    pub const fn is_persistent(self) -> bool {
        matches!(self, Self::Daily)
    }

    #[must_use]
    pub const fn allows_hints(self) -> bool {
        matches!(self, Self::Daily)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Homerun,
    Strikeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Over(GameResult),
    /// The player walked away; not a scored result
    Abandoned,
}

/// What a hint request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// This digit is not in the secret
    Revealed(u8),
    /// The per-session hint budget is spent
    NoMoreHints,
    /// The balance does not cover another hint
    NotEnoughWgt,
    /// Wrong mode, session over, or nothing left to reveal
    Unavailable,
}

/// The persisted form of an in-progress session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub secret_code: Code,
    pub guesses: Vec<GuessResult>,
    pub revealed_hints: Vec<u8>,
    pub hints_used: u32,
}

/// Why a saved session could not be resumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    ScoreMismatch { inning: usize },
    AlreadyFinished,
    TooManyGuesses(usize),
    TooManyHints(u32),
    HintCountMismatch { revealed: usize, used: u32 },
    HintInSecret(u8),
    RepeatedHint(u8),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScoreMismatch { inning } => {
                write!(f, "Stored score for inning {inning} does not match the secret")
            }
            Self::AlreadyFinished => write!(f, "Stored session already ended in a homerun"),
            Self::TooManyGuesses(count) => write!(f, "Stored session has {count} guesses"),
            Self::TooManyHints(count) => write!(f, "Stored session used {count} hints"),
            Self::HintCountMismatch { revealed, used } => {
                write!(f, "Stored session revealed {revealed} hints but used {used}")
            }
            Self::HintInSecret(digit) => write!(f, "Stored hint {digit} is part of the secret"),
            Self::RepeatedHint(digit) => write!(f, "Stored hint {digit} appears twice"),
        }
    }
}

impl std::error::Error for RestoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: GameMode,
    rules: Rules,
    secret: Code,
    guesses: Vec<GuessResult>,
    current: GuessBuffer,
    revealed_hints: Vec<u8>,
    hints_used: u32,
    phase: Phase,
}

impl Session {
    /// Start a session against a known secret
    #[must_use]
    pub fn new(mode: GameMode, secret: Code, rules: Rules) -> Self {
        Self {
            mode,
            rules,
            secret,
            guesses: Vec::new(),
            current: GuessBuffer::new(),
            revealed_hints: Vec::new(),
            hints_used: 0,
            phase: Phase::InProgress,
        }
    }

    /// Start a session against a freshly generated secret
    pub fn start<R: Rng + ?Sized>(mode: GameMode, rules: Rules, rng: &mut R) -> Self {
        Self::new(mode, SecretGenerator::generate(rng), rules)
    }

    /// Resume a saved session
    ///
    /// Every stored guess is re-scored against the stored secret, so a save
    /// that was edited or written by an incompatible build is rejected rather
    /// than resumed in an inconsistent state.
    ///
    /// # Errors
    ///
    /// Returns `RestoreError` if the save is inconsistent or already finished.
    pub fn restore(mode: GameMode, saved: SavedSession, rules: Rules) -> Result<Self, RestoreError> {
        if saved.guesses.len() >= rules.max_guesses {
            return Err(RestoreError::TooManyGuesses(saved.guesses.len()));
        }

        for (i, entry) in saved.guesses.iter().enumerate() {
            if Score::calculate(&saved.secret_code, &entry.guess) != entry.score {
                return Err(RestoreError::ScoreMismatch { inning: i + 1 });
            }
            if entry.score.is_homerun() {
                return Err(RestoreError::AlreadyFinished);
            }
        }

        if saved.hints_used > rules.max_hints {
            return Err(RestoreError::TooManyHints(saved.hints_used));
        }
        if saved.revealed_hints.len() != saved.hints_used as usize {
            return Err(RestoreError::HintCountMismatch {
                revealed: saved.revealed_hints.len(),
                used: saved.hints_used,
            });
        }
        for (i, &hint) in saved.revealed_hints.iter().enumerate() {
            if saved.secret_code.contains(hint) {
                return Err(RestoreError::HintInSecret(hint));
            }
            if saved.revealed_hints[..i].contains(&hint) {
                return Err(RestoreError::RepeatedHint(hint));
            }
        }

        Ok(Self {
            mode,
            rules,
            secret: saved.secret_code,
            guesses: saved.guesses,
            current: GuessBuffer::new(),
            revealed_hints: saved.revealed_hints,
            hints_used: saved.hints_used,
            phase: Phase::InProgress,
        })
    }

    /// Everything needed to resume this session later
    #[must_use]
    pub fn snapshot(&self) -> SavedSession {
        SavedSession {
            secret_code: self.secret,
            guesses: self.guesses.clone(),
            revealed_hints: self.revealed_hints.clone(),
            hints_used: self.hints_used,
        }
    }

    /// Add a digit to the current guess
    ///
    /// Returns `false` if the session is over, the guess is full, or the digit
    /// is already part of it.
    pub fn press_digit(&mut self, digit: u8) -> bool {
        self.is_in_progress() && self.current.push(digit)
    }

    /// Remove the last digit of the current guess
    pub fn backspace(&mut self) -> bool {
        self.is_in_progress() && self.current.pop().is_some()
    }

    /// Submit the current guess
    ///
    /// Only a complete three-digit guess is scored; anything else is a no-op
    /// returning `None`. A homerun or the final miss ends the session.
    pub fn swing(&mut self) -> Option<GuessResult> {
        if !self.is_in_progress() {
            return None;
        }
        let guess = self.current.to_code()?;

        let result = GuessResult::evaluate(&self.secret, guess);
        self.guesses.push(result);
        self.current.clear();

        if result.score.is_homerun() {
            self.phase = Phase::Over(GameResult::Homerun);
        } else if self.guesses.len() >= self.rules.max_guesses {
            self.phase = Phase::Over(GameResult::Strikeout);
        }

        Some(result)
    }

    /// Reveal one digit that is not in the secret
    ///
    /// `balance` is the undebited balance and must cover one hint. Hints are
    /// only charged at settlement, where the balance is floored at zero.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, balance: u64, rng: &mut R) -> HintOutcome {
        if !self.mode.allows_hints() || !self.is_in_progress() {
            return HintOutcome::Unavailable;
        }
        if balance < self.rules.hint_cost {
            return HintOutcome::NotEnoughWgt;
        }
        if self.hints_used >= self.rules.max_hints {
            return HintOutcome::NoMoreHints;
        }

        match pick_absent_digit(&self.secret, &self.revealed_hints, rng) {
            Some(digit) => {
                self.revealed_hints.push(digit);
                self.hints_used += 1;
                HintOutcome::Revealed(digit)
            }
            None => HintOutcome::Unavailable,
        }
    }

    /// Walk away from the session
    ///
    /// Returns `false` if the session had already ended.
    pub fn give_up(&mut self) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        self.current.clear();
        self.phase = Phase::Abandoned;
        true
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    #[inline]
    #[must_use]
    pub const fn secret(&self) -> &Code {
        &self.secret
    }

    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[GuessResult] {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn current_guess(&self) -> &GuessBuffer {
        &self.current
    }

    #[inline]
    #[must_use]
    pub fn revealed_hints(&self) -> &[u8] {
        &self.revealed_hints
    }

    #[inline]
    #[must_use]
    pub const fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Over(result) => Some(result),
            Phase::InProgress | Phase::Abandoned => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.phase, Phase::InProgress)
    }

    /// The inning being played (1-indexed), capped at the last inning
    #[must_use]
    pub fn inning(&self) -> usize {
        (self.guesses.len() + 1).min(self.rules.max_guesses)
    }

    /// Whether pressing `digit` could currently do anything useful
    ///
    /// Digits already in the guess or ruled out by a hint are not.
    #[must_use]
    pub fn is_digit_available(&self, digit: u8) -> bool {
        !self.current.contains(digit) && !self.revealed_hints.contains(&digit)
    }
}
