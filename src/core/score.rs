//! Guess evaluation: hits, fouls and strikes
//!
//! Every guess is scored against the secret position by position:
//! - Hit: digit is in the secret at the same position
//! - Foul: digit is in the secret at a different position
//! - Strike: the guess produced neither a hit nor a foul
//!
//! Secret digits are unique, so no pegging bookkeeping is needed: a digit
//! scores at most once, and an exact match always wins over a foul.

use super::code::{CODE_LENGTH, Code};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for one guess
///
/// `strikes` is a single 0/1 flag per guess, not a per-digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    pub hits: u8,
    pub fouls: u8,
    pub strikes: u8,
}

impl Score {
    /// All three digits in place
    pub const HOMERUN: Self = Self {
        hits: CODE_LENGTH as u8,
        fouls: 0,
        strikes: 0,
    };

    /// Number of distinct scores a guess can produce (hits * 4 + fouls < 16)
    pub const SLOTS: usize = 16;

    /// Score `guess` against `secret`
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::core::{Code, Score};
    ///
    /// let secret = Code::new(&[8, 1, 5]).unwrap();
    /// let guess = Code::new(&[8, 5, 2]).unwrap();
    /// let score = Score::calculate(&secret, &guess);
    ///
    /// // 8 is in place, 5 is in the secret but elsewhere
    /// assert_eq!((score.hits, score.fouls, score.strikes), (1, 1, 0));
    /// ```
    #[must_use]
    pub fn calculate(secret: &Code, guess: &Code) -> Self {
        let mut hits = 0;
        let mut fouls = 0;

        for (position, &digit) in guess.digits().iter().enumerate() {
            if secret.digit_at(position) == digit {
                hits += 1;
            } else if secret.contains(digit) {
                fouls += 1;
            }
        }

        let strikes = u8::from(hits == 0 && fouls == 0);
        Self {
            hits,
            fouls,
            strikes,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_homerun(self) -> bool {
        self.hits as usize == CODE_LENGTH
    }

    #[inline]
    #[must_use]
    pub const fn is_strike(self) -> bool {
        self.strikes > 0
    }

    /// Compact index used to bucket candidates by score
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.hits as usize * 4 + self.fouls as usize
    }
}

impl fmt::Display for Score {
    /// Short badge form: `HR`, `S`, or e.g. `1H 1F`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_homerun() {
            return write!(f, "HR");
        }
        if self.is_strike() {
            return write!(f, "S");
        }
        match (self.hits, self.fouls) {
            (0, fouls) => write!(f, "{fouls}F"),
            (hits, 0) => write!(f, "{hits}H"),
            (hits, fouls) => write!(f, "{hits}H {fouls}F"),
        }
    }
}

/// A submitted guess together with its score
///
/// Serialized flat, e.g. `{"guess":[8,5,2],"hits":1,"fouls":1,"strikes":0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub guess: Code,
    #[serde(flatten)]
    pub score: Score,
}

impl GuessResult {
    /// Evaluate `guess` against `secret`
    #[must_use]
    pub fn evaluate(secret: &Code, guess: Code) -> Self {
        Self {
            guess,
            score: Score::calculate(secret, &guess),
        }
    }
}
