//! Secret codes and in-progress guesses
//!
//! A code is an ordered sequence of three distinct digits (0-9). The same type
//! represents both the secret a session is played against and every complete
//! guess submitted against it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a code
pub const CODE_LENGTH: usize = 3;

/// Digits range over `0..DIGIT_COUNT`
pub const DIGIT_COUNT: u8 = 10;

/// Error type for invalid codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    InvalidLength(usize),
    DigitOutOfRange(u8),
    RepeatedDigit(u8),
    NotADigit(char),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Code must be exactly {CODE_LENGTH} digits, got {len}")
            }
            Self::DigitOutOfRange(digit) => write!(f, "Digit {digit} is outside 0-9"),
            Self::RepeatedDigit(digit) => write!(f, "Digit {digit} appears more than once"),
            Self::NotADigit(ch) => write!(f, "'{ch}' is not a digit"),
        }
    }
}

impl std::error::Error for CodeError {}

/// Three distinct digits in a fixed order
///
/// Serialized as a plain array of numbers, e.g. `[8, 1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Code([u8; CODE_LENGTH]);

impl Code {
    /// Create a code from a digit slice
    ///
    /// # Errors
    /// Returns `CodeError` if:
    /// - The slice is not exactly three digits long
    /// - A digit is greater than 9
    /// - A digit is repeated
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::core::Code;
    ///
    /// let code = Code::new(&[8, 1, 5]).unwrap();
    /// assert_eq!(code.digits(), &[8, 1, 5]);
    ///
    /// assert!(Code::new(&[8, 8, 5]).is_err());
    /// assert!(Code::new(&[8, 1]).is_err());
    /// ```
    pub fn new(digits: &[u8]) -> Result<Self, CodeError> {
        if digits.len() != CODE_LENGTH {
            return Err(CodeError::InvalidLength(digits.len()));
        }

        let mut code = [0u8; CODE_LENGTH];
        for (i, &digit) in digits.iter().enumerate() {
            if digit >= DIGIT_COUNT {
                return Err(CodeError::DigitOutOfRange(digit));
            }
            if code[..i].contains(&digit) {
                return Err(CodeError::RepeatedDigit(digit));
            }
            code[i] = digit;
        }

        Ok(Self(code))
    }

    /// Parse a code from text such as `"815"` or `"8 1 5"`
    ///
    /// Whitespace and commas are ignored.
    ///
    /// # Errors
    /// Returns `CodeError` for non-digit characters or an invalid code.
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::core::Code;
    ///
    /// let a = Code::parse("815").unwrap();
    /// let b = Code::parse("8, 1, 5").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn parse(text: &str) -> Result<Self, CodeError> {
        let digits = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(CodeError::NotADigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::new(&digits)
    }

    /// Get the digits in order
    #[inline]
    #[must_use]
    pub const fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }

    /// Get the digit at a specific position (0-2)
    ///
    /// # Panics
    /// Panics if position >= 3
    #[inline]
    #[must_use]
    pub const fn digit_at(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Check if the code contains a digit anywhere
    #[inline]
    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl TryFrom<Vec<u8>> for Code {
    type Error = CodeError;

    fn try_from(digits: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&digits)
    }
}

impl From<Code> for Vec<u8> {
    fn from(code: Code) -> Self {
        code.0.to_vec()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// A guess being typed in, one digit at a time
///
/// Never holds more than three digits and never holds the same digit twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessBuffer {
    digits: Vec<u8>,
}

impl GuessBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit
    ///
    /// Returns `false` (and leaves the buffer untouched) if the buffer is full,
    /// the digit is out of range, or the digit is already present.
    pub fn push(&mut self, digit: u8) -> bool {
        if self.is_complete() || digit >= DIGIT_COUNT || self.digits.contains(&digit) {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Remove the last digit, returning it
    pub fn pop(&mut self) -> Option<u8> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.digits.len() == CODE_LENGTH
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.digits.contains(&digit)
    }

    /// The finished code, once all three digits are in
    #[must_use]
    pub fn to_code(&self) -> Option<Code> {
        if self.is_complete() {
            Code::new(&self.digits).ok()
        } else {
            None
        }
    }
}
