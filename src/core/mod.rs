//! Core domain types for the hit/foul/strike game
//!
//! Pure value types with no I/O: codes, in-progress guesses and scoring.

mod code;
mod score;

pub use code::{CODE_LENGTH, Code, CodeError, DIGIT_COUNT, GuessBuffer};
pub use score::{GuessResult, Score};
