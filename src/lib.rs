//! WLD Baseball
//!
//! A daily hit/foul/strike number-guessing game: crack a three-digit secret of
//! distinct digits within nine innings, with hints paid in WGT and rewards that
//! shrink with every inning used.
//!
//! # Quick Start
//!
//! ```rust
//! use wld_baseball::core::{Code, Score};
//!
//! let secret = Code::new(&[8, 1, 5]).unwrap();
//! let guess = Code::parse("852").unwrap();
//!
//! let score = Score::calculate(&secret, &guess);
//! assert_eq!((score.hits, score.fouls, score.strikes), (1, 1, 0));
//! ```

// Core domain types
pub mod core;

// Game rules, sessions and rewards
pub mod game;

// Saved sessions and the WGT ledger
pub mod storage;

// Automatic players
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
