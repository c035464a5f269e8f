//! Game rules and configuration
//!
//! Defaults match the shipped game. A JSON file can override any field; missing
//! fields fall back to these defaults.

use super::reward::{RewardResolver, RewardSchedule, RewardTables};
use crate::core::{CODE_LENGTH, DIGIT_COUNT};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SECRET_CODE_LENGTH: usize = CODE_LENGTH;
pub const MAX_GUESSES: usize = 9;
pub const MAX_HINTS: u32 = 3;
/// Cost of one hint in WGT
pub const HINT_COST: u64 = 1;
/// Balance credited to a player the ledger has never seen
pub const STARTING_BALANCE: u64 = 10;

/// The limits a single session plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub max_guesses: usize,
    pub max_hints: u32,
    pub hint_cost: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_guesses: MAX_GUESSES,
            max_hints: MAX_HINTS,
            hint_cost: HINT_COST,
        }
    }
}

/// What happens to a saved daily session when the player gives up
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GiveUpPolicy {
    /// Leave the save in place; the session resumes on the next daily start
    #[default]
    KeepResumable,
    /// Delete the save and settle hint costs immediately
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_guesses: usize,
    pub max_hints: u32,
    pub hint_cost: u64,
    pub starting_balance: u64,
    pub daily_schedule: RewardSchedule,
    pub give_up_policy: GiveUpPolicy,
    pub rewards: RewardTables,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: MAX_GUESSES,
            max_hints: MAX_HINTS,
            hint_cost: HINT_COST,
            starting_balance: STARTING_BALANCE,
            daily_schedule: RewardSchedule::default(),
            give_up_policy: GiveUpPolicy::default(),
            rewards: RewardTables::default(),
        }
    }
}

impl GameConfig {
    /// Load a config file, falling back to defaults for missing fields
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, contains
    /// an increasing reward table, or fails `validate`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check limits that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if there are no innings, or more hints than digits
    /// that can be absent from a secret.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_guesses > 0, "max_guesses must be at least 1");
        let absent_digits = u32::from(DIGIT_COUNT) - CODE_LENGTH as u32;
        ensure!(
            self.max_hints <= absent_digits,
            "max_hints must be at most {absent_digits}, got {}",
            self.max_hints
        );
        Ok(())
    }

    #[must_use]
    pub const fn rules(&self) -> Rules {
        Rules {
            max_guesses: self.max_guesses,
            max_hints: self.max_hints,
            hint_cost: self.hint_cost,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> RewardResolver {
        RewardResolver::new(self.rewards.clone(), self.daily_schedule, self.hint_cost)
    }
}
