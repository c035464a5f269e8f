//! WGT balances and reward commits
//!
//! The ledger is the game's only view of the player's currency. Reading a
//! balance and committing a finished session are each a single call; the game
//! carries on whatever the ledger answers.

use crate::game::apply_to_balance;
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What a finished daily session reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCommit {
    pub player_address: String,
    pub hints_used: u32,
    pub reward_amount: u64,
}

pub trait RewardLedger {
    /// Current balance of a player
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be reached or read.
    fn balance_of(&self, address: &str) -> Result<u64>;

    /// Apply a commit, returning the player's new balance
    ///
    /// The new balance is `balance + reward - hints * hint_cost`, floored at 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger rejects or cannot record the commit.
    fn commit(&mut self, commit: &RewardCommit) -> Result<u64>;
}

/// In-memory ledger that records every commit it accepts
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: FxHashMap<String, u64>,
    hint_cost: u64,
    commits: Vec<RewardCommit>,
    offline: bool,
}

impl MemoryLedger {
    #[must_use]
    pub fn new(hint_cost: u64) -> Self {
        Self {
            hint_cost,
            ..Self::default()
        }
    }

    /// A ledger that fails every call
    #[must_use]
    pub fn offline(hint_cost: u64) -> Self {
        Self {
            offline: true,
            ..Self::new(hint_cost)
        }
    }

    #[must_use]
    pub fn with_balance(mut self, address: impl Into<String>, balance: u64) -> Self {
        self.balances.insert(address.into(), balance);
        self
    }

    #[must_use]
    pub fn commits(&self) -> &[RewardCommit] {
        &self.commits
    }
}

impl RewardLedger for MemoryLedger {
    fn balance_of(&self, address: &str) -> Result<u64> {
        if self.offline {
            bail!("ledger offline");
        }
        Ok(self.balances.get(address).copied().unwrap_or(0))
    }

    fn commit(&mut self, commit: &RewardCommit) -> Result<u64> {
        if self.offline {
            bail!("ledger offline");
        }

        let charge = self.hint_cost.saturating_mul(u64::from(commit.hints_used));
        let balance = self
            .balances
            .entry(commit.player_address.clone())
            .or_insert(0);
        *balance = apply_to_balance(*balance, commit.reward_amount, charge);

        self.commits.push(commit.clone());
        Ok(*balance)
    }
}

/// Balances kept in a JSON file mapping address to WGT
///
/// Players the file has never seen start with `starting_balance`.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
    hint_cost: u64,
    starting_balance: u64,
}

impl FileLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, hint_cost: u64, starting_balance: u64) -> Self {
        Self {
            path: path.into(),
            hint_cost,
            starting_balance,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn write_all(&self, balances: &BTreeMap<String, u64>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let contents = serde_json::to_string_pretty(balances)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl RewardLedger for FileLedger {
    fn balance_of(&self, address: &str) -> Result<u64> {
        Ok(self
            .read_all()?
            .get(address)
            .copied()
            .unwrap_or(self.starting_balance))
    }

    fn commit(&mut self, commit: &RewardCommit) -> Result<u64> {
        let mut balances = self.read_all()?;
        let charge = self.hint_cost.saturating_mul(u64::from(commit.hints_used));

        let balance = balances
            .entry(commit.player_address.clone())
            .or_insert(self.starting_balance);
        *balance = apply_to_balance(*balance, commit.reward_amount, charge);
        let updated = *balance;

        self.write_all(&balances)?;
        Ok(updated)
    }
}
