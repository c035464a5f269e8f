//! Reward tables and end-of-session settlement
//!
//! A homerun pays out according to the inning it was hit in: the earlier the
//! homerun, the larger the reward. Daily sessions also pay for the hints they
//! used, and the resulting balance never drops below zero.

use super::session::{GameMode, GameResult, Session};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily challenge payout per inning (index 0 = homerun on the first guess)
pub const DAILY_CHALLENGE_REWARDS: [u64; 9] = [100, 10, 5, 3, 2, 1, 1, 1, 1];

/// Flatter alternate payout used by the "wgt-mode" schedule
pub const WGT_MODE_REWARDS: [u64; 9] = [30, 15, 10, 5, 3, 2, 1, 1, 1];

/// Error type for invalid reward tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardTableError {
    Empty,
    Increasing {
        inning: usize,
        previous: u64,
        next: u64,
    },
}

impl fmt::Display for RewardTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Reward table must have at least one inning"),
            Self::Increasing {
                inning,
                previous,
                next,
            } => write!(
                f,
                "Reward table must not increase: inning {inning} pays {next}, after {previous}"
            ),
        }
    }
}

impl std::error::Error for RewardTableError {}

/// Rewards indexed by inning, monotonically non-increasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct RewardTable(Vec<u64>);

impl RewardTable {
    /// Build a table from per-inning rewards
    ///
    /// # Errors
    /// Returns `RewardTableError` if the table is empty or ever increases.
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::game::RewardTable;
    ///
    /// assert!(RewardTable::new(vec![10, 5, 5, 1]).is_ok());
    /// assert!(RewardTable::new(vec![10, 20]).is_err());
    /// ```
    pub fn new(entries: Vec<u64>) -> Result<Self, RewardTableError> {
        if entries.is_empty() {
            return Err(RewardTableError::Empty);
        }

        for (i, pair) in entries.windows(2).enumerate() {
            if pair[1] > pair[0] {
                return Err(RewardTableError::Increasing {
                    inning: i + 2,
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        Ok(Self(entries))
    }

    #[must_use]
    pub fn daily_challenge() -> Self {
        Self(DAILY_CHALLENGE_REWARDS.to_vec())
    }

    #[must_use]
    pub fn wgt_mode() -> Self {
        Self(WGT_MODE_REWARDS.to_vec())
    }

    /// Reward for a homerun on `inning` (1-indexed)
    ///
    /// Innings outside `1..=len` pay nothing.
    #[must_use]
    pub fn reward_for_inning(&self, inning: usize) -> u64 {
        inning
            .checked_sub(1)
            .and_then(|index| self.0.get(index))
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[u64] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u64>> for RewardTable {
    type Error = RewardTableError;

    fn try_from(entries: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<RewardTable> for Vec<u64> {
    fn from(table: RewardTable) -> Self {
        table.0
    }
}

/// Which table a daily session pays out from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RewardSchedule {
    #[default]
    DailyChallenge,
    WgtMode,
}

impl RewardSchedule {
    pub const ALL: [Self; 2] = [Self::DailyChallenge, Self::WgtMode];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyChallenge => "daily-challenge",
            Self::WgtMode => "wgt-mode",
        }
    }
}

impl fmt::Display for RewardSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both reward tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTables {
    pub daily_challenge: RewardTable,
    pub wgt_mode: RewardTable,
}

impl Default for RewardTables {
    fn default() -> Self {
        Self {
            daily_challenge: RewardTable::daily_challenge(),
            wgt_mode: RewardTable::wgt_mode(),
        }
    }
}

impl RewardTables {
    #[must_use]
    pub const fn table(&self, schedule: RewardSchedule) -> &RewardTable {
        match schedule {
            RewardSchedule::DailyChallenge => &self.daily_challenge,
            RewardSchedule::WgtMode => &self.wgt_mode,
        }
    }
}

/// Outcome of closing a session, ready to be applied to a balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub mode: GameMode,
    /// `None` when the player gave up
    pub result: Option<GameResult>,
    pub final_inning: usize,
    pub hints_used: u32,
    pub reward: u64,
    pub hint_charge: u64,
    pub balance_before: u64,
    pub balance_after: u64,
}

impl Settlement {
    /// Signed balance change before flooring at zero
    #[must_use]
    pub const fn net_delta(&self) -> i64 {
        self.reward as i64 - self.hint_charge as i64
    }
}

/// Apply a reward and a charge to a balance, flooring at zero
#[must_use]
pub const fn apply_to_balance(balance: u64, reward: u64, charge: u64) -> u64 {
    balance.saturating_add(reward).saturating_sub(charge)
}

/// Maps finished sessions to WGT amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardResolver {
    tables: RewardTables,
    schedule: RewardSchedule,
    hint_cost: u64,
}

impl RewardResolver {
    #[must_use]
    pub const fn new(tables: RewardTables, schedule: RewardSchedule, hint_cost: u64) -> Self {
        Self {
            tables,
            schedule,
            hint_cost,
        }
    }

    #[must_use]
    pub const fn schedule(&self) -> RewardSchedule {
        self.schedule
    }

    #[must_use]
    pub const fn tables(&self) -> &RewardTables {
        &self.tables
    }

    /// Reward for a session that ended with `result` after `final_inning` guesses
    ///
    /// `final_inning` counts every submitted guess including the winning one.
    /// Only daily homeruns pay; practice sessions never do.
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::game::{GameMode, GameResult, RewardResolver, RewardSchedule, RewardTables};
    ///
    /// let resolver = RewardResolver::new(RewardTables::default(), RewardSchedule::DailyChallenge, 1);
    /// assert_eq!(resolver.resolve(GameMode::Daily, Some(GameResult::Homerun), 1), 100);
    /// assert_eq!(resolver.resolve(GameMode::Daily, Some(GameResult::Homerun), 9), 1);
    /// assert_eq!(resolver.resolve(GameMode::Daily, Some(GameResult::Strikeout), 9), 0);
    /// ```
    #[must_use]
    pub fn resolve(&self, mode: GameMode, result: Option<GameResult>, final_inning: usize) -> u64 {
        match mode {
            GameMode::Daily => self.resolve_with(self.schedule, result, final_inning),
            GameMode::Practice => 0,
        }
    }

    /// Reward under an explicit schedule, regardless of the configured one
    #[must_use]
    pub fn resolve_with(
        &self,
        schedule: RewardSchedule,
        result: Option<GameResult>,
        final_inning: usize,
    ) -> u64 {
        match result {
            Some(GameResult::Homerun) => self
                .tables
                .table(schedule)
                .reward_for_inning(final_inning),
            Some(GameResult::Strikeout) | None => 0,
        }
    }

    /// WGT owed for the hints a session used
    #[must_use]
    pub const fn hint_charge(&self, mode: GameMode, hints_used: u32) -> u64 {
        match mode {
            GameMode::Daily => self.hint_cost.saturating_mul(hints_used as u64),
            GameMode::Practice => 0,
        }
    }

    /// Settle a finished or abandoned session against the current balance
    #[must_use]
    pub fn settle(&self, session: &Session, balance: u64) -> Settlement {
        let mode = session.mode();
        let result = session.result();
        let final_inning = session.guesses().len();
        let reward = self.resolve(mode, result, final_inning);
        let hint_charge = self.hint_charge(mode, session.hints_used());

        Settlement {
            mode,
            result,
            final_inning,
            hints_used: session.hints_used(),
            reward,
            hint_charge,
            balance_before: balance,
            balance_after: apply_to_balance(balance, reward, hint_charge),
        }
    }
}

impl Default for RewardResolver {
    fn default() -> Self {
        Self::new(
            RewardTables::default(),
            RewardSchedule::default(),
            super::config::HINT_COST,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Code;
    use crate::game::config::Rules;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn resolver() -> RewardResolver {
        RewardResolver::default()
    }

    fn secret() -> Code {
        Code::new(&[8, 1, 5]).unwrap()
    }

    #[test]
    fn builtin_tables_are_valid() {
        assert!(RewardTable::new(DAILY_CHALLENGE_REWARDS.to_vec()).is_ok());
        assert!(RewardTable::new(WGT_MODE_REWARDS.to_vec()).is_ok());
        assert_eq!(RewardTable::daily_challenge().len(), 9);
        assert_eq!(RewardTable::wgt_mode().len(), 9);
    }

    #[test]
    fn table_rejects_increase_and_empty() {
        assert_eq!(RewardTable::new(vec![]), Err(RewardTableError::Empty));
        assert_eq!(
            RewardTable::new(vec![5, 3, 4]),
            Err(RewardTableError::Increasing {
                inning: 3,
                previous: 3,
                next: 4
            })
        );
    }

    #[test]
    fn table_deserialization_is_validated() {
        assert!(serde_json::from_str::<RewardTable>("[3,2,1]").is_ok());
        assert!(serde_json::from_str::<RewardTable>("[1,2,3]").is_err());
    }

    #[test]
    fn reward_for_inning_bounds() {
        let table = RewardTable::daily_challenge();
        assert_eq!(table.reward_for_inning(0), 0);
        assert_eq!(table.reward_for_inning(1), 100);
        assert_eq!(table.reward_for_inning(2), 10);
        assert_eq!(table.reward_for_inning(9), 1);
        assert_eq!(table.reward_for_inning(10), 0);
    }

    #[test]
    fn daily_homerun_uses_first_and_last_innings() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(GameMode::Daily, Some(GameResult::Homerun), 1),
            DAILY_CHALLENGE_REWARDS[0]
        );
        assert_eq!(
            resolver.resolve(GameMode::Daily, Some(GameResult::Homerun), 9),
            DAILY_CHALLENGE_REWARDS[8]
        );
    }

    #[test]
    fn strikeout_and_abandon_pay_nothing() {
        let resolver = resolver();
        for inning in 0..=10 {
            assert_eq!(
                resolver.resolve(GameMode::Daily, Some(GameResult::Strikeout), inning),
                0
            );
            assert_eq!(resolver.resolve(GameMode::Daily, None, inning), 0);
        }
    }

    #[test]
    fn practice_never_pays() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(GameMode::Practice, Some(GameResult::Homerun), 1),
            0
        );
        assert_eq!(resolver.hint_charge(GameMode::Practice, 3), 0);
    }

    #[test]
    fn wgt_mode_schedule() {
        let resolver = RewardResolver::new(RewardTables::default(), RewardSchedule::WgtMode, 1);
        assert_eq!(
            resolver.resolve(GameMode::Daily, Some(GameResult::Homerun), 1),
            30
        );
        assert_eq!(
            resolver.resolve_with(
                RewardSchedule::DailyChallenge,
                Some(GameResult::Homerun),
                1
            ),
            100
        );
    }

    #[test]
    fn balance_floors_at_zero() {
        assert_eq!(apply_to_balance(0, 0, 3), 0);
        assert_eq!(apply_to_balance(2, 1, 5), 0);
        assert_eq!(apply_to_balance(10, 5, 2), 13);
    }

    #[test]
    fn settle_homerun_on_second_inning_with_hint() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::new(GameMode::Daily, secret(), Rules::default());
        session.use_hint(10, &mut rng);

        for digit in [1, 2, 3] {
            session.press_digit(digit);
        }
        session.swing();
        for digit in [8, 1, 5] {
            session.press_digit(digit);
        }
        session.swing();

        let settlement = resolver().settle(&session, 4);
        assert_eq!(settlement.result, Some(GameResult::Homerun));
        assert_eq!(settlement.final_inning, 2);
        assert_eq!(settlement.reward, 10);
        assert_eq!(settlement.hint_charge, 1);
        assert_eq!(settlement.net_delta(), 9);
        assert_eq!(settlement.balance_after, 13);
    }

    #[test]
    fn settle_abandoned_daily_charges_hints_only() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::new(GameMode::Daily, secret(), Rules::default());
        session.use_hint(10, &mut rng);
        session.use_hint(10, &mut rng);
        session.give_up();

        let settlement = resolver().settle(&session, 1);
        assert_eq!(settlement.result, None);
        assert_eq!(settlement.reward, 0);
        assert_eq!(settlement.hint_charge, 2);
        assert_eq!(settlement.net_delta(), -2);
        assert_eq!(settlement.balance_after, 0);
    }
}
