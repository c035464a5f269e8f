//! Game rules and the session driver
//!
//! `Session` is the pure state machine for one game. `GameEngine` wires a
//! session to the player, storage, ledger and commentary.

mod commentary;
pub mod config;
mod context;
mod engine;
mod reward;
mod secret;
mod session;

pub use commentary::{CommentaryPicker, Remark};
pub use config::{
    GameConfig, GiveUpPolicy, HINT_COST, MAX_GUESSES, MAX_HINTS, Rules, SECRET_CODE_LENGTH,
    STARTING_BALANCE,
};
pub use context::{GUEST_ADDRESS, PlayerContext};
pub use engine::GameEngine;
pub use reward::{
    DAILY_CHALLENGE_REWARDS, RewardResolver, RewardSchedule, RewardTable, RewardTableError,
    RewardTables, Settlement, WGT_MODE_REWARDS, apply_to_balance,
};
pub use secret::{SecretGenerator, pick_absent_digit};
pub use session::{
    GameMode, GameResult, HintOutcome, Phase, RestoreError, SavedSession, Session,
};
