//! Persistence collaborators
//!
//! Saved daily sessions and the WGT ledger, each behind a trait with an
//! in-memory backend for tests and a JSON-file backend for the binary.

mod ledger;
mod repository;

pub use ledger::{FileLedger, MemoryLedger, RewardCommit, RewardLedger};
pub use repository::{FileRepository, MemoryRepository, SessionKey, SessionRepository};
