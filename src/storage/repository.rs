//! Saved-session storage
//!
//! One slot per (player, mode). Slots hold the JSON form of a `SavedSession`.

use crate::game::{GameMode, SavedSession};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Identifies one storage slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    player: String,
    mode: GameMode,
}

impl SessionKey {
    #[must_use]
    pub fn new(player: impl Into<String>, mode: GameMode) -> Self {
        Self {
            player: player.into(),
            mode,
        }
    }

    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Slot name, safe to use as a file stem
    ///
    /// Bytes outside `[A-Za-z0-9-]` are written as `_` plus two hex digits, so
    /// distinct players never share a slot.
    ///
    /// # Examples
    /// ```
    /// use wld_baseball::game::GameMode;
    /// use wld_baseball::storage::SessionKey;
    ///
    /// let key = SessionKey::new("0xAb/12", GameMode::Daily);
    /// assert_eq!(key.slot_name(), "wld-baseball-game-0xAb_2f12-daily");
    /// ```
    #[must_use]
    pub fn slot_name(&self) -> String {
        let mut player = String::with_capacity(self.player.len());
        for byte in self.player.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                player.push(char::from(byte));
            } else {
                player.push_str(&format!("_{byte:02x}"));
            }
        }
        format!("wld-baseball-game-{player}-{}", self.mode)
    }
}

/// Load/save/delete saved sessions by key
pub trait SessionRepository {
    /// Fetch the saved session in a slot, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self, key: &SessionKey) -> Result<Option<SavedSession>>;

    /// Overwrite a slot
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&mut self, key: &SessionKey, session: &SavedSession) -> Result<()>;

    /// Empty a slot; deleting an empty slot succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if an existing slot cannot be removed.
    fn delete(&mut self, key: &SessionKey) -> Result<()>;
}

/// Keeps slots in memory as serialized JSON
#[derive(Debug, Default)]
pub struct MemoryRepository {
    slots: FxHashMap<SessionKey, String>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &SessionKey) -> bool {
        self.slots.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put raw text into a slot, bypassing serialization
    pub fn insert_raw(&mut self, key: SessionKey, json: impl Into<String>) {
        self.slots.insert(key, json.into());
    }
}

impl SessionRepository for MemoryRepository {
    fn load(&self, key: &SessionKey) -> Result<Option<SavedSession>> {
        self.slots
            .get(key)
            .map(|json| {
                serde_json::from_str(json)
                    .with_context(|| format!("parsing slot {}", key.slot_name()))
            })
            .transpose()
    }

    fn save(&mut self, key: &SessionKey, session: &SavedSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.slots.insert(key.clone(), json);
        Ok(())
    }

    fn delete(&mut self, key: &SessionKey) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One pretty-printed JSON file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// The directory is created on first save
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &SessionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.slot_name()))
    }
}

impl SessionRepository for FileRepository {
    fn load(&self, key: &SessionKey) -> Result<Option<SavedSession>> {
        let path = self.slot_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        let saved = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(saved))
    }

    fn save(&mut self, key: &SessionKey, session: &SavedSession) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let path = self.slot_path(key);
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    fn delete(&mut self, key: &SessionKey) -> Result<()> {
        let path = self.slot_path(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                Err(e).with_context(|| format!("removing {}", path.display()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Code, GuessResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn saved() -> SavedSession {
        let secret = Code::new(&[8, 1, 5]).unwrap();
        SavedSession {
            secret_code: secret,
            guesses: vec![GuessResult::evaluate(&secret, Code::new(&[8, 5, 2]).unwrap())],
            revealed_hints: vec![7],
            hints_used: 1,
        }
    }

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("wld-baseball-repo-{}-{n}", std::process::id()))
    }

    #[test]
    fn slot_names_separate_players_and_modes() {
        let a = SessionKey::new("alice", GameMode::Daily);
        let b = SessionKey::new("alice", GameMode::Practice);
        let c = SessionKey::new("bob", GameMode::Daily);
        assert_eq!(a.slot_name(), "wld-baseball-game-alice-daily");
        assert_ne!(a.slot_name(), b.slot_name());
        assert_ne!(a.slot_name(), c.slot_name());
    }

    #[test]
    fn slot_names_keep_escaped_players_apart() {
        let slash = SessionKey::new("a/b", GameMode::Daily);
        let underscore = SessionKey::new("a_b", GameMode::Daily);
        let space = SessionKey::new("a b", GameMode::Daily);
        assert_eq!(slash.slot_name(), "wld-baseball-game-a_2fb-daily");
        assert_eq!(underscore.slot_name(), "wld-baseball-game-a_5fb-daily");
        assert_ne!(slash.slot_name(), space.slot_name());
        assert_eq!(
            SessionKey::new("0xAb-12", GameMode::Daily).slot_name(),
            "wld-baseball-game-0xAb-12-daily"
        );
    }

    #[test]
    fn memory_round_trip() {
        let mut repo = MemoryRepository::new();
        let key = SessionKey::new("alice", GameMode::Daily);

        assert_eq!(repo.load(&key).unwrap(), None);
        repo.save(&key, &saved()).unwrap();
        assert_eq!(repo.load(&key).unwrap(), Some(saved()));

        repo.delete(&key).unwrap();
        assert_eq!(repo.load(&key).unwrap(), None);
        repo.delete(&key).unwrap();
    }

    #[test]
    fn memory_reports_corrupt_slot() {
        let mut repo = MemoryRepository::new();
        let key = SessionKey::new("alice", GameMode::Daily);
        repo.insert_raw(key.clone(), "{not json");
        assert!(repo.load(&key).is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = scratch_dir();
        let mut repo = FileRepository::new(&dir);
        let key = SessionKey::new("0xABC", GameMode::Daily);

        assert_eq!(repo.load(&key).unwrap(), None);
        repo.save(&key, &saved()).unwrap();
        assert!(dir.join("wld-baseball-game-0xABC-daily.json").exists());
        assert_eq!(repo.load(&key).unwrap(), Some(saved()));

        repo.delete(&key).unwrap();
        assert_eq!(repo.load(&key).unwrap(), None);
        repo.delete(&key).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_reports_corrupt_slot() {
        let dir = scratch_dir();
        let repo = FileRepository::new(&dir);
        let key = SessionKey::new("alice", GameMode::Daily);

        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", key.slot_name())), "[]").unwrap();
        assert!(repo.load(&key).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
