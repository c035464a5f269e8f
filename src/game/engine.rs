//! Game driver
//!
//! Wraps a `Session` with everything around it: the player, the saved-session
//! repository, the WGT ledger, the random source and the running commentary.
//! Daily sessions are saved after every change that matters for resuming and
//! removed once they end; finished daily sessions are committed to the ledger.

use super::commentary::{CommentaryPicker, Remark};
use super::config::{GameConfig, GiveUpPolicy};
use super::context::PlayerContext;
use super::reward::{RewardResolver, Settlement};
use super::session::{GameMode, HintOutcome, Phase, Session};
use crate::core::GuessResult;
use crate::storage::{RewardCommit, RewardLedger, SessionKey, SessionRepository};
use log::{debug, info, warn};
use rand::Rng;

pub struct GameEngine<S: SessionRepository, L: RewardLedger, R: Rng> {
    config: GameConfig,
    resolver: RewardResolver,
    player: PlayerContext,
    repository: S,
    ledger: L,
    rng: R,
    session: Option<Session>,
    commentary: String,
    settlement: Option<Settlement>,
}

impl<S: SessionRepository, L: RewardLedger, R: Rng> GameEngine<S, L, R> {
    #[must_use]
    pub fn new(config: GameConfig, player: PlayerContext, repository: S, ledger: L, rng: R) -> Self {
        let resolver = config.resolver();
        Self {
            config,
            resolver,
            player,
            repository,
            ledger,
            rng,
            session: None,
            commentary: String::new(),
            settlement: None,
        }
    }

    /// Re-read the player's balance from the ledger
    ///
    /// An unreachable ledger is logged and shows as a zero balance.
    pub fn refresh_balance(&mut self) -> u64 {
        let balance = match self.ledger.balance_of(self.player.address()) {
            Ok(balance) => balance,
            Err(e) => {
                warn!("balance lookup for {} failed: {e:#}", self.player.address());
                0
            }
        };
        self.player.set_balance(balance);
        balance
    }

    /// Whether a resumable daily session is waiting for this player
    pub fn has_saved_session(&self, mode: GameMode) -> bool {
        mode.is_persistent()
            && matches!(
                self.repository
                    .load(&SessionKey::new(self.player.address(), mode)),
                Ok(Some(_))
            )
    }

    /// Begin a session, resuming a saved daily session when one exists
    pub fn start(&mut self, mode: GameMode) -> &Session {
        let session = if mode.is_persistent() {
            self.resume_or_new(mode)
        } else {
            Session::start(mode, self.config.rules(), &mut self.rng)
        };
        info!(
            "{mode} session started for {} at inning {}",
            self.player.address(),
            session.inning()
        );

        persist(&mut self.repository, self.player.address(), &session);
        self.commentary = CommentaryPicker::remark(Remark::Ready, &mut self.rng);
        self.settlement = None;
        self.session.insert(session)
    }

    fn resume_or_new(&mut self, mode: GameMode) -> Session {
        let key = SessionKey::new(self.player.address(), mode);

        let problem = match self.repository.load(&key) {
            Ok(Some(saved)) => match Session::restore(mode, saved, self.config.rules()) {
                Ok(session) => {
                    debug!("resumed {}", key.slot_name());
                    return session;
                }
                Err(e) => e.to_string(),
            },
            Ok(None) => return Session::start(mode, self.config.rules(), &mut self.rng),
            Err(e) => format!("{e:#}"),
        };

        warn!("discarding saved session {}: {problem}", key.slot_name());
        if let Err(e) = self.repository.delete(&key) {
            warn!("could not remove {}: {e:#}", key.slot_name());
        }

        Session::start(mode, self.config.rules(), &mut self.rng)
    }

    pub fn press_digit(&mut self, digit: u8) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.press_digit(digit))
    }

    pub fn backspace(&mut self) -> bool {
        self.session.as_mut().is_some_and(Session::backspace)
    }

    /// Submit the current guess
    ///
    /// Returns the scored guess, or `None` if nothing was submitted.
    pub fn swing(&mut self) -> Option<GuessResult> {
        let session = self.session.as_mut()?;
        let Some(result) = session.swing() else {
            if session.is_in_progress() {
                self.commentary = CommentaryPicker::remark(Remark::NeedThreeDigits, &mut self.rng);
            }
            return None;
        };
        debug!(
            "inning {}: {} scored {}",
            session.guesses().len(),
            result.guess,
            result.score
        );

        match session.phase() {
            Phase::InProgress => {
                self.commentary = CommentaryPicker::pick(result.score, &mut self.rng);
                persist(&mut self.repository, self.player.address(), session);
            }
            Phase::Over(_) if result.score.is_homerun() => {
                self.commentary = CommentaryPicker::pick(result.score, &mut self.rng);
                self.finish();
            }
            Phase::Over(_) | Phase::Abandoned => {
                self.commentary = CommentaryPicker::remark(Remark::Strikeout, &mut self.rng);
                self.finish();
            }
        }

        Some(result)
    }

    /// Ask for a hint, paying from the player's balance at settlement
    pub fn use_hint(&mut self) -> HintOutcome {
        let Some(session) = self.session.as_mut() else {
            return HintOutcome::Unavailable;
        };

        let outcome = session.use_hint(self.player.balance(), &mut self.rng);
        let remark = match outcome {
            HintOutcome::Revealed(digit) => {
                debug!("hint {} revealed {digit}", session.hints_used());
                persist(&mut self.repository, self.player.address(), session);
                Remark::HintRevealed(digit)
            }
            HintOutcome::NoMoreHints => Remark::NoMoreHints,
            HintOutcome::NotEnoughWgt => Remark::NotEnoughWgt,
            HintOutcome::Unavailable => return outcome,
        };

        self.commentary = CommentaryPicker::remark(remark, &mut self.rng);
        outcome
    }

    /// Walk away from the current session
    ///
    /// Under `GiveUpPolicy::KeepResumable` a daily session stays saved and is
    /// settled only when it is eventually finished, so nothing is returned.
    /// Otherwise the session is settled now (hint costs only) and returned.
    pub fn give_up(&mut self) -> Option<Settlement> {
        let session = self.session.as_mut()?;
        if !session.give_up() {
            return None;
        }

        let mode = session.mode();
        info!(
            "{} gave up {mode} session at inning {}",
            self.player.address(),
            session.inning()
        );

        if mode.is_persistent() && self.config.give_up_policy == GiveUpPolicy::KeepResumable {
            return None;
        }
        self.finish()
    }

    /// Drop the current session and go back to the menu
    pub fn leave(&mut self) {
        self.session = None;
        self.settlement = None;
        self.commentary.clear();
    }

    fn finish(&mut self) -> Option<Settlement> {
        let session = self.session.as_ref()?;
        let mode = session.mode();
        let mut settlement = self.resolver.settle(session, self.player.balance());
        info!(
            "{mode} session for {} ended: {:?} after {} innings, reward {}, hint charge {}",
            self.player.address(),
            settlement.result,
            settlement.final_inning,
            settlement.reward,
            settlement.hint_charge
        );

        if mode.is_persistent() {
            let key = SessionKey::new(self.player.address(), mode);
            if let Err(e) = self.repository.delete(&key) {
                warn!("could not remove {}: {e:#}", key.slot_name());
            }
        }

        if mode == GameMode::Daily {
            let commit = RewardCommit {
                player_address: self.player.address().to_string(),
                hints_used: settlement.hints_used,
                reward_amount: settlement.reward,
            };
            match self.ledger.commit(&commit) {
                Ok(balance) => {
                    debug!("ledger balance for {} is now {balance}", commit.player_address);
                    settlement.balance_after = balance;
                }
                Err(e) => warn!(
                    "reward commit for {} failed, not retrying: {e:#}",
                    commit.player_address
                ),
            }
        }

        self.player.set_balance(settlement.balance_after);
        self.settlement = Some(settlement.clone());
        Some(settlement)
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerContext {
        &self.player
    }

    #[must_use]
    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    /// Settlement of the most recently finished session
    #[must_use]
    pub const fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn resolver(&self) -> &RewardResolver {
        &self.resolver
    }

    #[must_use]
    pub const fn repository(&self) -> &S {
        &self.repository
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Take the collaborators back, e.g. to hand them to a new engine
    pub fn into_parts(self) -> (S, L, R) {
        (self.repository, self.ledger, self.rng)
    }
}

/// Save an in-progress daily session; failures only cost resumability
fn persist<S: SessionRepository>(repository: &mut S, player: &str, session: &Session) {
    if !session.mode().is_persistent() || !session.is_in_progress() {
        return;
    }

    let key = SessionKey::new(player, session.mode());
    if let Err(e) = repository.save(&key, &session.snapshot()) {
        warn!("could not save {}: {e:#}", key.slot_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Code;
    use crate::game::GameResult;
    use crate::storage::{MemoryLedger, MemoryRepository};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type TestEngine = GameEngine<MemoryRepository, MemoryLedger, StdRng>;

    const PLAYER: &str = "0xplayer";

    fn engine_with(config: GameConfig, ledger: MemoryLedger) -> TestEngine {
        let mut engine = GameEngine::new(
            config,
            PlayerContext::new(PLAYER, 0),
            MemoryRepository::new(),
            ledger,
            StdRng::seed_from_u64(21),
        );
        engine.refresh_balance();
        engine
    }

    fn engine() -> TestEngine {
        engine_with(
            GameConfig::default(),
            MemoryLedger::new(1).with_balance(PLAYER, 10),
        )
    }

    fn key(mode: GameMode) -> SessionKey {
        SessionKey::new(PLAYER, mode)
    }

    fn enter(engine: &mut TestEngine, code: Code) -> Option<GuessResult> {
        for &digit in code.digits() {
            engine.press_digit(digit);
        }
        engine.swing()
    }

    /// A code sharing no digits with the secret
    fn miss_for(secret: &Code) -> Code {
        let digits: Vec<u8> = (0..10).filter(|d| !secret.contains(*d)).take(3).collect();
        Code::new(&digits).unwrap()
    }

    fn secret_of(engine: &TestEngine) -> Code {
        *engine.session().unwrap().secret()
    }

    #[test]
    fn refresh_balance_reads_ledger() {
        let engine = engine();
        assert_eq!(engine.player().balance(), 10);
    }

    #[test]
    fn offline_ledger_shows_zero_balance() {
        let engine = engine_with(GameConfig::default(), MemoryLedger::offline(1));
        assert_eq!(engine.player().balance(), 0);
    }

    #[test]
    fn practice_is_never_saved() {
        let mut engine = engine();
        engine.start(GameMode::Practice);
        let secret = secret_of(&engine);
        enter(&mut engine, miss_for(&secret));

        assert!(engine.repository().is_empty());
        assert!(!engine.has_saved_session(GameMode::Practice));
    }

    #[test]
    fn daily_is_saved_on_start_and_after_each_swing() {
        let mut engine = engine();
        engine.start(GameMode::Daily);
        assert!(engine.has_saved_session(GameMode::Daily));

        let secret = secret_of(&engine);
        enter(&mut engine, miss_for(&secret));

        let saved = engine.repository().load(&key(GameMode::Daily)).unwrap().unwrap();
        assert_eq!(saved.secret_code, secret);
        assert_eq!(saved.guesses.len(), 1);
    }

    #[test]
    fn daily_resumes_saved_session() {
        let mut engine = engine();
        engine.start(GameMode::Daily);
        let secret = secret_of(&engine);
        enter(&mut engine, miss_for(&secret));
        engine.use_hint();
        let before = engine.session().unwrap().snapshot();

        let (repository, ledger, _) = engine.into_parts();
        let mut resumed = GameEngine::new(
            GameConfig::default(),
            PlayerContext::new(PLAYER, 0),
            repository,
            ledger,
            StdRng::seed_from_u64(99),
        );
        let session = resumed.start(GameMode::Daily);

        assert_eq!(session.snapshot(), before);
        assert_eq!(session.inning(), 2);
    }

    #[test]
    fn homerun_settles_commits_and_clears_save() {
        let mut engine = engine();
        engine.start(GameMode::Daily);
        let secret = secret_of(&engine);

        assert!(matches!(engine.use_hint(), HintOutcome::Revealed(_)));
        enter(&mut engine, miss_for(&secret));
        let result = enter(&mut engine, secret).unwrap();
        assert!(result.score.is_homerun());

        let settlement = engine.settlement().unwrap().clone();
        assert_eq!(settlement.result, Some(GameResult::Homerun));
        assert_eq!(settlement.final_inning, 2);
        assert_eq!(settlement.reward, 10);
        assert_eq!(settlement.hint_charge, 1);
        assert_eq!(settlement.balance_after, 19);
        assert_eq!(engine.player().balance(), 19);

        assert!(!engine.has_saved_session(GameMode::Daily));
        assert_eq!(
            engine.ledger().commits(),
            &[RewardCommit {
                player_address: PLAYER.to_string(),
                hints_used: 1,
                reward_amount: 10,
            }]
        );
    }

    #[test]
    fn strikeout_commits_zero_reward() {
        let mut engine = engine();
        engine.start(GameMode::Daily);
        let secret = secret_of(&engine);
        let miss = miss_for(&secret);

        for _ in 0..9 {
            enter(&mut engine, miss);
        }

        let session = engine.session().unwrap();
        assert_eq!(session.result(), Some(GameResult::Strikeout));
        assert_eq!(engine.settlement().unwrap().reward, 0);
        assert_eq!(engine.ledger().commits().len(), 1);
        assert!(!engine.has_saved_session(GameMode::Daily));
        assert_eq!(enter(&mut engine, secret), None);
    }

    #[test]
    fn practice_homerun_pays_nothing_and_commits_nothing() {
        let mut engine = engine();
        engine.start(GameMode::Practice);
        let secret = secret_of(&engine);
        enter(&mut engine, secret);

        let settlement = engine.settlement().unwrap();
        assert_eq!(settlement.reward, 0);
        assert_eq!(settlement.balance_after, 10);
        assert!(engine.ledger().commits().is_empty());
    }

    #[test]
    fn incomplete_swing_comments_and_does_nothing() {
        let mut engine = engine();
        engine.start(GameMode::Practice);
        engine.press_digit(1);
        assert_eq!(engine.swing(), None);
        assert_eq!(engine.commentary(), "You must select 3 numbers!");
        assert!(engine.session().unwrap().guesses().is_empty());
    }

    #[test]
    fn hint_refusals_comment_without_mutating() {
        let mut engine = engine_with(GameConfig::default(), MemoryLedger::new(1));
        engine.start(GameMode::Daily);

        assert_eq!(engine.use_hint(), HintOutcome::NotEnoughWgt);
        assert_eq!(engine.commentary(), "Not enough WGT!");
        assert_eq!(engine.session().unwrap().hints_used(), 0);
    }

    #[test]
    fn give_up_keeps_daily_resumable_by_default() {
        let mut engine = engine();
        engine.start(GameMode::Daily);
        let secret = secret_of(&engine);
        enter(&mut engine, miss_for(&secret));
        engine.use_hint();

        assert_eq!(engine.give_up(), None);
        assert!(engine.has_saved_session(GameMode::Daily));
        assert!(engine.ledger().commits().is_empty());
        assert_eq!(engine.player().balance(), 10);

        engine.leave();
        let session = engine.start(GameMode::Daily);
        assert_eq!(*session.secret(), secret);
        assert_eq!(session.hints_used(), 1);
    }

    #[test]
    fn give_up_discard_policy_settles_hint_costs() {
        let config = GameConfig {
            give_up_policy: GiveUpPolicy::Discard,
            ..GameConfig::default()
        };
        let mut engine = engine_with(config, MemoryLedger::new(1).with_balance(PLAYER, 10));
        engine.start(GameMode::Daily);
        engine.use_hint();
        engine.use_hint();

        let settlement = engine.give_up().unwrap();
        assert_eq!(settlement.result, None);
        assert_eq!(settlement.hint_charge, 2);
        assert_eq!(settlement.balance_after, 8);
        assert!(!engine.has_saved_session(GameMode::Daily));
        assert_eq!(engine.ledger().commits().len(), 1);
    }

    #[test]
    fn failed_commit_still_settles_locally() {
        let mut engine = engine_with(GameConfig::default(), MemoryLedger::offline(1));
        engine.start(GameMode::Daily);
        let secret = secret_of(&engine);
        enter(&mut engine, secret);

        let settlement = engine.settlement().unwrap();
        assert_eq!(settlement.reward, 100);
        assert_eq!(engine.player().balance(), 100);
        assert!(!engine.has_saved_session(GameMode::Daily));
    }

    #[test]
    fn corrupt_save_is_replaced() {
        let mut repository = MemoryRepository::new();
        repository.insert_raw(key(GameMode::Daily), "{\"secretCode\": [1, 1, 1]}");

        let mut engine = GameEngine::new(
            GameConfig::default(),
            PlayerContext::new(PLAYER, 0),
            repository,
            MemoryLedger::new(1),
            StdRng::seed_from_u64(3),
        );
        let session = engine.start(GameMode::Daily);
        assert!(session.guesses().is_empty());

        let saved = engine.repository().load(&key(GameMode::Daily)).unwrap();
        assert!(saved.is_some());
    }

    #[test]
    fn leave_clears_session() {
        let mut engine = engine();
        engine.start(GameMode::Practice);
        engine.leave();
        assert!(engine.session().is_none());
        assert!(!engine.press_digit(1));
        assert_eq!(engine.swing(), None);
        assert_eq!(engine.use_hint(), HintOutcome::Unavailable);
    }
}
