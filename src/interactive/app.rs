//! TUI application state and logic

use crate::game::{GameEngine, GameMode, GameResult, HintOutcome, Settlement};
use crate::storage::{RewardLedger, SessionRepository};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rand::Rng;
use std::io;

/// Application state
pub struct App<S: SessionRepository, L: RewardLedger, R: Rng> {
    pub engine: GameEngine<S, L, R>,
    pub screen: Screen,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    /// Whether a daily save is waiting, checked when the menu is entered
    pub daily_saved: bool,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    ConfirmGiveUp,
    Result,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Games finished since the app started
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub homeruns: usize,
    /// Index is the inning the homerun came in
    pub inning_distribution: Vec<usize>,
    pub wgt_earned: u64,
}

impl<S: SessionRepository, L: RewardLedger, R: Rng> App<S, L, R> {
    #[must_use]
    pub fn new(mut engine: GameEngine<S, L, R>) -> Self {
        engine.refresh_balance();
        let innings = engine.config().max_guesses;
        let daily_saved = engine.has_saved_session(GameMode::Daily);

        let mut app = Self {
            engine,
            screen: Screen::Menu,
            messages: Vec::new(),
            stats: Statistics {
                inning_distribution: vec![0; innings + 1],
                ..Statistics::default()
            },
            daily_saved,
            should_quit: false,
        };
        app.add_message(
            "Welcome to WLD Baseball! Crack the 3-digit code within 9 innings.",
            MessageStyle::Info,
        );
        app
    }

    pub fn start_game(&mut self, mode: GameMode) {
        let resumed = self.engine.start(mode).guesses().len();
        self.screen = Screen::Playing;
        self.messages.clear();

        if resumed > 0 {
            self.add_message(
                &format!("Resumed today's game after {resumed} innings."),
                MessageStyle::Info,
            );
        } else {
            self.add_message(&format!("{} started. Play ball!", mode.title()), MessageStyle::Info);
        }
    }

    pub fn press_digit(&mut self, digit: u8) {
        let Some(session) = self.engine.session() else {
            return;
        };
        if !session.is_digit_available(digit) {
            let reason = if session.revealed_hints().contains(&digit) {
                format!("{digit} is not in the secret code.")
            } else {
                format!("{digit} is already in your guess.")
            };
            self.add_message(&reason, MessageStyle::Error);
            return;
        }
        self.engine.press_digit(digit);
    }

    pub fn backspace(&mut self) {
        self.engine.backspace();
    }

    pub fn submit(&mut self) {
        if self.engine.swing().is_none() {
            let text = self.engine.commentary().to_string();
            self.add_message(&text, MessageStyle::Error);
            return;
        }
        if let Some(settlement) = self.engine.settlement().cloned() {
            self.record(&settlement);
            self.screen = Screen::Result;
        }
    }

    pub fn hint(&mut self) {
        let style = match self.engine.use_hint() {
            HintOutcome::Revealed(_) => MessageStyle::Success,
            HintOutcome::NoMoreHints | HintOutcome::NotEnoughWgt => MessageStyle::Error,
            HintOutcome::Unavailable => {
                self.add_message(
                    "Hints are only available in the Daily Challenge.",
                    MessageStyle::Error,
                );
                return;
            }
        };
        let text = self.engine.commentary().to_string();
        self.add_message(&text, style);
    }

    pub fn request_give_up(&mut self) {
        if self.engine.session().is_some_and(|s| s.is_in_progress()) {
            self.screen = Screen::ConfirmGiveUp;
        }
    }

    pub fn confirm_give_up(&mut self) {
        if let Some(settlement) = self.engine.give_up() {
            self.record(&settlement);
            self.screen = Screen::Result;
        } else {
            self.back_to_menu();
            self.add_message(
                "Game left. Today's progress is kept, come back to finish it.",
                MessageStyle::Info,
            );
        }
    }

    pub fn back_to_menu(&mut self) {
        self.engine.leave();
        self.engine.refresh_balance();
        self.daily_saved = self.engine.has_saved_session(GameMode::Daily);
        self.screen = Screen::Menu;
    }

    fn record(&mut self, settlement: &Settlement) {
        self.stats.total_games += 1;
        self.stats.wgt_earned += settlement.reward;

        match settlement.result {
            Some(GameResult::Homerun) => {
                self.stats.homeruns += 1;
                if let Some(slot) = self
                    .stats
                    .inning_distribution
                    .get_mut(settlement.final_inning)
                {
                    *slot += 1;
                }
                self.add_message(
                    &format!("HOMERUN in inning {}!", settlement.final_inning),
                    MessageStyle::Success,
                );
            }
            Some(GameResult::Strikeout) => {
                self.add_message("Strikeout. Better luck next game!", MessageStyle::Error);
            }
            None => self.add_message("Game abandoned.", MessageStyle::Info),
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Apply one key press to the current screen
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => match key.code {
                KeyCode::Char('d' | '1') => self.start_game(GameMode::Daily),
                KeyCode::Char('p' | '2') => self.start_game(GameMode::Practice),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Screen::Playing => match key.code {
                KeyCode::Char(c @ '0'..='9') => {
                    if let Some(digit) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        self.press_digit(digit);
                    }
                }
                KeyCode::Backspace => self.backspace(),
                KeyCode::Enter => self.submit(),
                KeyCode::Char('h') => self.hint(),
                KeyCode::Esc => self.request_give_up(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Screen::ConfirmGiveUp => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_give_up(),
                KeyCode::Char('n') | KeyCode::Esc => self.screen = Screen::Playing,
                _ => {}
            },
            Screen::Result => match key.code {
                KeyCode::Char('n') => {
                    let mode = self
                        .engine
                        .settlement()
                        .map_or(GameMode::Practice, |s| s.mode);
                    self.start_game(mode);
                }
                KeyCode::Char('m') | KeyCode::Enter | KeyCode::Esc => self.back_to_menu(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S, L, R>(app: App<S, L, R>) -> Result<()>
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B, S, L, R>(terminal: &mut Terminal<B>, mut app: App<S, L, R>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
