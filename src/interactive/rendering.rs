//! TUI rendering with ratatui
//!
//! Menu, ballpark and result screens for the game.

use super::app::{App, MessageStyle, Screen};
use crate::core::{DIGIT_COUNT, Score};
use crate::game::{GameResult, GiveUpPolicy, Session};
use crate::output::formatters::guess_slots;
use crate::storage::{RewardLedger, SessionRepository};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S, L, R>(f: &mut Frame, app: &App<S, L, R>)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_header(f, app, chunks[0]);

    match (app.screen, app.engine.session()) {
        (Screen::Playing | Screen::ConfirmGiveUp, Some(session)) => {
            render_game(f, app, session, chunks[1]);
            if app.screen == Screen::ConfirmGiveUp {
                render_give_up_popup(f, session, app.engine.config().give_up_policy, area);
            }
        }
        (Screen::Result, Some(session)) => render_result(f, app, session, chunks[1]),
        _ => render_menu(f, app, chunks[1]),
    }

    render_status(f, app, chunks[2]);
}

fn render_header<S, L, R>(f: &mut Frame, app: &App<S, L, R>, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let title = app.engine.session().map_or_else(
        || "⚾ WLD BASEBALL".to_string(),
        |s| format!("⚾ WLD BASEBALL - {}", s.mode().title()),
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            app.engine.player().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_menu<S, L, R>(f: &mut Frame, app: &App<S, L, R>, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let daily_label = if app.daily_saved {
        "Resume today's game"
    } else {
        "Play for WGT rewards"
    };
    let rewards = app
        .engine
        .resolver()
        .tables()
        .table(app.engine.resolver().schedule())
        .entries()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" / ");

    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  [D] ", key),
            Span::raw("Daily Challenge  "),
            Span::styled(daily_label, Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  [P] ", key),
            Span::raw("Practice Mode    "),
            Span::styled("No rewards, no hints", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from("  Guess the 3-digit code (distinct digits) within 9 innings."),
        Line::from("  Hit: right digit, right spot. Foul: right digit, wrong spot."),
        Line::from("  Strike: nothing matched."),
        Line::from(""),
        Line::from(format!("  Homerun rewards by inning: {rewards}")),
    ];

    let menu = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Main Menu ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(menu, chunks[0]);

    render_messages(f, app, chunks[1]);
}

fn render_game<S, L, R>(f: &mut Frame, app: &App<S, L, R>, session: &Session, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(main_chunks[0]);
    render_inning_gauge(f, session, left[0]);
    render_scoreboard(f, session, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Commentary
            Constraint::Length(5), // Guess + keypad
            Constraint::Length(3), // Hints
            Constraint::Min(3),    // Messages
        ])
        .split(main_chunks[1]);
    render_commentary(f, app.engine.commentary(), right[0]);
    render_keypad(f, session, right[1]);
    render_hints(f, app, session, right[2]);
    render_messages(f, app, right[3]);
}

fn render_inning_gauge(f: &mut Frame, session: &Session, area: Rect) {
    let max = session.rules().max_guesses;
    let played = session.guesses().len();
    let percent = u16::try_from(played * 100 / max.max(1)).unwrap_or(100);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Innings ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent.min(100))
        .label(format!("Inning {} of {max}", session.inning()));
    f.render_widget(gauge, area);
}

fn score_color(score: Score) -> Color {
    if score.is_homerun() {
        Color::Green
    } else if score.is_strike() {
        Color::Red
    } else if score.hits > 0 {
        Color::LightGreen
    } else {
        Color::Yellow
    }
}

fn render_scoreboard(f: &mut Frame, session: &Session, area: Rect) {
    let items: Vec<ListItem> = session
        .guesses()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    result.guess.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    result.score.to_string(),
                    Style::default().fg(score_color(result.score)),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Scoreboard ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_commentary(f: &mut Frame, commentary: &str, area: Rect) {
    let paragraph = Paragraph::new(commentary.to_string())
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Commentary ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Magenta)),
        );
    f.render_widget(paragraph, area);
}

fn render_keypad(f: &mut Frame, session: &Session, area: Rect) {
    let keys: Vec<Span> = (0..DIGIT_COUNT)
        .flat_map(|digit| {
            let style = if session.revealed_hints().contains(&digit) {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if session.current_guess().contains(digit) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {digit} "), style), Span::raw(" ")]
        })
        .collect();

    let content = vec![
        Line::from(Span::styled(
            guess_slots(session.current_guess()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(keys),
    ];

    let keypad = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Your Swing ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(keypad, area);
}

fn render_hints<S, L, R>(f: &mut Frame, app: &App<S, L, R>, session: &Session, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let text = if session.mode().allows_hints() {
        let rules = session.rules();
        let mut text = format!(
            "Hints {}/{} ({} WGT each, balance {})",
            session.hints_used(),
            rules.max_hints,
            rules.hint_cost,
            app.engine.player().balance()
        );
        if !session.revealed_hints().is_empty() {
            let digits: Vec<String> = session
                .revealed_hints()
                .iter()
                .map(u8::to_string)
                .collect();
            text.push_str(&format!(" | out: {}", digits.join(", ")));
        }
        text
    } else {
        "No hints in Practice Mode".to_string()
    };

    let hints = Paragraph::new(text).block(
        Block::default()
            .title(" Hints ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(hints, area);
}

fn render_messages<S, L, R>(f: &mut Frame, app: &App<S, L, R>, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_give_up_popup(f: &mut Frame, session: &Session, policy: GiveUpPolicy, area: Rect) {
    let popup = centered_rect(50, 30, area);
    let note = match (session.mode().is_persistent(), policy) {
        (true, GiveUpPolicy::KeepResumable) => "Today's progress stays saved so you can come back.",
        (true, GiveUpPolicy::Discard) => "Today's save is deleted and hints are charged.",
        (false, _) => "This practice game will end.",
    };

    let content = vec![
        Line::from(Span::styled(
            "Give up this game?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(note),
        Line::from(""),
        Line::from("[Y] Give up    [N] Keep playing"),
    ];

    let dialog = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Give Up ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_result<S, L, R>(f: &mut Frame, app: &App<S, L, R>, session: &Session, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (headline, color) = match session.result() {
        Some(GameResult::Homerun) => ("HOMERUN!", Color::Green),
        Some(GameResult::Strikeout) => ("STRIKEOUT", Color::Red),
        None => ("GAME OVER", Color::Yellow),
    };

    let mut content = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Secret code: "),
            Span::styled(
                session.secret().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Innings played: {}", session.guesses().len())),
    ];

    if let Some(settlement) = app.engine.settlement() {
        content.push(Line::from(Span::styled(
            format!("Reward: +{} WGT", settlement.reward),
            Style::default().fg(Color::Green),
        )));
        if settlement.hints_used > 0 {
            content.push(Line::from(Span::styled(
                format!(
                    "Hints: {} used, -{} WGT",
                    settlement.hints_used, settlement.hint_charge
                ),
                Style::default().fg(Color::Red),
            )));
        }
        content.push(Line::from(format!(
            "Balance: {} → {}",
            settlement.balance_before, settlement.balance_after
        )));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        app.engine.commentary().to_string(),
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let summary = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Result ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(color)),
    );
    f.render_widget(summary, chunks[0]);

    render_scoreboard(f, session, chunks[1]);
}

fn render_status<S, L, R>(f: &mut Frame, app: &App<S, L, R>, area: Rect)
where
    S: SessionRepository,
    L: RewardLedger,
    R: Rng,
{
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let stats_text = format!(
        "Games: {} | Homeruns: {} | Earned: {} WGT",
        app.stats.total_games, app.stats.homeruns, app.stats.wgt_earned
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let help_text = match app.screen {
        Screen::Menu => "d: Daily | p: Practice | q: Quit",
        Screen::Playing => "0-9: Pick | Backspace | Enter: Swing | h: Hint | Esc: Give up | q: Quit",
        Screen::ConfirmGiveUp => "y: Give up | n: Keep playing",
        Screen::Result => "n: Play again | m: Menu | q: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

/// Rectangle of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
