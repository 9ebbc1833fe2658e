//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::KeyValueStore;
use crate::features::focus::{format_duration, format_mmss, progress, Mode, Pending};
use crate::tui::app::App;

const HELP_TEXT: &str = "s/space:start | p:pause | r:reset | 1-3:work | 4-6:break | w/b:custom | \
Enter:play | j/k:nav | m:mode | x:stop | H:clear | ?:help | q:quit";

const HELP_LINES: [(&str, &str); 14] = [
    ("s / space", "start (space toggles pause)"),
    ("p", "pause"),
    ("r", "reset the current mode"),
    ("1 2 3", "work 15 / 25 / 45 min"),
    ("4 5 6", "break 5 / 10 / 15 min"),
    ("w / b", "custom work / break minutes"),
    ("y / n", "answer the break-over prompt"),
    ("Enter", "dismiss notice, or play track"),
    ("j / k", "move in the playlist"),
    ("m", "sequence / loop / random"),
    ("x", "stop music"),
    ("H", "clear history"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Accent color for a mode.
#[must_use]
pub const fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Timer
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Stats, history, playlist
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(body[0]);

    render_stats(frame, app, left[0]);
    render_history(frame, app, left[1]);
    render_playlist(frame, app, body[1]);
    render_status_bar(frame, app, chunks[4]);

    render_overlays(frame, app);
}

fn render_header<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let controller = app.controller();
    let settings = controller.settings();
    let title = format!(
        " 🍅 pomo  work {}m · break {}m · desktop notifications {} ",
        settings.work_minutes,
        settings.break_minutes,
        controller.notifier().permission()
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_timer<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let controller = app.controller();
    let session = controller.session();
    let color = mode_color(session.mode);

    let state = match controller.pending() {
        Some(Pending::AutoStart { remaining }) => {
            format!("starting in {:.1}s (p to cancel)", remaining.as_secs_f64())
        }
        Some(Pending::Confirm { remaining }) => {
            format!("start working? y/n ({}s)", remaining.as_secs())
        }
        None if session.running => "▶ running".to_string(),
        None => "⏸ paused".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(
            session.mode.display_name(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_mmss(session.remaining_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(state, Style::default().fg(Color::DarkGray))),
    ];

    let timer = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(timer, area);
}

fn render_progress<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let controller = app.controller();
    let ratio = progress(
        controller.session().remaining_seconds,
        controller.full_seconds(),
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(mode_color(controller.session().mode)))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_stats<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let stats = app.controller().stats();
    let lines = vec![
        Line::from(format!("Pomodoros:  {}", stats.completed_count)),
        Line::from(format!("Work:       {}", format_duration(stats.total_work_seconds))),
        Line::from(format!("Break:      {}", format_duration(stats.total_break_seconds))),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Stats ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let history = app.controller().history();
    let items: Vec<ListItem<'_>> = if history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No completed sessions yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        history
            .iter()
            .map(|entry| ListItem::new(entry.to_line()))
            .collect()
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" History "));
    frame.render_widget(list, area);
}

fn render_playlist<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let playlist = app.playlist();
    let title = format!(" Music · {} ", playlist.mode());

    let items: Vec<ListItem<'_>> = if playlist.is_empty() {
        vec![ListItem::new(Span::styled(
            "No tracks",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let playing = playlist.current() == Some(i);
                let marker = if playing { "♪ " } else { "  " };
                let style = if playing {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(track.name.as_str(), style),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !playlist.is_empty() {
        state.select(Some(playlist.selected()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP_TEXT);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

fn render_overlays<S: KeyValueStore>(frame: &mut Frame<'_>, app: &App<S>) {
    let notifier = app.controller().notifier();

    if let Some(input) = app.input() {
        let text = vec![
            Line::from(format!("{} minutes: {}▏", input.kind, input.buffer)),
            Line::from(Span::styled(
                "Enter to apply, Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        render_popup(frame, " Custom duration ", text, Color::Yellow);
    } else if let Some(prompt) = notifier.prompt() {
        let text = vec![
            Line::from(prompt.message.as_str()),
            Line::from(Span::styled(
                "y: start working   n: not now",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        render_popup(frame, &format!(" {} ", prompt.title), text, Color::Green);
    } else if let Some(notice) = notifier.current_notice() {
        let text = vec![
            Line::from(notice.message.as_str()),
            Line::from(Span::styled(
                "Enter to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        render_popup(frame, &format!(" {} ", notice.title), text, Color::Cyan);
    }

    if app.show_help {
        let lines: Vec<Line<'_>> = HELP_LINES
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{key:>10}  "), Style::default().fg(Color::Yellow)),
                    Span::raw(*what),
                ])
            })
            .collect();
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys ")),
            area,
        );
    }
}

fn render_popup(frame: &mut Frame<'_>, title: &str, text: Vec<Line<'_>>, color: Color) {
    let area = centered_rect(50, 20, frame.area());
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Rectangle of the given percentage size centered in `area`.
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
