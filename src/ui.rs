use keyrace::events::SoundCue;
use keyrace::language::{rank_label, result_message, result_title};
use keyrace::race::Phase;
use keyrace::typing_policy::match_len;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase {
            Phase::Idle => render_lobby(self, area, buf),
            Phase::Racing => render_race(self, area, buf),
            Phase::Finished => render_results(self, area, buf),
        }
    }
}

fn render_lobby(app: &App, area: Rect, buf: &mut Buffer) {
    let placeholder = match app.language.as_str() {
        "es" => "¡Presiona Enter para correr!",
        _ => "Press Enter to race!",
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "KEYRACE",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            placeholder,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("language: {}", app.language),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "tab: switch language · esc: quit",
            Style::default()
                .add_modifier(Modifier::DIM)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    if let Some(notice) = &app.notice {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let vertical_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_pad),
            Constraint::Min(lines.len() as u16),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

fn render_race(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_lines =
        ((session.target.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);
    let track_lines = session.racers.len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(prompt_lines + 1),
            Constraint::Length(track_lines + 1),
            Constraint::Min(1),
        ])
        .split(area);

    Paragraph::new(Line::from(status_spans(app)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Line::from(prompt_spans(session)))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    render_track(session, chunks[2], buf);
}

fn status_spans(app: &App) -> Vec<Span<'static>> {
    let session = &app.session;
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut spans = vec![Span::styled(
        format!(
            "{} wpm · {}s · streak {}",
            session.wpm.value(),
            session.elapsed_secs() as u64,
            session.streak
        ),
        dim,
    )];

    if app.sound {
        if let Some(cue) = app.last_cue {
            let glyph = match cue {
                SoundCue::Click => "·",
                SoundCue::Error => "✗",
                SoundCue::Stall => "⌧",
                SoundCue::Win => "♪",
                SoundCue::Lose => "♭",
            };
            spans.push(Span::styled(format!("  {glyph}"), dim));
        }
    }

    spans
}

fn prompt_spans(session: &keyrace::race::RaceSession) -> Vec<Span<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let green_bold = bold.fg(Color::Green);
    let red_bold = bold.fg(Color::Red);
    let dim_bold = bold.add_modifier(Modifier::DIM);
    let cursor_style = dim_bold.add_modifier(Modifier::UNDERLINED);

    let target: Vec<char> = session.target.chars().collect();
    let typed: Vec<char> = session.typed.chars().collect();
    let matched = match_len(&session.typed, &session.target);

    let mut spans = Vec::with_capacity(target.len() + 2);

    for (idx, c) in typed.iter().enumerate() {
        if idx < matched {
            spans.push(Span::styled(c.to_string(), green_bold));
        } else {
            spans.push(Span::styled(
                match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold,
            ));
        }
    }

    if typed.len() < target.len() {
        spans.push(Span::styled(target[typed.len()].to_string(), cursor_style));
        let rest: String = target[typed.len() + 1..].iter().collect();
        spans.push(Span::styled(rest, dim_bold));
    }

    spans
}

fn render_track(session: &keyrace::race::RaceSession, area: Rect, buf: &mut Buffer) {
    let lanes = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); session.racers.len()])
        .split(area);

    for (idx, racer) in session.racers.iter().enumerate() {
        let name = if racer.is_player() {
            "you".to_string()
        } else {
            format!("rival {idx}")
        };
        let label = match racer.finish_order {
            Some(rank) => format!("{name} · {}", rank_label(&session.language, rank)),
            None => format!("{name} · {:.0}%", racer.ratio() * 100.0),
        };
        let style = if racer.is_player() {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::Blue)
        };

        // Cars park just short of the right edge of the track.
        Gauge::default()
            .gauge_style(style)
            .ratio(racer.ratio().min(0.9))
            .label(label)
            .render(lanes[idx], buf);
    }
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let (title, message) = match session.player_rank() {
        Some(rank) => (
            result_title(&session.language, rank),
            result_message(&session.language, session.wpm.value()),
        ),
        None => (
            "Race aborted".to_string(),
            format!("Speed: {} WPM", session.wpm.value()),
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(message)),
        Line::default(),
    ];

    for (position, (idx, racer)) in session.standings().into_iter().enumerate() {
        let name = if racer.is_player() {
            "you".to_string()
        } else {
            format!("rival {idx}")
        };
        let label = match racer.finish_order {
            Some(rank) => rank_label(&session.language, rank),
            None => "--".to_string(),
        };
        let style = if racer.is_player() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        lines.push(Line::from(Span::styled(
            format!("{}. {label:>4}  {name}", position + 1),
            style,
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "enter: race again · esc: quit",
        Style::default()
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::ITALIC),
    )));

    let vertical_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_pad),
            Constraint::Min(lines.len() as u16),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}
