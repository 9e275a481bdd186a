//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Each
//! track row shows its toggle icon, title, progress bar and time label,
//! all read straight from the player state machines.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlaylistController, TrackPlayer, TrackState};

const TITLE_WIDTH: usize = 32;

/// Icon for one row. Play glyph when not playing, pause glyph while
/// playing; warning and cross mark the two permanently inert states.
fn state_icon(state: TrackState) -> &'static str {
    match state {
        TrackState::Playing => "⏸",
        TrackState::Disabled => "⚠",
        TrackState::Errored => "✖",
        TrackState::Idle | TrackState::Paused | TrackState::Ended => "▶",
    }
}

/// Parse a `#rrggbb` accent string into a terminal color.
fn parse_accent(accent: &str) -> Option<Color> {
    let hex = accent.strip_prefix('#').unwrap_or(accent);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Render a textual progress bar with a fractional fill (0.0..=1.0).
fn progress_bar(fraction: f64, width: u16) -> String {
    let width = width as usize;
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}

fn pad_title(title: &str) -> String {
    let mut out: String = title.chars().take(TITLE_WIDTH).collect();
    while out.chars().count() < TITLE_WIDTH {
        out.push(' ');
    }
    out
}

fn track_row(player: &TrackPlayer, ui: &UiSettings) -> Line<'static> {
    let state = player.state();
    let accent = player
        .descriptor()
        .accent
        .as_deref()
        .and_then(parse_accent)
        .unwrap_or(Color::Cyan);

    let base = match state {
        TrackState::Disabled => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        TrackState::Errored => Style::default().fg(Color::Red),
        TrackState::Playing => Style::default().add_modifier(Modifier::BOLD),
        _ => Style::default(),
    };

    let icon_style = match state {
        TrackState::Disabled => Style::default().fg(Color::Yellow),
        TrackState::Errored => Style::default().fg(Color::Red),
        _ => base,
    };

    let mut spans = vec![
        Span::styled(format!("{} ", state_icon(state)), icon_style),
        Span::styled(pad_title(&player.descriptor().display), base),
        Span::styled(
            format!(" {} ", progress_bar(player.progress(), ui.progress_width)),
            base.fg(accent),
        ),
        Span::styled(format!("{:>7}", player.time_label()), base),
    ];

    if let Some(genre) = player.descriptor().genre.as_deref() {
        spans.push(Span::styled(
            format!("  [{}]", genre),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn status_text(controller: &PlaylistController) -> String {
    let mut parts: Vec<String> = Vec::new();

    match controller.active() {
        Some(i) => {
            if let Some(p) = controller.player(i) {
                parts.push(format!(
                    "Now playing: {} [{}]",
                    p.descriptor().display,
                    p.time_label()
                ));
            }
        }
        None => parts.push("Stopped".to_string()),
    }

    let playable = controller
        .players()
        .iter()
        .filter(|p| p.can_play())
        .count();
    parts.push(format!("Tracks: {}/{}", playable, controller.len()));

    if controller.auto_advance() {
        parts.push("Auto-advance: ON".to_string());
    } else {
        parts.push("Auto-advance: OFF".to_string());
    }

    parts.join(" • ")
}

fn controls_text(seek_seconds: u64) -> String {
    format!(
        "[j/k] up/down | [enter/space] play/pause | [h/l] seek -/+{}s | [g/G] top/bottom | [a] auto-advance | [q] quit",
        seek_seconds
    )
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    controller: &PlaylistController,
    selected: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" showreel ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(controller))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Track list
    let items: Vec<ListItem> = controller
        .players()
        .iter()
        .map(|p| ListItem::new(track_row(p, ui_settings)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if !controller.is_empty() {
        state.select(Some(selected.min(controller.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accent_handles_hex_and_garbage() {
        assert_eq!(parse_accent("#7c3aed"), Some(Color::Rgb(0x7c, 0x3a, 0xed)));
        assert_eq!(parse_accent("ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_accent("#fff"), None);
        assert_eq!(parse_accent("notacolor"), None);
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.0, 4), "████");
        // Out-of-range fractions clamp instead of overflowing the bar.
        assert_eq!(progress_bar(7.0, 4), "████");
        assert_eq!(progress_bar(-1.0, 4), "░░░░");
    }
}
