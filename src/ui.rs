//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::browser::Browser;
use crate::config::Settings;
use crate::session::{Session, SessionState};

const HELP_TEXT: &str = "\
j/k or arrows   move
gg / G          top / bottom
enter / l       open dir, play file
h / backspace   parent dir
space / p       pause, resume
r               toggle loop
?               toggle this help
q               quit";

fn controls_text() -> &'static str {
    "[j/k] move | [enter/l] open/play | [h] up | [space/p] pause | [r] loop | [?] help | [q] quit"
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    browser: &Browser,
    session: &Session,
    settings: &Settings,
    show_help: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" adagio ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, session, chunks[1]);
    draw_file_list(frame, browser, chunks[2]);

    let footer = Paragraph::new(controls_text())
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

    // Overlay help popup (keeps the list visible under it)
    if show_help {
        let popup_area = centered_rect_sized(44, 10, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let help = Paragraph::new(HELP_TEXT).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" help (? closes) ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        );
        frame.render_widget(help, popup_area);
    }
}

fn draw_now_playing(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" now playing ")
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let status = if session.loading() {
        "Loading...".to_string()
    } else if session.title().is_empty() {
        "Nothing playing. Pick a track and press enter.".to_string()
    } else {
        let state = match session.state() {
            SessionState::Finished => "Finished",
            _ if session.paused() => "Paused",
            _ => "Playing",
        };
        let mut parts = vec![format!("{state}: {}", session.title())];
        if session.looping() {
            parts.push("LOOP".to_string());
        }
        parts.join(" • ")
    };
    frame.render_widget(Paragraph::new(status), rows[0]);

    if !session.title().is_empty() {
        let label = format!(
            "{} / {}",
            format_mmss(session.elapsed()),
            format_mmss(session.total())
        );
        let gauge = Gauge::default()
            .ratio(session.percent().clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, rows[1]);
    }

    if let Some(err) = session.last_error() {
        let line = Paragraph::new(format!("Error: {err}"))
            .red()
            .wrap(Wrap { trim: true });
        frame.render_widget(line, rows[2]);
    }
}

fn draw_file_list(frame: &mut Frame, browser: &Browser, area: Rect) {
    let entries = browser.entries();
    let total = entries.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel = browser.selected().min(total.saturating_sub(1));

    // Center the selected item when possible by creating a visible window.
    // Only build ListItems for the visible window to keep large
    // directories cheap.
    let (start, end, selected_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel)
    } else {
        let half = list_height / 2;
        let mut start = sel.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel - start)
    };

    let visible_items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name))
            } else {
                ListItem::new(entry.name.as_str())
            }
        })
        .collect();

    let list = List::new(visible_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", browser.cwd().display())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
