//! Rendering.
//!
//! The transcript is wrapped by hand instead of relying on `Paragraph`
//! wrapping, so the viewport can be bottom-anchored and scrolled by line.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Entry, Role};

/// Cursor glyph shown at the end of a reply that is still streaming.
pub const STREAM_CURSOR: &str = "▌";

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, areas[0]);
    render_transcript(frame, app, areas[1]);
    render_input(frame, app, areas[2]);
}

fn indicator(label: &str, ok: bool) -> Span<'static> {
    let color = if ok { Color::Green } else { Color::Red };
    Span::styled(format!("● {label}  "), Style::default().fg(color))
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let top = Line::from(vec![
        Span::styled(
            "Super Builder Chat  ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        indicator("bridge", app.health.bridge_reachable),
        indicator("superbuilder", app.health.superbuilder_connected),
        indicator("models", app.health.llm_ready),
        Span::raw(format!("session {:08}", app.session_id)),
    ]);
    let status = Line::from(Span::styled(
        app.health.message.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(vec![top, status]), area);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(2).max(10) as usize;
    let lines = wrap_transcript(&app.entries, width, app.streaming);

    let viewport = area.height.saturating_sub(2) as usize;
    let total = lines.len();
    let max_offset = total.saturating_sub(viewport);
    // The offset accumulates freely on key presses; clamp it here where the
    // line count is known.
    app.scroll_offset = app.scroll_offset.min(max_offset);

    let end = total - app.scroll_offset;
    let start = end.saturating_sub(viewport);
    let visible: Vec<Line> = lines[start..end].to_vec();

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.streaming {
        " waiting for reply... "
    } else {
        " message (Enter to send, Esc to quit) "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(app.input.as_str()).block(block), area);

    if !app.streaming {
        let x = area.x + 1 + app.input.width() as u16;
        let max_x = area.right().saturating_sub(2);
        frame.set_cursor_position((x.min(max_x), area.y + 1));
    }
}

/// Pre-wraps the transcript into display lines.
pub fn wrap_transcript(entries: &[Entry], width: usize, streaming: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i + 1 == entries.len();
        let (label, style) = match entry.role {
            Role::User => (
                "you",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant => (
                "assistant",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(label.to_string(), style)));

        let mut text = entry.text.clone();
        if streaming && is_last && entry.role == Role::Assistant {
            text.push_str(STREAM_CURSOR);
        }
        for paragraph in text.split('\n') {
            if paragraph.is_empty() {
                lines.push(Line::raw(""));
                continue;
            }
            for wrapped in textwrap::wrap(paragraph, width) {
                lines.push(Line::raw(wrapped.into_owned()));
            }
        }
        lines.push(Line::raw(""));
    }
    lines
}
