use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (label, hint) = match app.mode {
        Mode::Navigate => {
            let hint = match app.focus {
                Focus::Calendar => "\u{2190}\u{2191}\u{2193}\u{2192} move  Enter select  [ ] month  t today  Tab panel  ? help",
                Focus::Note => "e edit note  Tab todos  Esc calendar",
                Focus::Todos => "j/k move  x toggle  d delete  a add  Esc calendar",
            };
            (None, hint)
        }
        Mode::EditNote => (Some("-- NOTE --"), "Ctrl-S save  Esc cancel"),
        Mode::EditTodo => (Some("-- TODO --"), "Enter add  Esc done"),
    };

    let mut spans: Vec<Span> = Vec::new();
    if let Some(label) = label {
        spans.push(Span::styled(
            label,
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    if let Some(ref message) = app.status_message {
        if !spans.is_empty() {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }

    if app.show_key_hints {
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
