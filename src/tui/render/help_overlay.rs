use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Calendar", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2191}\u{2193}\u{2192}/hjkl", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " Enter/Space", "Select day", key_style, desc_style);
    add_binding(&mut lines, " [/p  ]/n", "Previous / next month", key_style, desc_style);
    add_binding(&mut lines, " t", "Jump to today", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Cycle calendar / note / todos", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Note", header_style)));
    add_binding(&mut lines, " e/Enter", "Edit note", key_style, desc_style);
    add_binding(&mut lines, " Ctrl-S", "Save note", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel editing", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Todos", header_style)));
    add_binding(&mut lines, " j/k", "Move", key_style, desc_style);
    add_binding(&mut lines, " Space/x", "Toggle done", key_style, desc_style);
    add_binding(&mut lines, " d", "Delete", key_style, desc_style);
    add_binding(&mut lines, " a", "Add (Enter adds, Esc stops)", key_style, desc_style);
    lines.push(Line::from(""));

    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
