pub mod calendar_view;
pub mod help_overlay;
pub mod helpers;
pub mod side_panel;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Width of the calendar pane: 7 cells of 5 columns plus the border
pub const CALENDAR_WIDTH: u16 = 7 * calendar_view::CELL_WIDTH as u16 + 2;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CALENDAR_WIDTH), Constraint::Min(10)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    calendar_view::render_calendar(frame, app, content[0]);
    side_panel::render_side_panel(frame, app, content[1]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// `‹ 2024年 3月 ›` centered over the calendar pane
fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let bg = app.theme.background;
    let title = app.session.shown.header();
    let text = format!("\u{2039} {} \u{203A}", title);
    let cells = (CALENDAR_WIDTH as usize).min(area.width as usize);
    let centered = crate::util::unicode::center_to_width(&text, cells);
    let line = Line::from(Span::styled(
        centered,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
