use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::grid::{self, Cell};
use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Columns per day cell: `[12•]`
pub const CELL_WIDTH: usize = 5;

const MARKER: char = '\u{2022}';

/// Render the month grid: weekday labels, then one row per week
pub fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let border_color = if app.focus == Focus::Calendar {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));

    let mut lines: Vec<Line> = Vec::new();

    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    lines.push(Line::from(
        grid::weekday_labels()
            .iter()
            .map(|label| Span::styled(unicode::center_to_width(label, CELL_WIDTH), label_style))
            .collect::<Vec<_>>(),
    ));

    let cursor = app.cursor_index();
    for (week, row) in grid::rows(&app.cells).enumerate() {
        let spans: Vec<Span> = row
            .iter()
            .enumerate()
            .flat_map(|(col, cell)| {
                let is_cursor = cursor == Some(week * 7 + col);
                cell_spans(app, cell, is_cursor)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The spans of one day cell: bracket, day number, marker, bracket
fn cell_spans<'a>(app: &App, cell: &Cell, is_cursor: bool) -> Vec<Span<'a>> {
    let theme = &app.theme;
    let bg = if cell.is_selected {
        theme.selection_bg
    } else {
        theme.background
    };

    let mut day_style = Style::default().bg(bg);
    day_style = if !cell.is_current_month {
        day_style.fg(theme.dim)
    } else if cell.is_today {
        day_style.fg(theme.today).add_modifier(Modifier::BOLD)
    } else if cell.is_selected {
        day_style.fg(theme.text_bright)
    } else {
        day_style.fg(theme.text)
    };

    let (open, close) = if is_cursor { ("[", "]") } else { (" ", " ") };
    let bracket_style = Style::default().fg(theme.cursor).bg(bg);
    let marker = if cell.has_data { MARKER } else { ' ' };
    let marker_style = Style::default().fg(theme.marker).bg(bg);

    vec![
        Span::styled(open, bracket_style),
        Span::styled(format!("{:>2}", cell.day), day_style),
        Span::styled(marker.to_string(), marker_style),
        Span::styled(close, bracket_style),
    ]
}
