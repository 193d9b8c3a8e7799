use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::format_display_date;
use crate::tui::app::{App, Focus, Mode};
use crate::util::unicode;

use super::helpers::{checkbox, spans_width, with_cursor_glyph};

/// Render the side panel for the selected day: title, note, todo checklist
pub fn render_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let focused = matches!(app.focus, Focus::Note | Focus::Todos);
    let border_color = if focused { theme.highlight } else { theme.dim };

    let title = match app.session.selected() {
        Some(key) => format!(" {} ", format_display_date(&key)),
        None => " 未选择日期 ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));

    let inner_width = area.width.saturating_sub(2) as usize;
    let dim = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    if app.session.selected().is_none() {
        lines.push(Line::from(Span::styled("在日历中选择一天 (Enter)", dim)));
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    // Note
    lines.push(section_header(app, "备注", Focus::Note, None));
    let text_style = Style::default().fg(theme.text).bg(bg);
    if app.mode == Mode::EditNote {
        let edited = with_cursor_glyph(&app.note_input.text, app.note_input.cursor);
        let edit_style = Style::default().fg(theme.text_bright).bg(bg);
        for line in edited.split('\n') {
            lines.push(Line::from(Span::styled(line.to_string(), edit_style)));
        }
    } else if app.record.note.is_empty() {
        lines.push(Line::from(Span::styled("(空)", dim)));
    } else {
        for line in app.record.note.split('\n') {
            lines.push(Line::from(Span::styled(line.to_string(), text_style)));
        }
    }
    lines.push(Line::from(""));

    // Todos
    let (done, total) = app.record.todo_progress();
    let progress = (total > 0).then(|| format!("{}/{}", done, total));
    lines.push(section_header(app, "待办", Focus::Todos, progress));

    for (i, todo) in app.record.todos.iter().enumerate() {
        let is_cursor = app.focus == Focus::Todos && i == app.todo_cursor;
        let pointer = if is_cursor { "\u{25B8} " } else { "  " };
        let mut style = if todo.done {
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text)
        };
        let row_bg = if is_cursor { theme.selection_bg } else { bg };
        style = style.bg(row_bg);

        let mut spans = vec![
            Span::styled(pointer, Style::default().fg(theme.cursor).bg(row_bg)),
            Span::styled(
                format!("{} ", checkbox(todo.done)),
                Style::default()
                    .fg(if todo.done { theme.green } else { theme.text })
                    .bg(row_bg),
            ),
        ];
        let remaining = inner_width.saturating_sub(spans_width(&spans));
        spans.push(Span::styled(
            unicode::truncate_to_width(&todo.text, remaining),
            style,
        ));
        lines.push(Line::from(spans));
    }

    if app.mode == Mode::EditTodo {
        lines.push(Line::from(vec![
            Span::styled("+ ", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(
                with_cursor_glyph(&app.todo_input.text, app.todo_input.cursor),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
        ]));
    } else if app.record.todos.is_empty() {
        lines.push(Line::from(Span::styled("(无待办)", dim)));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn section_header<'a>(
    app: &App,
    label: &'a str,
    section: Focus,
    suffix: Option<String>,
) -> Line<'a> {
    let theme = &app.theme;
    let color = if app.focus == section {
        theme.highlight
    } else {
        theme.purple
    };
    let mut spans = vec![Span::styled(
        label,
        Style::default()
            .fg(color)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(suffix) = suffix {
        spans.push(Span::styled(
            format!("  {}", suffix),
            Style::default().fg(theme.dim).bg(theme.background),
        ));
    }
    Line::from(spans)
}
