use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::Store;
use crate::model::{DateKey, DayRecord, TodoItem};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Drop all spaces. Wide characters leave a blank filler cell behind them,
/// so CJK text is compared with spaces removed.
pub fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

/// An App over an empty in-memory store, with `today` (YYYY-MM-DD) as today
pub fn app_on(today: &str) -> App {
    let today: DateKey = today.parse().unwrap();
    App::new(Store::in_memory(), today.date(), Theme::default())
}

/// Write a record straight to the app's store and rebuild the views
pub fn put_record(app: &mut App, date: &str, note: &str, todos: &[&str]) {
    let key: DateKey = date.parse().unwrap();
    let record = DayRecord {
        note: note.to_string(),
        todos: todos.iter().map(|t| TodoItem::new(*t)).collect(),
    };
    app.store.put(&key, &record).unwrap();
    app.refresh();
}

/// An App with `date` selected
pub fn app_with_selection(today: &str, date: &str) -> App {
    let mut app = app_on(today);
    app.cursor = date.parse().unwrap();
    app.select_cursor();
    app
}
