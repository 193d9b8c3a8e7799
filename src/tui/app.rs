use std::io;
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::{config_dir, read_config_from, resolve_data_path};
use crate::io::store::Store;
use crate::model::{DateKey, DayRecord, Session, YearMonth};
use crate::ops::day_ops::{self, DayError};
use crate::ops::grid::{self, Cell};

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;

/// Years the calendar can navigate to (the `YYYY` in a DateKey)
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Note,
    Todos,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Calendar => Focus::Note,
            Focus::Note => Focus::Todos,
            Focus::Todos => Focus::Calendar,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Calendar => Focus::Todos,
            Focus::Note => Focus::Calendar,
            Focus::Todos => Focus::Note,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Editing the note of the selected day
    EditNote,
    /// Typing a new todo for the selected day
    EditTodo,
}

/// Main application state
pub struct App {
    pub store: Store,
    pub session: Session,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    pub focus: Focus,
    pub should_quit: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Grid of the displayed month, rebuilt after every change
    pub cells: Vec<Cell>,
    /// Day under the grid cursor. Always inside the displayed month.
    pub cursor: DateKey,
    /// Record of the selected day (default when nothing is selected)
    pub record: DayRecord,
    pub todo_cursor: usize,
    pub note_input: TextInput,
    pub todo_input: TextInput,
    /// Transient message for the status row, cleared on the next key
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: Store, today: NaiveDate, theme: Theme) -> Self {
        let session = Session::new(today);
        let mut app = App {
            store,
            cursor: session.today_key(),
            session,
            theme,
            show_key_hints: true,
            mode: Mode::Navigate,
            focus: Focus::Calendar,
            should_quit: false,
            show_help: false,
            cells: Vec::new(),
            record: DayRecord::default(),
            todo_cursor: 0,
            note_input: TextInput::default(),
            todo_input: TextInput::default(),
            status_message: None,
        };
        app.refresh();

        let corrupt = app.store.corrupt_keys().len();
        if corrupt > 0 {
            app.status_message = Some(format!(
                "{} unreadable record(s) ignored, see `dp recovery`",
                corrupt
            ));
        }
        app
    }

    /// Rebuild the grid and re-read the selected record from the store
    pub fn refresh(&mut self) {
        self.cells = grid::build_session_grid(&self.session, &self.store);
        self.record = self
            .session
            .selected()
            .map(|key| self.store.get(&key))
            .unwrap_or_default();
        if self.todo_cursor >= self.record.todos.len() {
            self.todo_cursor = self.record.todos.len().saturating_sub(1);
        }
    }

    /// Index of the cursor in `cells`
    pub fn cursor_index(&self) -> Option<usize> {
        grid::position_of(&self.cells, &self.cursor)
    }

    // -----------------------------------------------------------------------
    // Calendar navigation
    // -----------------------------------------------------------------------

    /// Move the cursor by `days`, following it into the adjacent month when it
    /// leaves the displayed one.
    pub fn move_cursor(&mut self, days: i64) {
        let date = self.cursor.date();
        let target = if days >= 0 {
            date.checked_add_days(Days::new(days as u64))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        let Some(target) = target else {
            return;
        };
        let key = DateKey::new(target);
        if !(MIN_YEAR..=MAX_YEAR).contains(&key.year()) {
            return;
        }
        self.cursor = key;
        let ym = YearMonth::of(target);
        if ym != self.session.shown {
            self.session.shown = ym;
            self.refresh();
        }
    }

    /// Select the day under the cursor
    pub fn select_cursor(&mut self) {
        self.session.select(self.cursor);
        self.todo_cursor = 0;
        self.refresh();
    }

    pub fn prev_month(&mut self) {
        let shown = self.session.shown;
        if shown.year <= MIN_YEAR && shown.month0 == 0 {
            return;
        }
        self.session.prev_month();
        self.place_cursor_in_month();
        self.refresh();
    }

    pub fn next_month(&mut self) {
        let shown = self.session.shown;
        if shown.year >= MAX_YEAR && shown.month0 == 11 {
            return;
        }
        self.session.next_month();
        self.place_cursor_in_month();
        self.refresh();
    }

    /// Show the current month with the cursor on today
    pub fn goto_today(&mut self) {
        self.session.show_today();
        self.cursor = self.session.today_key();
        self.refresh();
    }

    /// After a month change: the selected day if it is shown, else the 1st
    fn place_cursor_in_month(&mut self) {
        let shown = self.session.shown;
        if let Some(selected) = self.session.selected()
            && YearMonth::of(selected.date()) == shown
        {
            self.cursor = selected;
        } else if let Some(first) = DateKey::from_parts(shown.year, shown.month0, 1) {
            self.cursor = first;
        }
    }

    // -----------------------------------------------------------------------
    // Side panel
    // -----------------------------------------------------------------------

    pub fn begin_note_edit(&mut self) {
        if self.session.selected().is_none() {
            self.status_message = Some("select a day first".into());
            return;
        }
        self.note_input = TextInput::with_text(&self.record.note);
        self.mode = Mode::EditNote;
        self.focus = Focus::Note;
    }

    pub fn save_note(&mut self) {
        let result = day_ops::save_note(&self.session, &mut self.store, &self.note_input.text);
        if self.apply(result) {
            self.mode = Mode::Navigate;
        }
    }

    pub fn begin_todo_input(&mut self) {
        if self.session.selected().is_none() {
            self.status_message = Some("select a day first".into());
            return;
        }
        self.todo_input.clear();
        self.mode = Mode::EditTodo;
        self.focus = Focus::Todos;
    }

    /// Add the typed todo. The input is cleared on success and stays open for
    /// the next one.
    pub fn add_todo(&mut self) {
        match day_ops::add_todo(&self.session, &mut self.store, &self.todo_input.text) {
            Ok(Some(record)) => {
                self.todo_input.clear();
                self.todo_cursor = record.todos.len().saturating_sub(1);
                self.refresh();
            }
            other => {
                self.apply(other);
            }
        }
    }

    pub fn toggle_current_todo(&mut self) {
        if self.record.todos.is_empty() {
            return;
        }
        let result = day_ops::toggle_todo(&self.session, &mut self.store, self.todo_cursor);
        self.apply(result);
    }

    pub fn delete_current_todo(&mut self) {
        if self.record.todos.is_empty() {
            return;
        }
        let result = day_ops::delete_todo(&self.session, &mut self.store, self.todo_cursor);
        self.apply(result);
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Navigate;
        self.note_input.clear();
        self.todo_input.clear();
    }

    /// Rebuild after a mutation. A stale index is ignored; store failures go to
    /// the status row. Returns false if the write failed.
    fn apply(&mut self, result: Result<Option<DayRecord>, DayError>) -> bool {
        let ok = match result {
            Ok(_) | Err(DayError::IndexOutOfRange(_)) => true,
            Err(DayError::Store(e)) => {
                self.status_message = Some(format!("save failed: {}", e));
                false
            }
        };
        self.refresh();
        ok
    }
}

// ---------------------------------------------------------------------------
// Terminal lifecycle
// ---------------------------------------------------------------------------

/// Run the TUI against the data file resolved from `data` (the `--data` flag),
/// the environment and the config file.
pub fn run(data: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_dir();
    let config = read_config_from(&dir)?;
    let path = resolve_data_path(data, &config, &dir);
    let store = Store::open(&path)?;

    let mut app = App::new(
        store,
        Local::now().date_naive(),
        Theme::from_config(&config.ui),
    );
    app.show_key_hints = config.ui.show_key_hints;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
