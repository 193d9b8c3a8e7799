use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Char('[') | KeyCode::Char('p') => {
            app.prev_month();
            return;
        }
        KeyCode::Char(']') | KeyCode::Char('n') => {
            app.next_month();
            return;
        }
        KeyCode::Char('t') => {
            app.goto_today();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Calendar => handle_calendar(app, key),
        Focus::Note => handle_note(app, key),
        Focus::Todos => handle_todos(app, key),
    }
}

fn handle_calendar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(7),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_cursor(),
        _ => {}
    }
}

fn handle_note(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => app.begin_note_edit(),
        KeyCode::Esc => app.focus = Focus::Calendar,
        _ => {}
    }
}

fn handle_todos(app: &mut App, key: KeyEvent) {
    let len = app.record.todos.len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if app.todo_cursor + 1 < len {
                app.todo_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.todo_cursor = app.todo_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_current_todo(),
        KeyCode::Char('d') => app.delete_current_todo(),
        KeyCode::Char('a') => app.begin_todo_input(),
        KeyCode::Esc => app.focus = Focus::Calendar,
        _ => {}
    }
}
