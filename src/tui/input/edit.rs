use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::tui::text_input::TextInput;

pub(super) fn handle_edit_note(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            app.save_note();
        }
        return;
    }
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.note_input.insert_char('\n'),
        KeyCode::Up => app.note_input.up(),
        KeyCode::Down => app.note_input.down(),
        code => edit_line(&mut app.note_input, code),
    }
}

pub(super) fn handle_edit_todo(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.cancel_edit();
            app.focus = Focus::Todos;
        }
        KeyCode::Enter => app.add_todo(),
        code => edit_line(&mut app.todo_input, code),
    }
}

/// Keys shared by both inputs
fn edit_line(input: &mut TextInput, code: KeyCode) {
    match code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}
