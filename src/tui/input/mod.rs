mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use edit::{handle_edit_note, handle_edit_todo};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Help overlay intercepts all input
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::EditNote => handle_edit_note(app, key),
        Mode::EditTodo => handle_edit_todo(app, key),
    }
}

/// Shifted letters arrive as either `Char('A')` or `Char('a')` + SHIFT depending
/// on the terminal. Fold both to the uppercase form.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::Store;
    use crate::model::{DateKey, TodoItem, YearMonth};
    use crate::tui::app::Focus;
    use crate::tui::theme::Theme;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        App::new(Store::in_memory(), today, Theme::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn arrows_and_hjkl_move_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, key("2024-03-13"));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, key("2024-03-05"));
    }

    #[test]
    fn enter_selects_cursor_day() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.selected(), Some(key("2024-03-06")));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.selected(), Some(key("2024-03-07")));
    }

    #[test]
    fn month_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.shown, YearMonth { year: 2024, month0: 4 });
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.session.shown, YearMonth { year: 2024, month0: 3 });
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session.shown, YearMonth { year: 2024, month0: 1 });
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.session.shown, YearMonth { year: 2024, month0: 2 });
        assert_eq!(app.cursor, key("2024-03-05"));
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Note);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Todos);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Note);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Calendar);
    }

    #[test]
    fn note_edit_and_save() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::EditNote);

        type_str(&mut app, "dentist");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "at 3");
        ctrl(&mut app, 's');

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.get(&key("2024-03-05")).note, "dentist\nat 3");
        let idx = app.cursor_index().unwrap();
        assert!(app.cells[idx].has_data);
    }

    #[test]
    fn note_edit_escape_discards() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.get(&key("2024-03-05")).note, "");
    }

    #[test]
    fn todo_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::EditTodo);

        type_str(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "call mom");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(
            app.record.todos,
            vec![TodoItem::new("buy milk"), TodoItem::new("call mom")]
        );
        assert_eq!(app.todo_cursor, 1);

        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('x'));
        assert!(app.record.todos[0].done);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.record.todos[0].done);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.record.todos, vec![TodoItem::new("call mom")]);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.record.todos.is_empty());
        // Nothing left: further deletes are ignored
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.store.has_data(&key("2024-03-05")));
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn typing_q_in_todo_input_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "quiz");
        assert!(!app.should_quit);
        assert_eq!(app.todo_input.text, "quiz");
    }
}
