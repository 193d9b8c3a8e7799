use crate::io::store::{Store, StoreError};
use crate::model::{DateKey, DayRecord, Session, TodoItem};

/// Error type for day record operations
#[derive(Debug, thiserror::Error)]
pub enum DayError {
    #[error("todo index out of range: {0}")]
    IndexOutOfRange(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Date-addressed operations
// ---------------------------------------------------------------------------
//
// Each one is a single read-modify-write of the whole record, reading the
// persisted record immediately before mutating it.

/// Replace the note. An empty string clears it.
pub fn set_note(store: &mut Store, key: &DateKey, text: &str) -> Result<DayRecord, DayError> {
    let mut record = store.get(key);
    record.note = text.to_string();
    store.put(key, &record)?;
    Ok(record)
}

/// Append a todo with the trimmed text. Blank text is a no-op (`Ok(None)`).
pub fn push_todo(
    store: &mut Store,
    key: &DateKey,
    text: &str,
) -> Result<Option<DayRecord>, DayError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut record = store.get(key);
    record.todos.push(TodoItem::new(text));
    store.put(key, &record)?;
    Ok(Some(record))
}

/// Flip the completion flag of the todo at `index`.
pub fn toggle_todo_at(
    store: &mut Store,
    key: &DateKey,
    index: usize,
) -> Result<DayRecord, DayError> {
    let mut record = store.get(key);
    let todo = record
        .todos
        .get_mut(index)
        .ok_or(DayError::IndexOutOfRange(index))?;
    todo.done = !todo.done;
    store.put(key, &record)?;
    Ok(record)
}

/// Remove the todo at `index`.
pub fn remove_todo_at(
    store: &mut Store,
    key: &DateKey,
    index: usize,
) -> Result<DayRecord, DayError> {
    let mut record = store.get(key);
    if index >= record.todos.len() {
        return Err(DayError::IndexOutOfRange(index));
    }
    record.todos.remove(index);
    store.put(key, &record)?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Selection-guarded operations
// ---------------------------------------------------------------------------
//
// With nothing selected these do nothing and return `Ok(None)`.

pub fn save_note(
    session: &Session,
    store: &mut Store,
    text: &str,
) -> Result<Option<DayRecord>, DayError> {
    let Some(key) = session.selected() else {
        return Ok(None);
    };
    set_note(store, &key, text).map(Some)
}

pub fn add_todo(
    session: &Session,
    store: &mut Store,
    text: &str,
) -> Result<Option<DayRecord>, DayError> {
    let Some(key) = session.selected() else {
        return Ok(None);
    };
    push_todo(store, &key, text)
}

pub fn toggle_todo(
    session: &Session,
    store: &mut Store,
    index: usize,
) -> Result<Option<DayRecord>, DayError> {
    let Some(key) = session.selected() else {
        return Ok(None);
    };
    toggle_todo_at(store, &key, index).map(Some)
}

pub fn delete_todo(
    session: &Session,
    store: &mut Store,
    index: usize,
) -> Result<Option<DayRecord>, DayError> {
    let Some(key) = session.selected() else {
        return Ok(None);
    };
    remove_todo_at(store, &key, index).map(Some)
}
