use serde::{Deserialize, Serialize};

/// One checklist entry attached to a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        TodoItem {
            text: text.into(),
            done: false,
        }
    }
}

/// The note and todo list attached to one date.
///
/// The default value (empty note, no todos) is what the store hands back for
/// a date that has never been written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
}

impl DayRecord {
    /// Whether this record carries anything worth marking on the calendar.
    /// Completion state of todos does not matter, only their presence.
    pub fn has_data(&self) -> bool {
        !self.note.trim().is_empty() || !self.todos.is_empty()
    }

    /// (done, total) todo counts
    pub fn todo_progress(&self) -> (usize, usize) {
        let done = self.todos.iter().filter(|t| t.done).count();
        (done, self.todos.len())
    }
}
