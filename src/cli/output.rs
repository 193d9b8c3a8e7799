use serde::Serialize;

use crate::model::{DateKey, DayRecord, YearMonth, format_display_date};
use crate::ops::grid::{self, Cell};
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    /// 1-based, as accepted by `dp todo toggle|rm`
    pub index: usize,
    pub text: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: String,
    pub note: String,
    pub todos: Vec<TodoJson>,
    pub has_data: bool,
}

#[derive(Serialize)]
pub struct CellJson {
    pub date: String,
    pub day: u32,
    pub current_month: bool,
    pub today: bool,
    pub has_data: bool,
}

#[derive(Serialize)]
pub struct MonthJson {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub header: String,
    pub weeks: Vec<Vec<CellJson>>,
}

#[derive(Serialize)]
pub struct ListEntryJson {
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub todos_done: usize,
    pub todos_total: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn day_to_json(key: &DateKey, record: &DayRecord) -> DayJson {
    DayJson {
        date: key.to_string(),
        note: record.note.clone(),
        todos: record
            .todos
            .iter()
            .enumerate()
            .map(|(i, t)| TodoJson {
                index: i + 1,
                text: t.text.clone(),
                done: t.done,
            })
            .collect(),
        has_data: record.has_data(),
    }
}

pub fn month_to_json(ym: YearMonth, cells: &[Cell]) -> MonthJson {
    MonthJson {
        year: ym.year,
        month: ym.month0 + 1,
        header: ym.header(),
        weeks: grid::rows(cells)
            .map(|week| {
                week.iter()
                    .map(|c| CellJson {
                        date: c.date_key.to_string(),
                        day: c.day,
                        current_month: c.is_current_month,
                        today: c.is_today,
                        has_data: c.has_data,
                    })
                    .collect()
            })
            .collect(),
    }
}

pub fn list_entry_to_json(key: &DateKey, record: &DayRecord) -> ListEntryJson {
    let (done, total) = record.todo_progress();
    ListEntryJson {
        date: key.to_string(),
        note: record.note.clone(),
        todos_done: done,
        todos_total: total,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Columns per day in the printed month
const CELL_WIDTH: usize = 5;

/// Print a month like `cal`: days of other months are left blank, `>` marks
/// today and `•` marks days with data.
pub fn format_month(ym: YearMonth, cells: &[Cell]) -> String {
    let mut lines = Vec::new();
    lines.push(
        unicode::center_to_width(&ym.header(), CELL_WIDTH * 7)
            .trim_end()
            .to_string(),
    );
    let labels: String = grid::weekday_labels()
        .iter()
        .map(|l| unicode::center_to_width(l, CELL_WIDTH))
        .collect();
    lines.push(labels.trim_end().to_string());

    for week in grid::rows(cells) {
        let row: String = week.iter().map(format_cell).collect();
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

fn format_cell(cell: &Cell) -> String {
    if !cell.is_current_month {
        return " ".repeat(CELL_WIDTH);
    }
    let today = if cell.is_today { '>' } else { ' ' };
    let marker = if cell.has_data { '\u{2022}' } else { ' ' };
    format!(" {}{:>2}{}", today, cell.day, marker)
}

/// Title, note, then numbered todos
pub fn format_day(key: &DateKey, record: &DayRecord) -> String {
    let mut lines = vec![format_display_date(key)];
    if record.note.is_empty() {
        lines.push("(no note)".to_string());
    } else {
        lines.extend(record.note.lines().map(|l| l.to_string()));
    }
    lines.push(String::new());
    if record.todos.is_empty() {
        lines.push("(no todos)".to_string());
    } else {
        for (i, todo) in record.todos.iter().enumerate() {
            let check = if todo.done { "[x]" } else { "[ ]" };
            lines.push(format!("{}. {} {}", i + 1, check, todo.text));
        }
    }
    lines.join("\n")
}

/// One line of `dp list`: date, todo progress, first line of the note
pub fn format_list_line(key: &DateKey, record: &DayRecord) -> String {
    let (done, total) = record.todo_progress();
    let mut line = key.to_string();
    if total > 0 {
        line.push_str(&format!("  [{}/{}]", done, total));
    }
    if let Some(first) = record.note.lines().find(|l| !l.trim().is_empty()) {
        line.push_str("  ");
        line.push_str(&unicode::truncate_to_width(first.trim(), 50));
    }
    line
}
