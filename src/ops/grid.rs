use chrono::{Datelike, NaiveDate};

use crate::io::store::Store;
use crate::model::{DateKey, Session, YearMonth};

/// Weekday column labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// One position of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub day: u32,
    pub date_key: DateKey,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_data: bool,
}

/// Number of days in the month. 0 for months chrono cannot represent.
pub fn days_in_month(ym: YearMonth) -> u32 {
    match (ym.first_day(), ym.next().first_day()) {
        (Some(this), Some(next)) => (next - this).num_days() as u32,
        _ => 0,
    }
}

/// Weekday of the 1st (0 = Sunday .. 6 = Saturday)
pub fn first_weekday(ym: YearMonth) -> Option<u32> {
    ym.first_day().map(|d| d.weekday().num_days_from_sunday())
}

/// Build the 7-column grid for a month (0-indexed; `-1` and `12` wrap into
/// the adjacent year).
///
/// Leading cells come from the tail of the previous month and trailing cells
/// from the head of the next one, so the length is always a multiple of 7.
/// Only current-month cells are ever flagged today or selected. Returns an
/// empty grid for years chrono cannot represent.
pub fn build_grid(
    year: i32,
    month: i32,
    today: NaiveDate,
    selected: Option<DateKey>,
    store: &Store,
) -> Vec<Cell> {
    let ym = YearMonth::normalized(year, month);
    let (prev, next) = (ym.prev(), ym.next());
    let Some(first_wd) = first_weekday(ym) else {
        return Vec::new();
    };
    let days = days_in_month(ym);
    let prev_days = days_in_month(prev);
    if days == 0 || prev_days == 0 {
        return Vec::new();
    }
    let today_key = DateKey::new(today);

    let mut cells = Vec::with_capacity(42);

    for day in (prev_days + 1 - first_wd)..=prev_days {
        cells.extend(adjacent_cell(prev, day, store));
    }

    for day in 1..=days {
        let Some(date_key) = DateKey::from_parts(ym.year, ym.month0, day) else {
            continue;
        };
        cells.push(Cell {
            day,
            date_key,
            is_current_month: true,
            is_today: date_key == today_key,
            is_selected: selected == Some(date_key),
            has_data: store.has_data(&date_key),
        });
    }

    let remaining = (7 - cells.len() % 7) % 7;
    for day in 1..=remaining as u32 {
        cells.extend(adjacent_cell(next, day, store));
    }

    cells
}

/// Grid for the month a session currently shows
pub fn build_session_grid(session: &Session, store: &Store) -> Vec<Cell> {
    build_grid(
        session.shown.year,
        session.shown.month0 as i32,
        session.today,
        session.selected(),
        store,
    )
}

fn adjacent_cell(ym: YearMonth, day: u32, store: &Store) -> Option<Cell> {
    let date_key = DateKey::from_parts(ym.year, ym.month0, day)?;
    Some(Cell {
        day,
        date_key,
        is_current_month: false,
        is_today: false,
        is_selected: false,
        has_data: store.has_data(&date_key),
    })
}

/// Header for a month (0-indexed, wrapping): `2024年 3月`
pub fn month_header(year: i32, month: i32) -> String {
    YearMonth::normalized(year, month).header()
}

pub fn weekday_labels() -> [&'static str; 7] {
    WEEKDAY_LABELS
}

/// Split a grid into week rows
pub fn rows(cells: &[Cell]) -> impl Iterator<Item = &[Cell]> {
    cells.chunks(7)
}

/// Index of the cell holding `key`, preferring current-month cells
pub fn position_of(cells: &[Cell], key: &DateKey) -> Option<usize> {
    cells
        .iter()
        .position(|c| c.is_current_month && c.date_key == *key)
        .or_else(|| cells.iter().position(|c| c.date_key == *key))
}
