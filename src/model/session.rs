use chrono::{Datelike, NaiveDate};

use super::date_key::DateKey;

/// A (year, month) pair with a 0-indexed month (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month0: u32,
}

impl YearMonth {
    /// Build from a possibly out-of-range month, wrapping into adjacent years
    /// (`-1` → December of `year - 1`, `12` → January of `year + 1`).
    pub fn normalized(year: i32, month: i32) -> Self {
        YearMonth {
            year: year + month.div_euclid(12),
            month0: month.rem_euclid(12) as u32,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn prev(self) -> Self {
        Self::normalized(self.year, self.month0 as i32 - 1)
    }

    pub fn next(self) -> Self {
        Self::normalized(self.year, self.month0 as i32 + 1)
    }

    /// First day of this month. None only for years chrono cannot represent.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// Header text: `2024年 3月`
    pub fn header(self) -> String {
        format!("{}年 {}月", self.year, self.month0 + 1)
    }
}

/// Selection of the side panel. There is no way back to `None` once a day
/// has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    None,
    Selected(DateKey),
}

/// UI-session context: the displayed month, the selected day and "today".
///
/// Lives for one run of the program and is never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub shown: YearMonth,
    pub today: NaiveDate,
    selection: Selection,
}

impl Session {
    /// Start a session showing the month that contains `today`.
    pub fn new(today: NaiveDate) -> Self {
        Session {
            shown: YearMonth::of(today),
            today,
            selection: Selection::None,
        }
    }

    pub fn today_key(&self) -> DateKey {
        DateKey::new(self.today)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<DateKey> {
        match self.selection {
            Selection::None => None,
            Selection::Selected(key) => Some(key),
        }
    }

    /// Select a day. The displayed month does not change, even when the day
    /// belongs to an adjacent month.
    pub fn select(&mut self, key: DateKey) {
        self.selection = Selection::Selected(key);
    }

    pub fn prev_month(&mut self) {
        self.shown = self.shown.prev();
    }

    pub fn next_month(&mut self) {
        self.shown = self.shown.next();
    }

    pub fn show_today(&mut self) {
        self.shown = YearMonth::of(self.today);
    }
}
