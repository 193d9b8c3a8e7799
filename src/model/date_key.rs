use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix prepended to a date key to form its storage key.
pub const STORAGE_PREFIX: &str = "cal_";

static DATE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date key regex"));

/// Error type for date key parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("invalid date \"{0}\": expected YYYY-MM-DD")]
    Invalid(String),
}

/// A calendar day, serialized as `YYYY-MM-DD` with zero-padded month and day.
///
/// This is the sole identity of a day's record in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    /// Build a key from a year, a 0-indexed month and a 1-indexed day.
    pub fn from_parts(year: i32, month0: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0 + 1, day).map(DateKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 0-indexed month (0 = January)
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Key under which this day's record is persisted (`cal_YYYY-MM-DD`)
    pub fn storage_key(&self) -> String {
        format!("{}{}", STORAGE_PREFIX, self)
    }

    /// Inverse of [`DateKey::storage_key`]. Returns None for foreign keys.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(STORAGE_PREFIX)?.parse().ok()
    }

    /// Panel title: `2024年3月5日` (month and day unpadded)
    pub fn display_title(&self) -> String {
        format!("{}年{}月{}日", self.year(), self.month0() + 1, self.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateKeyError::Invalid(s.to_string());
        let caps = DATE_KEY_RE.captures(s).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let day: u32 = caps[3].parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateKey)
            .ok_or_else(invalid)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Render a date key as the panel title (`2024-03-05` → `2024年3月5日`).
pub fn format_display_date(key: &DateKey) -> String {
    key.display_title()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn display_is_zero_padded() {
        let k = DateKey::from_parts(2024, 2, 5).unwrap();
        assert_eq!(k.to_string(), "2024-03-05");
    }

    #[test]
    fn small_years_keep_four_digits() {
        let k = DateKey::from_parts(999, 0, 1).unwrap();
        assert_eq!(k.to_string(), "0999-01-01");
        assert_eq!(k.storage_key(), "cal_0999-01-01");
        assert_eq!(DateKey::from_storage_key(&k.storage_key()), Some(k));
        assert_eq!(key("0001-01-01").to_string(), "0001-01-01");
    }

    #[test]
    fn parse_round_trips_canonical_form() {
        assert_eq!(key("2024-12-31").to_string(), "2024-12-31");
        assert_eq!(key("2024-02-29").day(), 29);
    }

    #[test]
    fn parse_rejects_unpadded_and_garbage() {
        assert!("2024-3-5".parse::<DateKey>().is_err());
        assert!("2024-03-5".parse::<DateKey>().is_err());
        assert!("24-03-05".parse::<DateKey>().is_err());
        assert!("2024/03/05".parse::<DateKey>().is_err());
        assert!(" 2024-03-05".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert!("2023-02-29".parse::<DateKey>().is_err());
        assert!("2024-13-01".parse::<DateKey>().is_err());
        assert!("2024-00-10".parse::<DateKey>().is_err());
        assert!("2024-04-31".parse::<DateKey>().is_err());
    }

    #[test]
    fn parse_error_names_input() {
        let err = "nope".parse::<DateKey>().unwrap_err();
        assert_eq!(err.to_string(), "invalid date \"nope\": expected YYYY-MM-DD");
    }

    #[test]
    fn storage_key_round_trip() {
        let k = key("2024-03-05");
        assert_eq!(k.storage_key(), "cal_2024-03-05");
        assert_eq!(DateKey::from_storage_key("cal_2024-03-05"), Some(k));
        assert_eq!(DateKey::from_storage_key("other_2024-03-05"), None);
        assert_eq!(DateKey::from_storage_key("cal_garbage"), None);
    }

    #[test]
    fn display_title_is_unpadded() {
        assert_snapshot!(format_display_date(&key("2024-03-05")), @"2024年3月5日");
        assert_snapshot!(format_display_date(&key("2025-11-28")), @"2025年11月28日");
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&key("2024-01-09")).unwrap();
        assert_eq!(json, "\"2024-01-09\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-01-09"));
        assert!(serde_json::from_str::<DateKey>("\"2024-1-9\"").is_err());
    }

    #[test]
    fn ordering_follows_calendar() {
        assert!(key("2023-12-31") < key("2024-01-01"));
        assert!(key("2024-02-09") < key("2024-02-10"));
    }
}
