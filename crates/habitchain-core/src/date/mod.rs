//! Calendar date utilities.
//!
//! A [`CalendarDate`] is a day with no time-of-day component. It is stored as a
//! zero-padded `YYYY-MM-DD` string, so string order and chronological order
//! agree. "Today" always comes from a [`Clock`] reading local wall-clock time.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the triple is not a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The calendar day of a local wall-clock instant.
    pub fn of(instant: NaiveDateTime) -> Self {
        Self(instant.date())
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Local midnight at the start of this day.
    pub fn midnight(self) -> NaiveDateTime {
        self.0.and_time(chrono::NaiveTime::MIN)
    }

    /// Calendar arithmetic; `n` may be negative and crosses month and year
    /// boundaries. Saturates at the ends of the representable range.
    pub fn add_days(self, n: i64) -> Self {
        let days = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(days).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    pub fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from(self.0.weekday())
    }

    /// Whole days from `self` to `other` (negative when `other` is earlier).
    pub fn days_until(self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn relation_to(self, today: CalendarDate) -> DateRelation {
        match self.cmp(&today) {
            std::cmp::Ordering::Less => DateRelation::Past,
            std::cmp::Ordering::Equal => DateRelation::Today,
            std::cmp::Ordering::Greater => DateRelation::Future,
        }
    }

    pub fn is_today(self, today: CalendarDate) -> bool {
        self == today
    }

    pub fn is_future(self, today: CalendarDate) -> bool {
        self > today
    }

    pub fn is_past(self, today: CalendarDate) -> bool {
        self < today
    }

    /// Inclusive range `self..=end`, empty when `end` is before `self`.
    pub fn range_to(self, end: CalendarDate) -> DateRange {
        DateRange::new(self, end)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields; stored keys must stay sortable.
        if trimmed.len() != 10 {
            return Err(ValidationError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRelation {
    Past,
    Today,
    Future,
}

/// Day of the week, Sunday = 0 through Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub const WEEKENDS: [DayOfWeek; 2] = [DayOfWeek::Sunday, DayOfWeek::Saturday];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::ALL
            .get(value as usize)
            .copied()
            .ok_or(ValidationError::InvalidDayOfWeek(value))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.index()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive range of calendar days, walkable in either direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    front: CalendarDate,
    back: CalendarDate,
    exhausted: bool,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            front: start,
            back: end,
            exhausted: start > end,
        }
    }
}

impl Iterator for DateRange {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        if self.exhausted {
            return None;
        }
        let current = self.front;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.front = self.front.add_days(1);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let len = self.front.days_until(self.back) as usize + 1;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for DateRange {
    fn next_back(&mut self) -> Option<CalendarDate> {
        if self.exhausted {
            return None;
        }
        let current = self.back;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.back = self.back.add_days(-1);
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateRange {}
