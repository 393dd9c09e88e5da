//! Habit records as the store persists them.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DayState;
use crate::date::{CalendarDate, DayOfWeek};
use crate::error::ValidationError;

/// One touched day of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: CalendarDate,
    pub state: DayState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DayEntry {
    pub fn new(date: CalendarDate, state: DayState) -> Self {
        Self {
            date,
            state,
            notes: None,
        }
    }

    /// What an untouched day resolves to.
    pub fn blank(date: CalendarDate) -> Self {
        Self::new(date, DayState::Blank)
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// A blank entry without notes carries nothing and is not stored.
    pub fn is_implicit(&self) -> bool {
        self.state == DayState::Blank && !self.has_notes()
    }
}

/// Days of the week a habit is scheduled on.
///
/// An empty set can only come from legacy data and behaves like the full week.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveDays(BTreeSet<DayOfWeek>);

impl ActiveDays {
    pub fn every_day() -> Self {
        Self(DayOfWeek::ALL.into_iter().collect())
    }

    pub fn weekdays() -> Self {
        Self(DayOfWeek::WEEKDAYS.into_iter().collect())
    }

    pub fn weekends() -> Self {
        Self(DayOfWeek::WEEKENDS.into_iter().collect())
    }

    pub fn from_days<I: IntoIterator<Item = DayOfWeek>>(days: I) -> Self {
        Self(days.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, day: DayOfWeek) -> bool {
        self.0.contains(&day)
    }

    /// True when only some days of the week are scheduled.
    pub fn restricts(&self) -> bool {
        !self.0.is_empty() && self.0.len() < DayOfWeek::ALL.len()
    }

    pub fn is_active(&self, day: DayOfWeek) -> bool {
        !self.restricts() || self.0.contains(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0.iter().copied()
    }

    /// Human label: "Every day", "Weekdays", "Weekends", or short names.
    pub fn label(&self) -> String {
        if *self == Self::every_day() || self.is_empty() {
            "Every day".to_string()
        } else if *self == Self::weekdays() {
            "Weekdays".to_string()
        } else if *self == Self::weekends() {
            "Weekends".to_string()
        } else {
            self.iter()
                .map(DayOfWeek::short_name)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl Default for ActiveDays {
    fn default() -> Self {
        Self::every_day()
    }
}

/// Reminder settings. Delivery happens outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Local time of day, `HH:mm`.
    pub time: String,
}

/// A tracked habit.
///
/// Entries and the schedule are changed only through the editing methods so
/// that `revision` moves with every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "crate::storage::migrations::StoredHabit")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub created_at: CalendarDate,
    pub(crate) start_date: CalendarDate,
    pub(crate) entries: HashMap<CalendarDate, DayEntry>,
    pub(crate) active_days: ActiveDays,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
    pub(crate) revision: u64,
}

impl Habit {
    /// Create a habit starting on `start_date`, or on `today` when absent.
    pub fn new(
        name: &str,
        active_days: ActiveDays,
        start_date: Option<CalendarDate>,
        today: CalendarDate,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        if active_days.is_empty() {
            return Err(ValidationError::EmptyActiveDays);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: today,
            start_date: start_date.unwrap_or(today),
            entries: HashMap::new(),
            active_days,
            notifications: None,
            revision: 0,
        })
    }

    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub fn active_days(&self) -> &ActiveDays {
        &self.active_days
    }

    pub fn entries(&self) -> &HashMap<CalendarDate, DayEntry> {
        &self.entries
    }

    pub fn entry(&self, date: CalendarDate) -> Option<&DayEntry> {
        self.entries.get(&date)
    }

    /// Stored state for `date`, `Blank` when nothing is stored.
    pub fn state_on(&self, date: CalendarDate) -> DayState {
        self.entries
            .get(&date)
            .map(|e| e.state)
            .unwrap_or(DayState::Blank)
    }

    pub fn is_active_on(&self, date: CalendarDate) -> bool {
        self.active_days.is_active(date.day_of_week())
    }

    /// Mutation counter; changes whenever entries or schedule change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn new_habit_trims_name_and_defaults_start() {
        let habit = Habit::new("  Read  ", ActiveDays::every_day(), None, d("2024-01-01")).unwrap();
        assert_eq!(habit.name, "Read");
        assert_eq!(habit.start_date(), d("2024-01-01"));
        assert_eq!(habit.created_at, d("2024-01-01"));
        assert!(habit.entries().is_empty());
        assert!(!habit.id.is_empty());
    }

    #[test]
    fn new_habit_rejects_empty_name_and_days() {
        assert_eq!(
            Habit::new("   ", ActiveDays::every_day(), None, d("2024-01-01")).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            Habit::new("Run", ActiveDays::from_days([]), None, d("2024-01-01")).unwrap_err(),
            ValidationError::EmptyActiveDays
        );
    }

    #[test]
    fn active_days_restriction() {
        assert!(!ActiveDays::every_day().restricts());
        assert!(!ActiveDays::from_days([]).restricts());
        assert!(ActiveDays::weekdays().restricts());

        let empty = ActiveDays::from_days([]);
        assert!(empty.is_active(DayOfWeek::Sunday));
        assert!(!ActiveDays::weekdays().is_active(DayOfWeek::Saturday));
    }

    #[test]
    fn active_days_labels() {
        assert_eq!(ActiveDays::every_day().label(), "Every day");
        assert_eq!(ActiveDays::weekdays().label(), "Weekdays");
        assert_eq!(ActiveDays::weekends().label(), "Weekends");
        let custom = ActiveDays::from_days([DayOfWeek::Wednesday, DayOfWeek::Monday]);
        assert_eq!(custom.label(), "Mon, Wed");
    }

    #[test]
    fn habit_json_uses_camel_case() {
        let habit = Habit::new("Read", ActiveDays::weekends(), None, d("2024-01-01")).unwrap();
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01");
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["activeDays"], serde_json::json!([0, 6]));
        assert!(json.get("notifications").is_none());
    }

    #[test]
    fn implicit_entries() {
        assert!(DayEntry::blank(d("2024-01-01")).is_implicit());
        let noted = DayEntry::blank(d("2024-01-01")).with_notes(Some("sick".into()));
        assert!(!noted.is_implicit());
        let whitespace = DayEntry::blank(d("2024-01-01")).with_notes(Some("  ".into()));
        assert!(whitespace.is_implicit());
        assert!(!DayEntry::new(d("2024-01-01"), DayState::Failure).is_implicit());
    }
}
