//! Gesture handlers that change a habit.
//!
//! Every change goes through [`Habit::put_entry`] or [`Habit::clear_entry`],
//! which apply the entry lifecycle: a blank day with no notes is removed
//! instead of stored.

use chrono::NaiveDateTime;
use tracing::debug;

use super::model::validate_name;
use super::{can_set_exemption, ActiveDays, DayEntry, DayState, Habit};
use crate::date::CalendarDate;
use crate::error::ValidationError;

impl Habit {
    /// Store `entry`, or drop the day back to implicit blank when the entry
    /// carries nothing.
    pub fn put_entry(&mut self, mut entry: DayEntry) {
        entry.notes = entry
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if entry.is_implicit() {
            self.entries.remove(&entry.date);
        } else {
            self.entries.insert(entry.date, entry);
        }
        self.touch();
    }

    /// Remove whatever is stored for `date`. Returns the removed entry.
    pub fn clear_entry(&mut self, date: CalendarDate) -> Option<DayEntry> {
        let removed = self.entries.remove(&date);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Tap on a day cell: advance the state one step.
    ///
    /// Only past or present active days can be tapped. Landing on `blank`
    /// removes the entry, notes included.
    pub fn tap(
        &mut self,
        date: CalendarDate,
        today: CalendarDate,
    ) -> Result<DayState, ValidationError> {
        if date.is_future(today) {
            return Err(ValidationError::FutureDate { date });
        }
        self.ensure_active(date)?;

        let next = self.state_on(date).cycle();
        if next == DayState::Blank {
            self.clear_entry(date);
        } else {
            let notes = self.entry(date).and_then(|e| e.notes.clone());
            self.put_entry(DayEntry::new(date, next).with_notes(notes));
        }
        debug!(habit = %self.id, %date, state = %next, "day tapped");
        Ok(next)
    }

    /// Replace the notes for `date`, keeping its state.
    pub fn annotate(&mut self, date: CalendarDate, notes: &str) -> Result<(), ValidationError> {
        self.ensure_active(date)?;
        let state = self.state_on(date);
        let notes = Some(notes.trim().to_string());
        self.put_entry(DayEntry::new(date, state).with_notes(notes));
        Ok(())
    }

    /// Turn the exemption for `date` on or off.
    ///
    /// Turning it on requires at least a day of notice relative to `now`.
    /// Turning it off returns an exempted day to blank, keeping its notes;
    /// days in any other state are left alone.
    pub fn set_exemption(
        &mut self,
        date: CalendarDate,
        exempt: bool,
        now: NaiveDateTime,
    ) -> Result<(), ValidationError> {
        self.ensure_active(date)?;
        let notes = self.entry(date).and_then(|e| e.notes.clone());

        if exempt {
            if !can_set_exemption(date, now) {
                return Err(ValidationError::ExemptionTooSoon { date });
            }
            self.put_entry(DayEntry::new(date, DayState::Exemption).with_notes(notes));
        } else if self.state_on(date) == DayState::Exemption {
            self.put_entry(DayEntry::blank(date).with_notes(notes));
        }
        Ok(())
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Change which days are scheduled and where history begins.
    pub fn set_schedule(
        &mut self,
        active_days: ActiveDays,
        start_date: CalendarDate,
    ) -> Result<(), ValidationError> {
        if active_days.is_empty() {
            return Err(ValidationError::EmptyActiveDays);
        }
        self.active_days = active_days;
        self.start_date = start_date;
        self.touch();
        Ok(())
    }

    fn ensure_active(&self, date: CalendarDate) -> Result<(), ValidationError> {
        if self.is_active_on(date) {
            Ok(())
        } else {
            Err(ValidationError::InactiveDay { date })
        }
    }
}
