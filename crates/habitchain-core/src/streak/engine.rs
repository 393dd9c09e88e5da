//! Streak computation over a habit's sparse day history.
//!
//! Everything here is a pure function of a habit snapshot and an evaluation
//! date. Nothing is cached between calls; see [`super::StreakCache`] for the
//! optional memoization layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{CalendarDate, Clock, SystemClock};
use crate::habit::{can_set_exemption, DayEntry, DayState, Habit};

/// Length of the recent-history window.
pub const HISTORY_DAYS: usize = 7;

/// Longest window [`history_window`] will produce, about ten years.
pub const MAX_HISTORY_DAYS: usize = 3660;

/// Metrics derived from one habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current_streak: u64,
    pub longest_streak: u64,
    pub total_success: u64,
    pub total_failure: u64,
    pub total_exemption: u64,
}

/// Dates in `[start_date, today]` that fall on one of the habit's active days,
/// oldest first. Reverse the iterator to walk back from today.
pub fn eligible_dates(
    habit: &Habit,
    today: CalendarDate,
) -> impl DoubleEndedIterator<Item = CalendarDate> + '_ {
    habit
        .start_date()
        .range_to(today)
        .filter(move |date| habit.is_active_on(*date))
}

/// Compute streaks and totals for `habit` as of `today`.
pub fn compute_streaks(habit: &Habit, today: CalendarDate) -> StreakInfo {
    let mut info = StreakInfo::default();

    // Totals are a census of stored entries, not bounded by schedule or range.
    for entry in habit.entries().values() {
        match entry.state {
            DayState::Success => info.total_success += 1,
            DayState::Failure => info.total_failure += 1,
            DayState::Exemption => info.total_exemption += 1,
            DayState::Blank => {}
        }
    }

    info.longest_streak = longest_streak(habit, today);
    info.current_streak = current_streak(habit, today);

    debug!(
        habit = %habit.id,
        %today,
        current = info.current_streak,
        longest = info.longest_streak,
        "computed streaks"
    );
    info
}

fn longest_streak(habit: &Habit, today: CalendarDate) -> u64 {
    let mut longest = 0;
    let mut run = 0;
    for date in eligible_dates(habit, today) {
        match habit.state_on(date) {
            DayState::Success => {
                run += 1;
                longest = longest.max(run);
            }
            DayState::Failure | DayState::Blank => run = 0,
            DayState::Exemption => {}
        }
    }
    longest
}

fn current_streak(habit: &Habit, today: CalendarDate) -> u64 {
    let mut current = 0;
    for date in eligible_dates(habit, today).rev() {
        match habit.state_on(date) {
            DayState::Success => current += 1,
            DayState::Exemption => {}
            DayState::Failure => break,
            // Today may still be acted upon.
            DayState::Blank if date == today => {}
            DayState::Blank => break,
        }
    }
    current
}

/// The last `HISTORY_DAYS` calendar days ending at `today`, oldest first.
///
/// Every calendar day appears regardless of the habit's schedule; days with
/// nothing stored resolve to blank.
pub fn recent_history(habit: &Habit, today: CalendarDate) -> Vec<DayEntry> {
    history_window(habit, today, HISTORY_DAYS)
}

/// Like [`recent_history`] with a caller-chosen window length, capped at
/// [`MAX_HISTORY_DAYS`].
pub fn history_window(habit: &Habit, today: CalendarDate, days: usize) -> Vec<DayEntry> {
    let days = days.min(MAX_HISTORY_DAYS);
    (0..days as i64)
        .rev()
        .map(|offset| {
            let date = today.add_days(-offset);
            habit
                .entry(date)
                .cloned()
                .unwrap_or_else(|| DayEntry::blank(date))
        })
        .collect()
}

/// Streak engine bound to a clock.
#[derive(Debug, Clone, Default)]
pub struct StreakEngine<C: Clock = SystemClock> {
    clock: C,
}

impl StreakEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> StreakEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    pub fn compute(&self, habit: &Habit) -> StreakInfo {
        compute_streaks(habit, self.today())
    }

    /// An absent habit has no streaks.
    pub fn compute_or_default(&self, habit: Option<&Habit>) -> StreakInfo {
        habit.map(|h| self.compute(h)).unwrap_or_default()
    }

    pub fn recent_history(&self, habit: &Habit) -> Vec<DayEntry> {
        recent_history(habit, self.today())
    }

    pub fn can_set_exemption(&self, date: CalendarDate) -> bool {
        can_set_exemption(date, self.clock.now())
    }
}
