//! The four-valued day state and its transitions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;

/// State of one habit on one calendar day.
///
/// `Blank` is what a day without a stored entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Success,
    Failure,
    Exemption,
    #[default]
    Blank,
}

impl DayState {
    /// Next state for a tap on the day cell.
    ///
    /// `blank -> success -> failure -> blank`. An exemption stays put; only
    /// the exemption toggle clears it.
    pub fn cycle(self) -> DayState {
        match self {
            DayState::Blank => DayState::Success,
            DayState::Success => DayState::Failure,
            DayState::Failure => DayState::Blank,
            DayState::Exemption => DayState::Exemption,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayState::Success => "success",
            DayState::Failure => "failure",
            DayState::Exemption => "exemption",
            DayState::Blank => "blank",
        }
    }

    /// Single-character glyph for compact terminal output.
    pub fn glyph(self) -> char {
        match self {
            DayState::Success => '✓',
            DayState::Failure => '✗',
            DayState::Exemption => '~',
            DayState::Blank => '·',
        }
    }
}

impl std::fmt::Display for DayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `date` may be marked as an exemption at local time `now`.
///
/// True when local midnight of `date` is at or after local midnight of the
/// day following `now`. Callers reject the request when this is false; the
/// engine never clamps.
pub fn can_set_exemption(date: CalendarDate, now: NaiveDateTime) -> bool {
    let tomorrow = CalendarDate::of(now).add_days(1);
    date.midnight() >= tomorrow.midnight()
}
