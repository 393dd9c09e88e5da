use chrono::{Local, NaiveDateTime};

use super::CalendarDate;

/// Source of local wall-clock time.
pub trait Clock {
    /// Current local date and time, without a timezone attached.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> CalendarDate {
        CalendarDate::of(self.now())
    }
}

/// Reads the process's local timezone at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// A clock frozen at local midnight of `date`.
    pub fn at_midnight(date: CalendarDate) -> Self {
        Self(date.midnight())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_today_is_its_date() {
        let date: CalendarDate = "2024-06-15".parse().unwrap();
        let clock = FixedClock(date.midnight() + chrono::Duration::hours(23));
        assert_eq!(clock.today(), date);
        assert_eq!(FixedClock::at_midnight(date).today(), date);
    }
}
