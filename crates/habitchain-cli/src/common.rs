//! Argument parsing shared by the command modules.

use habitchain_core::{ActiveDays, CalendarDate, Clock, DayOfWeek, FixedClock, SystemClock};
use tracing::debug;

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Clock for this invocation: midnight of `--today` when given, otherwise
/// the local wall clock read once at startup.
pub fn clock(today: Option<&str>) -> CmdResult<FixedClock> {
    let clock = match today {
        Some(raw) => FixedClock::at_midnight(parse_date(raw)?),
        None => FixedClock(SystemClock.now()),
    };
    debug!(today = %clock.today(), pinned = today.is_some(), "clock resolved");
    Ok(clock)
}

/// Parse a date argument; `today`, `yesterday` and `tomorrow` are accepted too.
pub fn parse_date_rel(raw: &str, clock: &FixedClock) -> CmdResult<CalendarDate> {
    match raw {
        "today" => Ok(clock.today()),
        "yesterday" => Ok(clock.today().add_days(-1)),
        "tomorrow" => Ok(clock.today().add_days(1)),
        other => parse_date(other),
    }
}

pub fn parse_date(raw: &str) -> CmdResult<CalendarDate> {
    Ok(raw.trim().parse::<CalendarDate>()?)
}

/// Parse an active-day list.
///
/// Accepts `every-day`, `weekdays`, `weekends`, or a comma-separated list of
/// day numbers (Sunday = 0) and short names (`mon,wed,fri`).
pub fn parse_days(raw: &str) -> CmdResult<ActiveDays> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "every-day" | "everyday" | "all" => return Ok(ActiveDays::every_day()),
        "weekdays" => return Ok(ActiveDays::weekdays()),
        "weekends" => return Ok(ActiveDays::weekends()),
        _ => {}
    }

    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day = match part.parse::<u8>() {
            Ok(n) => DayOfWeek::try_from(n)?,
            Err(_) => DayOfWeek::ALL
                .iter()
                .copied()
                .find(|d| {
                    d.short_name().eq_ignore_ascii_case(part) || d.name().eq_ignore_ascii_case(part)
                })
                .ok_or_else(|| format!("unknown day: {part}"))?,
        };
        days.push(day);
    }
    Ok(ActiveDays::from_days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_lists() {
        assert_eq!(parse_days("weekdays").unwrap(), ActiveDays::weekdays());
        assert_eq!(parse_days("0,6").unwrap(), ActiveDays::weekends());
        assert_eq!(
            parse_days("Mon, wed,FRI").unwrap(),
            ActiveDays::from_days([DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday])
        );
        assert!(parse_days("7").is_err());
        assert!(parse_days("someday").is_err());
        assert!(parse_days("").unwrap().is_empty());
    }

    #[test]
    fn relative_dates_follow_the_clock() {
        let clock = clock(Some("2024-03-01")).unwrap();
        assert_eq!(parse_date_rel("today", &clock).unwrap().to_string(), "2024-03-01");
        assert_eq!(parse_date_rel("yesterday", &clock).unwrap().to_string(), "2024-02-29");
        assert_eq!(parse_date_rel("2024-01-05", &clock).unwrap().to_string(), "2024-01-05");
        assert!(parse_date_rel("01/05/2024", &clock).is_err());
    }
}
